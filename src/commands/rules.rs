use anyhow::Result;
use deadline_core::RuleTable;

use crate::render::Render;

pub fn run(rules: &RuleTable) -> Result<()> {
    if rules.is_empty() {
        println!("No deadline rules configured.");
        return Ok(());
    }

    println!("Deadline rules (days before trial):");
    for rule in rules {
        println!("  {}", rule.render());
    }

    Ok(())
}
