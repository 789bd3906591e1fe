use anyhow::{Context, Result};
use deadline_core::entry::parse_wire_date;
use deadline_core::{RuleTable, compute};

use crate::render::render_deadlines;

pub fn run(trial_date: &str, rules: &RuleTable, json: bool) -> Result<()> {
    let Some(trial) = parse_wire_date(trial_date) else {
        anyhow::bail!("Invalid trial date '{}'. Expected YYYY-MM-DD", trial_date);
    };

    let entries = compute(trial, rules);

    if json {
        let output =
            serde_json::to_string_pretty(&entries).context("Failed to serialize deadlines")?;
        println!("{}", output);
        return Ok(());
    }

    for line in render_deadlines(trial, &entries) {
        println!("{}", line);
    }

    Ok(())
}
