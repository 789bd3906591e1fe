mod routes;
mod state;

use anyhow::{Context, Result};
use axum::Router;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

const DEFAULT_PORT: u16 = 4096;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::calculate::router())
        .merge(routes::export::router())
        .with_state(state)
        .layer(cors)
}

#[tokio::main]
async fn main() -> Result<()> {
    TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let state = AppState::load()?;

    let port = match std::env::var("DEADLINE_SERVER_PORT") {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid DEADLINE_SERVER_PORT '{}'", value))?,
        Err(_) => DEFAULT_PORT,
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("deadline-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
