use std::io;

mod app;
mod auth;
mod config;
mod console;
mod employees;
mod session;
mod state;
mod storage;

use crate::{console::Console, state::AppState};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "staffbook=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    // stdout belongs to the interactive menus
    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
    }

    let state = AppState::init()?;
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    app::run(&state, &mut console)
}
