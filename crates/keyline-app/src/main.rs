//! keyline console entry point.
//!
//! Reads keys from stdin and feeds them to the command dispatcher. Press
//! `q` to quit, `.` to type a long command, any unbound key for help.
//! An optional first argument names a TOML config file.

mod app_state;
mod commands;
mod input;

use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use app_state::AppState;
use keyline_terminal::{CommandRegistry, Session};
use keyline_types::config::KeylineConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => KeylineConfig::load(Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => KeylineConfig::default(),
    };
    log::info!(
        "Starting keyline (long commands on '{}')",
        config.long_prefix
    );

    let mut registry = CommandRegistry::with_config(config)?;
    let (block, long) = commands::register_demo_commands(&mut registry)?;
    log::info!(
        "Registered {} key commands and {} long commands",
        registry.command_count(),
        registry.long_count()
    );

    let state = AppState::new();
    run(&registry, &state)?;

    registry.unregister_long_commands(&long);
    registry.unregister_commands(&block);
    log::info!("keyline shut down cleanly");
    Ok(())
}

/// Dispatch stdin until EOF or the quit command.
fn run(registry: &CommandRegistry, state: &AppState) -> Result<()> {
    let dispatcher = registry.dispatcher();
    let mut slot: Option<Session> = None;
    let mut out = String::new();
    let mut stdout = io::stdout();
    let mut previous = None;

    for byte in io::stdin().lock().bytes() {
        let byte = byte.context("reading stdin")?;
        let mapped = input::map_console_byte(byte, previous);
        previous = Some(byte);
        let Some(code) = mapped else {
            continue;
        };
        if !input::should_dispatch(code, registry, slot.is_some()) {
            continue;
        }

        if let Err(e) = dispatcher.process(Some(&mut slot), code, &mut out, Some(state)) {
            log::warn!("command failed: {e}");
            out.push_str(&format!("error: {e}\n"));
        }
        stdout.write_all(out.as_bytes())?;
        stdout.flush()?;
        out.clear();

        if state.quit.get() {
            break;
        }
    }
    Ok(())
}
