//! Demo command set wired into the registry at startup.

use std::fmt;

use keyline_terminal::{
    CommandArg, CommandBlock, CommandFlags, CommandRegistry, FixedCommand, LongCommand,
};
use keyline_types::error::{KeylineError, Result};

use crate::app_state::{AppState, CONTACTS};

/// Fixed-key commands.
pub fn command_block() -> CommandBlock {
    CommandBlock::new(vec![
        FixedCommand::new(b'q', CommandFlags::NONE, "Quit", quit),
        FixedCommand::new(b'd', CommandFlags::PARAM, "Dial", dial),
        FixedCommand::new(b'/', CommandFlags::PROGRESSIVE, "Search contacts", search),
        FixedCommand::new(b'r', CommandFlags::NONE, "Redial last number", redial),
    ])
}

/// Long commands.
pub fn long_commands() -> Vec<LongCommand> {
    vec![
        LongCommand::new("about", CommandFlags::NONE, "About keyline", about),
        LongCommand::new("echo", CommandFlags::PARAM, "Print the parameter", echo),
        LongCommand::new("uptime", CommandFlags::NONE, "Time since start", uptime),
        LongCommand::new("dial", CommandFlags::PARAM, "Dial a URI", dial),
    ]
}

/// Register the demo commands. Returns the block so it can be unregistered
/// at shutdown.
pub fn register_demo_commands(reg: &mut CommandRegistry) -> Result<(CommandBlock, Vec<LongCommand>)> {
    let block = command_block();
    let long = long_commands();
    reg.register_commands(&block)?;
    reg.register_long_commands(&long)?;
    Ok((block, long))
}

fn state<'a>(arg: &CommandArg<'a>) -> Result<&'a AppState> {
    arg.context::<AppState>()
        .ok_or_else(|| KeylineError::Command("application state missing".to_string()))
}

fn quit(out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    state(arg)?.quit.set(true);
    writeln!(out, "\nBye")?;
    Ok(())
}

fn dial(out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    let Some(target) = arg.param.map(str::trim).filter(|p| !p.is_empty()) else {
        writeln!(out, "usage: dial <number or uri>")?;
        return Ok(());
    };
    state(arg)?.dialed.borrow_mut().push(target.to_string());
    log::info!("Dialing {target}");
    writeln!(out, "Dialing {target} ...")?;
    Ok(())
}

fn redial(out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    let last = state(arg)?.dialed.borrow().last().cloned();
    match last {
        Some(target) => writeln!(out, "Redialing {target} ...")?,
        None => writeln!(out, "Nothing to redial")?,
    }
    Ok(())
}

fn search(out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    let query = arg.param.unwrap_or_default().to_ascii_lowercase();
    let hits: Vec<&(&str, &str)> = CONTACTS
        .iter()
        .filter(|(name, _)| name.starts_with(query.as_str()))
        .collect();

    if !arg.complete {
        write!(out, "   [{} match{}]", hits.len(), if hits.len() == 1 { "" } else { "es" })?;
        return Ok(());
    }
    for (name, uri) in hits {
        writeln!(out, "  {name:<8} {uri}")?;
    }
    Ok(())
}

fn about(out: &mut dyn fmt::Write, _arg: &CommandArg<'_>) -> Result<()> {
    writeln!(out, "keyline {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

fn echo(out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    writeln!(out, "{}", arg.param.unwrap_or_default())?;
    Ok(())
}

fn uptime(out: &mut dyn fmt::Write, arg: &CommandArg<'_>) -> Result<()> {
    let secs = state(arg)?.started.elapsed().as_secs();
    writeln!(out, "up {}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)?;
    Ok(())
}
