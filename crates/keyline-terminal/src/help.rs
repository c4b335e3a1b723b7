//! Help listing of every registered command.

use std::fmt;

use keyline_types::error::Result;

use crate::registry::CommandRegistry;

/// Write the help listing to `out`.
///
/// Fixed-key commands come first, in ascending key order, skipping those
/// without a description. Long commands follow in display order, prefixed
/// with the long-command key and marked `..` when they take a parameter.
pub fn print_help(registry: &CommandRegistry, out: &mut dyn fmt::Write) -> Result<()> {
    let config = registry.config();
    let width = config.help_width;

    writeln!(out, "--- Help ---")?;
    for key in 1..=u8::MAX {
        let Some(cmd) = registry.find_command(key) else {
            continue;
        };
        if cmd.description().is_empty() {
            continue;
        }
        writeln!(out, " {:<width$}   {}", cmd.display_name(), cmd.description())?;
    }
    writeln!(out)?;

    writeln!(out, "Long commands: ({})", registry.long_count())?;
    let width = registry
        .long_commands()
        .map(|c| c.name().chars().count())
        .fold(width, usize::max);
    for cmd in registry.long_commands() {
        let marker = if cmd.flags().requires_param {
            ".."
        } else {
            "  "
        };
        writeln!(
            out,
            " {}{:<width$}   {}   {}",
            config.long_prefix,
            cmd.name(),
            marker,
            cmd.description()
        )?;
    }
    writeln!(out)?;

    Ok(())
}

/// The help listing as a string.
pub fn render_help(registry: &CommandRegistry) -> Result<String> {
    let mut out = String::new();
    print_help(registry, &mut out)?;
    Ok(out)
}
