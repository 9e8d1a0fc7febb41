use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or change display preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value @ ..] if !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show|set <key> <value>] (keys: {})",
            CONFIG_KEYS.join(", ")
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output::section("Configuration");
    for (key, value) in context.config.entries() {
        output::block(&format!("  {:<20} {}", key, value));
    }
    output::hint(format!("Stored at {}", context.config_manager.path().display()));
    Ok(())
}

/// Validates against a copy so a rejected value never reaches the live
/// config or the file.
fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    context.config = updated;
    context.apply_config();
    output::success(format!("Updated {}.", key));
    Ok(())
}
