//! Command dispatch and error reporting for the shell.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::errors::{LedgerError, ValidationError};

use super::output;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that end the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Input(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_command(self.registry.names(), input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Validation(err) => {
                output::error(format!("Transaction rejected: {}", err));
            }
            other => output::error(other),
        }
    }
}

/// The registered name nearest to `input`, if within edit distance 3.
pub(crate) fn closest_command<'a>(
    names: impl Iterator<Item = &'a str>,
    input: &str,
) -> Option<&'a str> {
    let needle = input.to_lowercase();
    names
        .map(|name| (levenshtein(name, &needle), name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

#[cfg(test)]
pub(crate) fn process_script(home: &std::path::Path, lines: &[&str]) -> ShellContext {
    let mut context = ShellContext::with_home(CliMode::Script, home.to_path_buf());
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Theme;
    use crate::ledger::TransactionKind;
    use tempfile::tempdir;

    #[test]
    fn parse_line_handles_quotes() {
        let tokens =
            crate::cli::shell::parse_command_line("add expense 12 2024-01-01 \"Corner shop\"")
                .unwrap();
        assert_eq!(
            tokens,
            vec!["add", "expense", "12", "2024-01-01", "Corner shop"]
        );
    }

    #[test]
    fn suggestions_stay_within_distance() {
        let names = ["add", "delete", "summary"];
        assert_eq!(closest_command(names.iter().copied(), "delet"), Some("delete"));
        assert_eq!(closest_command(names.iter().copied(), "SUMARY"), Some("summary"));
        assert_eq!(closest_command(names.iter().copied(), "reconcile"), None);
    }

    #[test]
    fn script_adds_and_deletes() {
        let home = tempdir().unwrap();
        let context = process_script(
            home.path(),
            &[
                "add income 100 2024-01-01 Salary",
                "add expense 40 2024-01-02 Rent",
                "delete 1",
                "exit",
            ],
        );
        let list = context.session.store().list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].kind, TransactionKind::Income);
        assert!(!context.running);
    }

    #[test]
    fn rejected_amount_leaves_ledger_empty() {
        let home = tempdir().unwrap();
        let context = process_script(home.path(), &["add expense abc", "delete 1"]);
        assert!(context.session.store().is_empty());
        assert!(context.running);
    }

    #[test]
    fn state_survives_a_new_context() {
        let home = tempdir().unwrap();
        process_script(home.path(), &["add income 10 2024-05-01 Gift", "theme"]);
        let context = process_script(home.path(), &[]);
        assert_eq!(context.session.store().len(), 1);
        assert_eq!(context.session.theme(), Theme::Light);
    }
}
