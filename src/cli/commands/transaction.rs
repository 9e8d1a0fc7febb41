use chrono::{Local, NaiveDate};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{TransactionInput, TransactionKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense",
            "add <income|expense> <amount> [YYYY-MM-DD] [category...]",
            cmd_add,
        ),
        CommandEntry::new(
            "delete",
            "Delete the transaction on a listed row",
            "delete <row>",
            cmd_delete,
        ),
        CommandEntry::new("list", "Show transactions and totals", "list", cmd_list),
        CommandEntry::new(
            "summary",
            "Show totals and the income/expense chart",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("theme", "Toggle between light and dark", "theme", cmd_theme),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <amount> [YYYY-MM-DD] [category...]".into(),
        ));
    };
    let kind = parse_kind(kind)?;
    let (date, category) = split_date(rest);
    let input = TransactionInput::new(kind.as_str(), *amount, date, category);

    let txn = context.session.submit(&input)?;
    output::success(format!(
        "Recorded {} of {}.",
        txn.kind.as_str(),
        context.session.view().format().format(txn.amount.money())
    ));
    context.show_frame();
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = match args {
        [row] => row.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a row number", row))
        })?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: delete <row>".into(),
            ))
        }
    };

    match context.session.activate_delete(row) {
        Some(_) => {
            output::success(format!("Deleted row {}.", row));
            context.show_frame();
            Ok(())
        }
        None => Err(CommandError::InvalidArguments(format!(
            "no transaction on row {} (use `list` to see rows)",
            row
        ))),
    }
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Transactions");
    context.show_frame();
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.session.view();
    let totals = view.totals_view(&context.session.totals());
    output::section("Summary");
    output::block(&format!("Income : {}", totals.income));
    output::block(&format!("Expense: {}", totals.expense));
    output::block(&format!("Balance: {}", totals.balance));
    context.show_chart();
    Ok(())
}

fn cmd_theme(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let theme = context.session.toggle_theme();
    output::success(format!("Theme set to {} {}", theme, theme.icon()));
    Ok(())
}

fn parse_kind(token: &str) -> Result<TransactionKind, CommandError> {
    match token.to_ascii_lowercase().as_str() {
        "income" | "in" => Ok(TransactionKind::Income),
        "expense" | "out" => Ok(TransactionKind::Expense),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction type `{}` (use income or expense)",
            other
        ))),
    }
}

/// A leading `YYYY-MM-DD` token is the date; otherwise the date is today and
/// every token belongs to the category.
fn split_date(rest: &[&str]) -> (String, String) {
    match rest.split_first() {
        Some((first, tail)) if NaiveDate::parse_from_str(first, DATE_FORMAT).is_ok() => {
            (first.to_string(), tail.join(" "))
        }
        _ => (
            Local::now().date_naive().format(DATE_FORMAT).to_string(),
            rest.join(" "),
        ),
    }
}
