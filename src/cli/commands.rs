//! Command handlers for the ledger shell.

use crate::{
    cli::{
        core::{CommandError, LoopControl, ShellContext},
        output,
    },
    currency::AmountLocale,
    ledger::{Transaction, TransactionDraft, TransactionFilter, TransactionKind},
};

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add",
        usage: "add <YYYY-MM-DD> <description> <value> <income|expense>",
        summary: "Record a new transaction",
    },
    CommandSpec {
        name: "remove",
        usage: "remove <id> [--yes]",
        summary: "Delete a transaction",
    },
    CommandSpec {
        name: "list",
        usage: "list [all|income|expense]",
        summary: "Show transactions, newest first",
    },
    CommandSpec {
        name: "balance",
        usage: "balance",
        summary: "Show income, expense and the running balance",
    },
    CommandSpec {
        name: "config",
        usage: "config [set <decimal_separator|color> <value>]",
        summary: "Show or change preferences",
    },
    CommandSpec {
        name: "version",
        usage: "version",
        summary: "Show build information",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "List available commands",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
    },
];

const SUGGESTION_DISTANCE: usize = 2;

pub(crate) fn dispatch(
    context: &mut ShellContext,
    command: &str,
    raw: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    match command {
        "add" => add(context, args)?,
        "remove" | "rm" | "delete" => remove(context, args)?,
        "list" | "ls" => list(context, args)?,
        "balance" => balance(context),
        "config" => config(context, args)?,
        "version" => version(),
        "help" => help(),
        "exit" | "quit" => return Ok(LoopControl::Exit),
        _ => unknown(raw),
    }
    Ok(LoopControl::Continue)
}

fn usage_error(name: &str) -> CommandError {
    let usage: &str = COMMANDS
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.usage)
        .unwrap_or(name);
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

fn add(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let [date, description, value, kind] = args else {
        return Err(usage_error("add"));
    };
    let kind: TransactionKind = kind.parse().map_err(CommandError::InvalidArguments)?;
    let draft = TransactionDraft::new(*date, *description, *value, kind);

    let transaction = context.ledger.add(&draft)?;
    output::success(format!(
        "Added {} {} ({:.2}) on {} as #{}",
        transaction.kind,
        transaction.description,
        transaction.value,
        transaction.date,
        transaction.id
    ));
    report_storage(context);
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let (id, assume_yes) = match args {
        [id] => (*id, false),
        [id, "--yes" | "-y"] | ["--yes" | "-y", id] => (*id, true),
        _ => return Err(usage_error("remove")),
    };
    let id: i64 = id
        .trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{id}` is not a transaction id")))?;

    if !assume_yes {
        let prompt = match context.ledger.get(id) {
            Some(txn) => format!("Delete #{} {} ({:.2})?", txn.id, txn.description, txn.value),
            None => format!("Delete #{id}?"),
        };
        if !context.confirm(&prompt)? {
            output::info("Nothing removed.");
            return Ok(());
        }
    }

    if context.ledger.remove(id) {
        output::success(format!("Removed transaction #{id}"));
        report_storage(context);
    } else {
        output::warning(format!("No transaction with id {id}"));
    }
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let filter = match args {
        [] => TransactionFilter::All,
        [filter] => filter
            .parse::<TransactionFilter>()
            .map_err(CommandError::InvalidArguments)?,
        _ => return Err(usage_error("list")),
    };

    let mut rows = context.ledger.list(filter);
    if rows.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }
    // Stable sort: entries sharing a date keep insertion order.
    rows.sort_by(|a, b| b.date.cmp(&a.date));

    output::line(format!(
        "{:<15} {:<10} {:<7} {:>12}  {}",
        "ID", "DATE", "KIND", "VALUE", "DESCRIPTION"
    ));
    for txn in &rows {
        output::line(render_row(txn));
    }
    Ok(())
}

fn render_row(txn: &Transaction) -> String {
    let value = output::signed_amount(txn.signed_value());
    format!(
        "{:<15} {:<10} {:<7} {:>12}  {}",
        txn.id,
        txn.date.to_string(),
        txn.kind.to_string(),
        value,
        txn.description
    )
}

fn balance(context: &ShellContext) {
    let totals = context.ledger.totals();
    output::line(format!("Income:  {:.2}", totals.income));
    output::line(format!("Expense: {:.2}", totals.expense));
    output::line(format!(
        "Balance: {}",
        output::signed_amount(totals.balance)
    ));
}

fn config(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    match args {
        [] => {
            let config = &context.config;
            output::line(format!(
                "config file:       {}",
                context.config_manager.config_path().display()
            ));
            output::line(format!(
                "data directory:    {}",
                config.resolve_data_dir(&context.home).display()
            ));
            output::line(format!("storage key:       {}", config.storage_key));
            output::line(format!("decimal separator: {}", config.decimal_separator));
            output::line(format!(
                "color:             {}",
                if config.ui_color_enabled { "on" } else { "off" }
            ));
            Ok(())
        }
        ["set", "decimal_separator", value] => {
            let locale: AmountLocale = value.parse().map_err(CommandError::InvalidArguments)?;
            context.config.decimal_separator = locale;
            context.ledger.set_locale(locale);
            save_config(context)
        }
        ["set", "color", value] => {
            let enabled = match value.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "expected on or off, got `{other}`"
                    )))
                }
            };
            context.config.ui_color_enabled = enabled;
            output::set_color_enabled(enabled);
            save_config(context)
        }
        _ => Err(usage_error("config")),
    }
}

fn save_config(context: &ShellContext) -> Result<(), CommandError> {
    context.config_manager.save(&context.config)?;
    output::success("Configuration saved.");
    Ok(())
}

fn report_storage(context: &ShellContext) {
    if let Some(err) = context.ledger.storage_failure() {
        output::warning(format!(
            "changes could not be saved and will only last for this session: {err}"
        ));
    }
}

fn version() {
    output::line(format!(
        "ledger_core {} ({} {}, built {} [{}])",
        env!("CARGO_PKG_VERSION"),
        env!("LEDGER_CORE_BUILD_HASH"),
        env!("LEDGER_CORE_BUILD_STATUS"),
        env!("LEDGER_CORE_BUILD_TIMESTAMP"),
        env!("LEDGER_CORE_BUILD_PROFILE"),
    ));
}

fn help() {
    output::line("Commands:");
    for spec in COMMANDS {
        output::line(format!("  {:<58} {}", spec.usage, spec.summary));
    }
}

fn unknown(raw: &str) {
    match suggest(raw) {
        Some(name) => output::warning(format!("Unknown command `{raw}`. Did you mean `{name}`?")),
        None => output::warning(format!("Unknown command `{raw}`. Type `help` for a list.")),
    }
}

fn suggest(raw: &str) -> Option<&'static str> {
    let needle = raw.to_ascii_lowercase();
    COMMANDS
        .iter()
        .map(|spec| (spec.name, strsim::levenshtein(&needle, spec.name)))
        .filter(|(_, distance)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_commands_only() {
        assert_eq!(suggest("blance"), Some("balance"));
        assert_eq!(suggest("LIS"), Some("list"));
        assert_eq!(suggest("transfer"), None);
    }

    #[test]
    fn every_command_has_usage() {
        for spec in COMMANDS {
            assert!(spec.usage.starts_with(spec.name));
            assert!(!spec.summary.is_empty());
        }
    }
}
