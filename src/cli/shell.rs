//! Line-oriented front end: a line editor on a terminal, or one command per
//! stdin line when `LEDGER_CORE_CLI_SCRIPT` is set.

use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, Validator,
};
use shell_words::split;

use crate::cli::{
    core::{CliError, CliMode, LoopControl, ShellContext},
    output,
};

const SCRIPT_ENV: &str = "LEDGER_CORE_CLI_SCRIPT";

const FILTER_WORDS: [&str; 3] = ["all", "income", "expense"];
const KIND_WORDS: [&str; 2] = ["income", "expense"];
const CONFIG_WORDS: [&str; 2] = ["show", "set"];
const CONFIG_KEYS: [&str; 2] = ["decimal_separator", "color"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<LedgerHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(LedgerHelper {
        commands: context.command_names(),
    }));
    output::info("Type `help` for the list of commands.");

    while context.running {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str()).ok();
        }
        execute(context, &line);
    }
    Ok(())
}

/// Runs one command per input line without prompting.
pub fn run_script<R: BufRead>(context: &mut ShellContext, input: R) -> Result<(), CliError> {
    for line in input.lines() {
        if execute(context, &line?) == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Command failures are printed here; only `exit` ends the session.
fn execute(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("cannot read `{}`: {err}", line.trim()));
            return LoopControl::Continue;
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    if raw.starts_with('#') {
        return LoopControl::Continue;
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    match context.dispatch(&raw.to_lowercase(), raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            LoopControl::Exit
        }
        Ok(LoopControl::Continue) => LoopControl::Continue,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

/// Completes command names, then the word each command expects next.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct LedgerHelper {
    commands: Vec<&'static str>,
}

impl LedgerHelper {
    fn choices(&self, previous: &[&str]) -> &[&'static str] {
        match previous {
            [] => &self.commands,
            ["list" | "ls"] => &FILTER_WORDS,
            ["add", _, _, _] => &KIND_WORDS,
            ["config"] => &CONFIG_WORDS,
            ["config", "set"] => &CONFIG_KEYS,
            _ => &[],
        }
    }
}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let word = head.rsplit(char::is_whitespace).next().unwrap_or_default();
        let start = pos - word.len();

        let previous: Vec<String> = head[..start]
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let previous: Vec<&str> = previous.iter().map(String::as_str).collect();
        let needle = word.to_lowercase();

        let candidates = self
            .choices(&previous)
            .iter()
            .filter(|choice| choice.starts_with(&needle))
            .map(|choice| Pair {
                display: choice.to_string(),
                replacement: choice.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}
