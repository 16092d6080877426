use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

fn render(kind: MessageKind, message: impl fmt::Display) -> ColoredString {
    let text = message.to_string();
    match kind {
        MessageKind::Info => format!("INFO: {text}").normal(),
        MessageKind::Success => format!("SUCCESS: {text}").green(),
        MessageKind::Warning => format!("WARNING: {text}").yellow(),
        MessageKind::Error => format!("ERROR: {text}").red().bold(),
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Error, message));
}

/// Plain line without a label, used for tables.
pub fn line(message: impl fmt::Display) {
    println!("{message}");
}

/// Two decimal places, green when non-negative and red otherwise.
pub fn signed_amount(value: Decimal) -> ColoredString {
    let text = format!("{value:.2}");
    if value.is_sign_negative() && !value.is_zero() {
        text.red()
    } else {
        text.green()
    }
}

/// Disables ANSI colors, or returns to terminal auto-detection.
pub fn set_color_enabled(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}
