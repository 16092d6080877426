//! Line-oriented shell over a [`Ledger`](crate::ledger::Ledger).

pub mod commands;
pub mod core;
pub mod output;
mod shell;

pub use shell::{run_cli, run_script};
