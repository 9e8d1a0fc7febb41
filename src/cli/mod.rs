pub mod commands;
pub mod core;
mod help;
pub mod output;
pub mod paths;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use shell::run_cli;
