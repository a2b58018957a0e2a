mod commands;
mod example;
mod notepad;
mod repl;

pub use commands::{parse_command, Command, CommandError, HELP};
pub use example::EXAMPLE_TEXT;
pub use notepad::{EditError, Notepad};
pub use repl::run_repl;
