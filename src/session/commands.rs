use thiserror::Error;

/// One interactive command. Line numbers are one-based as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { line: usize, text: String },
    Insert { line: usize, text: String },
    Append(String),
    Delete(usize),
    Wrap(usize),
    Show,
    Vars,
    Example,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unbalanced quotes")]
    Quotes,
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("`{0}` needs a line number")]
    MissingLine(&'static str),
    #[error("invalid line number: {0}")]
    InvalidLine(String),
}

pub const HELP: &str = "Commands: set N TEXT, insert N TEXT, append TEXT, delete N, wrap N, \
show, vars, example, clear, help, quit";

/// Parse one input line. Words are split shell-style, so TEXT may be
/// quoted to keep its spacing.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let words = shlex::split(input).ok_or(CommandError::Quotes)?;
    let mut words = words.into_iter();
    let name = words.next().ok_or(CommandError::Empty)?.to_lowercase();
    let rest: Vec<String> = words.collect();

    let command = match name.as_str() {
        "set" | "s" => {
            let (line, text) = line_and_text("set", &rest)?;
            Command::Set { line, text }
        }
        "insert" | "i" => {
            let (line, text) = line_and_text("insert", &rest)?;
            Command::Insert { line, text }
        }
        "append" | "a" => Command::Append(rest.join(" ")),
        "delete" | "d" => Command::Delete(line_number("delete", &rest)?),
        "wrap" | "w" => Command::Wrap(line_number("wrap", &rest)?),
        "show" | "p" => Command::Show,
        "vars" | "v" => Command::Vars,
        "example" => Command::Example,
        "clear" => Command::Clear,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(name)),
    };
    Ok(command)
}

fn line_number(command: &'static str, rest: &[String]) -> Result<usize, CommandError> {
    let word = rest.first().ok_or(CommandError::MissingLine(command))?;
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandError::InvalidLine(word.clone())),
    }
}

fn line_and_text(command: &'static str, rest: &[String]) -> Result<(usize, String), CommandError> {
    let line = line_number(command, rest)?;
    Ok((line, rest[1..].join(" ")))
}
