use super::commands::{parse_command, Command, HELP};
use super::example::EXAMPLE_TEXT;
use super::notepad::Notepad;
use crate::render::{format_number, render_rows};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Drive a [`Notepad`] from line-oriented commands until `quit` or EOF.
///
/// The listing is printed after every successful edit; errors are reported
/// to `out` and the loop keeps going.
pub fn run_repl<R: BufRead, W: Write>(
    notepad: &mut Notepad,
    input: R,
    out: &mut W,
    precision: usize,
) -> io::Result<()> {
    writeln!(out, "{HELP}")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(out, "> ")?;
            out.flush()?;
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                write!(out, "> ")?;
                out.flush()?;
                continue;
            }
        };
        debug!(?command, "interactive command");

        let edited = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(false)
            }
            Command::Show => Ok(true),
            Command::Vars => {
                for (name, value, defined_at) in notepad.context().entries() {
                    writeln!(
                        out,
                        "  {name} = {} (line {})",
                        format_number(value, precision),
                        defined_at + 1
                    )?;
                }
                Ok(false)
            }
            Command::Example => {
                notepad.set_text(EXAMPLE_TEXT);
                Ok(true)
            }
            Command::Clear => {
                notepad.clear();
                Ok(true)
            }
            Command::Append(text) => {
                notepad.push_line(&text);
                Ok(true)
            }
            Command::Set { line, text } => notepad.set_line(line - 1, &text).map(|_| true),
            Command::Insert { line, text } => notepad.insert_line(line - 1, &text).map(|_| true),
            Command::Delete(line) => notepad.remove_line(line - 1).map(|_| true),
            Command::Wrap(line) => notepad.wrap_in_block(line - 1).map(|_| true),
        };

        match edited {
            Ok(true) => write!(out, "{}", render_rows(notepad.rows(), precision))?,
            Ok(false) => {}
            Err(err) => writeln!(out, "error: {err}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    info!(lines = notepad.lines().len(), "interactive session finished");
    writeln!(out)?;
    Ok(())
}
