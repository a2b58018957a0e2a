use crate::eval::VariableContext;
use crate::executor::{evaluate_with_previous, Pass};
use crate::parser::{is_comment, BLOCK_END, BLOCK_START};
use crate::row::Row;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("line {line} is out of range (buffer has {len} lines)")]
    OutOfRange { line: usize, len: usize },
}

/// An in-memory document that is fully re-evaluated after every edit.
///
/// Line indices are zero-based. Rows always match a fresh evaluation of
/// the current lines.
#[derive(Debug, Clone, Default)]
pub struct Notepad {
    lines: Vec<String>,
    pass: Pass,
}

impl Notepad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut notepad = Self::new();
        notepad.set_text(text);
        notepad
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn rows(&self) -> &[Row] {
        &self.pass.rows
    }

    pub fn context(&self) -> &VariableContext {
        &self.pass.context
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the whole buffer, e.g. after a paste.
    pub fn set_text(&mut self, text: &str) -> &[Row] {
        self.lines = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        self.reevaluate()
    }

    pub fn set_line(&mut self, index: usize, text: &str) -> Result<&[Row], EditError> {
        self.check(index)?;
        self.lines[index] = text.to_string();
        Ok(self.reevaluate())
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<&[Row], EditError> {
        if index > self.lines.len() {
            return Err(self.out_of_range(index));
        }
        self.lines.insert(index, text.to_string());
        Ok(self.reevaluate())
    }

    pub fn push_line(&mut self, text: &str) -> &[Row] {
        self.lines.push(text.to_string());
        self.reevaluate()
    }

    pub fn remove_line(&mut self, index: usize) -> Result<&[Row], EditError> {
        self.check(index)?;
        self.lines.remove(index);
        Ok(self.reevaluate())
    }

    /// Structural insert bound to Ctrl+Enter. A comment line gets a fresh
    /// `// ` line below it; any other line is wrapped in a block with an
    /// empty line for continuing the expression.
    pub fn wrap_in_block(&mut self, index: usize) -> Result<&[Row], EditError> {
        self.check(index)?;

        if is_comment(&self.lines[index]) {
            self.lines.insert(index + 1, "// ".to_string());
        } else {
            self.lines.insert(index, BLOCK_START.to_string());
            self.lines.insert(index + 2, String::new());
            self.lines.insert(index + 3, BLOCK_END.to_string());
        }
        Ok(self.reevaluate())
    }

    pub fn clear(&mut self) -> &[Row] {
        self.lines.clear();
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> &[Row] {
        self.pass = evaluate_with_previous(&self.lines, &self.pass);
        &self.pass.rows
    }

    fn check(&self, index: usize) -> Result<(), EditError> {
        if index < self.lines.len() {
            Ok(())
        } else {
            Err(self.out_of_range(index))
        }
    }

    fn out_of_range(&self, index: usize) -> EditError {
        EditError::OutOfRange {
            line: index + 1,
            len: self.lines.len(),
        }
    }
}
