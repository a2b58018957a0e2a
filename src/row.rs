use serde::{Deserialize, Serialize};

/// What a line evaluated to: a number, or the reason it is invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineResult {
    Number(f64),
    Error(String),
}

/// One line's expression plus its computed result and validity flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub expression: String,
    pub result: Option<LineResult>,
    pub is_invalid: bool,
    /// The value came from a sum; other sums skip this row.
    #[serde(skip)]
    pub is_sum: bool,
}

impl Row {
    /// Blank, comment, or block interior line.
    pub fn empty(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: None,
            is_invalid: false,
            is_sum: false,
        }
    }

    pub fn value(expression: impl Into<String>, value: f64) -> Self {
        Self {
            expression: expression.into(),
            result: Some(LineResult::Number(value)),
            is_invalid: false,
            is_sum: false,
        }
    }

    /// A value produced by `sum` or `sum(...)`.
    pub fn sum(expression: impl Into<String>, value: f64) -> Self {
        Self {
            is_sum: true,
            ..Self::value(expression, value)
        }
    }

    pub fn invalid(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: Some(LineResult::Error(message.into())),
            is_invalid: true,
            is_sum: false,
        }
    }

    /// The numeric result, if this row holds one.
    pub fn number(&self) -> Option<f64> {
        match self.result {
            Some(LineResult::Number(n)) => Some(n),
            _ => None,
        }
    }
}
