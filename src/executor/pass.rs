use crate::eval::VariableContext;
use crate::row::Row;
use serde::{Deserialize, Serialize};

/// Output of one evaluation pass.
///
/// `context` holds exactly the variables assigned by live lines. It is
/// passed back to [`evaluate_with_previous`](super::evaluate_with_previous)
/// after the next edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    pub rows: Vec<Row>,
    pub context: VariableContext,
}
