use super::pass::Pass;
use crate::eval::{evaluate, substitute_sum_calls, sum_all, sum_call, ExprError, SumError, VariableContext};
use crate::parser::{classify, collect_block, LineKind};
use crate::row::Row;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Why a single line is invalid. Never escapes a pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error(transparent)]
    Sum(#[from] SumError),
    #[error(transparent)]
    Expr(#[from] ExprError),
}

/// Evaluate a whole buffer from scratch. Pure: the same lines always give
/// the same rows, one per line.
pub fn evaluate_all_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Row> {
    run_pass(lines).rows
}

/// Evaluate a buffer after an edit, given the pass before it.
///
/// Every pass starts from an empty context, so a line only ever sees
/// variables assigned above it in this pass. `previous` is used to report
/// variables the edit removed.
pub fn evaluate_with_previous<S: AsRef<str>>(lines: &[S], previous: &Pass) -> Pass {
    let pass = run_pass(lines);
    for (name, _, line) in previous.context.entries() {
        if pass.context.get(name).is_none() {
            debug!(variable = name, line, "variable no longer assigned");
        }
    }
    pass
}

struct PassState {
    rows: Vec<Row>,
    context: VariableContext,
    assigned: HashSet<String>,
}

fn run_pass<S: AsRef<str>>(lines: &[S]) -> Pass {
    let mut state = PassState {
        rows: Vec::with_capacity(lines.len()),
        context: VariableContext::new(),
        assigned: HashSet::new(),
    };
    let mut pc = 0usize;

    while pc < lines.len() {
        let raw = lines[pc].as_ref();
        let kind = classify(raw);

        if kind == LineKind::BlockStart {
            let block = collect_block(lines, pc);
            debug!(
                start = block.start,
                end = block.end,
                terminated = block.terminated,
                "evaluating block"
            );

            let kind = classify(&block.text);
            let outcome = state.evaluate(kind, block.end);
            for line in &lines[block.start..block.end] {
                state.rows.push(Row::empty(line.as_ref()));
            }
            state.push(lines[block.end].as_ref(), kind.is_sum(), outcome);

            pc = block.end + 1;
            continue;
        }

        trace!(line = pc, kind = ?kind, "evaluating line");
        let outcome = state.evaluate(kind, pc);
        state.push(raw, kind.is_sum(), outcome);
        pc += 1;
    }

    let PassState {
        rows,
        mut context,
        assigned,
    } = state;
    context.retain_assigned(&assigned);

    debug!(
        lines = rows.len(),
        variables = context.len(),
        invalid = rows.iter().filter(|r| r.is_invalid).count(),
        "evaluation pass complete"
    );

    Pass { rows, context }
}

impl PassState {
    /// `None` for lines that carry no result.
    fn evaluate(&mut self, kind: LineKind<'_>, index: usize) -> Option<Result<f64, LineError>> {
        let outcome = match kind {
            LineKind::Blank | LineKind::Comment | LineKind::BlockStart | LineKind::BlockEnd => {
                return None
            }
            LineKind::SumBare => Ok(sum_all(&self.rows, index)),
            LineKind::SumCall { args } => sum_call(&self.rows, args).map_err(LineError::from),
            LineKind::Expression(code) => self.arithmetic(code),
            LineKind::Assignment { name, code } => {
                let outcome = self.arithmetic(code);
                match outcome {
                    Ok(value) => {
                        self.context.assign(name, value, index);
                        self.assigned.insert(name.to_string());
                    }
                    Err(_) => {
                        // Lines that reference `name` after this one are now invalid.
                        self.context.forget(name);
                        self.assigned.remove(name);
                    }
                }
                outcome
            }
        };
        Some(outcome)
    }

    fn arithmetic(&self, code: &str) -> Result<f64, LineError> {
        let resolved = substitute_sum_calls(code, &self.rows)?;
        Ok(evaluate(&resolved, &self.context)?)
    }

    /// `is_sum` marks a row whose value came from a sum, so no later sum
    /// counts it again.
    fn push(&mut self, expression: &str, is_sum: bool, outcome: Option<Result<f64, LineError>>) {
        let row = match outcome {
            None => Row::empty(expression),
            Some(Ok(value)) if is_sum => Row::sum(expression, value),
            Some(Ok(value)) => Row::value(expression, value),
            Some(Err(err)) => {
                debug!(line = self.rows.len(), error = %err, "line is invalid");
                Row::invalid(expression, err.to_string())
            }
        };
        self.rows.push(row);
    }
}
