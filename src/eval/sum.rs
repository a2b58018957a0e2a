use crate::parser::{parse_line_numbers, sum_calls, RangeError};
use crate::row::Row;
use thiserror::Error;

/// Failures of a `sum(...)` reference. Line numbers are one-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SumError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error("line {0} is out of bounds")]
    OutOfBounds(i64),
    #[error("line {0} is not a number")]
    NotNumeric(i64),
    #[error("line {0} is a sum")]
    SumOfSum(i64),
}

/// Bare `sum`: every numeric result above `current`, skipping other sum
/// lines and anything without a number.
pub fn sum_all(rows: &[Row], current: usize) -> f64 {
    rows.iter()
        .take(current)
        .filter(|row| !row.is_sum)
        .filter_map(Row::number)
        .sum()
}

/// Sum the rows at `indices` (zero-based), in order.
pub fn sum_specified(rows: &[Row], indices: &[i64]) -> Result<f64, SumError> {
    let mut total = 0.0;
    for &index in indices {
        let line = index + 1;
        let row = usize::try_from(index)
            .ok()
            .and_then(|i| rows.get(i))
            .ok_or(SumError::OutOfBounds(line))?;

        if row.is_sum {
            return Err(SumError::SumOfSum(line));
        }
        total += row.number().ok_or(SumError::NotNumeric(line))?;
    }
    Ok(total)
}

/// `sum(<args>)` where `args` is the raw text between the parentheses.
pub fn sum_call(rows: &[Row], args: &str) -> Result<f64, SumError> {
    let indices = parse_line_numbers(args)?;
    sum_specified(rows, &indices)
}

/// Replace each embedded `sum(...)` with its parenthesised value, left to
/// right. The first failing call fails the whole expression.
pub fn substitute_sum_calls(code: &str, rows: &[Row]) -> Result<String, SumError> {
    let mut out = String::with_capacity(code.len());
    let mut last = 0usize;

    for call in sum_calls(code) {
        let value = sum_call(rows, call.args)?;
        out.push_str(&code[last..call.start]);
        out.push_str(&format!("({value})"));
        last = call.end;
    }
    out.push_str(&code[last..]);

    Ok(out)
}
