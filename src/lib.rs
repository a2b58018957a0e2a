//! Line evaluation engine for a notepad calculator.
//!
//! Every line of a buffer is a comment, a variable assignment, a `sum`
//! aggregation, part of a `[Expr Start]`/`[Expr End]` block, or a plain
//! arithmetic expression. [`evaluate_all_lines`] turns the lines into one
//! [`Row`] each; no per-line failure escapes it.

pub mod config;
pub mod eval;
pub mod executor;
pub mod logging;
pub mod parser;
pub mod render;
pub mod row;
pub mod session;

pub use executor::{evaluate_all_lines, evaluate_with_previous, LineError, Pass};
pub use row::{LineResult, Row};
