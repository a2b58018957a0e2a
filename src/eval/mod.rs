mod expr;
mod scope;
mod sum;

pub use expr::{evaluate, evaluate_arithmetic, ExprError, MAX_DEPTH};
pub use scope::{Scope, VariableContext};
pub use sum::{substitute_sum_calls, sum_all, sum_call, sum_specified, SumError};
