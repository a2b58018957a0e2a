mod pass;
mod runner;

pub use pass::Pass;
pub use runner::{evaluate_all_lines, evaluate_with_previous, LineError};
