mod blocks;
mod lines;
mod ranges;
mod types;

pub use blocks::collect_block;
pub use lines::{
    classify, is_comment, is_sum_line, split_assignment, strip_inline_comment,
    sum_calls,
};
pub use ranges::{parse_line_numbers, parse_part, parse_parts, LineRef, RangeError, MAX_RANGE_SPAN};
pub use types::{Block, LineKind, SumCallSpan, BLOCK_END, BLOCK_START};
