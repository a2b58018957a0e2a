use super::lines::sum_calls;

/// Line that opens a multi-line block.
pub const BLOCK_START: &str = "[Expr Start]";

/// Line that closes a multi-line block.
pub const BLOCK_END: &str = "[Expr End]";

/// Category of a single buffer line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineKind<'a> {
    Blank,
    Comment,
    BlockStart,
    BlockEnd,
    /// `name = expr`; `code` is the whole line without its trailing comment.
    Assignment { name: &'a str, code: &'a str },
    SumBare,
    /// `sum(...)`; `args` is the text between the parentheses.
    SumCall { args: &'a str },
    Expression(&'a str),
}

impl LineKind<'_> {
    /// Whether the line produces a result at all.
    pub fn is_evaluable(&self) -> bool {
        !matches!(
            self,
            Self::Blank | Self::Comment | Self::BlockStart | Self::BlockEnd
        )
    }

    /// Whether the line's value is a sum: bare `sum`, `sum(...)`, or code
    /// with an embedded `sum(...)`.
    pub fn is_sum(&self) -> bool {
        match self {
            Self::SumBare | Self::SumCall { .. } => true,
            Self::Assignment { code, .. } | Self::Expression(code) => !sum_calls(code).is_empty(),
            _ => false,
        }
    }
}

/// A `sum(...)` occurrence inside a line of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumCallSpan<'a> {
    /// Byte offset of the `s` in `sum(`.
    pub start: usize,
    /// Byte offset just past the closing `)`.
    pub end: usize,
    pub args: &'a str,
}

/// One start/end delimited block, collapsed into a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Interior code joined with spaces, comments and blank lines dropped.
    pub text: String,
    /// Index of the start marker line.
    pub start: usize,
    /// Index of the line that carries the block's result.
    pub end: usize,
    /// False when the buffer ended before an end marker.
    pub terminated: bool,
}
