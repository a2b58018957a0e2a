use super::lines::{is_comment, strip_inline_comment};
use super::types::{Block, BLOCK_END};

/// Collect the block opened at `start`.
///
/// Interior lines are joined with spaces; blank and comment lines are
/// skipped. Without an end marker the block runs to the last line.
pub fn collect_block<S: AsRef<str>>(lines: &[S], start: usize) -> Block {
    let mut parts: Vec<&str> = Vec::new();
    let mut j = start + 1;

    while j < lines.len() {
        let line = lines[j].as_ref().trim();
        if line == BLOCK_END {
            return Block {
                text: parts.join(" "),
                start,
                end: j,
                terminated: true,
            };
        }
        if !line.is_empty() && !is_comment(line) {
            parts.push(strip_inline_comment(line));
        }
        j += 1;
    }

    Block {
        text: parts.join(" "),
        start,
        end: lines.len().saturating_sub(1).max(start),
        terminated: false,
    }
}
