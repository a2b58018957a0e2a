use super::types::{LineKind, SumCallSpan, BLOCK_END, BLOCK_START};

/// Strip a trailing `// ...` comment and surrounding whitespace.
pub fn strip_inline_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Check if line is a comment
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

/// Classify a raw line. Total: every string maps to exactly one kind.
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with("//") {
        return LineKind::Comment;
    }
    if trimmed == BLOCK_START {
        return LineKind::BlockStart;
    }
    if trimmed == BLOCK_END {
        return LineKind::BlockEnd;
    }

    let code = strip_inline_comment(trimmed);

    if code.eq_ignore_ascii_case("sum") {
        return LineKind::SumBare;
    }
    if let Some(args) = sum_call_args(code) {
        return LineKind::SumCall { args };
    }
    if let Some((name, _)) = split_assignment(code) {
        return LineKind::Assignment { name, code };
    }

    LineKind::Expression(code)
}

/// Split `name = expr` at its single `=`. `==` is not an assignment.
pub fn split_assignment(code: &str) -> Option<(&str, &str)> {
    let bytes = code.as_bytes();
    let first = *bytes.first()?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }

    let mut pos = 1;
    while pos < bytes.len() && is_ident_byte(bytes[pos]) {
        pos += 1;
    }
    let name = &code[..pos];

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'=') || bytes.get(pos + 1) == Some(&b'=') {
        return None;
    }

    Some((name, code[pos + 1..].trim()))
}

/// A line whose value comes from `sum`, `sum(...)` or an expression with
/// an embedded `sum(...)`. Such lines are never counted again by another
/// sum.
pub fn is_sum_line(line: &str) -> bool {
    classify(line).is_sum()
}

/// Argument list of a line that is exactly one `sum(...)` call.
fn sum_call_args(code: &str) -> Option<&str> {
    let spans = sum_calls(code);
    match spans.as_slice() {
        [only] if only.start == 0 && only.end == code.len() => Some(only.args),
        _ => None,
    }
}

/// Every well-formed `sum(<lines>)` in `code`, left to right. The argument
/// list may only hold digits, commas, hyphens and whitespace.
pub fn sum_calls(code: &str) -> Vec<SumCallSpan<'_>> {
    let bytes = code.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0usize;

    while i + 4 <= bytes.len() {
        let at_boundary = i == 0 || !is_ident_byte(bytes[i - 1]);
        if !(at_boundary && bytes[i..i + 4].eq_ignore_ascii_case(b"sum(")) {
            i += 1;
            continue;
        }

        let args_start = i + 4;
        let mut j = args_start;
        while j < bytes.len() && is_range_byte(bytes[j]) {
            j += 1;
        }

        if j < bytes.len() && bytes[j] == b')' && j > args_start {
            spans.push(SumCallSpan {
                start: i,
                end: j + 1,
                args: &code[args_start..j],
            });
            i = j + 1;
        } else {
            i += 1;
        }
    }

    spans
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_range_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b',' || b == b'-' || b.is_ascii_whitespace()
}
