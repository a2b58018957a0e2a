//! Text helpers for whoever displays the rows: result formatting, color
//! grouping and the line references of `sum(...)` arguments.

use crate::parser::{
    classify, is_comment, parse_parts, strip_inline_comment, sum_calls, LineRef, BLOCK_END,
    BLOCK_START,
};
use crate::row::{LineResult, Row};
use serde::Serialize;

/// Widest expression column used by [`render_rows`].
const MAX_EXPRESSION_WIDTH: usize = 48;

/// Format a number with at most `precision` fractional digits.
pub fn format_number(value: f64, precision: usize) -> String {
    let mut text = format!("{value:.precision$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Display text for a result column cell; empty for `None`.
pub fn format_result(result: Option<&LineResult>, precision: usize) -> String {
    match result {
        Some(LineResult::Number(n)) => format_number(*n, precision),
        Some(LineResult::Error(message)) => message.clone(),
        None => String::new(),
    }
}

/// Color group per line: a block shares one group, a run of comment lines
/// shares one group, every other line gets its own.
pub fn color_groups<S: AsRef<str>>(lines: &[S]) -> Vec<usize> {
    let mut groups = Vec::with_capacity(lines.len());
    let mut group = 0usize;
    let mut i = 0usize;

    while i < lines.len() {
        let line = lines[i].as_ref().trim();

        if line == BLOCK_START {
            groups.push(group);
            i += 1;
            while i < lines.len() {
                groups.push(group);
                let done = lines[i].as_ref().trim() == BLOCK_END;
                i += 1;
                if done {
                    break;
                }
            }
        } else if is_comment(line) {
            while i < lines.len() && is_comment(lines[i].as_ref()) {
                groups.push(group);
                i += 1;
            }
        } else {
            groups.push(group);
            i += 1;
        }

        group += 1;
    }

    groups
}

/// One argument of a `sum(...)` call and the zero-based lines it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightPart {
    pub text: String,
    pub lines: Vec<usize>,
}

/// Argument parts of every `sum(...)` in `line`. Lenient: a part that does
/// not parse references no lines.
pub fn sum_highlights(line: &str) -> Vec<HighlightPart> {
    if !classify(line).is_evaluable() {
        return Vec::new();
    }

    let code = strip_inline_comment(line);
    sum_calls(code)
        .into_iter()
        .flat_map(|call| parse_parts(call.args))
        .map(|(text, parsed)| HighlightPart {
            text: text.to_string(),
            lines: parsed
                .map(|r: LineRef| r.indices().filter_map(|i| usize::try_from(i).ok()).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Render rows as a two-column listing: expression and result. Invalid
/// lines are marked with `!`.
pub fn render_rows(rows: &[Row], precision: usize) -> String {
    let width = rows
        .iter()
        .map(|r| r.expression.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_EXPRESSION_WIDTH);
    let number_width = rows.len().to_string().len();

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let marker = if row.is_invalid { '!' } else { ' ' };
        let result = format_result(row.result.as_ref(), precision);
        out.push_str(&format!(
            "{:>number_width$} {marker} {:<width$} | {result}\n",
            i + 1,
            row.expression,
        ));
    }
    out
}
