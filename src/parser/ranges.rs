use thiserror::Error;

/// Widest `start-end` span accepted in one part.
pub const MAX_RANGE_SPAN: i64 = 100_000;

/// Why a line-number list failed to parse. Each variant names the part.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid line number in sum(): `{0}`")]
    InvalidNumber(String),
    #[error("invalid range in sum(): `{0}`")]
    Reversed(String),
    #[error("empty line reference in sum(): `{0}`")]
    Empty(String),
    #[error("range too large in sum(): `{0}`")]
    TooLarge(String),
}

/// One comma-separated part, still in one-based line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
    Line(i64),
    Span { start: i64, end: i64 },
}

impl LineRef {
    /// Zero-based indices this part refers to, ascending.
    pub fn indices(self) -> impl Iterator<Item = i64> {
        let (start, end) = match self {
            Self::Line(n) => (n, n),
            Self::Span { start, end } => (start, end),
        };
        (start..=end).map(|n| n - 1)
    }
}

/// Parse `"2,4-6"` into zero-based indices `[1, 3, 4, 5]`.
///
/// All or nothing: the first bad part fails the whole list.
pub fn parse_line_numbers(input: &str) -> Result<Vec<i64>, RangeError> {
    let mut indices = Vec::new();
    for part in input.split(',') {
        indices.extend(parse_part(part)?.indices());
    }
    Ok(indices)
}

/// Parse every part independently, keeping its trimmed text. Used where a
/// partial answer is still useful, e.g. highlighting referenced lines.
pub fn parse_parts(input: &str) -> Vec<(&str, Result<LineRef, RangeError>)> {
    input
        .split(',')
        .map(|part| (part.trim(), parse_part(part)))
        .collect()
}

/// part := ws number ws ( '-' ws number ws )?
pub fn parse_part(part: &str) -> Result<LineRef, RangeError> {
    let text = part.trim();
    if text.is_empty() {
        return Err(RangeError::Empty(part.to_string()));
    }

    let mut cursor = Cursor::new(text);
    let invalid = || RangeError::InvalidNumber(text.to_string());

    let start = cursor.number().ok_or_else(invalid)?;
    cursor.skip_ws();

    if cursor.at_end() {
        return Ok(LineRef::Line(start));
    }
    if !cursor.eat(b'-') {
        return Err(invalid());
    }

    cursor.skip_ws();
    let end = cursor.number().ok_or_else(invalid)?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(invalid());
    }

    if start > end {
        return Err(RangeError::Reversed(text.to_string()));
    }
    if end - start >= MAX_RANGE_SPAN {
        return Err(RangeError::TooLarge(text.to_string()));
    }

    Ok(LineRef::Span { start, end })
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_ws(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.input.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Unsigned decimal integer; `None` on no digits or overflow.
    fn number(&mut self) -> Option<i64> {
        let start = self.pos;
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        std::str::from_utf8(&self.input[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }
}
