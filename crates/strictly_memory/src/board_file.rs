//! Board files: a `ROWSxCOLS` header followed by one card per line.
//!
//! ```text
//! 2x2
//! A
//! B
//! A
//! B
//! ```

use crate::{CardValue, Session, SessionError};
use derive_getters::Getters;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Error from parsing a board file.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Board file line {line}: {message}")]
pub struct ParseError {
    /// 1-based line number where parsing failed.
    pub line: usize,
    /// What was wrong.
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::error::Error for ParseError {}

/// A board layout read from a board file.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BoardSpec {
    /// Number of rows.
    #[getter(copy)]
    rows: usize,
    /// Number of columns.
    #[getter(copy)]
    cols: usize,
    /// Card values, row-major.
    values: Vec<CardValue>,
}

impl BoardSpec {
    /// Parses board file text.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = text.lines().map(str::trim);

        let header = lines
            .next()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ParseError::new(1, "missing ROWSxCOLS header"))?;
        let (rows, cols) = parse_header(header)?;

        let mut cards: Vec<&str> = lines.collect();
        while cards.last().is_some_and(|c| c.is_empty()) {
            cards.pop();
        }

        let mut values = Vec::with_capacity(cards.len());
        for (i, card) in cards.iter().enumerate() {
            let line = i + 2;
            if card.is_empty() {
                return Err(ParseError::new(line, "empty card"));
            }
            if card.chars().any(char::is_whitespace) {
                return Err(ParseError::new(
                    line,
                    format!("card '{card}' contains whitespace"),
                ));
            }
            values.push(CardValue::from(*card));
        }

        let expected = rows * cols;
        if values.len() != expected {
            return Err(ParseError::new(
                values.len() + 2,
                format!("expected {expected} cards, found {}", values.len()),
            ));
        }

        debug!(rows, cols, "Parsed board file");
        Ok(Self { rows, cols, values })
    }

    /// Starts a session with this layout.
    pub fn into_session(self) -> Result<Session, SessionError> {
        Session::create(self.rows, self.cols, self.values)
    }

    /// Splits the layout into `(rows, cols, values)`.
    pub fn into_parts(self) -> (usize, usize, Vec<CardValue>) {
        (self.rows, self.cols, self.values)
    }
}

impl FromStr for BoardSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_header(header: &str) -> Result<(usize, usize), ParseError> {
    let bad = || ParseError::new(1, format!("expected ROWSxCOLS header, found '{header}'"));
    let (rows, cols) = header.split_once('x').ok_or_else(bad)?;
    let rows: usize = rows.trim().parse().map_err(|_| bad())?;
    let cols: usize = cols.trim().parse().map_err(|_| bad())?;
    if rows == 0 || cols == 0 {
        return Err(ParseError::new(1, "board must have at least one row and column"));
    }
    rows.checked_mul(cols)
        .map(|_| (rows, cols))
        .ok_or_else(|| ParseError::new(1, "board is too large"))
}
