//! Streaming reader for whitespace-delimited interaction tables.
//!
//! The first line is a header and is discarded. Every later non-blank line
//! must hold exactly three whitespace-separated tokens: two external
//! identifiers followed by a numeric weight.
use std::io::{self, BufRead};

use graphfix_core::InteractionRecord;
use thiserror::Error;
use tracing::debug;

/// Errors produced while reading an interaction table.
#[derive(Debug, Error)]
pub enum InteractionTableError {
    /// Reading from the underlying source failed.
    #[error("failed to read line {line}: {source}")]
    Io {
        /// One-based line number being read.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A record did not hold exactly three tokens.
    #[error("line {line}: expected 3 whitespace-separated fields, found {found}")]
    TokenCount {
        /// One-based line number of the record.
        line: usize,
        /// Number of tokens present.
        found: usize,
    },
    /// The weight token was not a number.
    #[error("line {line}: weight `{token}` is not a number")]
    InvalidWeight {
        /// One-based line number of the record.
        line: usize,
        /// The offending token.
        token: String,
    },
}

impl InteractionTableError {
    /// Returns the one-based line number the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Io { line, .. }
            | Self::TokenCount { line, .. }
            | Self::InvalidWeight { line, .. } => *line,
        }
    }
}

/// Iterator over the records of an interaction table.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use graphfix_providers_text::InteractionTable;
///
/// let table = InteractionTable::new(Cursor::new("a b score\nP1 P2 0.9\n\nP2 P3 0.4\n"));
/// let records = table.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].source, "P2");
/// assert_eq!(records[1].weight, 0.4);
/// # Ok::<(), graphfix_providers_text::InteractionTableError>(())
/// ```
#[derive(Debug)]
pub struct InteractionTable<R> {
    reader: R,
    buffer: String,
    line: usize,
    done: bool,
}

impl<R: BufRead> InteractionTable<R> {
    /// Wraps `reader`; the header is skipped on the first call to `next`.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
            done: false,
        }
    }

    /// Returns the number of lines consumed so far, header included.
    #[must_use]
    pub const fn lines_read(&self) -> usize {
        self.line
    }

    fn read_line(&mut self) -> Option<Result<(), InteractionTableError>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                Some(Ok(()))
            }
            Err(source) => Some(Err(InteractionTableError::Io {
                line: self.line + 1,
                source,
            })),
        }
    }
}

fn parse_record(line: usize, text: &str) -> Result<InteractionRecord, InteractionTableError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [source, target, weight_token] = tokens[..] else {
        return Err(InteractionTableError::TokenCount {
            line,
            found: tokens.len(),
        });
    };
    let weight = weight_token
        .parse::<f64>()
        .map_err(|_| InteractionTableError::InvalidWeight {
            line,
            token: weight_token.to_owned(),
        })?;
    Ok(InteractionRecord {
        source: source.to_owned(),
        target: target.to_owned(),
        weight,
    })
}

impl<R: BufRead> Iterator for InteractionTable<R> {
    type Item = Result<InteractionRecord, InteractionTableError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.read_line() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Some(Ok(())) if self.line == 1 => {
                    debug!(header = self.buffer.trim_end(), "skipping table header");
                }
                Some(Ok(())) if self.buffer.trim().is_empty() => {}
                Some(Ok(())) => return Some(parse_record(self.line, &self.buffer)),
            }
        }
    }
}
