//! Parser for the text (`g`) flavour of AMPL's `.nl` format.
//!
//! A file is a fixed ten-line header followed by segments, each introduced by a
//! one-character tag. Expressions are written in prefix form, one token per line.
//! The parser builds terms in a caller-supplied [`TermStore`] and stages
//! everything else in a [`ProblemBuilder`] that is finalized at end of input.

mod bounds;
mod expr;
mod header;
mod segment;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ampl2omt_term::TermStore;
use tracing::info;

use crate::builder::ProblemBuilder;
use crate::error::NlError;
use crate::problem::Problem;
use crate::reader::LineReader;

pub use bounds::{decode_bounds, parse_bounds_line};

/// Reads `.nl` input into terms owned by a [`TermStore`].
#[derive(Debug)]
pub struct NlParser<'a> {
    terms: &'a mut TermStore,
}

impl<'a> NlParser<'a> {
    pub const fn new(terms: &'a mut TermStore) -> Self {
        Self { terms }
    }

    /// Parses the file at `path`.
    ///
    /// The path must exist and carry the `.nl` extension; both are checked before
    /// anything is read.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::NotFound`] or [`NlError::WrongExtension`] for a bad path,
    /// and any parse error from [`Self::parse_reader`].
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Problem, NlError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NlError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if path.extension().and_then(OsStr::to_str) != Some("nl") {
            return Err(NlError::WrongExtension {
                path: path.to_path_buf(),
            });
        }

        info!("Parsing {}", path.display());
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parses in-memory `.nl` text.
    ///
    /// # Errors
    ///
    /// See [`Self::parse_stream`].
    pub fn parse_str(&mut self, text: &str) -> Result<Problem, NlError> {
        self.parse_stream(&mut LineReader::from_text(text))
    }

    /// Parses `.nl` text from any buffered reader.
    ///
    /// # Errors
    ///
    /// See [`Self::parse_stream`].
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<Problem, NlError> {
        self.parse_stream(&mut LineReader::new(reader))
    }

    /// Parses a header, then segments until end of input, then finalizes.
    ///
    /// # Errors
    ///
    /// Returns the first format or integrity error encountered. No partial
    /// problem is ever returned.
    pub fn parse_stream<R: BufRead>(&mut self, lines: &mut LineReader<R>) -> Result<Problem, NlError> {
        let mut builder = ProblemBuilder::new();
        self.parse_header(lines, &mut builder)?;
        while let Some(line) = lines.try_next_line()? {
            self.parse_segment_line(&line, lines, &mut builder)?;
        }
        builder.finalize(self.terms)
    }
}

/// Splits a line into its one-character tag and the remainder.
fn split_tag(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let tag = chars.next()?;
    Some((tag, chars.as_str()))
}

/// Converts a signed index read from the file.
fn to_index(line: usize, value: i64) -> Result<usize, NlError> {
    usize::try_from(value).map_err(|_| NlError::format(line, format!("invalid index {value}")))
}
