//! Line-oriented access to `.nl` text.

use std::io::{BufRead, Lines};
use std::str::FromStr;

use crate::error::NlError;

/// Reads cleaned lines: `#` comments stripped, surrounding whitespace trimmed.
///
/// Keeps one line of lookahead and the 1-based number of the last line handed out,
/// which every format error reports.
#[derive(Debug)]
pub struct LineReader<R> {
    lines: Lines<R>,
    peeked: Option<String>,
    line_no: usize,
}

impl<'a> LineReader<&'a [u8]> {
    /// Reader over in-memory text.
    #[must_use]
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            peeked: None,
            line_no: 0,
        }
    }

    /// Number of the line most recently returned by [`Self::next_line`].
    #[must_use]
    pub const fn line_no(&self) -> usize {
        self.line_no
    }

    fn clean(raw: &str) -> String {
        let content = raw.split_once('#').map_or(raw, |(content, _)| content);
        content.trim().to_string()
    }

    fn fill(&mut self) -> Result<(), NlError> {
        if self.peeked.is_none() {
            self.peeked = self.lines.next().transpose()?.map(|raw| Self::clean(&raw));
        }
        Ok(())
    }

    /// Next line, or `None` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::Io`] if the underlying reader fails.
    pub fn try_next_line(&mut self) -> Result<Option<String>, NlError> {
        self.fill()?;
        let line = self.peeked.take();
        if line.is_some() {
            self.line_no += 1;
        }
        Ok(line)
    }

    /// Next line.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::UnexpectedEof`] once the input is exhausted.
    pub fn next_line(&mut self) -> Result<String, NlError> {
        self.try_next_line()?.ok_or(NlError::UnexpectedEof {
            line: self.line_no + 1,
        })
    }

    /// The next line without consuming it. `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::Io`] if the underlying reader fails.
    pub fn peek(&mut self) -> Result<Option<&str>, NlError> {
        self.fill()?;
        Ok(self.peeked.as_deref())
    }

    /// Parses between `n - n_opt` and `n` whitespace-separated integers from `text`.
    ///
    /// Errors name the current line.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::Format`] on a token that is not an integer of type `T`
    /// or on a token count outside the accepted range.
    pub fn parse_ints<T: FromStr>(
        &self,
        n: usize,
        text: &str,
        n_opt: usize,
    ) -> Result<Vec<T>, NlError> {
        let ints = text
            .split_whitespace()
            .map(str::parse::<T>)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|_| {
                NlError::format(self.line_no, format!("expected {n} integers, found '{text}'"))
            })?;

        if ints.len() > n || ints.len() + n_opt < n {
            return Err(NlError::format(
                self.line_no,
                format!("expected {n} integers ({n_opt} optional), found '{text}'"),
            ));
        }
        Ok(ints)
    }

    /// Reads the next line and parses it with [`Self::parse_ints`].
    ///
    /// # Errors
    ///
    /// See [`Self::next_line`] and [`Self::parse_ints`].
    pub fn next_ints<T: FromStr>(&mut self, n: usize, n_opt: usize) -> Result<Vec<T>, NlError> {
        let line = self.next_line()?;
        self.parse_ints(n, &line, n_opt)
    }

    /// Parses exactly `N` integers from `text`.
    ///
    /// # Errors
    ///
    /// See [`Self::parse_ints`].
    pub fn parse_array<T: FromStr, const N: usize>(&self, text: &str) -> Result<[T; N], NlError> {
        let ints = self.parse_ints::<T>(N, text, 0)?;
        <[T; N]>::try_from(ints).map_err(|_| {
            NlError::format(self.line_no, format!("expected {N} integers, found '{text}'"))
        })
    }

    /// Reads the next line and parses exactly `N` integers from it.
    ///
    /// # Errors
    ///
    /// See [`Self::next_line`] and [`Self::parse_ints`].
    pub fn next_array<T: FromStr, const N: usize>(&mut self) -> Result<[T; N], NlError> {
        let line = self.next_line()?;
        self.parse_array(&line)
    }

    /// Consumes `count` lines without looking at them.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::UnexpectedEof`] if fewer than `count` lines remain.
    pub fn skip_lines(&mut self, count: usize) -> Result<(), NlError> {
        for _ in 0..count {
            self.next_line()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn strips_comments_and_whitespace() {
        let mut reader = LineReader::from_text("  g3 1 1 0\t# problem hs001\n o5 #^\n");
        assert_eq!(reader.next_line().unwrap(), "g3 1 1 0");
        assert_eq!(reader.line_no(), 1);
        assert_eq!(reader.next_line().unwrap(), "o5");
        assert_eq!(reader.line_no(), 2);
        assert!(matches!(
            reader.next_line(),
            Err(NlError::UnexpectedEof { line: 3 })
        ));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut reader = LineReader::from_text("n1\nv0");
        assert_eq!(reader.peek().unwrap(), Some("n1"));
        assert_eq!(reader.line_no(), 0);
        assert_eq!(reader.next_line().unwrap(), "n1");
        assert_eq!(reader.peek().unwrap(), Some("v0"));
        assert_eq!(reader.next_line().unwrap(), "v0");
        assert_eq!(reader.peek().unwrap(), None);
        assert_eq!(reader.try_next_line().unwrap(), None);
    }

    #[rstest]
    #[case("1 2 3", 3, 0, vec![1, 2, 3])]
    #[case(" 2 1 1 0 0", 6, 1, vec![2, 1, 1, 0, 0])]
    #[case("2 1 1 0 0 0", 6, 1, vec![2, 1, 1, 0, 0, 0])]
    #[case("-4", 1, 0, vec![-4])]
    fn parse_ints_accepts(
        #[case] text: &str,
        #[case] n: usize,
        #[case] n_opt: usize,
        #[case] expected: Vec<i64>,
    ) {
        let reader = LineReader::from_text("");
        assert_eq!(reader.parse_ints::<i64>(n, text, n_opt).unwrap(), expected);
    }

    #[rstest]
    #[case("1 2", 3, 0)]
    #[case("1 2 3 4", 3, 0)]
    #[case("1 2 3", 6, 1)]
    #[case("1 x 3", 3, 0)]
    #[case("1.5", 1, 0)]
    #[case("", 1, 0)]
    fn parse_ints_rejects(#[case] text: &str, #[case] n: usize, #[case] n_opt: usize) {
        let reader = LineReader::from_text("");
        assert!(matches!(
            reader.parse_ints::<i64>(n, text, n_opt),
            Err(NlError::Format { .. })
        ));
    }

    #[test]
    fn format_errors_name_the_line() {
        let mut reader = LineReader::from_text("1 2\n3 four\n");
        let [a, b]: [i64; 2] = reader.next_array().unwrap();
        assert_eq!((a, b), (1, 2));
        match reader.next_array::<i64, 2>() {
            Err(NlError::Format { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn negative_rejected_for_unsigned() {
        let reader = LineReader::from_text("");
        assert!(reader.parse_array::<usize, 1>("-1").is_err());
    }

    #[test]
    fn skip_lines_reports_eof() {
        let mut reader = LineReader::from_text("a\nb\n");
        assert!(reader.skip_lines(2).is_ok());
        assert!(reader.skip_lines(1).unwrap_err().is_eof());
    }
}
