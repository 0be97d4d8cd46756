//! Range grammar shared by the `r` and `b` segments.
//!
//! | kind | operands | meaning |
//! |---|---|---|
//! | 0 | `lower upper` | both bounds |
//! | 1 | `upper` | upper only |
//! | 2 | `lower` | lower only |
//! | 3 | | unbounded |
//! | 4 | `value` | equality |
//! | 5 | | complementarity (unsupported) |

use std::io::BufRead;

use tracing::trace;

use super::NlParser;
use crate::builder::ProblemBuilder;
use crate::error::NlError;
use crate::problem::Bounds;
use crate::reader::LineReader;

fn operands<const N: usize>(line: usize, kind: i64, text: &str) -> Result<[f64; N], NlError> {
    let values = text
        .split_whitespace()
        .map(|token| token.parse::<f64>().ok().filter(|value| value.is_finite()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| NlError::format(line, format!("invalid bound value in '{text}'")))?;
    <[f64; N]>::try_from(values).map_err(|values| {
        NlError::format(
            line,
            format!("bound kind {kind} takes {N} values, found {}", values.len()),
        )
    })
}

/// Decodes the operands of a bound line of the given `kind`.
///
/// # Errors
///
/// Returns [`NlError::Unsupported`] for complementarity (kind 5) and a format
/// error for an unknown kind or a wrong operand count.
pub fn decode_bounds(line: usize, kind: i64, text: &str) -> Result<Bounds, NlError> {
    match kind {
        0 => {
            let [lower, upper] = operands(line, kind, text)?;
            Ok(Bounds::new(Some(lower), Some(upper)))
        },
        1 => {
            let [upper] = operands(line, kind, text)?;
            Ok(Bounds::new(None, Some(upper)))
        },
        2 => {
            let [lower] = operands(line, kind, text)?;
            Ok(Bounds::new(Some(lower), None))
        },
        3 => {
            operands::<0>(line, kind, text)?;
            Ok(Bounds::unbounded())
        },
        4 => {
            let [value] = operands(line, kind, text)?;
            Ok(Bounds::new(Some(value), Some(value)))
        },
        5 => Err(NlError::unsupported(line, "complementarity constraints")),
        _ => Err(NlError::format(line, format!("invalid bound kind {kind}"))),
    }
}

/// Decodes a full bound line: the kind followed by its operands.
///
/// # Errors
///
/// See [`decode_bounds`].
pub fn parse_bounds_line(line: usize, text: &str) -> Result<Bounds, NlError> {
    let (kind, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let kind = kind
        .parse::<i64>()
        .map_err(|_| NlError::format(line, format!("invalid bound kind '{kind}'")))?;
    decode_bounds(line, kind, rest)
}

impl NlParser<'_> {
    /// Reads one bound line per item, `count` in all, handing each to `add`.
    pub(super) fn parse_bounds_block<R: BufRead>(
        count: usize,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
        add: fn(&mut ProblemBuilder, usize, Bounds) -> Result<(), NlError>,
    ) -> Result<(), NlError> {
        for index in 0..count {
            let text = lines.next_line()?;
            let bounds = parse_bounds_line(lines.line_no(), &text)?;
            trace!("bounds[{index}] = {bounds:?}");
            add(builder, index, bounds)?;
        }
        Ok(())
    }
}
