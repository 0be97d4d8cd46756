use std::io::BufRead;

use tracing::debug;

use super::NlParser;
use crate::builder::{HeaderCounts, ProblemBuilder};
use crate::error::NlError;
use crate::reader::LineReader;

impl NlParser<'_> {
    /// Parses the ten header lines and materializes problem variables `x0..x{n-1}`.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::TruncatedHeader`] if input ends early, a format error on
    /// a malformed line, and [`NlError::Unsupported`] for logical constraints,
    /// network constraints or discrete variables.
    pub fn parse_header<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        self.read_header(lines, builder).map_err(|err| match err {
            NlError::UnexpectedEof { line } => NlError::TruncatedHeader { line },
            other => other,
        })
    }

    fn read_header<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        // 1: format tag and options
        let line = lines.next_line()?;
        let Some(options) = line.strip_prefix('g') else {
            return Err(NlError::format(
                lines.line_no(),
                "expected text format header starting with 'g'",
            ));
        };
        let _: [i64; 4] = lines.parse_array(options)?;

        // 2: vars, constraints, objectives, ranges, equalities, [logical constraints]
        let counts: Vec<usize> = lines.next_ints(6, 1)?;
        if counts.get(5).is_some_and(|n| *n != 0) {
            return Err(NlError::unsupported(lines.line_no(), "logical constraints"));
        }
        let header = HeaderCounts {
            n_vars: counts[0],
            n_cons: counts[1],
            n_obj: counts[2],
            n_ranges: counts[3],
            n_eqs: counts[4],
        };
        debug!("header counts: {header:?}");
        builder.set_header(header);
        for index in 0..header.n_vars {
            let var = self.terms.var(format!("x{index}"));
            builder.add_problem_var(index, var)?;
        }

        // 3: nonlinear constraints, objectives
        let _: [usize; 2] = lines.next_array()?;

        // 4: network constraints: nonlinear, linear
        let network: [usize; 2] = lines.next_array()?;
        if network.iter().any(|n| *n != 0) {
            return Err(NlError::unsupported(lines.line_no(), "network constraints"));
        }

        // 5: nonlinear vars in constraints, objectives, both
        let _: [usize; 3] = lines.next_array()?;

        // 6: linear network variables; functions; arith, flags
        let _: [usize; 4] = lines.next_array()?;

        // 7: discrete variables: binary, integer, nonlinear (b,c,o)
        let discrete: [usize; 5] = lines.next_array()?;
        if discrete.iter().any(|n| *n != 0) {
            return Err(NlError::unsupported(lines.line_no(), "discrete variables"));
        }

        // 8: nonzeros in Jacobian, gradients
        let _: [usize; 2] = lines.next_array()?;

        // 9: max name lengths: constraints, variables
        let _: [usize; 2] = lines.next_array()?;

        // 10: common exprs: b,c,o,c1,o1
        let _: [usize; 5] = lines.next_array()?;

        Ok(())
    }
}
