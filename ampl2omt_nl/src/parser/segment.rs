use std::io::BufRead;

use ampl2omt_term::Term;
use tracing::{debug, trace};

use super::{NlParser, split_tag, to_index};
use crate::builder::ProblemBuilder;
use crate::error::NlError;
use crate::problem::{Objective, ObjectiveKind};
use crate::reader::LineReader;

impl NlParser<'_> {
    /// Reads one segment: its tag line and everything the tag says follows.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::UnexpectedEof`] if no segment remains, plus anything
    /// [`Self::parse_segment_line`] returns.
    pub fn parse_segment<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        let line = lines.next_line()?;
        self.parse_segment_line(&line, lines, builder)
    }

    /// Dispatches on the tag of an already-read segment line.
    ///
    /// Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::Unsupported`] for imported functions (`F`), suffixes
    /// (`S`) and logical constraints (`L`), and a format error for an unknown tag.
    pub fn parse_segment_line<R: BufRead>(
        &mut self,
        line: &str,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        let line_no = lines.line_no();
        let Some((tag, rest)) = split_tag(line) else {
            return Ok(());
        };
        debug!("segment '{tag}' at line {line_no}");

        match tag {
            'F' => Err(NlError::unsupported(line_no, "imported functions")),
            'S' => Err(NlError::unsupported(line_no, "suffixes")),
            'L' => Err(NlError::unsupported(line_no, "logical constraints")),
            'V' => self.parse_definition(rest, lines, builder),
            'C' => self.parse_cons_body(rest, lines, builder),
            'O' => self.parse_objective(rest, lines, builder),
            // dual and primal initial guesses
            'd' | 'x' => {
                let [count]: [usize; 1] = lines.parse_array(rest)?;
                lines.skip_lines(count)
            },
            'r' => {
                let n_cons = builder.header().n_cons;
                Self::parse_bounds_block(n_cons, lines, builder, ProblemBuilder::add_cons_bounds)
            },
            'b' => {
                let n_vars = builder.header().n_vars;
                Self::parse_bounds_block(n_vars, lines, builder, ProblemBuilder::add_var_bounds)
            },
            // cumulative Jacobian column counts, one per variable but the last
            'k' => lines.skip_lines(builder.header().n_vars.saturating_sub(1)),
            // Jacobian and gradient sparsity
            'J' | 'G' => {
                let [_, count]: [usize; 2] = lines.parse_array(rest)?;
                lines.skip_lines(count)
            },
            other => Err(NlError::format(
                line_no,
                format!("unknown segment tag '{other}'"),
            )),
        }
    }

    /// `V<index> <linear terms> <k>`: a defined variable.
    fn parse_definition<R: BufRead>(
        &mut self,
        rest: &str,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        let [index, n_linear, _]: [usize; 3] = lines.parse_array(rest)?;

        let mut parts = Vec::with_capacity(n_linear + 1);
        for _ in 0..n_linear {
            parts.push(self.parse_linear_term(lines, builder)?);
        }
        parts.push(self.parse_expression(lines, builder)?);

        let term = match parts.as_slice() {
            [single] => *single,
            _ => self.terms.sum(parts),
        };
        trace!("defined variable {index} = {term}");
        builder.add_definition(index, term)
    }

    /// `<variable> <coefficient>` inside a `V` segment.
    fn parse_linear_term<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        builder: &ProblemBuilder,
    ) -> Result<Term, NlError> {
        let text = lines.next_line()?;
        let line_no = lines.line_no();
        let invalid = || NlError::format(line_no, format!("invalid linear term '{text}'"));

        let mut tokens = text.split_whitespace();
        let (Some(var), Some(coefficient), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(invalid());
        };
        let var: usize = var.parse().map_err(|_| invalid())?;
        let coefficient: f64 = coefficient.parse().map_err(|_| invalid())?;

        let var = builder
            .problem_var(var)
            .ok_or(NlError::UndefinedVariable {
                line: line_no,
                index: var,
            })?;
        let coefficient = self.terms.real(coefficient);
        Ok(self.terms.mult(var, coefficient))
    }

    /// `C<index>`: a constraint body.
    fn parse_cons_body<R: BufRead>(
        &mut self,
        rest: &str,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        let [index]: [usize; 1] = lines.parse_array(rest)?;
        let body = self.parse_expression(lines, builder)?;
        builder.add_cons_body(index, body)
    }

    /// `O<index> <sign>`: an objective.
    fn parse_objective<R: BufRead>(
        &mut self,
        rest: &str,
        lines: &mut LineReader<R>,
        builder: &mut ProblemBuilder,
    ) -> Result<(), NlError> {
        let [index, sign]: [i64; 2] = lines.parse_array(rest)?;
        let index = to_index(lines.line_no(), index)?;
        let term = self.parse_expression(lines, builder)?;
        let objective = Objective::new(ObjectiveKind::from_sign(sign), term);
        builder.add_objective(index, objective)
    }
}
