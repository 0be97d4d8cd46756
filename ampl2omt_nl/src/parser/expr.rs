use std::io::BufRead;

use ampl2omt_term::{Arity, Op, Payload, Term};
use tracing::trace;

use super::{NlParser, split_tag};
use crate::builder::ProblemBuilder;
use crate::error::NlError;
use crate::reader::LineReader;

/// One expression line, classified.
enum Token {
    /// A finished operand: constant or variable.
    Leaf(Term),
    /// An operator still waiting for `arity` operands.
    Operator(Op, usize),
}

/// An operator whose operands are still being read.
struct Pending {
    op: Op,
    arity: usize,
    children: Vec<Term>,
}

impl NlParser<'_> {
    /// Parses one prefix-notation expression starting at the next line.
    ///
    /// `n<real>` is a constant, `v<index>` a problem or previously defined
    /// variable, and `o<opcode>` an operator followed by its operands. N-ary
    /// operators put their operand count on the line after the opcode.
    /// Operators waiting for operands are kept on an explicit stack, so nesting
    /// depth is bounded by memory rather than the call stack.
    ///
    /// # Errors
    ///
    /// Returns [`NlError::UndefinedVariable`] for a reference to a variable not
    /// yet defined, [`NlError::UnknownOperator`] for an unregistered opcode,
    /// [`NlError::Unsupported`] for imported function calls, and a format error
    /// for a non-finite constant or anything else that is not an expression token.
    pub fn parse_expression<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        builder: &ProblemBuilder,
    ) -> Result<Term, NlError> {
        let mut stack: Vec<Pending> = Vec::new();
        loop {
            let mut term = match self.parse_token(lines, builder)? {
                Token::Leaf(term) => term,
                Token::Operator(op, arity) if arity > 0 => {
                    stack.push(Pending {
                        op,
                        arity,
                        children: Vec::with_capacity(arity),
                    });
                    continue;
                },
                Token::Operator(op, _) => self.terms.create(op, &[], Payload::None),
            };

            // hand the finished term to its parent, closing every parent it completes
            loop {
                let Some(parent) = stack.last_mut() else {
                    return Ok(term);
                };
                parent.children.push(term);
                if parent.children.len() < parent.arity {
                    break;
                }
                let Some(done) = stack.pop() else {
                    return Ok(term);
                };
                term = self.terms.create(done.op, &done.children, Payload::None);
            }
        }
    }

    fn parse_token<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        builder: &ProblemBuilder,
    ) -> Result<Token, NlError> {
        let line = lines.next_line()?;
        let line_no = lines.line_no();
        let Some((tag, rest)) = split_tag(&line) else {
            return Err(NlError::format(line_no, "expected an expression, found a blank line"));
        };

        match tag {
            'n' => {
                let value = rest
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| NlError::format(line_no, format!("invalid constant '{line}'")))?;
                Ok(Token::Leaf(self.terms.real(value)))
            },
            'v' => {
                let [index]: [usize; 1] = lines.parse_array(rest)?;
                builder
                    .lookup(index)
                    .map(Token::Leaf)
                    .ok_or(NlError::UndefinedVariable {
                        line: line_no,
                        index,
                    })
            },
            'f' => Err(NlError::unsupported(line_no, "imported function calls")),
            'o' => {
                let [opcode]: [i64; 1] = lines.parse_array(rest)?;
                let op = Op::from_opcode(opcode)
                    .map_err(|_| NlError::UnknownOperator { line: line_no, opcode })?;
                let arity = match op.arity() {
                    Arity::Fixed(arity) => arity,
                    Arity::Nary => {
                        let [count]: [usize; 1] = lines.next_array()?;
                        count
                    },
                };
                trace!("operator {op:?} with {arity} operands at line {line_no}");
                Ok(Token::Operator(op, arity))
            },
            other => Err(NlError::format(
                line_no,
                format!("unexpected token '{other}' in expression"),
            )),
        }
    }
}
