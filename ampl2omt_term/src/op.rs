//! Operator registry.
//!
//! Every operator kind carries the numeric opcode used by the `.nl` format, the
//! symbol printed in SMT-LIB output, and its arity. The opcode lookup table is
//! built once on first use.

use std::collections::HashMap;
use std::fmt;

use crate::error::TermError;

/// Number of children an operator takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many children.
    Fixed(usize),
    /// Child count is read from the input stream.
    Nary,
}

impl Arity {
    /// Whether a node with `n` children is well formed for this arity.
    #[must_use]
    pub const fn accepts(self, n: usize) -> bool {
        match self {
            Self::Fixed(k) => k == n,
            Self::Nary => true,
        }
    }
}

/// Static description of an operator kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OpInfo {
    /// Opcode as it appears after `o` in `.nl` expressions. Negative for leaves.
    pub opcode: i32,
    /// Symbol used when rendering the operator.
    pub symbol: &'static str,
    /// Declared arity.
    pub arity: Arity,
}

macro_rules! operators {
    ($( $(#[$doc:meta])* $variant:ident = ($opcode:expr, $symbol:expr, $arity:expr) ),* $(,)?) => {
        /// Operator kind of a term.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Op {
            $( $(#[$doc])* $variant, )*
        }

        impl Op {
            /// All operator kinds, leaves included.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// Registry entry for this operator.
            #[must_use]
            pub const fn info(self) -> OpInfo {
                match self {
                    $( Self::$variant => OpInfo { opcode: $opcode, symbol: $symbol, arity: $arity }, )*
                }
            }
        }
    };
}

use Arity::{Fixed, Nary};

operators! {
    /// Real constant; the value lives in the payload.
    Real = (-1, "real", Fixed(0)),
    /// Real-valued variable; the name lives in the payload.
    Var = (-4, "var", Fixed(0)),

    // unary
    Floor = (13, "floor", Fixed(1)),
    Ceil = (14, "ceil", Fixed(1)),
    Abs = (15, "abs", Fixed(1)),
    /// Unary minus.
    Neg = (16, "-", Fixed(1)),
    Not = (34, "not", Fixed(1)),
    Tanh = (37, "tanh", Fixed(1)),
    Tan = (38, "tan", Fixed(1)),
    Sqrt = (39, "sqrt", Fixed(1)),
    Sinh = (40, "sinh", Fixed(1)),
    Sin = (41, "sin", Fixed(1)),
    Log10 = (42, "log10", Fixed(1)),
    Log = (43, "log", Fixed(1)),
    Exp = (44, "exp", Fixed(1)),
    Cosh = (45, "cosh", Fixed(1)),
    Cos = (46, "cos", Fixed(1)),
    Atanh = (47, "atanh", Fixed(1)),
    Atan = (49, "atan", Fixed(1)),
    Asinh = (50, "asinh", Fixed(1)),
    Asin = (51, "asin", Fixed(1)),
    Acosh = (52, "acosh", Fixed(1)),
    Acos = (53, "acos", Fixed(1)),

    // binary
    Plus = (0, "+", Fixed(2)),
    Minus = (1, "-", Fixed(2)),
    Mult = (2, "*", Fixed(2)),
    Div = (3, "/", Fixed(2)),
    Rem = (4, "rem", Fixed(2)),
    Pow = (5, "pow", Fixed(2)),
    Or = (20, "or", Fixed(2)),
    And = (21, "and", Fixed(2)),
    Lt = (22, "<", Fixed(2)),
    Le = (23, "<=", Fixed(2)),
    Eq = (24, "=", Fixed(2)),
    Ge = (28, ">=", Fixed(2)),
    Gt = (29, ">", Fixed(2)),
    Ne = (30, "!=", Fixed(2)),
    Atan2 = (48, "atan2", Fixed(2)),
    IntDiv = (55, "intdiv", Fixed(2)),
    Precision = (56, "precision", Fixed(2)),
    Round = (57, "round", Fixed(2)),
    Trunc = (58, "trunc", Fixed(2)),
    Implies = (72, "implies", Fixed(2)),
    Iff = (73, "iff", Fixed(2)),

    // ternary
    /// `if cond then a else b`.
    If = (35, "if", Fixed(3)),
    Ifs = (65, "ifs", Fixed(3)),

    // n-ary
    Min = (11, "min", Nary),
    Max = (12, "max", Nary),
    Sum = (54, "sum", Nary),
    Count = (59, "count", Nary),
    NumberOf = (60, "numberof", Nary),
    NumberOfs = (61, "numberofs", Nary),
    AndN = (70, "andn", Nary),
    OrN = (71, "orn", Nary),
    AllDiff = (74, "alldiff", Nary),
}

lazy_static::lazy_static! {
    /// Opcode to operator, restricted to interior (non-leaf) kinds.
    static ref OPCODE_TABLE: HashMap<i32, Op> = Op::ALL
        .iter()
        .filter(|op| !op.is_leaf())
        .map(|op| (op.opcode(), *op))
        .collect();
}

impl Op {
    /// Look up an interior operator by its `.nl` opcode.
    ///
    /// Leaf kinds are never returned: constants and variables have their own
    /// productions in the expression grammar.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::UnknownOpcode`] if nothing is registered under `opcode`.
    pub fn from_opcode(opcode: i64) -> Result<Self, TermError> {
        i32::try_from(opcode)
            .ok()
            .and_then(|code| OPCODE_TABLE.get(&code).copied())
            .ok_or(TermError::UnknownOpcode(opcode))
    }

    #[must_use]
    pub const fn opcode(self) -> i32 {
        self.info().opcode
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        self.info().symbol
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        self.info().arity
    }

    /// Constants and variables.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Real | Self::Var)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Op::Plus)]
    #[case(1, Op::Minus)]
    #[case(5, Op::Pow)]
    #[case(16, Op::Neg)]
    #[case(35, Op::If)]
    #[case(40, Op::Sinh)]
    #[case(54, Op::Sum)]
    #[case(74, Op::AllDiff)]
    fn lookup_known_opcodes(#[case] opcode: i64, #[case] expected: Op) {
        assert_eq!(Op::from_opcode(opcode), Ok(expected));
    }

    #[rstest]
    #[case(6)] // less: not expressible in SMT-LIB
    #[case(-1)]
    #[case(-4)]
    #[case(999)]
    #[case(i64::MAX)]
    fn lookup_unknown_opcodes(#[case] opcode: i64) {
        assert_eq!(Op::from_opcode(opcode), Err(TermError::UnknownOpcode(opcode)));
    }

    #[test]
    fn opcodes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for op in Op::ALL {
            assert!(seen.insert(op.opcode()), "duplicate opcode for {op:?}");
        }
    }

    #[test]
    fn nary_operators() {
        let nary: Vec<Op> = Op::ALL
            .iter()
            .copied()
            .filter(|op| op.arity() == Arity::Nary)
            .collect();
        assert_eq!(
            nary,
            vec![
                Op::Min,
                Op::Max,
                Op::Sum,
                Op::Count,
                Op::NumberOf,
                Op::NumberOfs,
                Op::AndN,
                Op::OrN,
                Op::AllDiff
            ]
        );
        assert!(Arity::Nary.accepts(0));
        assert!(Arity::Fixed(2).accepts(2));
        assert!(!Arity::Fixed(2).accepts(3));
    }
}
