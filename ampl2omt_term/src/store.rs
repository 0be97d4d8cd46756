//! Hash-consing arena for terms.
//!
//! The store keeps an [`IndexSet`] of canonical [`TermNode`]s. The set doubles
//! as the key-to-handle map and the append-only backing array: the position of
//! a node is its [`Term`] handle, and positions never change once assigned.

use contracts::*;
use indexmap::IndexSet;
use tracing::trace;

use crate::op::Op;
use crate::term::{Payload, Term, TermNode};

/// Owner of every term built during one conversion.
#[derive(Debug, Clone, Default)]
pub struct TermStore {
    nodes: IndexSet<TermNode>,
}

impl TermStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct terms interned so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the canonical term for `(op, children, payload)`.
    ///
    /// Calling this twice with equal arguments returns the same handle; only the
    /// first call allocates.
    #[requires(op.arity().accepts(children.len()))]
    #[requires(op.is_leaf() != matches!(payload, Payload::None))]
    #[requires(children.iter().all(|c| c.index() < self.len()))]
    #[ensures(ret.index() < self.len())]
    pub fn create(&mut self, op: Op, children: &[Term], payload: Payload) -> Term {
        let (index, inserted) = self.nodes.insert_full(TermNode::new(op, children, payload));
        if inserted {
            trace!("interned {op:?} as t{index}");
        }
        Term::from(index)
    }

    /// The canonical node behind `term`.
    ///
    /// # Panics
    ///
    /// Panics if `term` was not created by this store.
    #[requires(term.index() < self.len())]
    #[must_use]
    pub fn node(&self, term: Term) -> &TermNode {
        &self.nodes[term.index()]
    }

    #[must_use]
    pub fn op(&self, term: Term) -> Op {
        self.node(term).op()
    }

    #[must_use]
    pub fn children(&self, term: Term) -> &[Term] {
        self.node(term).children()
    }

    #[must_use]
    pub fn payload(&self, term: Term) -> &Payload {
        self.node(term).payload()
    }

    /// Whether `term` is a constant literal.
    #[must_use]
    pub fn is_const(&self, term: Term) -> bool {
        self.op(term) == Op::Real
    }

    #[must_use]
    pub fn is_var(&self, term: Term) -> bool {
        self.op(term) == Op::Var
    }

    // ---- typed constructors ----

    /// Real constant.
    pub fn real(&mut self, value: f64) -> Term {
        self.create(Op::Real, &[], Payload::real(value))
    }

    /// Real-valued variable.
    pub fn var(&mut self, name: impl Into<String>) -> Term {
        self.create(Op::Var, &[], Payload::Name(name.into()))
    }

    #[requires(op.arity() == crate::Arity::Fixed(1))]
    pub fn unary(&mut self, op: Op, child: Term) -> Term {
        self.create(op, &[child], Payload::None)
    }

    #[requires(op.arity() == crate::Arity::Fixed(2))]
    pub fn binary(&mut self, op: Op, left: Term, right: Term) -> Term {
        self.create(op, &[left, right], Payload::None)
    }

    #[requires(op.arity() == crate::Arity::Nary)]
    pub fn nary<I>(&mut self, op: Op, children: I) -> Term
    where
        I: IntoIterator<Item = Term>,
    {
        let children: Vec<Term> = children.into_iter().collect();
        self.create(op, &children, Payload::None)
    }

    /// `if cond then then_term else else_term`.
    pub fn ite(&mut self, cond: Term, then_term: Term, else_term: Term) -> Term {
        self.create(Op::If, &[cond, then_term, else_term], Payload::None)
    }

    pub fn ifs(&mut self, cond: Term, then_term: Term, else_term: Term) -> Term {
        self.create(Op::Ifs, &[cond, then_term, else_term], Payload::None)
    }
}

macro_rules! unary_constructors {
    ($( $name:ident => $op:ident ),* $(,)?) => {
        impl TermStore {
            $(
                #[doc = concat!("`", stringify!($op), "` applied to `child`.")]
                pub fn $name(&mut self, child: Term) -> Term {
                    self.unary(Op::$op, child)
                }
            )*
        }
    };
}

macro_rules! binary_constructors {
    ($( $name:ident => $op:ident ),* $(,)?) => {
        impl TermStore {
            $(
                #[doc = concat!("`", stringify!($op), "` applied to `left` and `right`.")]
                pub fn $name(&mut self, left: Term, right: Term) -> Term {
                    self.binary(Op::$op, left, right)
                }
            )*
        }
    };
}

macro_rules! nary_constructors {
    ($( $name:ident => $op:ident ),* $(,)?) => {
        impl TermStore {
            $(
                #[doc = concat!("`", stringify!($op), "` over `children`, in order.")]
                pub fn $name<I>(&mut self, children: I) -> Term
                where
                    I: IntoIterator<Item = Term>,
                {
                    self.nary(Op::$op, children)
                }
            )*
        }
    };
}

unary_constructors! {
    floor => Floor,
    ceil => Ceil,
    abs => Abs,
    neg => Neg,
    not => Not,
    tanh => Tanh,
    tan => Tan,
    sqrt => Sqrt,
    sinh => Sinh,
    sin => Sin,
    log10 => Log10,
    log => Log,
    exp => Exp,
    cosh => Cosh,
    cos => Cos,
    atanh => Atanh,
    atan => Atan,
    asinh => Asinh,
    asin => Asin,
    acosh => Acosh,
    acos => Acos,
}

binary_constructors! {
    plus => Plus,
    minus => Minus,
    mult => Mult,
    div => Div,
    rem => Rem,
    pow => Pow,
    or => Or,
    and => And,
    lt => Lt,
    le => Le,
    eq => Eq,
    ge => Ge,
    gt => Gt,
    ne => Ne,
    atan2 => Atan2,
    int_div => IntDiv,
    precision => Precision,
    round => Round,
    trunc => Trunc,
    implies => Implies,
    iff => Iff,
}

nary_constructors! {
    min => Min,
    max => Max,
    sum => Sum,
    count => Count,
    number_of => NumberOf,
    number_ofs => NumberOfs,
    and_n => AndN,
    or_n => OrN,
    all_diff => AllDiff,
}
