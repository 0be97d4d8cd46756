//! The finalized optimization problem and its parts.

use ampl2omt_term::{Term, TermStore};

/// Direction of an objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectiveKind {
    Minimize,
    Maximize,
}

impl ObjectiveKind {
    /// Decodes the sign field of an `O` segment: `0` minimizes, anything else maximizes.
    #[must_use]
    pub const fn from_sign(sign: i64) -> Self {
        if sign == 0 {
            Self::Minimize
        } else {
            Self::Maximize
        }
    }
}

/// A term to minimize or maximize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub term: Term,
}

impl Objective {
    #[must_use]
    pub const fn new(kind: ObjectiveKind, term: Term) -> Self {
        Self { kind, term }
    }

    #[must_use]
    pub const fn minimize(term: Term) -> Self {
        Self::new(ObjectiveKind::Minimize, term)
    }

    #[must_use]
    pub const fn maximize(term: Term) -> Self {
        Self::new(ObjectiveKind::Maximize, term)
    }
}

/// Optional lower and upper bound from an `r` or `b` segment line.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bounds {
    #[must_use]
    pub const fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// Neither bound present.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// Both bounds present and equal.
    #[must_use]
    pub fn is_equality(&self) -> bool {
        matches!((self.lower, self.upper), (Some(l), Some(u)) if l == u)
    }

    /// Both bounds present and different.
    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!((self.lower, self.upper), (Some(l), Some(u)) if l != u)
    }

    /// Relational constraints expressing these bounds on `subject`.
    ///
    /// Nothing is produced when `subject` is a constant: the body was folded to a
    /// literal and its bounds are dropped without being checked. Equal bounds give
    /// a single equality; otherwise each present bound gives one inequality.
    pub fn synthesize(&self, terms: &mut TermStore, subject: Term) -> Vec<Term> {
        if terms.is_const(subject) {
            return Vec::new();
        }
        match (self.lower, self.upper) {
            (None, None) => Vec::new(),
            (Some(l), Some(u)) if l == u => {
                let value = terms.real(l);
                vec![terms.eq(subject, value)]
            },
            (lower, upper) => {
                let mut out = Vec::with_capacity(2);
                if let Some(l) = lower {
                    let value = terms.real(l);
                    out.push(terms.ge(subject, value));
                }
                if let Some(u) = upper {
                    let value = terms.real(u);
                    out.push(terms.le(subject, value));
                }
                out
            },
        }
    }
}

/// A parsed problem: variables, objectives, and relational constraints.
///
/// Terms live in the [`TermStore`] the problem was parsed into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Problem {
    variables: Vec<Term>,
    objectives: Vec<Objective>,
    constraints: Vec<Term>,
}

impl Problem {
    #[must_use]
    pub const fn new(variables: Vec<Term>, objectives: Vec<Objective>, constraints: Vec<Term>) -> Self {
        Self {
            variables,
            objectives,
            constraints,
        }
    }

    /// Problem variables in index order.
    #[must_use]
    pub fn variables(&self) -> &[Term] {
        &self.variables
    }

    #[must_use]
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    #[must_use]
    pub fn constraints(&self) -> &[Term] {
        &self.constraints
    }
}
