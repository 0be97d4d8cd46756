use std::fmt;

use contracts::*;

use crate::op::Op;

/// Handle to a node in a [`TermStore`](crate::TermStore).
///
/// Two handles from the same store are equal exactly when the terms they name
/// are structurally equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    /// Position of the node in the store's backing array.
    inner: u32,
}

impl Term {
    #[ensures(ret.inner == id)]
    pub(crate) fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    #[ensures(ret == self.inner as usize)]
    pub fn index(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.inner)
    }
}

impl From<usize> for Term {
    #[inline]
    #[requires(u32::try_from(id).is_ok(), "term index exceeds u32")]
    fn from(id: usize) -> Self {
        Self::new(u32::try_from(id).unwrap_or(u32::MAX))
    }
}

/// Leaf data attached to a term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Interior nodes carry nothing.
    None,
    /// Bit pattern of a real constant. Use [`Payload::real`] to build one.
    Real(u64),
    /// Variable name.
    Name(String),
}

impl Payload {
    /// Payload for a real constant.
    ///
    /// `-0.0` is folded into `0.0` so both spellings intern to one node.
    #[must_use]
    pub fn real(value: f64) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        Self::Real(value.to_bits())
    }

    #[must_use]
    pub const fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// Canonical key of a term: kind, ordered children and payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TermNode {
    op: Op,
    children: Box<[Term]>,
    payload: Payload,
}

impl TermNode {
    pub(crate) fn new(op: Op, children: &[Term], payload: Payload) -> Self {
        Self {
            op,
            children: children.into(),
            payload,
        }
    }

    #[must_use]
    pub const fn op(&self) -> Op {
        self.op
    }

    #[must_use]
    pub fn children(&self) -> &[Term] {
        &self.children
    }

    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }
}
