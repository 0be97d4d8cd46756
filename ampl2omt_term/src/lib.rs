//! Expression terms for the AMPL to OMT converter.
//!
//! This crate provides the operator registry shared by the `.nl` reader and the
//! SMT-LIB writer, and a hash-consing [`TermStore`] in which every structurally
//! unique expression is stored exactly once. Terms are small copyable handles,
//! so structural equality is handle equality.

mod error;
mod op;
mod store;
mod term;
mod traverse;

pub use crate::error::TermError;
pub use crate::op::{Arity, Op, OpInfo};
pub use crate::store::TermStore;
pub use crate::term::{Payload, Term, TermNode};
