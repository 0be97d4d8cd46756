//! SMT-LIB output for parsed `.nl` problems.
//!
//! The output targets the `QF_NRAT` logic extended with the `minimize` and
//! `maximize` directives understood by OMT solvers. Terms are written either
//! fully inlined or, when [`WriterConfig::daggify`] is set, as nested `let`
//! bindings that keep shared subterms shared.

mod config;
mod writer;

pub use crate::config::{WriterConfig, WriterConfigBuilder};
pub use crate::writer::{SmtlibWriter, format_real};
