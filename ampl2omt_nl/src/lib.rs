//! Reader for AMPL `.nl` files.
//!
//! [`NlParser`] turns the text format into a [`Problem`]: a list of problem
//! variables, objectives, and constraints whose terms live in a caller-owned
//! [`TermStore`](ampl2omt_term::TermStore). Variable bounds and constraint
//! ranges are not kept as side tables; they are rewritten into explicit
//! relational constraints when the problem is finalized.
//!
//! ```no_run
//! use ampl2omt_nl::NlParser;
//! use ampl2omt_term::TermStore;
//!
//! let mut terms = TermStore::new();
//! let problem = NlParser::new(&mut terms).parse_file("hs001.nl")?;
//! println!("{} constraints", problem.constraints().len());
//! # Ok::<(), ampl2omt_nl::NlError>(())
//! ```

pub mod builder;
pub mod error;
pub mod parser;
pub mod problem;
pub mod reader;

pub use crate::builder::{HeaderCounts, ProblemBuilder};
pub use crate::error::NlError;
pub use crate::parser::{NlParser, decode_bounds, parse_bounds_line};
pub use crate::problem::{Bounds, Objective, ObjectiveKind, Problem};
pub use crate::reader::LineReader;
