#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::OnceLock;

use ampl2omt_nl::{HeaderCounts, LineReader, ProblemBuilder};
use ampl2omt_term::{Term, TermStore};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Reader over an indented test snippet.
pub fn lines(text: &str) -> LineReader<&[u8]> {
    LineReader::from_text(text)
}

/// Builder with problem variables `x0..x{n_vars-1}` already registered.
pub fn builder_with_vars(terms: &mut TermStore, header: HeaderCounts) -> (ProblemBuilder, Vec<Term>) {
    let mut builder = ProblemBuilder::new();
    builder.set_header(header);
    let vars: Vec<Term> = (0..header.n_vars)
        .map(|i| {
            let x = terms.var(format!("x{i}"));
            builder.add_problem_var(i, x).unwrap();
            x
        })
        .collect();
    (builder, vars)
}

pub fn counts(n_vars: usize, n_cons: usize, n_obj: usize) -> HeaderCounts {
    HeaderCounts {
        n_vars,
        n_cons,
        n_obj,
        ..HeaderCounts::default()
    }
}
