//! AMPL to OMT converter CLI
//!
//! Reads an AMPL `.nl` file and writes the equivalent SMT-LIB script, with
//! `minimize`/`maximize` objectives, to the output path.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::fs;
use std::path::Path;

use ampl2omt_nl::NlParser;
use ampl2omt_smtlib::{SmtlibWriter, WriterConfig};
use ampl2omt_term::TermStore;
use clap::Parser;
use tracing::info;

use args::Args;

/// Parses `input` and renders it with `config`.
fn convert(input: &Path, config: WriterConfig) -> Result<String, Box<dyn std::error::Error>> {
    let mut terms = TermStore::new();
    let problem = NlParser::new(&mut terms).parse_file(input)?;
    info!("{} terms interned", terms.len());
    Ok(SmtlibWriter::new(&terms, config).render(&problem))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = convert(&args.input, args.to_config())?;
    fs::write(&args.output, text)?;
    info!("Wrote {}", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_PROBLEM: &str = "g3 1 1 0
 1 0 0 0 0
 0 0
 0 0
 0 0 0
 0 0 0 1
 0 0 0 0 0
 0 0
 0 0
 0 0 0 0 0
b
2 0
";

    #[test]
    fn converts_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tiny.nl");
        fs::write(&input, EMPTY_PROBLEM).unwrap();

        let text = convert(&input, WriterConfig::default()).unwrap();

        assert!(text.starts_with("(set-logic QF_NRAT)\n"));
        assert!(text.contains("(declare-fun x0 () Real)"));
        assert!(text.contains("(assert (>= x0 0.0))"));
        assert!(text.ends_with("(check-sat)\n(get-objectives)"));
    }

    #[test]
    fn reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(&dir.path().join("absent.nl"), WriterConfig::default()).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
