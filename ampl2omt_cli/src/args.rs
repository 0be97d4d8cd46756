use std::path::PathBuf;

use ampl2omt_smtlib::WriterConfig;
use clap::Parser;

/// Convert nonlinear programming problems from AMPL (.nl) to OMT (.smt2)
#[derive(Parser, Debug)]
#[command(name = "ampl2omt")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input .nl file
    pub input: PathBuf,

    /// Path to the output .smt2 file
    pub output: PathBuf,

    /// Bind shared subterms with `let` instead of repeating them
    #[arg(long, default_value_t = false)]
    pub daggify: bool,
}

impl Args {
    /// Convert command-line arguments into writer configuration
    pub fn to_config(&self) -> WriterConfig {
        WriterConfig::builder().daggify(self.daggify).build()
    }
}
