use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pairform")]
#[command(about = "Dynamic field-pair form: add, edit, validate, and submit repeated records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive form
    Run {
        /// Simulated persistence delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Write the submitted snapshot as JSON to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Validate a JSON field-pair collection without launching the UI
    Validate {
        /// Path to a JSON array of field pairs
        #[arg(short, long)]
        input: PathBuf,

        /// Also require select values to be members of the option set
        #[arg(long)]
        strict: bool,
    },
}
