//! CLI argument parsing for Sonda

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the smoke run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format: fd diagnostic plus verbatim echo (default)
    Text,
    /// JSON report for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sonda")]
#[command(version)]
#[command(about = "Filesystem smoke tester: write a payload, read it back, fail fast", long_about = None)]
pub struct Cli {
    /// Target file to write and read back
    #[arg(value_name = "PATH", default_value = "/tmp/mp/new.txt")]
    pub path: PathBuf,

    /// Payload written during the write phase
    #[arg(long = "payload", value_name = "TEXT", default_value = "Hello, World!")]
    pub payload: String,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Skip the write phase and only read the target back
    #[arg(long = "skip-write")]
    pub skip_write: bool,

    /// Skip the read phase and only write the target
    #[arg(long = "skip-read")]
    pub skip_read: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
