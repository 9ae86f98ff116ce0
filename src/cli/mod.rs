//! CLI implementation using clap.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use crate::core::{Error, Result};

/// One-line usage printed on a wrong argument count.
pub const USAGE: &str = "Usage: readme-survey <CORPUS> <REPORTS>";

/// readme-survey - Classify README features across a repository corpus.
#[derive(Parser, Debug)]
#[command(name = "readme-survey")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Corpus directory (manifest plus <owner>/<name>/README.md files)
    pub corpus: PathBuf,

    /// Directory to write the CSV reports to
    pub reports: PathBuf,

    /// Run summary format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of parallel workers for loading READMEs (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl From<OutputFormat> for crate::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => crate::config::OutputFormat::Text,
            OutputFormat::Json => crate::config::OutputFormat::Json,
            OutputFormat::Markdown => crate::config::OutputFormat::Markdown,
        }
    }
}

/// Outcome of argument parsing.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments are valid; run the survey.
    Run(Cli),
    /// Help, version, or a malformed option: clap prints and exits.
    Exit(clap::Error),
}

/// Parse arguments, turning a wrong positional count into
/// [`Error::InvalidInvocation`] carrying [`USAGE`].
pub fn parse<I, T>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Invocation::Run(cli)),
        Err(e) if is_arity_error(e.kind()) => Err(Error::InvalidInvocation(USAGE.to_string())),
        Err(e) => Ok(Invocation::Exit(e)),
    }
}

fn is_arity_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
    )
}
