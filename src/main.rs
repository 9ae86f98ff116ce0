//! readme-survey CLI - Classify README features across a repository corpus.

use std::io::stdout;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use readme_survey::cli::{self, Cli, Invocation};
use readme_survey::config::Config;
use readme_survey::core::{Corpus, Error};
use readme_survey::output::{Format, RunSummary};
use readme_survey::survey::Survey;

fn main() -> ExitCode {
    let cli = match cli::parse(std::env::args_os()) {
        Ok(Invocation::Run(cli)) => cli,
        Ok(Invocation::Exit(e)) => e.exit(),
        Err(Error::InvalidInvocation(usage)) => {
            eprintln!("{usage}");
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };

    let format = Format::from(cli.format.map(Into::into).unwrap_or(config.output.format));

    let corpus = Corpus::open(&cli.corpus, &config.corpus)
        .with_context(|| format!("opening corpus {}", cli.corpus.display()))?;

    let survey = Survey::new(&config)
        .jobs(cli.jobs.unwrap_or(0))
        .show_progress(config.output.progress && !cli.no_progress);
    let outcome = survey.run(&corpus);

    let reports = outcome.reports(survey.policy());
    let written = reports
        .write_all(&cli.reports)
        .with_context(|| format!("writing reports to {}", cli.reports.display()))?;

    let summary = RunSummary {
        reports_dir: &cli.reports,
        survey: &outcome.summary,
        reports: &written,
    };
    format.write_summary(&summary, &mut stdout().lock())?;
    Ok(())
}
