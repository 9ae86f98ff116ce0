//! readme-survey - Classify README features across a repository corpus.
//!
//! Walks every README in a corpus, classifies structural and content
//! features (untrusted image hosts, raw HTML, code fence languages, tables,
//! strikethrough, non-HTTP links) and writes star-weighted CSV reports.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use readme_survey::config::Config;
//! use readme_survey::core::Corpus;
//! use readme_survey::survey::Survey;
//!
//! let config = Config::default();
//! let corpus = Corpus::open("readmes", &config.corpus).unwrap();
//! let survey = Survey::new(&config);
//! let outcome = survey.run(&corpus);
//! let reports = outcome.reports(survey.policy());
//! reports.write_all(Path::new("reports")).unwrap();
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod core;
pub mod output;
pub mod parser;
pub mod report;
pub mod store;
pub mod survey;

pub use crate::core::{Corpus, Error, Repository, Result};
pub use crate::survey::{Survey, SurveyOutcome};
