//! The survey pipeline: load, classify, aggregate.
//!
//! The corpus is processed in chunks. Within a chunk READMEs are read and
//! parsed on a rayon pool and collected back in corpus order; the chunk is
//! then classified one repository at a time by a single mutator of the
//! [`AggregationStore`]. Output therefore never depends on the pool or chunk
//! size, and at most one chunk of parsed documents is alive at a time.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;

use crate::analyzers::{Classifier, Policy};
use crate::config::Config;
use crate::core::{Corpus, Error, MissReason, ProgressTracker, Repository, Result};
use crate::parser::Document;
use crate::report::Reports;
use crate::store::AggregationStore;

/// Repositories loaded per parallel batch.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Runs the classifiers over a corpus.
pub struct Survey {
    classifier: Classifier,
    jobs: usize,
    chunk_size: usize,
    show_progress: bool,
}

impl Survey {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: Classifier::new(Policy::from_config(&config.policy)),
            jobs: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: config.output.progress,
        }
    }

    /// Worker threads for loading; 0 uses the rayon default.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Repositories parsed per batch before classification; at least 1.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn policy(&self) -> &Policy {
        self.classifier.policy()
    }

    /// Survey every repository in the corpus.
    pub fn run(&self, corpus: &Corpus) -> SurveyOutcome {
        let start = Instant::now();
        tracing::info!(
            "Surveying {} repositories under {}",
            corpus.len(),
            corpus.root().display()
        );

        let progress =
            ProgressTracker::for_terminal(corpus.len(), "Parsing READMEs", self.show_progress);
        let pool = self.build_pool();
        let mut outcome = SurveyOutcome::default();

        for chunk in corpus.repositories().chunks(self.chunk_size) {
            let documents = match &pool {
                Some(pool) => pool.install(|| load_chunk(corpus, chunk, &progress)),
                None => load_chunk(corpus, chunk, &progress),
            };
            for (repository, document) in chunk.iter().zip(documents) {
                self.classify_into(&mut outcome, repository, document);
            }
        }
        progress.finish_and_clear();
        outcome.summary.duration = start.elapsed();

        tracing::info!(
            "Survey completed in {:?}: {} analyzed, {} missed",
            outcome.summary.duration,
            outcome.summary.documents_analyzed,
            outcome.summary.misses.len()
        );
        outcome
    }

    fn classify_into(
        &self,
        outcome: &mut SurveyOutcome,
        repository: &Repository,
        document: Result<Document>,
    ) {
        let summary = &mut outcome.summary;
        summary.repositories += 1;
        match document {
            Ok(document) => {
                let visited =
                    self.classifier
                        .classify_document(&document, repository, &mut outcome.store);
                tracing::debug!("Classified {} ({} nodes)", repository, visited);
                summary.documents_analyzed += 1;
                summary.nodes_visited += visited;
            }
            Err(err) => {
                let reason = match err {
                    Error::MissingDocument { reason, .. } => reason,
                    _ => MissReason::Unreadable,
                };
                tracing::warn!("Skipping {}: no README ({})", repository, reason);
                summary.misses.push(Miss {
                    repository: repository.full_name(),
                    reason,
                });
            }
        }
    }

    /// A dedicated pool when `jobs` is set; `None` uses the global pool.
    fn build_pool(&self) -> Option<rayon::ThreadPool> {
        if self.jobs == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::warn!(
                    "Cannot build a {}-thread pool ({}), using default",
                    self.jobs,
                    e
                );
                None
            }
        }
    }
}

/// Read and parse one chunk in parallel, results in chunk order.
fn load_chunk(
    corpus: &Corpus,
    chunk: &[Repository],
    progress: &ProgressTracker,
) -> Vec<Result<Document>> {
    chunk
        .par_iter()
        .map(|repository| {
            let document = corpus
                .load_document(repository)
                .map(|source| Document::parse(&source));
            progress.inc();
            document
        })
        .collect()
}

/// A manifest entry that produced no document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Miss {
    pub repository: String,
    pub reason: MissReason,
}

/// Counters for one survey run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SurveySummary {
    /// Manifest entries considered.
    pub repositories: usize,
    /// READMEs classified.
    pub documents_analyzed: usize,
    /// Document nodes offered to the classifiers.
    pub nodes_visited: usize,
    /// Entries without a README.
    pub misses: Vec<Miss>,
    /// Wall time.
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// The store and counters produced by a run.
#[derive(Debug, Clone, Default)]
pub struct SurveyOutcome {
    pub store: AggregationStore,
    pub summary: SurveySummary,
}

impl SurveyOutcome {
    /// Build the report datasets.
    pub fn reports(&self, policy: &Policy) -> Reports {
        Reports::build(&self.store, policy)
    }
}

mod duration_serde {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}
