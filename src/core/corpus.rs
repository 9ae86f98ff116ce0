//! On-disk README corpus.
//!
//! The acquisition tool leaves a manifest at the corpus root and one
//! directory per repository:
//!
//! ```text
//! <corpus>/repositories.json
//! <corpus>/<owner>/<name>/README.md   fetched README
//! <corpus>/<owner>/<name>/_._         README confirmed absent
//! ```

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Error, MissReason, Repository, Result};
use crate::config::CorpusConfig;

/// A corpus of repositories, ordered by popularity.
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
    repositories: Vec<Repository>,
    readme: String,
    not_found_marker: String,
}

impl Corpus {
    /// Open the corpus rooted at `root`, reading its manifest.
    pub fn open(root: impl AsRef<Path>, config: &CorpusConfig) -> Result<Self> {
        let root = root.as_ref();
        let manifest_path = root.join(&config.manifest);
        let text = std::fs::read_to_string(&manifest_path).map_err(|e| {
            Error::manifest(&manifest_path, format!("cannot read manifest: {e}"))
        })?;
        let repositories: Vec<Repository> = serde_json::from_str(&text)
            .map_err(|e| Error::manifest(&manifest_path, e.to_string()))?;

        tracing::debug!(
            "Read {} manifest entries from {}",
            repositories.len(),
            manifest_path.display()
        );

        Ok(Self::from_repositories(root, repositories, config))
    }

    /// Build a corpus from an explicit repository list.
    ///
    /// Duplicate entries keep their first occurrence. The list is stably
    /// sorted by descending stars, which is the processing order.
    pub fn from_repositories(
        root: impl Into<PathBuf>,
        repositories: Vec<Repository>,
        config: &CorpusConfig,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut repositories: Vec<Repository> = repositories
            .into_iter()
            .filter(|repo| seen.insert((repo.owner.clone(), repo.name.clone())))
            .collect();
        repositories.sort_by(|a, b| b.stars.cmp(&a.stars));

        Self {
            root: root.into(),
            repositories,
            readme: config.readme.clone(),
            not_found_marker: config.not_found_marker.clone(),
        }
    }

    /// Corpus root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Repositories in processing order.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Directory holding a repository's README.
    pub fn repository_dir(&self, repo: &Repository) -> PathBuf {
        self.root.join(&repo.owner).join(&repo.name)
    }

    /// Read a repository's README source text.
    ///
    /// Every failure is reported as [`Error::MissingDocument`] so the caller
    /// can record a miss and move on.
    pub fn load_document(&self, repo: &Repository) -> Result<String> {
        let dir = self.repository_dir(repo);
        match std::fs::read_to_string(dir.join(&self.readme)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let reason = if dir.join(&self.not_found_marker).exists() {
                    MissReason::ConfirmedAbsent
                } else {
                    MissReason::NotFetched
                };
                Err(Error::missing_document(repo.full_name(), reason))
            }
            Err(e) => {
                tracing::debug!("Cannot read README for {}: {}", repo, e);
                Err(Error::missing_document(
                    repo.full_name(),
                    MissReason::Unreadable,
                ))
            }
        }
    }
}
