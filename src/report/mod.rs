//! Report building.
//!
//! Turns the finished [`AggregationStore`] into one ordered row sequence per
//! feature and writes each to its CSV file.

mod types;
mod writer;

pub use types::*;
pub use writer::{write_csv, write_csv_file};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::analyzers::{fences, Policy};
use crate::core::{Repository, Result};
use crate::store::{AggregationStore, KeyGroup, KeyedRepositories, OrderedSet};

/// All report datasets for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reports {
    pub disallowed_image_hosts: Vec<ImageHostRow>,
    pub html_elements: Vec<HtmlElementRow>,
    pub code_fences: Vec<CodeFenceRow>,
    pub tables: Vec<RepositoryRow>,
    pub html: Vec<RepositoryRow>,
    pub strikethrough: Vec<RepositoryRow>,
    pub special_links: Vec<SpecialLinkRow>,
}

/// A report file that was written.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenReport {
    pub kind: ReportKind,
    pub path: PathBuf,
    pub rows: usize,
}

impl Reports {
    /// Build every report from the store.
    pub fn build(store: &AggregationStore, policy: &Policy) -> Self {
        let disallowed_image_hosts = keyed_rows(&store.disallowed_image_hosts)
            .map(|(host, repo)| ImageHostRow {
                host: host.to_string(),
                repository: repo.repository_link(),
                readme: repo.readme_link(),
                stars: repo.stars,
            })
            .collect();

        let html_elements = keyed_rows(&store.html_elements)
            .map(|(element, repo)| HtmlElementRow {
                element: element.to_string(),
                repository: repo.repository_link(),
                readme: repo.readme_link(),
                stars: repo.stars,
            })
            .collect();

        Self {
            disallowed_image_hosts,
            html_elements,
            code_fences: code_fence_rows(&store.code_fences, policy),
            tables: repository_rows(&store.tables),
            html: repository_rows(&store.html),
            strikethrough: repository_rows(&store.strikethrough),
            special_links: special_link_rows(store),
        }
    }

    /// Row count of one report.
    pub fn row_count(&self, kind: ReportKind) -> usize {
        match kind {
            ReportKind::DisallowedImageHosts => self.disallowed_image_hosts.len(),
            ReportKind::HtmlElements => self.html_elements.len(),
            ReportKind::CodeFences => self.code_fences.len(),
            ReportKind::Tables => self.tables.len(),
            ReportKind::Html => self.html.len(),
            ReportKind::Strikethrough => self.strikethrough.len(),
            ReportKind::SpecialLinks => self.special_links.len(),
        }
    }

    /// Write every report under `dir`, creating it if needed.
    pub fn write_all(&self, dir: &Path) -> Result<Vec<WrittenReport>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(ReportKind::ALL.len());
        for kind in ReportKind::ALL {
            let path = dir.join(kind.file_name());
            match kind {
                ReportKind::DisallowedImageHosts => {
                    write_csv_file(&path, &self.disallowed_image_hosts)?
                }
                ReportKind::HtmlElements => write_csv_file(&path, &self.html_elements)?,
                ReportKind::CodeFences => write_csv_file(&path, &self.code_fences)?,
                ReportKind::Tables => write_csv_file(&path, &self.tables)?,
                ReportKind::Html => write_csv_file(&path, &self.html)?,
                ReportKind::Strikethrough => write_csv_file(&path, &self.strikethrough)?,
                ReportKind::SpecialLinks => write_csv_file(&path, &self.special_links)?,
            }
            tracing::debug!("Wrote {} rows to {}", self.row_count(kind), path.display());
            written.push(WrittenReport {
                kind,
                path,
                rows: self.row_count(kind),
            });
        }
        Ok(written)
    }
}

/// (key, repository) pairs; groups by descending star sum, ties in first-seen
/// order, repositories in insertion order within a group.
fn keyed_rows(keyed: &KeyedRepositories) -> impl Iterator<Item = (&str, &Repository)> {
    let mut groups: Vec<&KeyGroup> = keyed.groups().iter().collect();
    groups.sort_by(|a, b| b.total_stars().cmp(&a.total_stars()));
    groups.into_iter().flat_map(|group| {
        group
            .repositories
            .iter()
            .map(move |repo| (group.key.as_str(), repo))
    })
}

/// One row per repository, descending stars.
fn repository_rows(set: &OrderedSet<Repository>) -> Vec<RepositoryRow> {
    let mut repos: Vec<&Repository> = set.iter().collect();
    repos.sort_by(|a, b| b.stars.cmp(&a.stars));
    repos.into_iter().map(RepositoryRow::from).collect()
}

/// One row per (repository, fence); descending stars, then owner and name.
fn code_fence_rows(keyed: &KeyedRepositories, policy: &Policy) -> Vec<CodeFenceRow> {
    let mut pairs: Vec<(&Repository, &str)> = keyed
        .groups()
        .iter()
        .flat_map(|group| group.repositories.iter().map(move |repo| (repo, group.key.as_str())))
        .collect();
    pairs.sort_by(|(a, _), (b, _)| {
        b.stars
            .cmp(&a.stars)
            .then_with(|| a.owner.cmp(&b.owner))
            .then_with(|| a.name.cmp(&b.name))
    });

    pairs
        .into_iter()
        .map(|(repo, fence)| CodeFenceRow {
            repository: repo.repository_link(),
            readme: repo.readme_link(),
            stars: repo.stars,
            fence: fence.to_string(),
            csharp: fences::is_csharp(fence, policy),
        })
        .collect()
}

/// Insertion order, mailto addresses redacted.
fn special_link_rows(store: &AggregationStore) -> Vec<SpecialLinkRow> {
    store
        .special_links
        .iter()
        .map(|(link, repo)| SpecialLinkRow {
            repository: repo.repository_link(),
            readme: repo.readme_link(),
            stars: repo.stars,
            scheme: link.scheme().to_string(),
            link: link.display(),
        })
        .collect()
}
