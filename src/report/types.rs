//! Report row types.
//!
//! Field order is the CSV column order. Downstream consumers read these files
//! by position and by name, so columns must not be reordered or renamed.

use serde::Serialize;

use crate::core::Repository;

/// A row type with a fixed CSV header.
pub trait ReportRow: Serialize {
    /// Column names, in serialization order.
    const COLUMNS: &'static [&'static str];
}

/// `disallowed-image-hosts.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageHostRow {
    pub host: String,
    pub repository: String,
    pub readme: String,
    pub stars: u64,
}

impl ReportRow for ImageHostRow {
    const COLUMNS: &'static [&'static str] = &["host", "repository", "readme", "stars"];
}

/// `html-elements.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlElementRow {
    pub element: String,
    pub repository: String,
    pub readme: String,
    pub stars: u64,
}

impl ReportRow for HtmlElementRow {
    const COLUMNS: &'static [&'static str] = &["element", "repository", "readme", "stars"];
}

/// `code-fences.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFenceRow {
    pub repository: String,
    pub readme: String,
    pub stars: u64,
    pub fence: String,
    pub csharp: bool,
}

impl ReportRow for CodeFenceRow {
    const COLUMNS: &'static [&'static str] = &["repository", "readme", "stars", "fence", "csharp"];
}

/// `tables.csv`, `html.csv` and `strikethrough.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRow {
    pub repository: String,
    pub readme: String,
    pub stars: u64,
}

impl ReportRow for RepositoryRow {
    const COLUMNS: &'static [&'static str] = &["repository", "readme", "stars"];
}

impl From<&Repository> for RepositoryRow {
    fn from(repo: &Repository) -> Self {
        Self {
            repository: repo.repository_link(),
            readme: repo.readme_link(),
            stars: repo.stars,
        }
    }
}

/// `special-links.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialLinkRow {
    pub repository: String,
    pub readme: String,
    pub stars: u64,
    pub scheme: String,
    pub link: String,
}

impl ReportRow for SpecialLinkRow {
    const COLUMNS: &'static [&'static str] = &["repository", "readme", "stars", "scheme", "link"];
}

/// The report files, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    DisallowedImageHosts,
    HtmlElements,
    CodeFences,
    Tables,
    Html,
    Strikethrough,
    SpecialLinks,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::DisallowedImageHosts,
        ReportKind::HtmlElements,
        ReportKind::CodeFences,
        ReportKind::Tables,
        ReportKind::Html,
        ReportKind::Strikethrough,
        ReportKind::SpecialLinks,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ReportKind::DisallowedImageHosts => "disallowed-image-hosts.csv",
            ReportKind::HtmlElements => "html-elements.csv",
            ReportKind::CodeFences => "code-fences.csv",
            ReportKind::Tables => "tables.csv",
            ReportKind::Html => "html.csv",
            ReportKind::Strikethrough => "strikethrough.csv",
            ReportKind::SpecialLinks => "special-links.csv",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportKind::DisallowedImageHosts => ImageHostRow::COLUMNS,
            ReportKind::HtmlElements => HtmlElementRow::COLUMNS,
            ReportKind::CodeFences => CodeFenceRow::COLUMNS,
            ReportKind::Tables | ReportKind::Html | ReportKind::Strikethrough => {
                RepositoryRow::COLUMNS
            }
            ReportKind::SpecialLinks => SpecialLinkRow::COLUMNS,
        }
    }
}
