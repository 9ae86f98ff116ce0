//! Special link classifier.
//!
//! Records links whose scheme is neither `http` nor `https` (`mailto:`,
//! `ftp:`, `vscode:` ...). Email addresses never reach a report: see
//! [`SpecialLink::display`].

use url::Url;

use crate::core::Repository;
use crate::store::AggregationStore;

/// Replaces the address part of `mailto:` links in reports.
pub const REDACTED: &str = "[redacted]";

/// A link with a non-HTTP scheme, as written in the README.
///
/// The parsed [`Url`] decides the scheme; the source text is what gets
/// reported, since `Url` normalizes case and adds a trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecialLink {
    text: String,
    uri: Url,
}

impl SpecialLink {
    /// Parse `url` and keep it only when its scheme is not http(s).
    pub fn parse(url: &str) -> Option<Self> {
        let text = url.trim();
        let uri = Url::parse(text).ok()?;
        match uri.scheme() {
            "http" | "https" => None,
            _ => Some(Self {
                text: text.to_string(),
                uri,
            }),
        }
    }

    /// Lowercase scheme, without the `:`.
    pub fn scheme(&self) -> &str {
        self.uri.scheme()
    }

    /// Link text as it appears in reports.
    pub fn display(&self) -> String {
        if self.scheme() == "mailto" {
            format!("mailto:{REDACTED}")
        } else {
            self.text.clone()
        }
    }
}

/// Record the link if it is an absolute URI with a special scheme.
pub fn classify(url: &str, repository: &Repository, store: &mut AggregationStore) {
    if let Some(link) = SpecialLink::parse(url) {
        store.track_special_link(repository, &link);
    }
}
