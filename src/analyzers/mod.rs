//! Feature classifiers.
//!
//! Each classifier inspects one kind of node and may record a fact about the
//! owning repository in the [`AggregationStore`]. Classifiers are total:
//! anything they cannot interpret (a relative link, an unparseable URL) is
//! skipped without error.

pub mod emphasis;
pub mod fences;
pub mod html;
pub mod images;
pub mod links;
pub mod tables;

use std::collections::HashSet;

use crate::config::PolicyConfig;
use crate::core::Repository;
use crate::parser::{Document, Node, NodeKind};
use crate::store::AggregationStore;

/// Classification policy with case-folded lookup sets.
#[derive(Debug, Clone)]
pub struct Policy {
    trusted_image_hosts: HashSet<String>,
    csharp_fence_aliases: HashSet<String>,
}

impl Policy {
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            trusted_image_hosts: config
                .trusted_image_hosts
                .iter()
                .map(|host| host.trim().to_ascii_lowercase())
                .collect(),
            csharp_fence_aliases: config
                .csharp_fence_aliases
                .iter()
                .map(|alias| alias.trim().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Case-insensitive exact match against the allow-list.
    pub fn is_trusted_image_host(&self, host: &str) -> bool {
        self.trusted_image_hosts
            .contains(&host.to_ascii_lowercase())
    }

    /// Whether a fence label means C#.
    pub fn is_csharp_fence(&self, info: &str) -> bool {
        self.csharp_fence_aliases
            .contains(&info.trim().to_ascii_lowercase())
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}

/// Runs every classifier over a document's nodes.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    policy: Policy,
}

impl Classifier {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Offer every node of `document` to the classifiers.
    ///
    /// Returns the number of nodes visited.
    pub fn classify_document(
        &self,
        document: &Document,
        repository: &Repository,
        store: &mut AggregationStore,
    ) -> usize {
        let mut visited = 0;
        for node in document.descendants() {
            self.classify_node(node, repository, store);
            visited += 1;
        }
        visited
    }

    /// Offer one node to the classifier for its kind.
    pub fn classify_node(
        &self,
        node: &Node,
        repository: &Repository,
        store: &mut AggregationStore,
    ) {
        match node.kind() {
            NodeKind::Image { url } => images::classify(url, repository, &self.policy, store),
            NodeKind::Link { url } => links::classify(url, repository, store),
            NodeKind::HtmlBlock { raw } => html::classify(raw, repository, store),
            NodeKind::FencedCode { info } => fences::classify(info, repository, store),
            NodeKind::Table => tables::classify(repository, store),
            NodeKind::Emphasis { delimiter } => emphasis::classify(*delimiter, repository, store),
            NodeKind::Document | NodeKind::Container => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey(source: &str, repository: &Repository) -> AggregationStore {
        let mut store = AggregationStore::new();
        Classifier::default().classify_document(&Document::parse(source), repository, &mut store);
        store
    }

    #[test]
    fn test_policy_is_case_insensitive() {
        let policy = Policy::default();
        assert!(policy.is_trusted_image_host("img.shields.io"));
        assert!(policy.is_trusted_image_host("IMG.Shields.IO"));
        assert!(!policy.is_trusted_image_host("shields.io"));
        assert!(policy.is_csharp_fence(" CSharp "));
        assert!(policy.is_csharp_fence("c#"));
        assert!(!policy.is_csharp_fence("fsharp"));
    }

    #[test]
    fn test_custom_policy() {
        let policy = Policy::from_config(&PolicyConfig {
            trusted_image_hosts: vec!["Images.Example.com".to_string()],
            csharp_fence_aliases: vec![],
        });
        assert!(policy.is_trusted_image_host("images.example.com"));
        assert!(!policy.is_trusted_image_host("img.shields.io"));
        assert!(!policy.is_csharp_fence("cs"));
    }

    #[test]
    fn test_full_document() {
        let repo = Repository::new("owner", "repo", 42);
        let source = "\
# Title

[![build](https://img.shields.io/badge.svg)](https://ci.example.com)
![logo](https://cdn.example.com/logo.png)

<p align=\"center\"><img src=\"x.png\"></p>

| a | b |
| - | - |
| ~~old~~ | new |

Mail <team@example.com> or see [local](docs/README.md).

```csharp
var x = 1;
```
";
        let store = survey(source, &repo);

        assert_eq!(store.disallowed_image_hosts.len(), 1);
        assert!(store.disallowed_image_hosts.get("cdn.example.com").is_some());
        assert!(store.html_elements.get("p").is_some());
        assert!(store.html_elements.get("img").is_some());
        assert!(store.html.contains(&repo));
        assert!(store.tables.contains(&repo));
        assert!(store.strikethrough.contains(&repo));
        assert_eq!(store.special_links.len(), 1);
        assert!(store.code_fences.get("csharp").is_some());
    }

    #[test]
    fn test_plain_emphasis_is_not_strikethrough() {
        let repo = Repository::new("owner", "repo", 1);
        let store = survey("*a* and __b__", &repo);
        assert!(store.strikethrough.is_empty());
    }
}
