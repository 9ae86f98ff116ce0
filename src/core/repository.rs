//! Repository identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A repository in the corpus.
///
/// Identity is `(owner, name)`: two values with the same owner and name are
/// equal even if their star counts differ, so a repository can be used as a
/// deduplication key in the aggregation store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// Account that owns the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Star count, used as the report ordering weight.
    pub stars: u64,
}

impl Repository {
    /// Create a new repository.
    pub fn new(owner: impl Into<String>, name: impl Into<String>, stars: u64) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            stars,
        }
    }

    /// `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Markdown link to the repository home page.
    pub fn repository_link(&self) -> String {
        format!(
            "[{}/{}](https://github.com/{}/{})",
            self.owner, self.name, self.owner, self.name
        )
    }

    /// Markdown link to the rendered README.
    pub fn readme_link(&self) -> String {
        format!(
            "[README](https://github.com/{}/{}#readme)",
            self.owner, self.name
        )
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_ignores_stars() {
        let a = Repository::new("dotnet", "runtime", 10);
        let b = Repository::new("dotnet", "runtime", 20);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let a = Repository::new("dotnet", "runtime", 10);
        let b = Repository::new("Dotnet", "runtime", 10);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_strings() {
        let repo = Repository::new("ClosedXML", "ClosedXML", 4000);
        assert_eq!(repo.full_name(), "ClosedXML/ClosedXML");
        assert_eq!(
            repo.repository_link(),
            "[ClosedXML/ClosedXML](https://github.com/ClosedXML/ClosedXML)"
        );
        assert_eq!(
            repo.readme_link(),
            "[README](https://github.com/ClosedXML/ClosedXML#readme)"
        );
    }
}
