//! Aggregation store.
//!
//! One [`AggregationStore`] is created per run, mutated by the classifiers
//! while the corpus is walked, then read once by the report builder. Every
//! tracking operation is idempotent, and every collection remembers insertion
//! order so reports are deterministic for a given input order.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::analyzers::links::SpecialLink;
use crate::core::Repository;

/// An insertion-ordered set.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    index: HashSet<T>,
}

impl<T: Clone + Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Insert `item`; returns false if it was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.index.contains(&item) {
            return false;
        }
        self.index.insert(item.clone());
        self.items.push(item);
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone + Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for OrderedSet<T> {}

/// How keys of a [`KeyedRepositories`] compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparison {
    /// ASCII case-insensitive; the first spelling seen is displayed.
    CaseInsensitive,
    /// Byte-for-byte.
    Exact,
}

impl KeyComparison {
    fn normalize(self, key: &str) -> String {
        match self {
            KeyComparison::CaseInsensitive => key.to_ascii_lowercase(),
            KeyComparison::Exact => key.to_string(),
        }
    }
}

/// The repositories recorded under one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGroup {
    /// Key as first seen.
    pub key: String,
    /// Contributing repositories, in insertion order.
    pub repositories: OrderedSet<Repository>,
}

impl KeyGroup {
    /// Sum of the stars of every contributing repository.
    pub fn total_stars(&self) -> u64 {
        self.repositories.iter().map(|repo| repo.stars).sum()
    }
}

/// Classification key → deduplicated set of repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRepositories {
    comparison: KeyComparison,
    groups: Vec<KeyGroup>,
    index: HashMap<String, usize>,
}

impl KeyedRepositories {
    pub fn new(comparison: KeyComparison) -> Self {
        Self {
            comparison,
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn case_insensitive() -> Self {
        Self::new(KeyComparison::CaseInsensitive)
    }

    pub fn exact() -> Self {
        Self::new(KeyComparison::Exact)
    }

    /// Record that `repository` has `key`. Returns false if already recorded.
    pub fn track(&mut self, key: &str, repository: &Repository) -> bool {
        let normalized = self.comparison.normalize(key);
        let slot = match self.index.get(&normalized) {
            Some(&slot) => slot,
            None => {
                self.groups.push(KeyGroup {
                    key: key.to_string(),
                    repositories: OrderedSet::new(),
                });
                let slot = self.groups.len() - 1;
                self.index.insert(normalized, slot);
                slot
            }
        };
        self.groups[slot].repositories.insert(repository.clone())
    }

    /// Repositories recorded under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&KeyGroup> {
        let slot = self.index.get(&self.comparison.normalize(key))?;
        self.groups.get(*slot)
    }

    /// Groups in first-seen key order.
    pub fn groups(&self) -> &[KeyGroup] {
        &self.groups
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of (key, repository) pairs.
    pub fn pair_count(&self) -> usize {
        self.groups.iter().map(|g| g.repositories.len()).sum()
    }
}

/// Everything the classifiers learned about the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationStore {
    /// Image hosts outside the trusted allow-list.
    pub disallowed_image_hosts: KeyedRepositories,
    /// HTML element names found in HTML blocks.
    pub html_elements: KeyedRepositories,
    /// Code fence language labels.
    pub code_fences: KeyedRepositories,
    /// Repositories whose README has a table.
    pub tables: OrderedSet<Repository>,
    /// Repositories whose README has an HTML block.
    pub html: OrderedSet<Repository>,
    /// Repositories whose README uses strikethrough.
    pub strikethrough: OrderedSet<Repository>,
    /// Links with a scheme other than http/https.
    pub special_links: OrderedSet<(SpecialLink, Repository)>,
}

impl Default for AggregationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationStore {
    pub fn new() -> Self {
        Self {
            disallowed_image_hosts: KeyedRepositories::case_insensitive(),
            html_elements: KeyedRepositories::case_insensitive(),
            code_fences: KeyedRepositories::exact(),
            tables: OrderedSet::new(),
            html: OrderedSet::new(),
            strikethrough: OrderedSet::new(),
            special_links: OrderedSet::new(),
        }
    }

    pub fn track_disallowed_image_host(&mut self, repository: &Repository, host: &str) {
        self.disallowed_image_hosts.track(host, repository);
    }

    pub fn track_html_element(&mut self, repository: &Repository, element: &str) {
        self.html_elements.track(element, repository);
    }

    pub fn track_code_fence(&mut self, repository: &Repository, info: &str) {
        self.code_fences.track(info, repository);
    }

    pub fn track_table(&mut self, repository: &Repository) {
        self.tables.insert(repository.clone());
    }

    pub fn track_html(&mut self, repository: &Repository) {
        self.html.insert(repository.clone());
    }

    pub fn track_strikethrough(&mut self, repository: &Repository) {
        self.strikethrough.insert(repository.clone());
    }

    pub fn track_special_link(&mut self, repository: &Repository, link: &SpecialLink) {
        self.special_links.insert((link.clone(), repository.clone()));
    }
}
