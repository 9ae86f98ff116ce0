//! Table classifier.

use crate::core::Repository;
use crate::store::AggregationStore;

/// Any table marks the repository.
pub fn classify(repository: &Repository, store: &mut AggregationStore) {
    store.track_table(repository);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_listed_once() {
        let repo = Repository::new("owner", "repo", 1);
        let mut store = AggregationStore::new();
        classify(&repo, &mut store);
        classify(&repo, &mut store);
        assert_eq!(store.tables.len(), 1);
    }
}
