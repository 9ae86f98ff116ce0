//! Strikethrough classifier.

use crate::core::Repository;
use crate::store::AggregationStore;

/// Delimiter of strikethrough spans.
pub const STRIKETHROUGH_DELIMITER: char = '~';

/// Marks the repository when the emphasis is delimited by tildes.
pub fn classify(delimiter: char, repository: &Repository, store: &mut AggregationStore) {
    if delimiter == STRIKETHROUGH_DELIMITER {
        store.track_strikethrough(repository);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_tilde_counts() {
        let repo = Repository::new("owner", "repo", 1);
        let mut store = AggregationStore::new();
        classify('*', &repo, &mut store);
        classify('_', &repo, &mut store);
        assert!(store.strikethrough.is_empty());

        classify('~', &repo, &mut store);
        classify('~', &repo, &mut store);
        assert_eq!(store.strikethrough.len(), 1);
    }
}
