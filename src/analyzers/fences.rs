//! Code fence classifier.

use super::Policy;
use crate::core::Repository;
use crate::store::AggregationStore;

/// Record the fence's language label, case preserved. Empty labels count.
pub fn classify(info: &str, repository: &Repository, store: &mut AggregationStore) {
    store.track_code_fence(repository, info);
}

/// Whether the label is one of the C# aliases. Reported alongside the label,
/// never used as a key.
pub fn is_csharp(info: &str, policy: &Policy) -> bool {
    policy.is_csharp_fence(info)
}
