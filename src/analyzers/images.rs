//! Image host classifier.
//!
//! Flags images served from hosts outside the trusted allow-list.

use url::Url;

use super::Policy;
use crate::core::Repository;
use crate::store::AggregationStore;

/// Record the image's host if it is not trusted.
///
/// Relative URLs and URLs without a host (`data:` images) are skipped.
pub fn classify(url: &str, repository: &Repository, policy: &Policy, store: &mut AggregationStore) {
    if let Some(host) = disallowed_host(url, policy) {
        store.track_disallowed_image_host(repository, &host);
    }
}

/// The host of `url` when it parses as an absolute URI and is not trusted.
pub fn disallowed_host(url: &str, policy: &Policy) -> Option<String> {
    let uri = Url::parse(url.trim()).ok()?;
    let host = uri.host_str().filter(|host| !host.is_empty())?;
    if policy.is_trusted_image_host(host) {
        None
    } else {
        Some(host.to_string())
    }
}
