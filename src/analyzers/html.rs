//! HTML element classifier.
//!
//! A lexical scan, not an HTML parser: a tag start is `<` followed by ASCII
//! letters and at most one trailing digit `1`-`9`, or a `<!--` comment
//! opener. Closing tags never match. `<h10>` is seen as `h1`, which keeps
//! element keys comparable with earlier report runs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::Repository;
use crate::store::AggregationStore;

static TAG_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z]+[1-9]?|<!--").expect("valid tag pattern"));

/// Mark the repository as using HTML and record each element found.
pub fn classify(raw: &str, repository: &Repository, store: &mut AggregationStore) {
    store.track_html(repository);
    for element in element_names(raw) {
        store.track_html_element(repository, element);
    }
}

/// Element names in `raw`, without the leading `<`. A comment is `!--`.
pub fn element_names(raw: &str) -> impl Iterator<Item = &str> {
    TAG_START.find_iter(raw).map(|m| &m.as_str()[1..])
}
