use proptest::prelude::*;

use readme_survey::analyzers::links::{self, SpecialLink};
use readme_survey::analyzers::{Classifier, Policy};
use readme_survey::config::DEFAULT_TRUSTED_IMAGE_HOSTS;
use readme_survey::core::Repository;
use readme_survey::parser::Document;
use readme_survey::report::Reports;
use readme_survey::store::AggregationStore;

fn repository() -> impl Strategy<Value = Repository> {
    ("[a-c]", "[x-z]", 0u64..1_000).prop_map(|(owner, name, stars)| Repository::new(owner, name, stars))
}

/// Randomly upper-cases ASCII letters.
fn recase(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

#[derive(Debug, Clone)]
enum Fact {
    Host(String),
    Element(String),
    Fence(String),
    Table,
    Html,
    Strikethrough,
    Mailto(String),
}

fn fact() -> impl Strategy<Value = Fact> {
    prop_oneof![
        "[a-cA-C]{1,3}\\.example\\.com".prop_map(Fact::Host),
        "[a-dA-D]{1,3}".prop_map(Fact::Element),
        "[a-c#]{0,3}".prop_map(Fact::Fence),
        Just(Fact::Table),
        Just(Fact::Html),
        Just(Fact::Strikethrough),
        "[a-z]{1,8}".prop_map(Fact::Mailto),
    ]
}

fn track(store: &mut AggregationStore, repo: &Repository, fact: &Fact) {
    match fact {
        Fact::Host(host) => store.track_disallowed_image_host(repo, host),
        Fact::Element(element) => store.track_html_element(repo, element),
        Fact::Fence(info) => store.track_code_fence(repo, info),
        Fact::Table => store.track_table(repo),
        Fact::Html => store.track_html(repo),
        Fact::Strikethrough => store.track_strikethrough(repo),
        Fact::Mailto(local) => {
            let link = SpecialLink::parse(&format!("mailto:{local}@example.com")).unwrap();
            store.track_special_link(repo, &link)
        }
    }
}

proptest! {
    /// Tracking every fact twice leaves the store as tracking it once.
    #[test]
    fn tracking_is_idempotent(facts in prop::collection::vec((repository(), fact()), 0..40)) {
        let mut once = AggregationStore::new();
        let mut twice = AggregationStore::new();
        for (repo, fact) in &facts {
            track(&mut once, repo, fact);
            track(&mut twice, repo, fact);
            track(&mut twice, repo, fact);
        }
        prop_assert_eq!(&once, &twice);

        let policy = Policy::default();
        prop_assert_eq!(Reports::build(&once, &policy), Reports::build(&twice, &policy));
    }

    /// Trusted hosts are never reported, whatever their case.
    #[test]
    fn allow_list_holds_in_any_case(
        index in 0..DEFAULT_TRUSTED_IMAGE_HOSTS.len(),
        mask in prop::collection::vec(any::<bool>(), 1..16),
        path in "[a-z]{1,8}",
    ) {
        let host = recase(DEFAULT_TRUSTED_IMAGE_HOSTS[index], &mask);
        let source = format!("![badge](https://{host}/{path}.svg)\n");
        let repo = Repository::new("owner", "repo", 1);
        let mut store = AggregationStore::new();
        Classifier::default().classify_document(&Document::parse(&source), &repo, &mut store);

        prop_assert!(store.disallowed_image_hosts.is_empty());
    }

    /// mailto rows carry the redaction token and never the address.
    #[test]
    fn mailto_is_always_redacted(local in "q[0-9]{2,8}", domain in "z[0-9]{2,8}") {
        let source = format!("[mail](mailto:{local}@{domain}.org) <{local}@{domain}.net>\n");
        let repo = Repository::new("owner", "repo", 1);
        let mut store = AggregationStore::new();
        Classifier::default().classify_document(&Document::parse(&source), &repo, &mut store);
        let reports = Reports::build(&store, &Policy::default());

        prop_assert!(!reports.special_links.is_empty());
        for row in &reports.special_links {
            prop_assert_eq!(row.scheme.as_str(), "mailto");
            prop_assert!(row.link.contains(links::REDACTED));
            prop_assert!(!row.link.contains(&local));
            prop_assert!(!row.link.contains(&domain));
        }
    }

    /// Host groups come out in non-increasing order of their star sums.
    #[test]
    fn host_groups_sorted_by_star_sum(
        facts in prop::collection::vec((repository(), "[a-e]\\.example\\.com"), 0..40),
    ) {
        let mut store = AggregationStore::new();
        for (repo, host) in &facts {
            store.track_disallowed_image_host(repo, host);
        }
        let reports = Reports::build(&store, &Policy::default());

        let mut sums: Vec<(String, u64)> = Vec::new();
        for row in &reports.disallowed_image_hosts {
            match sums.last_mut() {
                Some((host, sum)) if *host == row.host => *sum += row.stars,
                _ => sums.push((row.host.clone(), row.stars)),
            }
        }
        // Each host forms exactly one contiguous group.
        let mut seen = std::collections::HashSet::new();
        for (host, _) in &sums {
            prop_assert!(seen.insert(host.clone()), "host {} split into two groups", host);
        }
        for pair in sums.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }

    /// Parsing and classifying arbitrary text never panics.
    #[test]
    fn classification_is_total(source in "\\PC{0,200}") {
        let repo = Repository::new("owner", "repo", 1);
        let mut store = AggregationStore::new();
        Classifier::default().classify_document(&Document::parse(&source), &repo, &mut store);
        let _ = Reports::build(&store, &Policy::default());
    }
}
