//! Completion of property paths and type aliases.

use mapperlink::ide::{CompletionKind, alias_completions, property_completions};

use crate::helpers::host_helpers::{host_with_project, type_symbol};

fn labels(items: &[mapperlink::ide::CompletionItem]) -> Vec<String> {
    let mut labels: Vec<_> = items.iter().map(|i| i.label.to_string()).collect();
    labels.sort();
    labels
}

#[test]
fn test_first_segment_offers_settable_properties() {
    let mut host = host_with_project();
    let ctx = host.context();
    let user = type_symbol(&ctx, "com.app.model.User");

    let items = property_completions(&ctx, &user, "");
    assert_eq!(labels(&items), ["address", "id", "name"]);
    assert!(items.iter().all(|i| i.kind == CompletionKind::Property));
}

#[test]
fn test_nested_segment_completes_against_segment_type() {
    let mut host = host_with_project();
    let ctx = host.context();
    let user = type_symbol(&ctx, "com.app.model.User");

    let items = property_completions(&ctx, &user, "address.ci");
    assert_eq!(labels(&items), ["city"]);
    assert_eq!(items[0].detail.as_deref(), Some("java.lang.String"));
}

#[test]
fn test_unresolved_prefix_offers_nothing() {
    let mut host = host_with_project();
    let ctx = host.context();
    let user = type_symbol(&ctx, "com.app.model.User");
    assert!(property_completions(&ctx, &user, "zip.ci").is_empty());
}

#[test]
fn test_alias_completions_are_sorted_and_filtered() {
    let mut host = host_with_project();
    let ctx = host.context();

    let items = alias_completions(&ctx, "A");
    let found: Vec<_> = items.iter().map(|i| i.label.to_string()).collect();
    assert_eq!(found, ["Address"]);
    assert_eq!(items[0].detail.as_deref(), Some("com.app.model.Address"));

    let all = alias_completions(&ctx, "");
    let found: Vec<_> = all.iter().map(|i| i.label.to_string()).collect();
    let mut sorted = found.clone();
    sorted.sort();
    assert_eq!(found, sorted);
    assert!(found.contains(&"Member".to_string()));
    assert!(found.contains(&"purchase".to_string()));
}
