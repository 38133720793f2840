//! Unit tests for store-assigned identifiers

use core_kernel::CustomerId;
use std::collections::HashSet;

#[test]
fn test_generate_is_unique() {
    let ids: HashSet<CustomerId> = (0..100).map(|_| CustomerId::generate()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_generate_is_time_ordered() {
    let first = CustomerId::generate();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = CustomerId::generate();
    assert!(first < second);
}

#[test]
fn test_conversions() {
    let id = CustomerId::from("66aeee840271a2600f91d799");
    assert_eq!(id.as_str(), "66aeee840271a2600f91d799");
    assert_eq!(id.as_ref(), "66aeee840271a2600f91d799");

    let raw: String = id.clone().into();
    assert_eq!(raw, "66aeee840271a2600f91d799");
    assert_eq!(CustomerId::from(raw), id);
}

#[test]
fn test_serializes_as_plain_string() {
    let id = CustomerId::new("66aeee840271a2600f91d799");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"66aeee840271a2600f91d799\"");

    let back: CustomerId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
