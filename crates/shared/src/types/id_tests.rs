use super::*;
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn test_order_id_format() {
    let id = OrderId::generate();
    let parts: Vec<&str> = id.as_str().split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "ORD");
    assert_eq!(parts[2].len(), 3);
    assert_eq!(id.as_str(), id.as_str().to_uppercase());
}

#[test]
fn test_order_id_roundtrips_through_from_str() {
    let id = OrderId::generate();
    let parsed = OrderId::from_str(id.as_str()).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_order_id_from_str_error() {
    assert!(OrderId::from_str("invalid").is_err());
    assert!(OrderId::from_str("ORD-abc-X7F").is_err());
    assert!(OrderId::from_str("ORD-LZ3K9Q1A").is_err());
    assert!(OrderId::from_str("ORD-LZ3K9Q1A-X7F-1").is_err());
    assert!(OrderId::from_str("INV-LZ3K9Q1A-X7F").is_err());
}

#[test]
fn test_order_id_display() {
    let id = OrderId::from_str("ORD-LZ3K9Q1A-X7F").unwrap();
    assert_eq!(format!("{id}"), "ORD-LZ3K9Q1A-X7F");
}

#[test]
fn test_order_ids_are_distinct() {
    let ids: HashSet<OrderId> = (0..200).map(|_| OrderId::generate()).collect();
    // Same-millisecond IDs only differ by a 3-char suffix, so allow rare collisions.
    assert!(ids.len() > 190);
}

#[test]
fn test_base36() {
    assert_eq!(to_base36(0), "0");
    assert_eq!(to_base36(35), "Z");
    assert_eq!(to_base36(36), "10");
    assert_eq!(to_base36(46_655), "ZZZ");
}

proptest! {
    #[test]
    fn prop_base36_segments_parse(value in 1u64..u64::MAX, suffix in 0u128..46_656) {
        let raw = format!(
            "ORD-{}-{:0>3}",
            to_base36(u128::from(value)),
            to_base36(suffix)
        );
        prop_assert!(OrderId::from_str(&raw).is_ok());
    }
}
