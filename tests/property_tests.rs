//! Property-based tests for the codec and the stateless helpers.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tabletext::format::{format_byte_size, format_duration, trim_whitespace};
use tabletext::password::generate_random_password_with;
use tabletext::{from_str_value, to_string_table, Key, Table, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e12..1.0e12f64).prop_map(Value::from),
        ".*".prop_map(Value::from),
    ]
}

fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        any::<i64>().prop_map(Key::Integer),
        ".*".prop_map(Key::String),
    ]
}

/// Nested mappings only: sequences reload as integer-keyed mappings.
fn mapping() -> impl Strategy<Value = Value> {
    let leaf = prop::collection::vec((key(), scalar()), 0..6).prop_map(to_mapping);
    leaf.prop_recursive(4, 64, 6, |inner| {
        prop::collection::vec((key(), prop_oneof![scalar(), inner]), 0..6).prop_map(to_mapping)
    })
}

fn to_mapping(entries: Vec<(Key, Value)>) -> Value {
    Value::Mapping(entries.into_iter().collect::<Table>())
}

proptest! {
    #[test]
    fn prop_table_layout_roundtrip(value in mapping()) {
        let text = to_string_table("data", value.as_mapping().unwrap()).unwrap();
        let loaded = from_str_value(&text).unwrap();
        prop_assert_eq!(loaded, value);
    }

    #[test]
    fn prop_table_layout_is_deterministic(value in mapping()) {
        let table = value.as_mapping().unwrap();
        prop_assert_eq!(
            to_string_table("data", table).unwrap(),
            to_string_table("data", &table.clone()).unwrap()
        );
    }

    #[test]
    fn prop_loader_never_panics(text in ".*") {
        let _ = from_str_value(&text);
    }

    #[test]
    fn prop_password_alphabet(seed in any::<u64>(), length in 1i64..=200) {
        let mut rng = StdRng::seed_from_u64(seed);
        let password = generate_random_password_with(&mut rng, length);
        prop_assert_eq!(password.len() as i64, length);
        let in_alphabet = password.chars().all(|c| {
            c.is_ascii_digit() || ('A'..='Y').contains(&c) || ('a'..='y').contains(&c)
        });
        prop_assert!(in_alphabet, "unexpected character in {:?}", password);
    }

    #[test]
    fn prop_duration_recomposes(seconds in 0i64..10_000_000) {
        let parts = format_duration(seconds as f64).unwrap();
        prop_assert!((0..24).contains(&parts.hours));
        prop_assert!((0..60).contains(&parts.minutes));
        prop_assert!((0.0..60.0).contains(&parts.seconds));
        let total = parts.days * 86400 + parts.hours * 3600 + parts.minutes * 60;
        prop_assert_eq!(total as f64 + parts.seconds, seconds as f64);
    }

    #[test]
    fn prop_byte_size_has_a_unit(bytes in 0.0..1.0e30f64) {
        let text = format_byte_size(bytes).unwrap();
        let unit = text.rsplit(' ').next().unwrap();
        prop_assert!(["B", "KB", "MB", "GB", "TB", "PB", "EB", "YB"].contains(&unit));
    }

    #[test]
    fn prop_trim_is_idempotent(s in ".*") {
        let once = trim_whitespace(&s);
        prop_assert_eq!(trim_whitespace(once), once);
    }
}
