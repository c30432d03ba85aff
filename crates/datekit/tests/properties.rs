//! Property tests for the tokenizer and the duration algebra.

use chrono::{DateTime, TimeZone, Utc};
use datekit::{serialize, tokenize, ComponentMap, DateDifference, FieldKind};
use proptest::prelude::*;

fn pattern_chars() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just('\''),
            Just('y'),
            Just('M'),
            Just('d'),
            Just('H'),
            Just('z'),
            Just('-'),
            Just(' '),
            Just('.'),
            Just('T'),
            any::<char>(),
        ],
        0..40,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn field_kind() -> impl Strategy<Value = FieldKind> {
    proptest::sample::select(FieldKind::ALL.to_vec())
}

fn component_map() -> impl Strategy<Value = ComponentMap> {
    proptest::collection::btree_map(field_kind(), -1_000i64..1_000, 0..6)
}

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000).prop_map(|s| Utc.timestamp_opt(s, 0).unwrap())
}

proptest! {
    #[test]
    fn tokenize_serialize_round_trip(pattern in pattern_chars()) {
        let tokens = tokenize(&pattern);
        prop_assert_eq!(tokenize(&serialize(&tokens)), tokens);
    }

    #[test]
    fn tokenize_never_emits_empty_literal(pattern in pattern_chars()) {
        for token in tokenize(&pattern) {
            if let datekit::FormatToken::Literal { text } = token {
                prop_assert!(!text.is_empty());
            }
        }
    }

    #[test]
    fn seconds_projection_is_identity(x in -1e12f64..1e12) {
        prop_assert_eq!(DateDifference::from_seconds(x).interval_seconds(), x);
    }

    #[test]
    fn seconds_ordering_is_transitive(a in -1e9f64..1e9, b in -1e9f64..1e9, c in -1e9f64..1e9) {
        let (a, b, c) = (
            DateDifference::from_seconds(a),
            DateDifference::from_seconds(b),
            DateDifference::from_seconds(c),
        );
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn component_sum_is_key_union(left in component_map(), right in component_map()) {
        let sum = DateDifference::from(left.clone()) + DateDifference::from(right.clone());
        let map = sum.as_components().cloned().unwrap_or_default();
        let keys: Vec<_> = left.keys().chain(right.keys()).copied().collect();
        for key in &keys {
            let expected = left.get(key).copied().unwrap_or(0) + right.get(key).copied().unwrap_or(0);
            prop_assert_eq!(map.get(key).copied(), Some(expected));
        }
        prop_assert_eq!(map.len(), left.keys().chain(right.keys()).collect::<std::collections::BTreeSet<_>>().len());
    }

    #[test]
    fn negation_is_scaling_by_minus_one(map in component_map()) {
        let diff = DateDifference::from(map);
        let negated = -diff.clone();
        let scaled = diff * -1;
        prop_assert_eq!(negated.as_components(), scaled.as_components());
    }

    #[test]
    fn instant_pair_projects_elapsed_seconds(from in instant(), to in instant()) {
        let diff = DateDifference::from_instants(from, to);
        prop_assert_eq!(diff.interval_seconds(), (to - from).num_seconds() as f64);
    }
}
