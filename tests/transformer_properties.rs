//! Property tests for the built-in transformers and composite validation.

use calmform::{Path, Schema, Transformer, Value, validate};
use proptest::prelude::*;

fn non_blank_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-zA-Z0-9 .,!?-]{0,20}[a-zA-Z0-9][a-zA-Z0-9 ]{0,5}")
        .expect("valid regex for non-blank text")
}

fn blank_text() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[ \t\n]{0,8}").expect("valid regex for blank text")
}

fn field_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(r"[a-z][a-z_]{0,8}", 1..6)
        .prop_map(|names| names.into_iter().collect())
}

proptest! {
    #[test]
    fn text_round_trips_non_blank_strings(text in non_blank_text()) {
        let transformer = Transformer::text();
        let value = Value::string(text);
        prop_assert_eq!(transformer.parse(&transformer.format(&value)), value);
    }

    #[test]
    fn blank_text_parses_to_null(text in blank_text()) {
        prop_assert_eq!(Transformer::text().parse(&Value::string(text)), Value::Null);
    }

    #[test]
    fn numbers_round_trip_through_their_text(number in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let transformer = Transformer::number();
        let formatted = transformer.format(&Value::Number(number));
        prop_assert!(formatted.as_str().is_some());
        prop_assert_eq!(transformer.parse(&formatted), Value::Number(number));
    }

    #[test]
    fn select_sentinel_only_captures_null(key in "[A-Za-z][A-Za-z0-9]{0,8}") {
        let transformer = Transformer::select(Some("".into()));
        prop_assert_eq!(transformer.parse(&transformer.format(&Value::Null)), Value::Null);
        let selected = Value::string(key);
        prop_assert_eq!(transformer.parse(&transformer.format(&selected)), selected.clone());

        let identity = Transformer::select(None);
        prop_assert_eq!(identity.format(&selected), selected.clone());
        prop_assert_eq!(identity.parse(&selected), selected);
    }

    #[test]
    fn composites_accept_exactly_their_declared_fields(names in field_names()) {
        let schema = Schema::composite(
            "Generated",
            names.iter().map(|name| (name.clone(), Schema::string())),
        );
        let value = Value::object(names.iter().map(|name| (name.clone(), Value::string("x"))));
        let result = validate(&value, &schema, &Path::root());
        prop_assert!(result.is_valid());
        let branded = result.value.as_struct().expect("valid composites are branded");
        prop_assert_eq!(branded.fields.len(), names.len());

        let missing = validate(&Value::object(Vec::<(String, Value)>::new()), &schema, &Path::root());
        prop_assert_eq!(missing.errors.len(), names.len());
        for (error, name) in missing.errors.iter().zip(&names) {
            prop_assert_eq!(&error.path, &Path::from(name.as_str()));
        }
    }
}

