//! Property-based tests for the statement builder and compiler.

use proptest::prelude::*;
use stratus::query::{build_statement, compile};
use stratus::{FieldConstraint, FieldValue, FilterExpression};

proptest! {
    /// Integers render unquoted, with no brackets.
    #[test]
    fn integers_render_unquoted(n in any::<i64>()) {
        let constraint = FieldConstraint::from(n);
        prop_assert_eq!(build_statement("f", &constraint), format!("f:{n}"));
    }

    /// Strings render single-quoted as-is.
    #[test]
    fn strings_render_quoted(s in "[a-zA-Z0-9 @.\\-]{0,30}") {
        let constraint = FieldConstraint::from(s.as_str());
        prop_assert_eq!(build_statement("f", &constraint), format!("f:'{s}'"));
    }

    /// Range endpoints each go through the scalar converter.
    #[test]
    fn ranges_convert_each_endpoint(a in any::<i64>(), b in any::<i64>()) {
        let constraint = FieldConstraint::range(a, b);
        prop_assert_eq!(build_statement("f", &constraint), format!("f:[{a},{b}]"));
    }

    /// A collection renders one space-prefixed term per element, in order.
    #[test]
    fn collections_concatenate_in_order(values in prop::collection::vec(any::<i64>(), 0..8)) {
        let constraint = FieldConstraint::any_of(values.clone());
        let expected: String = values.iter().map(|v| format!(" f:{v}")).collect();
        prop_assert_eq!(build_statement("f", &constraint), expected);
    }

    /// A single scalar field compiles to its statement with one leading space.
    #[test]
    fn compiled_scalar_field_is_space_prefixed(n in any::<i64>(), key in "f[a-z]{0,9}") {
        let filter = FilterExpression::new().field(key.as_str(), n);
        let statement = build_statement(&key, &FieldConstraint::from(n));
        prop_assert_eq!(compile(&filter).unwrap(), format!(" {statement}"));
    }

    /// Compilation balances parentheses and never emits an empty group.
    #[test]
    fn compiled_output_is_balanced(
        keys in prop::collection::vec("f[a-z]{0,7}", 1..5),
        values in prop::collection::vec(any::<i64>(), 1..5),
    ) {
        let mut inner = FilterExpression::new();
        for (key, value) in keys.iter().zip(&values) {
            inner = inner.field(key.as_str(), *value);
        }
        let filter = FilterExpression::new().and(inner);
        let compiled = compile(&filter).unwrap();
        prop_assert_eq!(compiled.matches('(').count(), compiled.matches(')').count());
        prop_assert!(!compiled.contains("()"));
    }

    /// The scalar converter is total over the value kinds.
    #[test]
    fn converter_never_panics(n in any::<i64>(), f in any::<f64>(), b in any::<bool>()) {
        for value in [FieldValue::Int(n), FieldValue::Float(f), FieldValue::Bool(b)] {
            let _ = build_statement("f", &FieldConstraint::Scalar(value));
        }
    }
}
