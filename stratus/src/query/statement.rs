//! Statement builder: renders one field/constraint pair as a wire-level term.

use super::filter::{FieldConstraint, FieldValue};

/// Renders a single field constraint in the structured-query grammar.
///
/// Scalars become `key:value`, ranges become `key:[first,last]`, and
/// collections become one ` key:value` term per element, each with a leading
/// space (the caller wraps the juxtaposed terms in an `(or ...)` group).
/// An empty collection renders as the empty string.
pub fn build_statement(key: &str, constraint: &FieldConstraint) -> String {
    match constraint {
        FieldConstraint::Scalar(value) => format!("{key}:{}", convert_value(value)),
        FieldConstraint::Range { first, last } => {
            format!("{key}:[{},{}]", convert_value(first), convert_value(last))
        }
        FieldConstraint::AnyOf(values) => {
            let mut terms = String::new();
            for value in values {
                terms.push(' ');
                terms.push_str(key);
                terms.push(':');
                terms.push_str(&convert_value(value));
            }
            terms
        }
    }
}

/// Converts one scalar to its term form: numerics unquoted, temporal values
/// single-quoted ISO-8601 UTC, everything else single-quoted as-is.
pub fn convert_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(n) => n.to_string(),
        FieldValue::Float(f) => f.to_string(),
        FieldValue::Time(t) => format!("'{}'", t.format("%Y-%m-%dT%H:%M:%SZ")),
        FieldValue::Bool(b) => format!("'{b}'"),
        FieldValue::Str(s) => format!("'{s}'"),
    }
}
