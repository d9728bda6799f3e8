//! Typed filter expressions.
//!
//! A [`FilterExpression`] is an ordered list of key/entry pairs. The keys
//! `and`, `or` and `not` are reserved boolean operators whose entry is a
//! nested expression; every other key names a document field constrained by
//! a [`FieldConstraint`]. Entry order is preserved because compilation walks
//! the expression left to right.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Reserved boolean operator keys.
pub(crate) fn is_operator(key: &str) -> bool {
    matches!(key, "and" | "or" | "not")
}

/// A single scalar value in a field constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Time(DateTime<Utc>),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(value: DateTime<Tz>) -> Self {
        FieldValue::Time(value.with_timezone(&Utc))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Time(value.and_time(NaiveTime::MIN).and_utc())
    }
}

// Temporal fields use the same wire form everywhere: ISO-8601 UTC with
// seconds precision and a literal `Z`.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Int(n) => serializer.serialize_i64(*n),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::Time(t) => {
                serializer.serialize_str(&t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            }
        }
    }
}

/// A single field's match criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraint {
    /// Exact equality against one scalar.
    Scalar(FieldValue),
    /// Inclusive interval containment. Endpoint ordering is not enforced;
    /// the service decides validity.
    Range { first: FieldValue, last: FieldValue },
    /// Disjunction over equality per element, in order.
    AnyOf(Vec<FieldValue>),
}

impl FieldConstraint {
    pub fn range(first: impl Into<FieldValue>, last: impl Into<FieldValue>) -> Self {
        FieldConstraint::Range {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn any_of<V: Into<FieldValue>>(values: impl IntoIterator<Item = V>) -> Self {
        FieldConstraint::AnyOf(values.into_iter().map(Into::into).collect())
    }
}

impl From<FieldValue> for FieldConstraint {
    fn from(value: FieldValue) -> Self {
        FieldConstraint::Scalar(value)
    }
}

impl From<i64> for FieldConstraint {
    fn from(value: i64) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl From<i32> for FieldConstraint {
    fn from(value: i32) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl From<f64> for FieldConstraint {
    fn from(value: f64) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl From<bool> for FieldConstraint {
    fn from(value: bool) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl From<&str> for FieldConstraint {
    fn from(value: &str) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl From<String> for FieldConstraint {
    fn from(value: String) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldConstraint {
    fn from(value: DateTime<Tz>) -> Self {
        FieldConstraint::Scalar(value.into())
    }
}

impl From<std::ops::RangeInclusive<i64>> for FieldConstraint {
    fn from(range: std::ops::RangeInclusive<i64>) -> Self {
        let (first, last) = range.into_inner();
        FieldConstraint::range(first, last)
    }
}

impl From<std::ops::Range<i64>> for FieldConstraint {
    fn from(range: std::ops::Range<i64>) -> Self {
        FieldConstraint::range(range.start, range.end)
    }
}

impl<Tz: TimeZone> From<std::ops::Range<DateTime<Tz>>> for FieldConstraint {
    fn from(range: std::ops::Range<DateTime<Tz>>) -> Self {
        FieldConstraint::range(range.start, range.end)
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for FieldConstraint {
    fn from(values: Vec<V>) -> Self {
        FieldConstraint::any_of(values)
    }
}

impl<V: Into<FieldValue> + Clone> From<&[V]> for FieldConstraint {
    fn from(values: &[V]) -> Self {
        FieldConstraint::any_of(values.iter().cloned())
    }
}

/// The entry under one filter-expression key.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEntry {
    /// A nested expression; valid only under an operator key.
    Expr(FilterExpression),
    /// A field constraint; valid only under a field-name key.
    Constraint(FieldConstraint),
}

/// An ordered boolean combination of field constraints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterExpression {
    pub(crate) entries: Vec<(String, FilterEntry)>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conjoins a nested expression under the `and` operator.
    pub fn and(mut self, expr: FilterExpression) -> Self {
        self.entries.push(("and".to_string(), FilterEntry::Expr(expr)));
        self
    }

    /// Disjoins a nested expression under the `or` operator.
    pub fn or(mut self, expr: FilterExpression) -> Self {
        self.entries.push(("or".to_string(), FilterEntry::Expr(expr)));
        self
    }

    /// Negates a nested expression. At the top level of [`compile`] a bare
    /// `not` is folded into an enclosing `and` before reduction.
    ///
    /// [`compile`]: crate::query::compile
    pub fn not(mut self, expr: FilterExpression) -> Self {
        self.entries.push(("not".to_string(), FilterEntry::Expr(expr)));
        self
    }

    /// Adds a field constraint. A reserved operator name used as a field key
    /// is rejected by [`compile`], not here.
    ///
    /// [`compile`]: crate::query::compile
    pub fn field(mut self, key: impl Into<String>, constraint: impl Into<FieldConstraint>) -> Self {
        self.entries
            .push((key.into(), FilterEntry::Constraint(constraint.into())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Compiles this expression into the structured-query grammar.
    pub fn compile(&self) -> Result<String> {
        super::compiler::compile(self)
    }

    /// Builds an expression from a JSON object.
    ///
    /// Operator keys recurse into nested objects; under field keys, an object
    /// with exactly the keys `first` and `last` is a range, an array is a
    /// disjunction, and scalars map onto [`FieldValue`]. Key order is
    /// preserved.
    pub fn parse_json(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            Error::InvalidFilterExpression("filter expression must be a JSON object".to_string())
        })?;

        let mut expr = FilterExpression::new();
        for (key, entry) in map {
            if is_operator(key) {
                if !entry.is_object() {
                    return Err(Error::InvalidFilterExpression(format!(
                        "operator '{key}' must map to a nested filter expression"
                    )));
                }
                expr.entries
                    .push((key.clone(), FilterEntry::Expr(Self::parse_json(entry)?)));
            } else {
                expr.entries
                    .push((key.clone(), FilterEntry::Constraint(constraint_from_json(key, entry)?)));
            }
        }
        Ok(expr)
    }
}

fn constraint_from_json(key: &str, value: &Value) -> Result<FieldConstraint> {
    match value {
        Value::Array(items) => {
            let values = items
                .iter()
                .map(|item| scalar_from_json(key, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(FieldConstraint::AnyOf(values))
        }
        Value::Object(map) => {
            let (first, last) = match (map.get("first"), map.get("last")) {
                (Some(first), Some(last)) if map.len() == 2 => (first, last),
                _ => {
                    return Err(Error::InvalidFilterExpression(format!(
                        "field '{key}' expects a scalar, an array, or a {{first, last}} range"
                    )))
                }
            };
            Ok(FieldConstraint::Range {
                first: scalar_from_json(key, first)?,
                last: scalar_from_json(key, last)?,
            })
        }
        scalar => Ok(FieldConstraint::Scalar(scalar_from_json(key, scalar)?)),
    }
}

fn scalar_from_json(key: &str, value: &Value) -> Result<FieldValue> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(FieldValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(FieldValue::Float(f))
            } else {
                Err(Error::InvalidFilterExpression(format!(
                    "field '{key}' has an unrepresentable number"
                )))
            }
        }
        Value::String(s) => Ok(FieldValue::Str(s.clone())),
        Value::Bool(b) => Ok(FieldValue::Bool(*b)),
        Value::Null => Ok(FieldValue::Str(String::new())),
        _ => Err(Error::InvalidFilterExpression(format!(
            "field '{key}' holds a nested structure where a scalar was expected"
        ))),
    }
}
