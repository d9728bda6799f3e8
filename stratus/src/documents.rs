//! Document payloads for the batch update endpoint.
//!
//! The service accepts one JSON array of operations per request:
//! `{"type": "add", "id": ..., "fields": {...}}` to index a document and
//! `{"type": "delete", "id": ...}` to drop one. Field values are normalized
//! on the way out: temporal values render as ISO-8601 UTC strings and
//! missing values as the empty string, which the service indexes as empty
//! text instead of rejecting the batch.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Serialize, Serializer};

use crate::query::FieldValue;

/// One document field value, normalized for the batch payload.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    Scalar(FieldValue),
    List(Vec<FieldValue>),
    Null,
}

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DocValue::Scalar(value) => value.serialize(serializer),
            DocValue::List(values) => values.serialize(serializer),
            DocValue::Null => serializer.serialize_str(""),
        }
    }
}

impl From<FieldValue> for DocValue {
    fn from(value: FieldValue) -> Self {
        DocValue::Scalar(value)
    }
}

impl From<i64> for DocValue {
    fn from(value: i64) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl From<i32> for DocValue {
    fn from(value: i32) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl From<f64> for DocValue {
    fn from(value: f64) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl From<bool> for DocValue {
    fn from(value: bool) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl From<&str> for DocValue {
    fn from(value: &str) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl From<String> for DocValue {
    fn from(value: String) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DocValue {
    fn from(value: DateTime<Tz>) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl From<NaiveDate> for DocValue {
    fn from(value: NaiveDate) -> Self {
        DocValue::Scalar(value.into())
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for DocValue {
    fn from(values: Vec<V>) -> Self {
        DocValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<DocValue>> From<Option<V>> for DocValue {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => value.into(),
            None => DocValue::Null,
        }
    }
}

/// A document scheduled for indexing, keyed by the service document id.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    pub fields: HashMap<String, DocValue>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Document {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<DocValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// One entry in the service's JSON batch format.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum BatchOperation {
    Add {
        id: String,
        fields: HashMap<String, DocValue>,
    },
    Delete {
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_add_operation_shape() {
        let op = BatchOperation::Add {
            id: "4".to_string(),
            fields: HashMap::from([("name".to_string(), DocValue::from("Party Pooper"))]),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"type": "add", "id": "4", "fields": {"name": "Party Pooper"}})
        );
    }

    #[test]
    fn test_delete_operation_shape() {
        let op = BatchOperation::Delete {
            id: "13".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"type": "delete", "id": "13"})
        );
    }

    #[test]
    fn test_temporal_field_normalized() {
        let when = Utc.with_ymd_and_hms(2013, 1, 20, 10, 30, 0).unwrap();
        let value = DocValue::from(when);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!("2013-01-20T10:30:00Z")
        );
    }

    #[test]
    fn test_null_field_becomes_empty_string() {
        let value = DocValue::from(Option::<i64>::None);
        assert_eq!(serde_json::to_value(&value).unwrap(), json!(""));
    }

    #[test]
    fn test_list_field_converts_each_element() {
        let when = Utc.with_ymd_and_hms(2013, 1, 20, 0, 0, 0).unwrap();
        let value = DocValue::List(vec![when.into(), FieldValue::Int(3)]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!(["2013-01-20T00:00:00Z", 3])
        );
    }

    #[test]
    fn test_document_builder() {
        let doc = Document::new("4").field("name", "Party Pooper").field("age", 41i64);
        assert_eq!(doc.id, "4");
        assert_eq!(doc.fields.len(), 2);
        assert_eq!(doc.fields["age"], DocValue::Scalar(FieldValue::Int(41)));
    }
}
