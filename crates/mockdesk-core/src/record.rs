//! Schema-agnostic collection record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};
use crate::types::RecordId;

/// One item of a resource collection.
///
/// A record is a JSON object with an optional integer `id`. All other fields
/// are resource specific and kept as-is; nested objects are reachable with
/// dotted paths.
///
/// # Example
///
/// ```
/// use mockdesk_core::Record;
/// use serde_json::json;
///
/// let record = Record::new(json!({
///     "id": 1,
///     "name": "Leanne Graham",
///     "company": { "name": "Romaguera-Crona" }
/// })).unwrap();
///
/// assert_eq!(record.id().map(|id| id.get()), Some(1));
/// assert_eq!(record.text("company.name"), Some("Romaguera-Crona"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    /// Create a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an object or carries an `id`
    /// that is not a positive integer.
    pub fn new(value: Value) -> Result<Self, Error> {
        let Value::Object(mut fields) = value else {
            return Err(InvalidInputError::Record {
                reason: "record must be a JSON object".to_string(),
            }
            .into());
        };

        let id = match fields.remove("id") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => {
                let raw = n.as_u64().ok_or_else(|| InvalidInputError::Record {
                    reason: format!("id {} is not a positive integer", n),
                })?;
                Some(RecordId::new(raw)?)
            }
            Some(other) => {
                return Err(InvalidInputError::Record {
                    reason: format!("id must be a number, got {}", other),
                }
                .into());
            }
        };

        Ok(Self { id, fields })
    }

    /// Returns the identifier, if the record has been persisted.
    pub fn id(&self) -> Option<RecordId> {
        self.id
    }

    /// Returns this record with the given identifier.
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns this record without an identifier.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Look up a field by name or dotted path (`company.name`).
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Look up a string field by name or dotted path.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Set a top-level field.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Returns the non-identifier fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the record as a JSON object, identifier included.
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        if let Some(id) = self.id {
            object.insert("id".to_string(), Value::from(id.get()));
        }
        Value::Object(object)
    }

    /// Keep only the given top-level fields (the identifier is always kept).
    pub fn select(&self, fields: &[String]) -> Record {
        let selected = self
            .fields
            .iter()
            .filter(|(name, _)| fields.iter().any(|f| f == *name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Record {
            id: self.id,
            fields: selected,
        }
    }
}

/// Largest identifier in a snapshot.
pub fn max_id(records: &[Record]) -> Option<RecordId> {
    records.iter().filter_map(Record::id).max()
}

/// Identifier for a record appended to `records`: one past the largest, or
/// [`RecordId::FIRST`] when none has one.
pub fn next_id(records: &[Record]) -> Result<RecordId, Error> {
    max_id(records).map_or(Ok(RecordId::FIRST), RecordId::next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_objects() {
        assert!(Record::new(json!([1, 2])).is_err());
        assert!(Record::new(json!("user")).is_err());
    }

    #[test]
    fn rejects_bad_ids() {
        assert!(Record::new(json!({"id": "4"})).is_err());
        assert!(Record::new(json!({"id": -1})).is_err());
        assert!(Record::new(json!({"id": 0})).is_err());
    }

    #[test]
    fn absent_or_null_id_means_unpersisted() {
        assert!(Record::new(json!({"name": "X"})).unwrap().id().is_none());
        assert!(Record::new(json!({"id": null})).unwrap().id().is_none());
    }

    #[test]
    fn serde_keeps_id_alongside_fields() {
        let record: Record =
            serde_json::from_value(json!({"id": 2, "title": "qui est esse"})).unwrap();
        assert_eq!(record.id().unwrap().get(), 2);
        assert_eq!(record.text("title"), Some("qui est esse"));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": 2, "title": "qui est esse"})
        );
    }

    #[test]
    fn dotted_lookup_misses_cleanly() {
        let record = Record::new(json!({"company": {"name": "C"}, "name": "N"})).unwrap();
        assert_eq!(record.text("company.name"), Some("C"));
        assert_eq!(record.text("company.catchPhrase"), None);
        assert_eq!(record.text("name.first"), None);
    }

    #[test]
    fn select_keeps_id() {
        let record = Record::new(json!({"id": 1, "username": "u", "password": "p", "age": 3}))
            .unwrap();
        let selected = record.select(&["username".to_string(), "password".to_string()]);
        assert_eq!(
            selected.to_value(),
            json!({"id": 1, "username": "u", "password": "p"})
        );
    }

    #[test]
    fn max_id_ignores_unpersisted() {
        let records = vec![
            Record::new(json!({"id": 3})).unwrap(),
            Record::new(json!({"name": "new"})).unwrap(),
            Record::new(json!({"id": 9})).unwrap(),
        ];
        assert_eq!(max_id(&records).unwrap().get(), 9);
        assert!(max_id(&[]).is_none());
    }

    #[test]
    fn next_id_refuses_to_wrap() {
        assert_eq!(next_id(&[]).unwrap(), RecordId::FIRST);
        let full = vec![Record::new(json!({"id": u64::MAX})).unwrap()];
        assert!(next_id(&full).is_err());
    }
}
