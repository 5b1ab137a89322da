//! Typed views over the two collections the application manages.
//!
//! The controllers work on [`Record`]s; these types exist for building
//! form input and for rendering rows.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::{Error, InvalidInputError};
use crate::record::Record;
use crate::types::RecordId;

/// Company a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// A row of the users table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Company,
}

/// A dashboard post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub user_id: u64,
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl User {
    /// Convert into a record, keeping every field the form edits.
    pub fn into_record(self) -> Result<Record> {
        let value = serde_json::to_value(self).map_err(|e| InvalidInputError::Record {
            reason: e.to_string(),
        })?;
        Record::new(value)
    }
}

impl TryFrom<&Record> for User {
    type Error = Error;

    fn try_from(record: &Record) -> Result<Self> {
        decode(record)
    }
}

impl TryFrom<&Record> for Post {
    type Error = Error;

    fn try_from(record: &Record) -> Result<Self> {
        decode(record)
    }
}

fn decode<T: serde::de::DeserializeOwned>(record: &Record) -> Result<T> {
    serde_json::from_value(record.to_value()).map_err(|e| {
        InvalidInputError::Record {
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_round_trips_through_record_fields() {
        let user = User {
            id: None,
            name: "X".to_string(),
            username: "x".to_string(),
            email: "x@x.com".to_string(),
            company: Company {
                name: "C".to_string(),
            },
        };
        let record = user.clone().into_record().unwrap();
        assert!(record.id().is_none());
        assert_eq!(record.text("company.name"), Some("C"));
        assert_eq!(User::try_from(&record).unwrap(), user);
    }

    #[test]
    fn user_tolerates_extra_api_fields() {
        let record = Record::new(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442",
            "company": { "name": "Romaguera-Crona", "bs": "harness real-time e-markets" }
        }))
        .unwrap();
        let user = User::try_from(&record).unwrap();
        assert_eq!(user.id.unwrap().get(), 1);
        assert_eq!(user.company.name, "Romaguera-Crona");
    }

    #[test]
    fn post_reads_camel_case_user_id() {
        let record = Record::new(json!({
            "userId": 1,
            "id": 1,
            "title": "sunt aut facere",
            "body": "quia et suscipit"
        }))
        .unwrap();
        let post = Post::try_from(&record).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.title, "sunt aut facere");
    }

    #[test]
    fn post_requires_id() {
        let record = Record::new(json!({"title": "draft"})).unwrap();
        assert!(Post::try_from(&record).is_err());
    }
}
