//! Endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

/// Credential listing on the auth API.
pub const CREDENTIALS: &str = "users";

/// Account registration on the auth API.
pub const REGISTER: &str = "users/add";

/// Fields requested from the credential listing.
pub const CREDENTIAL_FIELDS: &str = "username,password";

/// Query for `GET /{resource}`.
#[derive(Debug, Serialize)]
pub struct CollectionQuery {
    #[serde(rename = "_limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Comma separated field names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
}

/// Query for `GET /users` on the auth API.
#[derive(Debug, Serialize)]
pub struct CredentialQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    pub select: &'a str,
}

/// Response from the credential listing.
#[derive(Debug, Deserialize)]
pub struct CredentialListResponse {
    #[serde(default)]
    pub users: Vec<CredentialEntry>,
}

/// One entry of the credential listing. Entries carry other fields
/// (`id`) that are ignored.
#[derive(Debug, Deserialize)]
pub struct CredentialEntry {
    pub username: String,
    pub password: String,
}

/// Request body for registration.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_query_uses_underscore_limit() {
        let value = serde_json::to_value(CollectionQuery {
            limit: Some(55),
            select: None,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"_limit": 55}));

        let value = serde_json::to_value(CollectionQuery {
            limit: None,
            select: Some("id,title".to_string()),
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({"select": "id,title"}));
    }

    #[test]
    fn credential_listing_ignores_extra_fields() {
        let response: CredentialListResponse = serde_json::from_value(serde_json::json!({
            "users": [{"id": 1, "username": "emilys", "password": "emilyspass"}],
            "total": 208,
            "skip": 0,
            "limit": 10
        }))
        .unwrap();
        assert_eq!(response.users.len(), 1);
        assert_eq!(response.users[0].username, "emilys");
    }
}
