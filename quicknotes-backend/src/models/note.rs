//! Note record and request body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note owned by exactly one user. The wire shape keeps the field names
/// the frontend already consumes (`_id`, `createdAt`, `updatedAt`); the
/// owner reference is internal and never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing)]
    pub owner_id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Body for note create and update requests
#[derive(Debug, Deserialize)]
pub struct NotePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_json_shape_hides_owner() {
        let note = Note {
            id: "abc".to_string(),
            owner_id: "secret-owner".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["_id"], "abc");
        assert!(json.get("owner_id").is_none());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
