//! # Response envelopes
//!
//! The backend is inconsistent about how it wraps payloads. List endpoints
//! answer either with a bare JSON array or with an object such as
//! `{"success": true, "skills": [...]}` (or `"data"` instead of the
//! collection key). The shape is resolved exactly once here, so callers only
//! ever see typed records or an [`ApiError`].
//!
//! | Shape | Resolution |
//! |-------|-----------|
//! | `[...]` | items |
//! | `{"success": true, "<key>": [...]}` | items under the collection key |
//! | `{"success": true, "data": [...]}` | items under `data` |
//! | `{"success": true}` | no items |
//! | `{"success": false, "message": m}` | [`ApiError::Rejected`] |
//! | anything else | [`ApiError::Decode`] |
//!
//! Single-document endpoints (`/about`) answer `{"data": {...} | null}`.
//! Mutations answer an arbitrary object; only `success: false` is meaningful.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Collection keys used by the backend alongside the generic `data` key.
pub const SKILLS_KEY: &str = "skills";
pub const PROJECTS_KEY: &str = "allProjects";
pub const CONTACTS_KEY: &str = "contacts";

const DATA_KEY: &str = "data";

/// Wire shape of a list response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Bare(Vec<Value>),
    Wrapped(Wrapped),
}

/// `{success, message, ...}` wrapper with the payload left in `fields`.
#[derive(Debug, Default, Deserialize)]
pub struct Wrapped {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Wrapped {
    fn reject_if_failed(&self) -> Result<(), ApiError> {
        if self.success == Some(false) {
            return Err(ApiError::Rejected {
                message: self.message.clone(),
            });
        }
        Ok(())
    }
}

impl ListResponse {
    /// Resolve into typed items, looking under `key` then `data`.
    pub fn into_items<T: DeserializeOwned>(self, key: &str) -> Result<Vec<T>, ApiError> {
        let values = match self {
            ListResponse::Bare(values) => values,
            ListResponse::Wrapped(mut wrapped) => {
                wrapped.reject_if_failed()?;
                let payload = wrapped
                    .fields
                    .remove(key)
                    .or_else(|| wrapped.fields.remove(DATA_KEY));
                match payload {
                    Some(Value::Array(values)) => values,
                    Some(Value::Null) => Vec::new(),
                    None if wrapped.success == Some(true) => Vec::new(),
                    Some(other) => {
                        return Err(ApiError::Decode(format!(
                            "expected an array under `{key}`, got {other}"
                        )))
                    }
                    None => {
                        return Err(ApiError::Decode(format!(
                            "no `{key}` or `{DATA_KEY}` collection in response"
                        )))
                    }
                }
            }
        };
        values
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(ApiError::from))
            .collect()
    }
}

/// Decode a list response body.
pub fn decode_list<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>, ApiError> {
    serde_json::from_value::<ListResponse>(body)?.into_items(key)
}

/// Decode a `{data: T | null}` response body.
pub fn decode_single<T: DeserializeOwned>(body: Value) -> Result<Option<T>, ApiError> {
    let mut wrapped: Wrapped = serde_json::from_value(body)?;
    wrapped.reject_if_failed()?;
    match wrapped.fields.remove(DATA_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

/// Check a mutation response body for a logical failure.
pub fn decode_ack(body: Value) -> Result<(), ApiError> {
    match body {
        Value::Object(_) => serde_json::from_value::<Wrapped>(body)?.reject_if_failed(),
        _ => Ok(()),
    }
}

/// Extract `message` from an error response body, if it is JSON.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Wrapped>(body)
        .ok()
        .and_then(|wrapped| wrapped.message)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use store::Skill;

    fn skill_json(id: &str) -> Value {
        json!({"_id": id, "name": "Rust", "level": "Expert"})
    }

    #[rstest]
    #[case::bare(json!([skill_json("a"), skill_json("b")]))]
    #[case::keyed(json!({"success": true, "skills": [skill_json("a"), skill_json("b")]}))]
    #[case::data(json!({"success": true, "data": [skill_json("a"), skill_json("b")]}))]
    #[case::no_success_flag(json!({"skills": [skill_json("a"), skill_json("b")]}))]
    fn list_shapes_resolve_to_items(#[case] body: Value) {
        let skills: Vec<Skill> = decode_list(body, SKILLS_KEY).unwrap();
        let ids: Vec<_> = skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn success_without_collection_is_empty() {
        let skills: Vec<Skill> = decode_list(json!({"success": true}), SKILLS_KEY).unwrap();
        assert!(skills.is_empty());
    }

    #[test]
    fn logical_failure_is_rejected() {
        let err = decode_list::<Skill>(
            json!({"success": false, "message": "Not allowed"}),
            SKILLS_KEY,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { message: Some(ref m) } if m == "Not allowed"));
    }

    #[test]
    fn malformed_record_fails_fast() {
        let err = decode_list::<Skill>(json!([{"_id": "a"}]), SKILLS_KEY).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn unrecognised_object_is_a_decode_error() {
        let err = decode_list::<Skill>(json!({"items": []}), SKILLS_KEY).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn single_document() {
        let about: Option<store::About> = decode_single(json!({
            "success": true,
            "data": {"_id": "x", "description": "Hello"}
        }))
        .unwrap();
        assert_eq!(about.unwrap().description, "Hello");

        let about: Option<store::About> = decode_single(json!({"data": null})).unwrap();
        assert!(about.is_none());
    }

    #[test]
    fn ack_checks_success_flag() {
        assert!(decode_ack(json!({"success": true, "message": "Deleted"})).is_ok());
        assert!(decode_ack(Value::Null).is_ok());
        assert!(decode_ack(json!({"success": false})).is_err());
    }

    #[test]
    fn error_message_from_body() {
        assert_eq!(
            error_message(r#"{"success":false,"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert!(error_message("<html>Not Found</html>").is_none());
    }
}
