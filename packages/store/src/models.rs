//! # Domain records exchanged with the portfolio backend
//!
//! The backend owns these records; the admin front-end only reads and edits
//! them. Every type is `Serialize + Deserialize` with the backend's camelCase
//! field names, so a payload that lacks a required field fails to decode at the
//! service boundary instead of leaking half-filled values into the views.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The authenticated account cached alongside the token. `role` is compared against `"admin"`. |
//! | [`Skill`] / [`SkillDraft`] | A skill record and the payload sent on create/update. |
//! | [`Project`] / [`ProjectDraft`] | A portfolio project and its create/update payload. |
//! | [`About`] / [`AboutDraft`] | The single "about me" document and its update payload. |
//! | [`Contact`] / [`ContactDraft`] | A message left through the public contact form. |
//!
//! Records carry the backend's `_id` as `id`. Drafts omit it and always send
//! every field, with `""` standing in for a cleared optional value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role string granting access to the admin dashboard.
pub const ADMIN_ROLE: &str = "admin";

/// Account information returned by the login endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    /// Whether the role grants admin access. Case-sensitive.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDraft {
    pub name: String,
    pub level: String,
    pub category: String,
    #[serde(serialize_with = "blank_when_none")]
    pub icon_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(serialize_with = "blank_when_none")]
    pub image_url: Option<String>,
    #[serde(serialize_with = "blank_when_none")]
    pub link: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AboutDraft {
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Cleared optional fields go out as `""` so an update overwrites the stored value.
fn blank_when_none<S: serde::Serializer>(
    value: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}
