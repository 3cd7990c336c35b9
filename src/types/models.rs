use chrono::{DateTime, Utc};
use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;
use serde::{Deserialize, Serialize};

/// A persisted catalog entry. Field names serialize in camelCase to match
/// the public API surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub publisher_id: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-writable field set shared by the create and update endpoints.
/// Everything is optional at the transport layer; the store does not enforce
/// required-ness.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameFields {
    pub publisher_id: Option<String>,
    pub name: Option<String>,
    pub platform: Option<String>,
    pub store_id: Option<String>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: Option<bool>,
}

/// Source platform tag used during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

/// An identifier as it appears in a source document: the android feed uses
/// strings, the ios feed uses integers. The distinction is preserved until
/// the value is bound to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceId {
    Text(String),
    Number(i64),
}

impl SourceId {
    /// Coerces a numeric identifier to its text form. Used by the ios
    /// normalizer only; android identifiers are stored as they arrived.
    #[must_use]
    pub fn into_text(self) -> SourceId {
        match self {
            SourceId::Number(n) => SourceId::Text(n.to_string()),
            text => text,
        }
    }
}

impl ToSql for SourceId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SourceId::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
            SourceId::Number(n) => Ok(ToSqlOutput::from(*n)),
        }
    }
}

/// An insertion value produced by the ingestion normalizer. Identifiers keep
/// their source typing (see [`SourceId`]); the `games` table's TEXT affinity
/// converts numeric values on storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub publisher_id: Option<SourceId>,
    pub name: Option<String>,
    pub platform: Platform,
    pub store_id: Option<SourceId>,
    pub bundle_id: Option<String>,
    pub app_version: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
