use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::types::{NewGame, Platform, SourceId};

/// Entries beyond this many per platform are silently dropped.
pub const MAX_PER_PLATFORM: usize = 100;

/// Maps one raw chart entry onto an insertion value. Missing or wrong-typed
/// fields become `None`; nothing here fails.
///
/// The ios feed carries numeric publisher and store identifiers while the
/// android feed uses strings, so only the ios variant coerces those two
/// fields to text. Android values keep their source typing.
#[must_use]
pub fn normalize(raw: &Value, platform: Platform, now: DateTime<Utc>) -> NewGame {
    let mut publisher_id = source_id(raw, "publisher_id");
    let mut store_id = source_id(raw, "app_id");
    if platform == Platform::Ios {
        publisher_id = publisher_id.map(SourceId::into_text);
        store_id = store_id.map(SourceId::into_text);
    }

    NewGame {
        publisher_id,
        name: text(raw, "name"),
        platform,
        store_id,
        bundle_id: text(raw, "bundle_id"),
        app_version: text(raw, "version"),
        is_published: true,
        created_at: now,
        updated_at: now,
    }
}

/// Normalizes a flattened chart, keeping only the first
/// [`MAX_PER_PLATFORM`] entries.
#[must_use]
pub fn normalize_platform(entries: &[Value], platform: Platform, now: DateTime<Utc>) -> Vec<NewGame> {
    entries
        .iter()
        .take(MAX_PER_PLATFORM)
        .map(|raw| normalize(raw, platform, now))
        .collect()
}

fn source_id(raw: &Value, key: &str) -> Option<SourceId> {
    match raw.get(key) {
        Some(Value::String(s)) => Some(SourceId::Text(s.clone())),
        Some(Value::Number(n)) => n.as_i64().map(SourceId::Number),
        _ => None,
    }
}

fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}
