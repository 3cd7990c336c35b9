use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search filters arrive as loose JSON values so that a wrong-typed filter
/// can be answered with the documented 400 body instead of a framework
/// deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub platform: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulateResponse {
    pub message: &'static str,
    pub count: usize,
    pub android_count: usize,
    pub ios_count: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: i64,
}
