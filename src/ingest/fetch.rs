use reqwest::Client;
use serde_json::Value;

use crate::error::{Error, Result};

/// Fetches the two platform top-chart documents.
#[derive(Clone)]
pub struct SourceClient {
    client: Client,
    android_url: String,
    ios_url: String,
}

impl SourceClient {
    pub fn new(android_url: impl Into<String>, ios_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            client,
            android_url: android_url.into(),
            ios_url: ios_url.into(),
        })
    }

    /// Fetches both documents concurrently, returning the flattened android
    /// and ios entry lists. Either request failing fails the pair.
    pub async fn fetch_top_charts(&self) -> Result<(Vec<Value>, Vec<Value>)> {
        tokio::try_join!(self.fetch(&self.android_url), self.fetch(&self.ios_url))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| Error::Upstream {
                url: url.to_string(),
                source,
            })?;

        let doc: Value = response.json().await.map_err(|source| Error::Upstream {
            url: url.to_string(),
            source,
        })?;

        match doc {
            Value::Array(groups) => Ok(flatten(groups)),
            _ => Err(Error::UpstreamShape {
                url: url.to_string(),
            }),
        }
    }
}

/// Splices one level of nesting out of a chart document: grouped entries
/// are concatenated in order, ungrouped entries pass through unchanged.
fn flatten(groups: Vec<Value>) -> Vec<Value> {
    groups
        .into_iter()
        .flat_map(|group| match group {
            Value::Array(entries) => entries,
            entry => vec![entry],
        })
        .collect()
}
