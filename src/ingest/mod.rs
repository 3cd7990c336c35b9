//! Top-chart ingestion: fetch both platform documents, normalize them into
//! the canonical schema, and replace the catalog wholesale.

mod fetch;
mod normalize;

pub use fetch::SourceClient;
pub use normalize::{MAX_PER_PLATFORM, normalize, normalize_platform};

use chrono::Utc;

use crate::error::Result;
use crate::store::Store;
use crate::types::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulateSummary {
    pub count: usize,
    pub android_count: usize,
    pub ios_count: usize,
}

/// Replaces the catalog with the current contents of both top-chart
/// documents, android entries first. Either fetch failing aborts the whole
/// operation before any rows are touched; a store failure rolls the replace
/// back, leaving the prior catalog intact.
pub async fn populate(store: &dyn Store, sources: &SourceClient) -> Result<PopulateSummary> {
    let (android_raw, ios_raw) = sources.fetch_top_charts().await?;

    let now = Utc::now();
    let mut games = normalize_platform(&android_raw, Platform::Android, now);
    let android_count = games.len();
    let ios = normalize_platform(&ios_raw, Platform::Ios, now);
    let ios_count = ios.len();
    games.extend(ios);

    let count = store.replace_all(&games)?;
    Ok(PopulateSummary {
        count,
        android_count,
        ios_count,
    })
}
