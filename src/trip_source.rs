use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The record-query interface against the hosted data service: filter by
/// trip id, rows come back ordered by the collection's own time column.
/// Rows are raw JSON on purpose; nothing past this boundary trusts their
/// shape (see `source_record`).
///
/// Injected explicitly wherever aggregation happens so the logic tests
/// without a live backend.
#[async_trait]
pub trait TripSource: Send + Sync {
    /// Published posts of the trip that carry a location.
    async fn posts_with_location(&self, trip_id: &str) -> Result<Vec<Value>>;

    /// Periodic device location pings recorded while traveling.
    async fn location_pings(&self, trip_id: &str) -> Result<Vec<Value>>;

    /// Uploaded media files with location metadata.
    async fn media_with_location(&self, trip_id: &str) -> Result<Vec<Value>>;
}
