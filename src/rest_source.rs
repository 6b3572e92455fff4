use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::trip_source::TripSource;

/// `TripSource` over the hosted database's PostgREST-style interface.
/// Every query is a plain GET of the form
/// `{base}/rest/v1/{table}?trip_id=eq.{id}&order={column}`.
pub struct RestTripSource {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RestTripSource {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        RestTripSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_rows(&self, table: &str, trip_id: &str, order_column: &str) -> Result<Vec<Value>> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("trip_id", format!("eq.{}", trip_id)),
                ("order", order_column.to_string()),
            ])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .with_context(|| format!("request for {} failed", table))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("query on {} returned {}: {}", table, status, body);
        }

        response
            .json::<Vec<Value>>()
            .await
            .with_context(|| format!("invalid rows from {}", table))
    }
}

#[async_trait]
impl TripSource for RestTripSource {
    async fn posts_with_location(&self, trip_id: &str) -> Result<Vec<Value>> {
        self.fetch_rows("trip_posts", trip_id, "created_at").await
    }

    async fn location_pings(&self, trip_id: &str) -> Result<Vec<Value>> {
        self.fetch_rows("trip_locations", trip_id, "recorded_at").await
    }

    async fn media_with_location(&self, trip_id: &str) -> Result<Vec<Value>> {
        self.fetch_rows("trip_media", trip_id, "taken_at").await
    }
}
