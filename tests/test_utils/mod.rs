#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use travelblogr_core::location_point::{LocationPoint, PointMetadata, PointSource, PointType};
use travelblogr_core::trip_source::TripSource;

pub fn init_test_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn point(id: &str, lat: f64, lng: f64, timestamp: Option<DateTime<Utc>>) -> LocationPoint {
    typed_point(id, lat, lng, timestamp, PointType::Waypoint)
}

pub fn typed_point(
    id: &str,
    lat: f64,
    lng: f64,
    timestamp: Option<DateTime<Utc>>,
    point_type: PointType,
) -> LocationPoint {
    LocationPoint {
        id: id.to_string(),
        lat,
        lng,
        title: None,
        description: None,
        timestamp,
        point_type,
        metadata: PointMetadata::new(PointSource::LocationPing),
    }
}

pub fn ping_row(id: i64, lat: f64, lng: f64, recorded_at: &str) -> Value {
    json!({ "id": id, "lat": lat, "lng": lng, "recorded_at": recorded_at })
}

pub fn media_row(id: i64, lat: f64, lng: f64, taken_at: &str, url: &str) -> Value {
    json!({ "id": id, "lat": lat, "lng": lng, "taken_at": taken_at, "url": url })
}

pub fn post_row(id: i64, lat: f64, lng: f64, created_at: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "location": { "lat": lat, "lng": lng },
        "created_at": created_at,
    })
}

/// In-memory `TripSource` with per-collection failure switches.
#[derive(Default)]
pub struct StaticTripSource {
    pub posts: Vec<Value>,
    pub pings: Vec<Value>,
    pub media: Vec<Value>,
    pub fail_posts: bool,
    pub fail_pings: bool,
    pub fail_media: bool,
}

#[async_trait]
impl TripSource for StaticTripSource {
    async fn posts_with_location(&self, _trip_id: &str) -> Result<Vec<Value>> {
        if self.fail_posts {
            bail!("posts collection unavailable");
        }
        Ok(self.posts.clone())
    }

    async fn location_pings(&self, _trip_id: &str) -> Result<Vec<Value>> {
        if self.fail_pings {
            bail!("location pings collection unavailable");
        }
        Ok(self.pings.clone())
    }

    async fn media_with_location(&self, _trip_id: &str) -> Result<Vec<Value>> {
        if self.fail_media {
            bail!("media collection unavailable");
        }
        Ok(self.media.clone())
    }
}
