use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::utils;

/// One geo-tagged event on a trip timeline, normalized from a blog post,
/// a device location ping or a media file. Immutable once created and
/// never persisted here; it only lives for the duration of a viewer
/// session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub point_type: PointType,
    pub metadata: PointMetadata,
}

impl LocationPoint {
    pub fn distance_km(&self, other: &LocationPoint) -> f64 {
        utils::haversine_distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PointType {
    Waypoint,
    Photo,
    Accommodation,
    Restaurant,
    Attraction,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PointSource {
    Post,
    LocationPing,
    Media,
}

/// Provenance tag plus whatever extra fields the source row contributed
/// (ping accuracy, media url, ...). The extras ride along untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMetadata {
    pub source: PointSource,
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PointMetadata {
    pub fn new(source: PointSource) -> Self {
        PointMetadata {
            source,
            extra: serde_json::Map::new(),
        }
    }
}
