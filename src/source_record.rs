use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::location_point::{LocationPoint, PointMetadata, PointSource, PointType};

/* Rows coming back from the backend are loosely typed JSON. Every row is
narrowed here into a `LocationPoint` or rejected; each mapping is a pure
projection (field renames plus a `type` tag and a `metadata.source` tag).
The caller decides what to do with rejected rows. */

/// Backend ids are either uuid strings or numeric keys depending on the
/// table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowId {
    Str(String),
    Num(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            RowId::Str(s) => s,
            RowId::Num(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoPoint {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lng: f64,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostRow {
    id: RowId,
    title: Option<String>,
    #[serde(alias = "content")]
    excerpt: Option<String>,
    location: Option<GeoPoint>,
    created_at: Option<DateTime<Utc>>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PingRow {
    id: Option<RowId>,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lng: f64,
    recorded_at: Option<DateTime<Utc>>,
    accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MediaRow {
    id: RowId,
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lng: f64,
    url: Option<String>,
    caption: Option<String>,
    taken_at: Option<DateTime<Utc>>,
}

fn validate_coordinates(lat: f64, lng: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&lat) {
        bail!("latitude out of range: {}", lat);
    }
    if !(-180.0..=180.0).contains(&lng) {
        bail!("longitude out of range: {}", lng);
    }
    Ok(())
}

/// `Ok(None)` when the post has no location. Posts without one are
/// regular blog entries, not map events.
pub fn point_from_post(row: &Value) -> Result<Option<LocationPoint>> {
    let post: PostRow = serde_json::from_value(row.clone())?;
    let location = match post.location {
        None => return Ok(None),
        Some(location) => location,
    };
    validate_coordinates(location.lat, location.lng)?;

    // posts tagged with a venue category show up as that venue kind
    let point_type = post
        .category
        .as_deref()
        .and_then(|c| c.parse::<PointType>().ok())
        .unwrap_or(PointType::Waypoint);

    let mut metadata = PointMetadata::new(PointSource::Post);
    if let Some(name) = location.name {
        metadata
            .extra
            .insert("location_name".to_string(), Value::String(name));
    }

    Ok(Some(LocationPoint {
        id: post.id.into_string(),
        lat: location.lat,
        lng: location.lng,
        title: post.title,
        description: post.excerpt,
        timestamp: post.created_at,
        point_type,
        metadata,
    }))
}

pub fn point_from_ping(row: &Value) -> Result<LocationPoint> {
    let ping: PingRow = serde_json::from_value(row.clone())?;
    validate_coordinates(ping.lat, ping.lng)?;

    let mut metadata = PointMetadata::new(PointSource::LocationPing);
    if let Some(accuracy) = ping.accuracy {
        metadata.extra.insert("accuracy".to_string(), accuracy.into());
    }

    Ok(LocationPoint {
        id: ping
            .id
            .map(RowId::into_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        lat: ping.lat,
        lng: ping.lng,
        title: None,
        description: None,
        timestamp: ping.recorded_at,
        point_type: PointType::Waypoint,
        metadata,
    })
}

pub fn point_from_media(row: &Value) -> Result<LocationPoint> {
    let media: MediaRow = serde_json::from_value(row.clone())?;
    validate_coordinates(media.lat, media.lng)?;

    let mut metadata = PointMetadata::new(PointSource::Media);
    if let Some(url) = media.url {
        metadata.extra.insert("url".to_string(), Value::String(url));
    }

    Ok(LocationPoint {
        id: media.id.into_string(),
        lat: media.lat,
        lng: media.lng,
        title: media.caption,
        description: None,
        timestamp: media.taken_at,
        point_type: PointType::Photo,
        metadata,
    })
}
