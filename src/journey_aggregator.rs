use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::journey_stats::JourneyStats;
use crate::location_point::LocationPoint;
use crate::source_record;
use crate::trip_source::TripSource;

/* A trip's timeline is scattered over three backend collections: posts
written along the way, periodic device location pings, and uploaded media
with location metadata. This module merges all of them into a single
time-ordered journey for the map widget. */

/// The merged timeline plus derived stats, in the shape the map widget
/// consumes. `stats` is absent when there are fewer than 2 points.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub trip_id: String,
    pub points: Vec<LocationPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<JourneyStats>,
}

pub struct JourneyAggregator {
    source: Arc<dyn TripSource>,
}

impl JourneyAggregator {
    pub fn new(source: Arc<dyn TripSource>) -> Self {
        JourneyAggregator { source }
    }

    /// Fetches the three source collections concurrently and merges them
    /// into one journey. A failing collection contributes an empty list
    /// instead of failing the aggregation, and a bad row only loses that
    /// row. There is no retry.
    pub async fn load_journey(&self, trip_id: &str) -> Journey {
        let (posts, pings, media) = tokio::join!(
            self.source.posts_with_location(trip_id),
            self.source.location_pings(trip_id),
            self.source.media_with_location(trip_id),
        );

        let mut points = Vec::new();
        collect_points(&mut points, "posts", posts, source_record::point_from_post);
        collect_points(&mut points, "location pings", pings, |row| {
            source_record::point_from_ping(row).map(Some)
        });
        collect_points(&mut points, "media", media, |row| {
            source_record::point_from_media(row).map(Some)
        });

        sort_points_by_time(&mut points);
        let stats = JourneyStats::from_points(&points);
        debug!(
            "aggregated journey for trip {}: {} points",
            trip_id,
            points.len()
        );

        Journey {
            trip_id: trip_id.to_string(),
            points,
            stats,
        }
    }
}

fn collect_points<F>(
    out: &mut Vec<LocationPoint>,
    source_name: &str,
    rows: Result<Vec<Value>>,
    normalize: F,
) where
    F: Fn(&Value) -> Result<Option<LocationPoint>>,
{
    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            warn!("failed to fetch {}: {:#}", source_name, e);
            return;
        }
    };
    for row in &rows {
        match normalize(row) {
            Ok(Some(point)) => out.push(point),
            Ok(None) => (),
            Err(e) => warn!("skipping bad row from {}: {:#}", source_name, e),
        }
    }
}

/// Ascending by timestamp, stable. Untimestamped points get a
/// deterministic place: ahead of all timestamped ones, keeping their
/// relative input order.
pub fn sort_points_by_time(points: &mut [LocationPoint]) {
    points.sort_by_key(|p| p.timestamp);
}
