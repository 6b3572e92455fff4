use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::location_point::LocationPoint;

/// Trip summary derived from the sorted point list. Serialized camelCase
/// since the map widget consumes it as-is.
///
/// `countries` and `cities` are always empty: there is no reverse
/// geocoding. The fields stay so the serialized shape matches what the
/// display layer renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStats {
    /// km, great-circle sum over consecutive points in sorted order
    pub total_distance: f64,
    /// ms between the first and last timestamped point
    pub total_duration: i64,
    /// km/h; 0 when the duration is 0
    pub average_speed: f64,
    pub countries: Vec<String>,
    pub cities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl JourneyStats {
    /// `points` must already be sorted by
    /// `journey_aggregator::sort_points_by_time`. Fewer than 2 points
    /// yield no stats at all.
    pub fn from_points(points: &[LocationPoint]) -> Option<JourneyStats> {
        if points.len() < 2 {
            return None;
        }

        let total_distance: f64 = points
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.distance_km(b))
            .sum();

        // untimestamped points sort ahead of timestamped ones, so the
        // first/last timestamped points bound the trip
        let start_date = points.iter().find_map(|p| p.timestamp);
        let end_date = points.iter().rev().find_map(|p| p.timestamp);
        let total_duration = match (start_date, end_date) {
            (Some(start), Some(end)) => (end - start).num_milliseconds(),
            _ => 0,
        };

        let average_speed = if total_duration > 0 {
            total_distance / (total_duration as f64 / 3_600_000.0)
        } else {
            0.0
        };

        Some(JourneyStats {
            total_distance,
            total_duration,
            average_speed,
            countries: Vec::new(),
            cities: Vec::new(),
            start_date,
            end_date,
        })
    }
}
