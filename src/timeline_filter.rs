use std::collections::HashSet;

use strum::IntoEnumIterator;

use crate::location_point::{LocationPoint, PointType};

/// Percentage window over the sorted point list. Both ends are clamped
/// to [0, 100] and map to an index range, not to wall-clock time: the
/// slider cuts the list, not the calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start_pct: f64,
    end_pct: f64,
}

impl TimeWindow {
    pub fn new(start_pct: f64, end_pct: f64) -> Self {
        TimeWindow {
            start_pct: start_pct.clamp(0.0, 100.0),
            end_pct: end_pct.clamp(0.0, 100.0),
        }
    }

    pub fn full() -> Self {
        TimeWindow::new(0.0, 100.0)
    }

    /// Start index rounds down, end index (exclusive) rounds up, so
    /// [0,100] covers everything and [x,x] covers nothing.
    pub fn index_range(&self, len: usize) -> (usize, usize) {
        let start = (len as f64 * self.start_pct / 100.0).floor() as usize;
        let end = (len as f64 * self.end_pct / 100.0).ceil() as usize;
        (start.min(len), end.min(len))
    }
}

/// Time window and type allow-list compose as an intersection: a point
/// survives only if it is inside the window AND its type is allowed.
#[derive(Debug, Clone)]
pub struct TimelineFilter {
    pub window: TimeWindow,
    pub visible_types: HashSet<PointType>,
}

impl TimelineFilter {
    pub fn new(window: TimeWindow, visible_types: HashSet<PointType>) -> Self {
        TimelineFilter {
            window,
            visible_types,
        }
    }

    pub fn all_types(window: TimeWindow) -> Self {
        TimelineFilter {
            window,
            visible_types: PointType::iter().collect(),
        }
    }

    pub fn apply(&self, points: &[LocationPoint]) -> Vec<LocationPoint> {
        let (start, end) = self.window.index_range(points.len());
        if start >= end {
            return Vec::new();
        }
        points[start..end]
            .iter()
            .filter(|p| self.visible_types.contains(&p.point_type))
            .cloned()
            .collect()
    }
}
