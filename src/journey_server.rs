use std::collections::HashSet;
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

use crate::journey_aggregator::JourneyAggregator;
use crate::journey_stats::JourneyStats;
use crate::location_point::PointType;
use crate::timeline_filter::{TimeWindow, TimelineFilter};
use crate::trip_source::TripSource;

/* The map widget talks to this app: it asks for a trip's journey,
optionally pre-filtered, and draws whatever comes back. Source failures
never surface here; the aggregator already degraded them to partial
data. */

pub struct AppState {
    aggregator: JourneyAggregator,
}

impl AppState {
    pub fn new(source: Arc<dyn TripSource>) -> Self {
        AppState {
            aggregator: JourneyAggregator::new(source),
        }
    }
}

/// `start`/`end` are time-window percents, `types` a comma-separated
/// allow-list. All optional; an unfiltered request returns the full
/// journey.
#[derive(Debug, Deserialize)]
pub struct JourneyQuery {
    start: Option<f64>,
    end: Option<f64>,
    types: Option<String>,
}

async fn get_journey(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<JourneyQuery>,
) -> HttpResponse {
    let trip_id = path.into_inner();
    let mut journey = state.aggregator.load_journey(&trip_id).await;

    if query.start.is_some() || query.end.is_some() || query.types.is_some() {
        let window = TimeWindow::new(query.start.unwrap_or(0.0), query.end.unwrap_or(100.0));
        let filter = match &query.types {
            None => TimelineFilter::all_types(window),
            Some(raw) => match parse_types(raw) {
                Ok(types) => TimelineFilter::new(window, types),
                Err(e) => {
                    return HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
                }
            },
        };
        journey.points = filter.apply(&journey.points);
        // the widget's summary has to match what it draws
        journey.stats = JourneyStats::from_points(&journey.points);
    }

    HttpResponse::Ok().json(journey)
}

fn parse_types(raw: &str) -> Result<HashSet<PointType>> {
    let mut types = HashSet::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match part.parse::<PointType>() {
            Ok(point_type) => {
                types.insert(point_type);
            }
            Err(_) => bail!("unknown point type: {}", part),
        }
    }
    Ok(types)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/journey/{trip_id}", web::get().to(get_journey));
}

pub async fn start_server(
    host: &str,
    port: u16,
    source: Arc<dyn TripSource>,
) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(source));
    info!("journey server listening on {}:{}", host, port);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((host, port))?
        .run()
        .await
}
