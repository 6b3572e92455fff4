#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod journey_aggregator;
pub mod journey_server;
pub mod journey_stats;
pub mod location_point;
pub mod logs;
pub mod playback;
pub mod rest_source;
pub mod source_record;
pub mod timeline_filter;
pub mod trip_source;
pub mod utils;
