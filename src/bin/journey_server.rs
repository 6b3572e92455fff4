use std::sync::Arc;

use anyhow::Result;
use log::info;
use travelblogr_core::rest_source::RestTripSource;
use travelblogr_core::{config, journey_server, logs};

#[actix_web::main]
async fn main() -> Result<()> {
    let app_config = config::load_app_config()?;
    logs::init(&app_config.server.log_dir)?;
    info!(
        "starting journey server against {}",
        app_config.backend.base_url
    );

    let source = Arc::new(RestTripSource::new(
        &app_config.backend.base_url,
        &app_config.backend.api_key,
    ));
    journey_server::start_server(&app_config.server.host, app_config.server.port, source).await?;
    Ok(())
}
