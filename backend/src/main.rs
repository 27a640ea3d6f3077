//! Backend entry-point: loads configuration, seeds the demo workspace, and
//! serves the REST API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::server::{Settings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(std::env::args_os())
        .map_err(|error| std::io::Error::other(format!("configuration failed to load: {error}")))?;
    info!(bind_addr = %settings.bind_addr(), "starting server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, settings)?;
    server.await
}
