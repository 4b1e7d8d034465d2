mod config;
mod error;
mod ingest;
mod services;
mod state;

use crate::config::AppConfig;
use crate::state::AppState;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load().map_err(std::io::Error::other)?;
    env_logger::init_from_env(Env::default().default_filter_or(config.logging.level.as_str()));

    let state = AppState::initialize(&config).map_err(std::io::Error::other)?;
    info!(
        "Storing uploads in {} (accepted date formats: {:?})",
        config.storage.database_path,
        state.validator.rules().date_formats
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let json_limit = config.server.json_limit_bytes;
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(services::csv_upload::json_config(json_limit))
            .app_data(services::csv_upload::query_config())
            .app_data(web::Data::new(state.clone()))
            .configure(services::csv_upload::configure_routes)
    })
    .bind((host, port))?
    .run()
    .await
}
