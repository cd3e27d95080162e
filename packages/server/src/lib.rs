#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the ward air-quality dashboard.
//!
//! Fetches live station readings from WAQI, runs them through the pollution
//! inference pipeline and serves the result in the shape the dashboard
//! renders. Raw readings from other sources can be posted to
//! `/api/aqi/process` directly.

mod dashboard;
mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error::InternalError, middleware, web};
use ward_aqi_server_models::ApiError;
use ward_aqi_pollution::standards::{self, DEFAULT_STANDARDS_ID, Standards};
use ward_aqi_waqi::{WaqiClient, WaqiError};

/// Shared application state.
pub struct AppState {
    /// Live data client. `None` when no `WAQI_TOKEN` is configured, in which
    /// case only the process endpoint is usable.
    pub waqi: Option<WaqiClient>,
    /// Active standards set.
    pub standards: Standards,
}

/// Rejects undecodable query strings with a JSON `{error}` body.
pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, HttpResponse::BadRequest().json(ApiError::new(message)))
            .into()
    })
}

/// Rejects undecodable JSON bodies with a JSON `{error}` body.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, HttpResponse::BadRequest().json(ApiError::new(message)))
            .into()
    })
}

/// Starts the API server.
///
/// Configuration is read from the environment: `WARD_AQI_STANDARDS`
/// (default `cpcb`), `WAQI_TOKEN`, `WAQI_BASE_URL`, `BIND_ADDR` and `PORT`.
///
/// # Errors
///
/// Returns an error if the configured standards set or WAQI client cannot
/// be loaded, or if the server fails to bind.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let standards_id =
        std::env::var("WARD_AQI_STANDARDS").unwrap_or_else(|_| DEFAULT_STANDARDS_ID.to_string());
    let standards = standards::standards_by_id(&standards_id).map_err(std::io::Error::other)?;
    log::info!("Using standards set {} ({})", standards.id, standards.name);

    let waqi = match WaqiClient::from_env() {
        Ok(client) => Some(client),
        Err(WaqiError::MissingToken) => {
            log::warn!("WAQI_TOKEN is not set, live AQI endpoint disabled");
            None
        }
        Err(e) => return Err(std::io::Error::other(e)),
    };

    let state = web::Data::new(AppState { waqi, standards });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(query_config())
            .app_data(json_config())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/standards", web::get().to(handlers::standards))
                    .route("/aqi", web::get().to(handlers::aqi))
                    .route("/aqi/process", web::post().to(handlers::process)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
