//! HTTP handler functions for the ward air-quality API.

use actix_web::{HttpResponse, web};
use ward_aqi_pollution::process_pollution_data;
use ward_aqi_pollution_models::{HourOfDay, RawReading};
use ward_aqi_server_models::{ApiError, ApiHealth, AqiQueryParams, ProcessQueryParams};

use crate::{AppState, dashboard};

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/standards`
///
/// Returns the standards set the server evaluates readings against.
pub async fn standards(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.standards)
}

/// `GET /api/aqi`
///
/// Fetches the live feed for a ward and returns the dashboard payload.
#[allow(clippy::future_not_send)]
pub async fn aqi(state: web::Data<AppState>, params: web::Query<AqiQueryParams>) -> HttpResponse {
    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return HttpResponse::BadRequest().json(ApiError::new("Missing lat/lon"));
    };

    let Some(client) = &state.waqi else {
        return HttpResponse::InternalServerError()
            .json(ApiError::new("Live data source is not configured"));
    };

    let feed = match client.fetch_feed(lat, lon, params.keyword.as_deref()).await {
        Ok(feed) => feed,
        Err(e) => {
            log::error!("Failed to fetch WAQI feed for {lat},{lon}: {e}");
            return HttpResponse::BadGateway().json(ApiError::new("Failed to fetch AQI"));
        }
    };

    let raw = feed.raw_reading(chrono::Utc::now());
    let hour = HourOfDay::from_time(&chrono::Local::now());
    let processed = process_pollution_data(&raw, &state.standards, hour);

    HttpResponse::Ok().json(dashboard::build_response(&feed, &processed))
}

/// `POST /api/aqi/process`
///
/// Runs the pipeline on a posted raw reading.
pub async fn process(
    state: web::Data<AppState>,
    params: web::Query<ProcessQueryParams>,
    body: web::Json<RawReading>,
) -> HttpResponse {
    let hour = match params.hour.map(HourOfDay::from_value).transpose() {
        Ok(hour) => hour.unwrap_or_else(|| HourOfDay::from_time(&chrono::Local::now())),
        Err(e) => return HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
    };

    HttpResponse::Ok().json(process_pollution_data(&body, &state.standards, hour))
}
