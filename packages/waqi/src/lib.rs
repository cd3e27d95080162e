#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! World Air Quality Index (WAQI) client.
//!
//! Resolves a ward to a monitoring station and fetches its live feed:
//!
//! 1. If a ward keyword is given, it is cleaned (see [`keyword`]) and used
//!    to search for a named station.
//! 2. Otherwise, or when the search finds nothing, the nearest station to
//!    the given coordinates is used.
//!
//! The feed's individual pollutant readings (`iaqi`) are mapped onto a
//! [`ward_aqi_pollution_models::RawReading`] for the inference pipeline.

pub mod client;
pub mod feed;
pub mod keyword;
pub mod retry;

pub use client::WaqiClient;
pub use feed::{WaqiFeed, WaqiStation};

use thiserror::Error;

/// Errors from WAQI operations.
#[derive(Debug, Error)]
pub enum WaqiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-retryable or exhausted HTTP status.
    #[error("HTTP status {status}")]
    Status {
        /// The final response status.
        status: reqwest::StatusCode,
    },

    /// The API answered with a non-`ok` status.
    #[error("WAQI API error: {message}")]
    Api {
        /// Message returned in the `data` field.
        message: String,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// No API token configured.
    #[error("WAQI_TOKEN is not set")]
    MissingToken,
}
