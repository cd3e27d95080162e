#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the ward air-quality server.
//!
//! These are the JSON shapes the dashboard frontend consumes. They are kept
//! apart from the pipeline types so the API contract can evolve on its own.

use serde::{Deserialize, Serialize};
use ward_aqi_pollution_models::{
    AqiCategory, Confidence, DominantSource, Pollutant, PollutantStatus, QualityScore,
    SourceContribution,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Wraps a message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters for `GET /api/aqi`.
#[derive(Debug, Clone, Deserialize)]
pub struct AqiQueryParams {
    /// Ward latitude.
    pub lat: Option<f64>,
    /// Ward longitude.
    pub lon: Option<f64>,
    /// Ward or locality name used to look up a named station.
    pub keyword: Option<String>,
}

/// Query parameters for `POST /api/aqi/process`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessQueryParams {
    /// Local hour (0-23) for source inference. Defaults to the server's
    /// current hour.
    pub hour: Option<u8>,
}

/// One pollutant card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPollutant {
    /// Display name, e.g. `"NO₂"`.
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub status: PollutantStatus,
    /// Short citizen-facing explanation.
    pub description: String,
}

/// One slice of the pollutant composition chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCompositionEntry {
    pub name: String,
    pub value: f64,
    /// Hex color derived from the pollutant's status.
    pub color: String,
}

/// Station coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApiCoordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiAlertLevel {
    Severe,
    Warning,
    Info,
}

/// A ward alert banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub level: ApiAlertLevel,
    pub title: String,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_groups: Option<Vec<String>>,
}

/// One suggested action and how much it helps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiActionItem {
    pub text: String,
    /// e.g. `"High Impact"`.
    pub impact: String,
}

impl ApiActionItem {
    #[must_use]
    pub fn new(text: impl Into<String>, impact: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            impact: impact.into(),
        }
    }
}

/// Things citizens should and should not do today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDailyActions {
    pub dos: Vec<ApiActionItem>,
    pub avoids: Vec<ApiActionItem>,
}

/// Live dashboard payload for one ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAqiResponse {
    /// `waqi-<station idx>`.
    pub id: String,
    /// Station display name.
    pub name: String,
    pub aqi: u32,
    pub category: AqiCategory,
    pub dominant_pollutant: Pollutant,
    /// Freshness label.
    pub last_updated: String,
    pub dominant_source: DominantSource,
    pub source_confidence: Confidence,
    pub source_reasoning: String,
    pub data_quality_score: QualityScore,
    /// Corrections applied while cleaning the reading.
    pub flags: Vec<String>,
    pub pollutants: Vec<ApiPollutant>,
    pub source_contribution: Vec<SourceContribution>,
    /// Active alerts. The live feed raises none.
    pub alerts: Vec<ApiAlert>,
    pub pollutant_composition: Vec<ApiCompositionEntry>,
    pub daily_actions: ApiDailyActions,
    pub contextual_advice: String,
    /// Station location, when the feed reports one.
    pub coordinates: Option<ApiCoordinates>,
}
