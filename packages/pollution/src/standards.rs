//! Compile-time registry of regulatory standards sets.
//!
//! Each set of pollutant thresholds, caps and AQI category breakpoints is
//! defined in a TOML file under `standards/`. The registry embeds these at
//! compile time and exposes them via [`all_standards`] and
//! [`standards_by_id`]. Alternate sets can be parsed at runtime with
//! [`Standards::from_toml`].

use serde::{Deserialize, Serialize};
use ward_aqi_pollution_models::{AqiCategory, Pollutant};

use crate::StandardsError;

/// Identifier of the standards set used when none is configured.
pub const DEFAULT_STANDARDS_ID: &str = "cpcb";

/// Safe limit per pollutant, in that pollutant's unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// PM2.5 limit, µg/m³.
    pub pm25: f64,
    /// PM10 limit, µg/m³.
    pub pm10: f64,
    /// NO2 limit, µg/m³.
    pub no2: f64,
    /// SO2 limit, µg/m³.
    pub so2: f64,
    /// CO limit, mg/m³.
    pub co: f64,
    /// O3 limit, µg/m³.
    pub o3: f64,
}

impl Thresholds {
    /// Returns the limit for `pollutant`.
    #[must_use]
    pub const fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }
}

/// Upper bound (inclusive) of one AQI category band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakpoint {
    /// Highest AQI still in this band.
    pub max: u32,
    /// Band label.
    pub category: AqiCategory,
}

/// A regulatory standards set loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Standards {
    /// Unique identifier (e.g., `"cpcb"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Per-pollutant safe limits.
    pub thresholds: Thresholds,
    /// Upper bound for normalized multiples of a limit.
    pub normalization_ceiling: f64,
    /// PM2.5 values above this are treated as sensor errors and capped.
    pub pm25_extreme_cap: f64,
    /// Ascending category bands. AQI above the last band is
    /// [`AqiCategory::Hazardous`].
    pub categories: Vec<CategoryBreakpoint>,
}

impl Standards {
    /// Parses and validates a standards set from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::Parse`] if the document is malformed, or
    /// [`StandardsError::Invalid`] if a threshold is not positive or the
    /// category bands are not strictly ascending.
    pub fn from_toml(source: &str) -> Result<Self, StandardsError> {
        let standards: Self = toml::de::from_str(source)?;
        standards.validate()?;
        Ok(standards)
    }

    /// The built-in CPCB set.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (caught by the registry
    /// tests).
    #[must_use]
    pub fn cpcb() -> Self {
        standards_by_id(DEFAULT_STANDARDS_ID)
            .unwrap_or_else(|e| panic!("Embedded standards '{DEFAULT_STANDARDS_ID}': {e}"))
    }

    /// Maps an AQI value onto its category band.
    #[must_use]
    pub fn category_for(&self, aqi: u32) -> AqiCategory {
        self.categories
            .iter()
            .find(|band| aqi <= band.max)
            .map_or(AqiCategory::Hazardous, |band| band.category)
    }

    fn validate(&self) -> Result<(), StandardsError> {
        for pollutant in Pollutant::all() {
            let limit = self.thresholds.get(*pollutant);
            if !(limit.is_finite() && limit > 0.0) {
                return Err(StandardsError::Invalid {
                    message: format!("threshold for {pollutant} must be positive, got {limit}"),
                });
            }
        }

        if !(self.normalization_ceiling.is_finite() && self.normalization_ceiling > 0.0) {
            return Err(StandardsError::Invalid {
                message: format!(
                    "normalization_ceiling must be positive, got {}",
                    self.normalization_ceiling
                ),
            });
        }

        if !(self.pm25_extreme_cap.is_finite() && self.pm25_extreme_cap > 0.0) {
            return Err(StandardsError::Invalid {
                message: format!(
                    "pm25_extreme_cap must be positive, got {}",
                    self.pm25_extreme_cap
                ),
            });
        }

        if self.categories.windows(2).any(|w| w[0].max >= w[1].max) {
            return Err(StandardsError::Invalid {
                message: "category bands must be strictly ascending".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Standards {
    fn default() -> Self {
        Self::cpcb()
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const STANDARDS_TOMLS: &[(&str, &str)] = &[
    ("cpcb", include_str!("../standards/cpcb.toml")),
    ("who", include_str!("../standards/who.toml")),
];

#[cfg(test)]
const EXPECTED_STANDARDS_COUNT: usize = 2;

/// Returns all embedded standards sets.
///
/// # Panics
///
/// Panics if any embedded TOML is malformed.
#[must_use]
pub fn all_standards() -> Vec<Standards> {
    STANDARDS_TOMLS
        .iter()
        .map(|(id, toml_str)| {
            Standards::from_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse standards '{id}': {e}"))
        })
        .collect()
}

/// Looks up an embedded standards set by id.
///
/// # Errors
///
/// Returns [`StandardsError::NotFound`] if no embedded set has this id, or
/// the parse/validation error of the embedded TOML.
pub fn standards_by_id(id: &str) -> Result<Standards, StandardsError> {
    let (_, toml_str) = STANDARDS_TOMLS
        .iter()
        .find(|(key, _)| *key == id)
        .ok_or_else(|| StandardsError::NotFound { id: id.to_string() })?;
    Standards::from_toml(toml_str)
}
