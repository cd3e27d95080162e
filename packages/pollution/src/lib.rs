#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rule-based pollution inference pipeline.
//!
//! Turns one raw pollutant snapshot into everything the ward dashboard
//! shows about it:
//!
//! 1. [`clean::clean`] replaces missing, negative and extreme values and
//!    grades the reading's data quality.
//! 2. [`normalize::normalize`] expresses PM2.5, PM10, NO2 and SO2 as
//!    multiples of their regulatory limit.
//! 3. [`aqi::compute_aqi`] picks the highest pollutant sub-index.
//! 4. [`inference::infer`] runs the ordered source rules.
//! 5. [`contribution::estimate_contribution`] models the share of each
//!    emission category.
//!
//! Every stage is a pure function of its inputs. The only time dependence,
//! the local hour used by the traffic and night rules, is passed in as a
//! [`HourOfDay`]. Thresholds and category bands come from a
//! [`standards::Standards`] set.
//!
//! The pipeline never fails. Callers must look at
//! [`CleanedReading::data_quality_score`] before trusting the result: an
//! entirely empty reading still produces a well-formed AQI of 0 / Good.

pub mod aqi;
pub mod clean;
pub mod contribution;
pub mod forecast;
pub mod inference;
pub mod normalize;
pub mod severity;
pub mod standards;

use thiserror::Error;
use ward_aqi_pollution_models::{
    CleanedReading, HourOfDay, ProcessedReading, QualityScore, RawReading,
};

use crate::standards::Standards;

/// Errors that can occur while loading a standards set.
#[derive(Debug, Error)]
pub enum StandardsError {
    /// TOML parsing failed.
    #[error("Standards parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but its values are unusable.
    #[error("Invalid standards: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },

    /// No embedded standards set has the requested id.
    #[error("Unknown standards set: {id}")]
    NotFound {
        /// The requested id.
        id: String,
    },
}

/// Runs the full pipeline on one raw reading.
#[must_use]
pub fn process_pollution_data(
    raw: &RawReading,
    standards: &Standards,
    hour: HourOfDay,
) -> ProcessedReading {
    let cleaned = clean::clean(raw, standards);
    log_quality(&cleaned);

    let normalized = normalize::normalize(&cleaned, standards);
    let aqi = aqi::compute_aqi(&cleaned, standards);
    let inference = inference::infer(&cleaned, &normalized, hour);
    let contribution = contribution::estimate_contribution(&inference);

    log::debug!(
        "AQI {} ({}) dominated by {}, source {} [{}]",
        aqi.aqi,
        aqi.category,
        aqi.dominant_pollutant,
        inference.dominant_source,
        inference.confidence,
    );

    ProcessedReading {
        cleaned,
        aqi,
        inference,
        contribution,
    }
}

fn log_quality(cleaned: &CleanedReading) {
    if cleaned.data_quality_score != QualityScore::High {
        log::warn!(
            "Reading quality {}: {}",
            cleaned.data_quality_score,
            cleaned.flags.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use ward_aqi_pollution_models::{AqiCategory, DominantSource, Pollutant, SourceCategory};

    use super::*;

    fn reading() -> RawReading {
        RawReading {
            pm25: Some(45.0),
            pm10: Some(80.0),
            no2: Some(20.0),
            so2: Some(10.0),
            co: Some(1.0),
            o3: Some(30.0),
            timestamp: None,
        }
    }

    #[test]
    fn end_to_end_is_deterministic_for_a_fixed_hour() {
        let standards = Standards::cpcb();
        for value in 0..24u8 {
            let hour = HourOfDay::from_value(value).unwrap();
            let result = process_pollution_data(&reading(), &standards, hour);

            assert_eq!(result.cleaned.data_quality_score, QualityScore::High);
            assert!(result.cleaned.flags.is_empty());
            assert_eq!(result.aqi.aqi, 80);
            assert_eq!(result.aqi.category, AqiCategory::Moderate);
            assert_eq!(result.aqi.dominant_pollutant, Pollutant::Pm10);

            // PM ratio 45 / 80 = 0.5625 keeps the dust rule from firing.
            assert_ne!(result.inference.dominant_source, DominantSource::DustConstruction);
            assert_eq!(
                result.inference.dominant_source,
                DominantSource::BackgroundRegional
            );
            assert_eq!(result.contribution.len(), 5);
            assert_eq!(result.contribution[0].source, SourceCategory::Transport);
            assert_eq!(result.contribution[0].percentage, 30);
        }
    }

    #[test]
    fn empty_reading_is_good_but_low_quality() {
        let hour = HourOfDay::from_value(12).unwrap();
        let result = process_pollution_data(&RawReading::default(), &Standards::cpcb(), hour);
        assert_eq!(result.aqi.aqi, 0);
        assert_eq!(result.aqi.category, AqiCategory::Good);
        assert_eq!(result.cleaned.data_quality_score, QualityScore::Low);
        assert!(
            result
                .cleaned
                .flags
                .contains(&clean::CRITICAL_PM_FLAG.to_string())
        );
    }

    #[test]
    fn serializes_dashboard_field_names() {
        let hour = HourOfDay::from_value(9).unwrap();
        let result = process_pollution_data(&reading(), &Standards::cpcb(), hour);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["cleaned"]["dataQualityScore"], "High");
        assert_eq!(json["aqi"]["dominantPollutant"], "PM10");
        assert_eq!(json["aqi"]["category"], "Moderate");
        assert_eq!(json["inference"]["dominantSource"], "Background / Regional");
        assert_eq!(json["contribution"][1]["source"], "Dust / Construction");
    }

    #[test]
    fn alternate_standards_change_the_result() {
        let hour = HourOfDay::from_value(12).unwrap();
        let who = standards::standards_by_id("who").unwrap();
        let result = process_pollution_data(&reading(), &who, hour);
        // 45 / 15 × 100 = 300
        assert_eq!(result.aqi.aqi, 300);
        assert_eq!(result.aqi.dominant_pollutant, Pollutant::Pm25);
        assert_eq!(result.aqi.category, AqiCategory::VeryPoor);
    }
}
