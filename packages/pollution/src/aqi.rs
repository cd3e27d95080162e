//! Simplified single-pollutant-dominant AQI.
//!
//! Each of PM2.5, PM10, NO2 and SO2 gets a sub-index of
//! `concentration / threshold × 100`; the largest one is the AQI. This is
//! not the EPA breakpoint interpolation (see [`crate::forecast`]).

use ward_aqi_pollution_models::{AqiResult, CleanedReading, Pollutant};

use crate::standards::Standards;

/// Sub-index of one pollutant.
#[must_use]
pub fn sub_index(cleaned: &CleanedReading, standards: &Standards, pollutant: Pollutant) -> f64 {
    cleaned.value(pollutant) / standards.thresholds.get(pollutant) * 100.0
}

/// Computes the AQI of a cleaned reading.
///
/// On an exact tie between sub-indices the pollutant earlier in
/// [`Pollutant::indexed`] order wins, so an all-zero reading is dominated
/// by PM2.5.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_aqi(cleaned: &CleanedReading, standards: &Standards) -> AqiResult {
    let (dominant_pollutant, max) = Pollutant::indexed()
        .iter()
        .map(|p| (*p, sub_index(cleaned, standards, *p)))
        .fold((Pollutant::Pm25, f64::NEG_INFINITY), |best, current| {
            if current.1 > best.1 { current } else { best }
        });

    // Cleaned values are finite and non-negative, so the cast is exact up
    // to rounding.
    let aqi = max.round() as u32;

    AqiResult {
        aqi,
        category: standards.category_for(aqi),
        dominant_pollutant,
    }
}
