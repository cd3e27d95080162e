//! Rule-based source inference.
//!
//! An ordered rule list evaluated top to bottom; the first rule that
//! matches decides the [`DominantSource`]. Earlier, more specific rules
//! take precedence over the generic ones further down.
//!
//! | # | Source | Condition |
//! |---|--------|-----------|
//! | 1 | Vehicular | `no2 > 1.5`, or `pm25 > 1.5` and `no2 > 0.8` during peak traffic |
//! | 2 | Dust / Construction | `pm10 > 1.5` and PM ratio `< 0.5` |
//! | 3 | Waste / Biomass | `pm25 > 2.0` and PM ratio `> 0.6` at night |
//! | 4 | Industrial | `so2 > 1.0` |
//! | 5 | Mixed Urban | `pm25 > 1.0` |
//! | 6 | Background / Regional | always |
//!
//! All conditions are on normalized multiples except the PM ratio, which is
//! `pm25 / max(pm10, 1)` on cleaned concentrations.

use ward_aqi_pollution_models::{
    CleanedReading, DominantSource, HourOfDay, NormalizedReading, SourceInference,
};

const VEHICULAR_NO2: f64 = 1.5;
const VEHICULAR_PEAK_PM25: f64 = 1.5;
const VEHICULAR_PEAK_NO2: f64 = 0.8;
const DUST_PM10: f64 = 1.5;
const DUST_MAX_PM_RATIO: f64 = 0.5;
const BURNING_PM25: f64 = 2.0;
const BURNING_MIN_PM_RATIO: f64 = 0.6;
const INDUSTRIAL_SO2: f64 = 1.0;
const MIXED_PM25: f64 = 1.0;

/// Fine-to-coarse particle ratio. Low values point at coarse dust, high
/// values at combustion.
#[must_use]
pub fn pm_ratio(cleaned: &CleanedReading) -> f64 {
    cleaned.pm25 / cleaned.pm10.max(1.0)
}

/// Evaluates the rule list and returns the first matching source.
#[must_use]
pub fn infer_source(
    cleaned: &CleanedReading,
    normalized: &NormalizedReading,
    hour: HourOfDay,
) -> DominantSource {
    let ratio = pm_ratio(cleaned);

    if normalized.no2 > VEHICULAR_NO2
        || (normalized.pm25 > VEHICULAR_PEAK_PM25
            && normalized.no2 > VEHICULAR_PEAK_NO2
            && hour.is_peak_traffic())
    {
        DominantSource::Vehicular
    } else if normalized.pm10 > DUST_PM10 && ratio < DUST_MAX_PM_RATIO {
        DominantSource::DustConstruction
    } else if normalized.pm25 > BURNING_PM25 && ratio > BURNING_MIN_PM_RATIO && hour.is_night() {
        DominantSource::WasteBiomass
    } else if normalized.so2 > INDUSTRIAL_SO2 {
        DominantSource::Industrial
    } else if normalized.pm25 > MIXED_PM25 {
        DominantSource::MixedUrban
    } else {
        DominantSource::BackgroundRegional
    }
}

/// Infers the dominant pollution source at the given local hour.
#[must_use]
pub fn infer(
    cleaned: &CleanedReading,
    normalized: &NormalizedReading,
    hour: HourOfDay,
) -> SourceInference {
    let source = infer_source(cleaned, normalized, hour);
    log::debug!(
        "Inferred {source} at {hour} (pm ratio {:.2}, normalized {normalized:?})",
        pm_ratio(cleaned)
    );
    SourceInference::from(source)
}
