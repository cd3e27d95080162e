//! Per-pollutant dashboard status.
//!
//! A coarse label for each pollutant card, independent of the AQI
//! category bands.

use ward_aqi_pollution_models::{Pollutant, PollutantStatus};

/// Classifies one concentration.
///
/// PM2.5 uses its own tighter bands (30/60/90); every other pollutant uses
/// 50/100/200.
#[must_use]
pub fn pollutant_status(pollutant: Pollutant, value: f64) -> PollutantStatus {
    let (good, moderate, poor) = match pollutant {
        Pollutant::Pm25 => (30.0, 60.0, 90.0),
        Pollutant::Pm10 | Pollutant::No2 | Pollutant::So2 | Pollutant::Co | Pollutant::O3 => {
            (50.0, 100.0, 200.0)
        }
    };

    if value <= good {
        PollutantStatus::Good
    } else if value <= moderate {
        PollutantStatus::Moderate
    } else if value <= poor {
        PollutantStatus::Poor
    } else {
        PollutantStatus::Severe
    }
}
