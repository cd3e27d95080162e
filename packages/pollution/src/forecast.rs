//! EPA PM2.5 breakpoint interpolation for forecast display.
//!
//! Unrelated to the pipeline's simplified AQI in [`crate::aqi`]: this maps a
//! forecast concentration onto the US EPA scale by linear interpolation
//! within its band.

/// `(c_low, c_high, aqi_low, aqi_high)` for each band.
const PM25_BANDS: [(f64, f64, f64, f64); 6] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.1, 35.4, 51.0, 100.0),
    (35.5, 55.4, 101.0, 150.0),
    (55.5, 150.4, 151.0, 200.0),
    (150.5, 250.4, 201.0, 300.0),
    (250.5, 500.0, 301.0, 500.0),
];

/// Highest AQI on the EPA scale.
const MAX_AQI: u16 = 500;

/// Converts a PM2.5 concentration (µg/m³) to an EPA AQI value.
///
/// Concentrations that fall between two published bands (e.g. 12.05) match
/// no band and are reported as the rounded concentration itself. Negative
/// input yields 0 and anything above 500 yields 500.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn epa_pm25_aqi(concentration: f64) -> u16 {
    if concentration.is_nan() || concentration <= 0.0 {
        return 0;
    }

    PM25_BANDS
        .iter()
        .find(|(c_low, c_high, _, _)| (*c_low..=*c_high).contains(&concentration))
        .map_or_else(
            || concentration.round().min(f64::from(MAX_AQI)) as u16,
            |&(c_low, c_high, aqi_low, aqi_high)| {
                ((aqi_high - aqi_low) / (c_high - c_low))
                    .mul_add(concentration - c_low, aqi_low)
                    .round() as u16
            },
        )
}

/// AQI of one forecast day: the worse of the PM2.5 and PM10 averages, both
/// read on the PM2.5 scale.
#[must_use]
pub fn forecast_day_aqi(pm25_avg: f64, pm10_avg: f64) -> u16 {
    epa_pm25_aqi(pm25_avg).max(epa_pm25_aqi(pm10_avg))
}
