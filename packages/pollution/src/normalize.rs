//! Normalization of cleaned concentrations into multiples of the
//! regulatory limit.

use ward_aqi_pollution_models::{CleanedReading, NormalizedReading, Pollutant};

use crate::standards::Standards;

/// Multiple of the limit for one pollutant, capped at the standards'
/// ceiling.
fn multiple(cleaned: &CleanedReading, standards: &Standards, pollutant: Pollutant) -> f64 {
    (cleaned.value(pollutant) / standards.thresholds.get(pollutant))
        .min(standards.normalization_ceiling)
}

/// Normalizes PM2.5, PM10, NO2 and SO2. CO and O3 play no part in source
/// inference and are left out.
#[must_use]
pub fn normalize(cleaned: &CleanedReading, standards: &Standards) -> NormalizedReading {
    NormalizedReading {
        pm25: multiple(cleaned, standards, Pollutant::Pm25),
        pm10: multiple(cleaned, standards, Pollutant::Pm10),
        no2: multiple(cleaned, standards, Pollutant::No2),
        so2: multiple(cleaned, standards, Pollutant::So2),
    }
}

#[cfg(test)]
mod tests {
    use ward_aqi_pollution_models::QualityScore;

    use super::*;

    fn cleaned(pm25: f64, pm10: f64, no2: f64, so2: f64) -> CleanedReading {
        CleanedReading {
            pm25,
            pm10,
            no2,
            so2,
            co: 1.0,
            o3: 30.0,
            data_quality_score: QualityScore::High,
            flags: Vec::new(),
        }
    }

    #[test]
    fn divides_by_thresholds() {
        let normalized = normalize(&cleaned(90.0, 150.0, 40.0, 120.0), &Standards::cpcb());
        assert!((normalized.pm25 - 1.5).abs() < 1e-9);
        assert!((normalized.pm10 - 1.5).abs() < 1e-9);
        assert!((normalized.no2 - 0.5).abs() < 1e-9);
        assert!((normalized.so2 - 1.5).abs() < 1e-9);
    }

    #[test]
    fn caps_at_ceiling() {
        let normalized = normalize(&cleaned(999.0, 2000.0, 0.0, 0.0), &Standards::cpcb());
        assert!((normalized.pm25 - 5.0).abs() < f64::EPSILON);
        assert!((normalized.pm10 - 5.0).abs() < f64::EPSILON);
        assert!(normalized.no2.abs() < f64::EPSILON);
    }
}
