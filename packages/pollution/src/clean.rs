//! Data cleaning and validation.
//!
//! Absent or malformed concentrations never fail the pipeline. They are
//! replaced, flagged, and reflected in the reading's [`QualityScore`].

use ward_aqi_pollution_models::{CleanedReading, Pollutant, QualityScore, RawReading};

use crate::standards::Standards;

/// Flag appended when both particulate readings end up at zero.
pub const CRITICAL_PM_FLAG: &str = "Critical PM data missing";

/// Accumulates flags and the quality score while pollutants are cleaned
/// one after another.
struct Cleaner {
    pm25_cap: f64,
    flags: Vec<String>,
    quality: QualityScore,
}

impl Cleaner {
    const fn new(pm25_cap: f64) -> Self {
        Self {
            pm25_cap,
            flags: Vec::new(),
            quality: QualityScore::High,
        }
    }

    fn value(&mut self, raw: &RawReading, pollutant: Pollutant) -> f64 {
        let key = pollutant.key();

        // NaN carries no information, treat it like an absent field.
        let Some(value) = raw.value(pollutant).filter(|v| !v.is_nan()) else {
            self.flags.push(format!("Missing {key}"));
            self.quality = self.quality.downgrade(QualityScore::Medium);
            return 0.0;
        };

        if value < 0.0 {
            // Negative readings are corrected without touching the quality
            // score; only missing data downgrades it.
            self.flags.push(format!("Negative {key} capped to 0"));
            return 0.0;
        }

        if pollutant == Pollutant::Pm25 && value > self.pm25_cap {
            self.flags.push(format!("Extreme {key} capped"));
            self.quality = QualityScore::Low;
            return self.pm25_cap;
        }

        if value.is_infinite() {
            self.flags.push(format!("Missing {key}"));
            self.quality = self.quality.downgrade(QualityScore::Medium);
            return 0.0;
        }

        value
    }
}

/// Cleans a raw reading.
///
/// Pollutants are processed in [`Pollutant::all`] order:
///
/// 1. missing → `0`, flag `"Missing {p}"`, quality at most `Medium`
/// 2. negative → `0`, flag `"Negative {p} capped to 0"`, quality unchanged
/// 3. PM2.5 above the extreme cap → cap, flag `"Extreme pm25 capped"`,
///    quality `Low`
///
/// Afterwards, if PM2.5 and PM10 are both exactly zero (for whatever
/// reason) the quality is forced to `Low` and [`CRITICAL_PM_FLAG`] is
/// appended.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn clean(raw: &RawReading, standards: &Standards) -> CleanedReading {
    let mut cleaner = Cleaner::new(standards.pm25_extreme_cap);

    let pm25 = cleaner.value(raw, Pollutant::Pm25);
    let pm10 = cleaner.value(raw, Pollutant::Pm10);
    let no2 = cleaner.value(raw, Pollutant::No2);
    let so2 = cleaner.value(raw, Pollutant::So2);
    let co = cleaner.value(raw, Pollutant::Co);
    let o3 = cleaner.value(raw, Pollutant::O3);

    if pm25 == 0.0 && pm10 == 0.0 {
        cleaner.quality = QualityScore::Low;
        cleaner.flags.push(CRITICAL_PM_FLAG.to_string());
    }

    CleanedReading {
        pm25,
        pm10,
        no2,
        so2,
        co,
        o3,
        data_quality_score: cleaner.quality,
        flags: cleaner.flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pm25: Option<f64>, pm10: Option<f64>) -> RawReading {
        RawReading {
            pm25,
            pm10,
            no2: Some(20.0),
            so2: Some(10.0),
            co: Some(1.0),
            o3: Some(30.0),
            timestamp: None,
        }
    }

    #[test]
    fn passes_valid_values_through() {
        let cleaned = clean(&reading(Some(45.0), Some(80.0)), &Standards::cpcb());
        assert!((cleaned.pm25 - 45.0).abs() < f64::EPSILON);
        assert!((cleaned.pm10 - 80.0).abs() < f64::EPSILON);
        assert!((cleaned.o3 - 30.0).abs() < f64::EPSILON);
        assert_eq!(cleaned.data_quality_score, QualityScore::High);
        assert!(cleaned.flags.is_empty());
    }

    #[test]
    fn negative_value_is_zeroed_without_downgrade() {
        let cleaned = clean(&reading(Some(-5.0), Some(80.0)), &Standards::cpcb());
        assert!(cleaned.pm25.abs() < f64::EPSILON);
        assert!(cleaned.flags.contains(&"Negative pm25 capped to 0".to_string()));
        assert_eq!(cleaned.data_quality_score, QualityScore::High);
    }

    #[test]
    fn missing_value_downgrades_to_medium() {
        let cleaned = clean(&reading(None, Some(80.0)), &Standards::cpcb());
        assert!(cleaned.pm25.abs() < f64::EPSILON);
        assert!(cleaned.flags.contains(&"Missing pm25".to_string()));
        assert_eq!(cleaned.data_quality_score, QualityScore::Medium);
    }

    #[test]
    fn extreme_pm25_is_capped_with_low_quality() {
        let cleaned = clean(&reading(Some(1500.0), Some(80.0)), &Standards::cpcb());
        assert!((cleaned.pm25 - 999.0).abs() < f64::EPSILON);
        assert!(cleaned.flags.contains(&"Extreme pm25 capped".to_string()));
        assert_eq!(cleaned.data_quality_score, QualityScore::Low);
    }

    #[test]
    fn extreme_cap_applies_only_to_pm25() {
        let cleaned = clean(&reading(Some(45.0), Some(1500.0)), &Standards::cpcb());
        assert!((cleaned.pm10 - 1500.0).abs() < f64::EPSILON);
        assert_eq!(cleaned.data_quality_score, QualityScore::High);
    }

    #[test]
    fn low_quality_is_sticky_after_later_missing_field() {
        let raw = RawReading {
            o3: None,
            ..reading(Some(1500.0), Some(80.0))
        };
        let cleaned = clean(&raw, &Standards::cpcb());
        assert_eq!(cleaned.data_quality_score, QualityScore::Low);
        assert_eq!(cleaned.flags, vec!["Extreme pm25 capped", "Missing o3"]);
    }

    #[test]
    fn zero_particulates_are_critical() {
        let cleaned = clean(&reading(Some(0.0), Some(0.0)), &Standards::cpcb());
        assert_eq!(cleaned.data_quality_score, QualityScore::Low);
        assert_eq!(cleaned.flags, vec![CRITICAL_PM_FLAG]);
    }

    #[test]
    fn critical_flag_follows_per_pollutant_flags() {
        let cleaned = clean(&reading(None, Some(-3.0)), &Standards::cpcb());
        assert_eq!(
            cleaned.flags,
            vec!["Missing pm25", "Negative pm10 capped to 0", CRITICAL_PM_FLAG]
        );
        assert_eq!(cleaned.data_quality_score, QualityScore::Low);
    }

    #[test]
    fn empty_reading_flags_every_pollutant() {
        let cleaned = clean(&RawReading::default(), &Standards::cpcb());
        assert_eq!(cleaned.flags.len(), 7);
        assert_eq!(cleaned.flags[0], "Missing pm25");
        assert_eq!(cleaned.flags[5], "Missing o3");
        assert_eq!(cleaned.data_quality_score, QualityScore::Low);
    }

    #[test]
    fn non_finite_values_are_treated_as_missing() {
        let raw = RawReading {
            no2: Some(f64::NAN),
            so2: Some(f64::INFINITY),
            ..reading(Some(45.0), Some(80.0))
        };
        let cleaned = clean(&raw, &Standards::cpcb());
        assert!(cleaned.no2.abs() < f64::EPSILON);
        assert!(cleaned.so2.abs() < f64::EPSILON);
        assert_eq!(cleaned.flags, vec!["Missing no2", "Missing so2"]);
        assert_eq!(cleaned.data_quality_score, QualityScore::Medium);
    }

    #[test]
    fn cleaning_is_idempotent_for_non_negative_values() {
        let standards = Standards::cpcb();
        let grid = [0.0, 0.4, 45.0, 80.0, 998.9, 999.0];

        for pm25 in grid {
            for pm10 in grid {
                for no2 in [0.0, 20.0, 400.0] {
                    let raw = RawReading {
                        no2: Some(no2),
                        ..reading(Some(pm25), Some(pm10))
                    };
                    let once = clean(&raw, &standards);
                    let twice = clean(&once.to_raw(), &standards);
                    assert_eq!(once, twice, "pm25={pm25} pm10={pm10} no2={no2}");
                }
            }
        }
    }
}
