#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pollutant reading, AQI and source inference types.
//!
//! These are the values that flow through one invocation of the pollution
//! inference pipeline: a [`RawReading`] straight from the sensor network is
//! cleaned into a [`CleanedReading`], scored into an [`AqiResult`], and
//! attributed to a [`DominantSource`] with a modeled
//! [`SourceContribution`] breakdown. None of them are persisted.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A pollutant measured by the sensor network.
///
/// Serializes to its display name (`"PM2.5"`, `"NO2"`, ...). Use
/// [`Pollutant::key`] for the lowercase field name used in raw payloads and
/// cleaning flags.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Pollutant {
    /// Fine particulate matter, µg/m³.
    #[serde(rename = "PM2.5")]
    #[strum(serialize = "PM2.5")]
    Pm25,
    /// Coarse particulate matter, µg/m³.
    #[serde(rename = "PM10")]
    #[strum(serialize = "PM10")]
    Pm10,
    /// Nitrogen dioxide, µg/m³.
    #[serde(rename = "NO2")]
    #[strum(serialize = "NO2")]
    No2,
    /// Sulphur dioxide, µg/m³.
    #[serde(rename = "SO2")]
    #[strum(serialize = "SO2")]
    So2,
    /// Carbon monoxide, mg/m³.
    #[serde(rename = "CO")]
    #[strum(serialize = "CO")]
    Co,
    /// Ozone, µg/m³.
    #[serde(rename = "O3")]
    #[strum(serialize = "O3")]
    O3,
}

impl Pollutant {
    /// Lowercase field name (`"pm25"`, `"no2"`, ...).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::Co => "co",
            Self::O3 => "o3",
        }
    }

    /// Measurement unit for dashboard display.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Co => "mg/m³",
            Self::Pm25 | Self::Pm10 | Self::No2 | Self::So2 | Self::O3 => "µg/m³",
        }
    }

    /// Returns all variants in cleaning order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pm25,
            Self::Pm10,
            Self::No2,
            Self::So2,
            Self::Co,
            Self::O3,
        ]
    }

    /// The pollutants that take part in the AQI sub-index and
    /// normalization, in tie-break order.
    #[must_use]
    pub const fn indexed() -> &'static [Self] {
        &[Self::Pm25, Self::Pm10, Self::No2, Self::So2]
    }
}

/// One pollutant snapshot as reported by the sensor network.
///
/// Every concentration may be absent, negative or absurdly large; the
/// cleaning stage deals with all of that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    /// PM2.5 concentration.
    #[serde(default)]
    pub pm25: Option<f64>,
    /// PM10 concentration.
    #[serde(default)]
    pub pm10: Option<f64>,
    /// NO2 concentration.
    #[serde(default)]
    pub no2: Option<f64>,
    /// SO2 concentration.
    #[serde(default)]
    pub so2: Option<f64>,
    /// CO concentration.
    #[serde(default)]
    pub co: Option<f64>,
    /// O3 concentration.
    #[serde(default)]
    pub o3: Option<f64>,
    /// When the snapshot was captured (Unix milliseconds on the wire).
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RawReading {
    /// Returns the raw value for `pollutant`.
    #[must_use]
    pub const fn value(&self, pollutant: Pollutant) -> Option<f64> {
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

/// Coarse confidence label for a cleaned reading.
///
/// Variants are ordered from best to worst, so `max` picks the more
/// degraded of two scores.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum QualityScore {
    /// No substitution was needed.
    High,
    /// At least one pollutant was missing.
    Medium,
    /// Extreme values were capped or critical PM data is absent.
    Low,
}

impl QualityScore {
    /// Lowers the score to `floor` unless it is already worse.
    #[must_use]
    pub fn downgrade(self, floor: Self) -> Self {
        self.max(floor)
    }
}

/// A reading after cleaning: every concentration is a finite,
/// non-negative number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedReading {
    /// PM2.5 concentration, capped at the standards' extreme value.
    pub pm25: f64,
    /// PM10 concentration.
    pub pm10: f64,
    /// NO2 concentration.
    pub no2: f64,
    /// SO2 concentration.
    pub so2: f64,
    /// CO concentration.
    pub co: f64,
    /// O3 concentration.
    pub o3: f64,
    /// How much correction the reading needed.
    pub data_quality_score: QualityScore,
    /// Human-readable corrections, in the order they were applied.
    pub flags: Vec<String>,
}

impl CleanedReading {
    /// Returns the cleaned value for `pollutant`.
    #[must_use]
    pub const fn value(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    /// Re-expresses this reading as a raw one, e.g. to feed it through
    /// cleaning again.
    #[must_use]
    pub const fn to_raw(&self) -> RawReading {
        RawReading {
            pm25: Some(self.pm25),
            pm10: Some(self.pm10),
            no2: Some(self.no2),
            so2: Some(self.so2),
            co: Some(self.co),
            o3: Some(self.o3),
            timestamp: None,
        }
    }
}

/// Multiples of the regulatory limit, capped at the standards' ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReading {
    /// PM2.5 / PM2.5 threshold.
    pub pm25: f64,
    /// PM10 / PM10 threshold.
    pub pm10: f64,
    /// NO2 / NO2 threshold.
    pub no2: f64,
    /// SO2 / SO2 threshold.
    pub so2: f64,
}

/// AQI category band.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum AqiCategory {
    /// 0-50.
    Good,
    /// 51-100.
    Moderate,
    /// 101-200.
    Poor,
    /// 201-300.
    #[serde(rename = "Very Poor")]
    #[strum(serialize = "Very Poor")]
    VeryPoor,
    /// 301-400.
    Severe,
    /// Above 400.
    Hazardous,
}

/// Single-pollutant-dominant AQI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiResult {
    /// Highest sub-index, rounded.
    pub aqi: u32,
    /// Category band for `aqi`.
    pub category: AqiCategory,
    /// Pollutant whose sub-index produced `aqi`.
    pub dominant_pollutant: Pollutant,
}

/// Confidence attached to a source inference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Confidence {
    /// Strong chemical marker.
    High,
    /// Marker plus time-of-day heuristic.
    Medium,
    /// No distinct marker.
    Low,
}

/// The emission family the rule engine attributes a reading to.
///
/// Each variant carries its fixed confidence and explanation; nothing is
/// templated from the measured values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DominantSource {
    /// Traffic exhaust.
    #[serde(rename = "Vehicular Emissions")]
    #[strum(serialize = "Vehicular Emissions")]
    Vehicular,
    /// Resuspended road dust and construction.
    #[serde(rename = "Road Dust / Construction")]
    #[strum(serialize = "Road Dust / Construction")]
    DustConstruction,
    /// Open burning of waste or biomass.
    #[serde(rename = "Waste / Biomass Burning")]
    #[strum(serialize = "Waste / Biomass Burning")]
    WasteBiomass,
    /// Industrial fuel combustion.
    #[serde(rename = "Industrial Emissions")]
    #[strum(serialize = "Industrial Emissions")]
    Industrial,
    /// Elevated fine particles without a distinct marker.
    #[serde(rename = "Mixed Urban Activity")]
    #[strum(serialize = "Mixed Urban Activity")]
    MixedUrban,
    /// Nothing stands out.
    #[serde(rename = "Background / Regional")]
    #[strum(serialize = "Background / Regional")]
    BackgroundRegional,
}

impl DominantSource {
    /// Fixed confidence of the rule that yields this source.
    #[must_use]
    pub const fn confidence(self) -> Confidence {
        match self {
            Self::Vehicular | Self::DustConstruction | Self::Industrial => Confidence::High,
            Self::WasteBiomass => Confidence::Medium,
            Self::MixedUrban | Self::BackgroundRegional => Confidence::Low,
        }
    }

    /// Static explanation shown alongside the inference.
    #[must_use]
    pub const fn reasoning(self) -> &'static str {
        match self {
            Self::Vehicular => {
                "Elevated NO₂ levels combined with PM2.5 spikes during peak traffic hours."
            }
            Self::DustConstruction => {
                "Dominance of coarse particles (PM10) suggests resuspended road dust or construction activity."
            }
            Self::WasteBiomass => {
                "High concentration of fine particles (PM2.5) at night is characteristic of biomass or waste burning."
            }
            Self::Industrial => {
                "Significant SO₂ levels indicate industrial fuel burning (coal/oil)."
            }
            Self::MixedUrban => {
                "High PM2.5 levels without distinct chemical markers suggest mixed sources."
            }
            Self::BackgroundRegional => {
                "Pollutant levels are within expected regional background ranges."
            }
        }
    }
}

/// Result of the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInference {
    /// Matched emission family.
    pub dominant_source: DominantSource,
    /// Confidence of the matched rule.
    pub confidence: Confidence,
    /// Static explanation of the matched rule.
    pub reasoning: String,
}

impl From<DominantSource> for SourceInference {
    fn from(source: DominantSource) -> Self {
        Self {
            dominant_source: source,
            confidence: source.confidence(),
            reasoning: source.reasoning().to_string(),
        }
    }
}

/// One of the five fixed categories of the contribution model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SourceCategory {
    /// Road traffic.
    Transport,
    /// Road dust and construction sites.
    #[serde(rename = "Dust / Construction")]
    #[strum(serialize = "Dust / Construction")]
    DustConstruction,
    /// Industrial stacks.
    Industry,
    /// Waste and biomass burning.
    #[serde(rename = "Waste / Biomass")]
    #[strum(serialize = "Waste / Biomass")]
    WasteBiomass,
    /// Everything else.
    Others,
}

impl SourceCategory {
    /// Chart color for the category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Transport => "#3B82F6",
            Self::DustConstruction => "#F59E0B",
            Self::Industry => "#6366F1",
            Self::WasteBiomass => "#EF4444",
            Self::Others => "#94A3B8",
        }
    }

    /// Returns all variants in chart order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Transport,
            Self::DustConstruction,
            Self::Industry,
            Self::WasteBiomass,
            Self::Others,
        ]
    }
}

/// Modeled share of one source category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContribution {
    /// Category.
    pub source: SourceCategory,
    /// Rounded share of the total, in percent.
    pub percentage: u32,
    /// Chart color.
    pub color: String,
}

/// Composite output of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedReading {
    /// Cleaned and validated reading.
    pub cleaned: CleanedReading,
    /// Computed AQI.
    pub aqi: AqiResult,
    /// Rule-based source inference.
    pub inference: SourceInference,
    /// Modeled source breakdown.
    pub contribution: Vec<SourceContribution>,
}

/// Per-pollutant dashboard status, independent of the AQI category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum PollutantStatus {
    /// Within the safe range.
    Good,
    /// Around the limit.
    Moderate,
    /// Above the limit.
    Poor,
    /// Far above the limit.
    Severe,
}

impl PollutantStatus {
    /// Composition-chart color for the status.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Severe => "#EF4444",
            Self::Poor => "#F97316",
            Self::Good | Self::Moderate => "#EAB308",
        }
    }
}

/// Local hour of the day (0-23) at which source inference runs.
///
/// Passed explicitly so inference never reads the system clock itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct HourOfDay(u8);

impl HourOfDay {
    /// Creates an hour from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 0-23.
    pub const fn from_value(value: u8) -> Result<Self, InvalidHourError> {
        if value < 24 {
            Ok(Self(value))
        } else {
            Err(InvalidHourError { value })
        }
    }

    /// Hour component of a clock time, e.g. `chrono::Local::now()`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        // `Timelike::hour` is always 0-23.
        Self((time.hour() % 24) as u8)
    }

    /// Returns the numeric hour.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Morning (08-11) or evening (17-20) rush.
    #[must_use]
    pub const fn is_peak_traffic(self) -> bool {
        matches!(self.0, 8..=11 | 17..=20)
    }

    /// 20:00 through 06:59.
    #[must_use]
    pub const fn is_night(self) -> bool {
        self.0 >= 20 || self.0 <= 6
    }
}

impl TryFrom<u8> for HourOfDay {
    type Error = InvalidHourError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<HourOfDay> for u8 {
    fn from(hour: HourOfDay) -> Self {
        hour.0
    }
}

impl std::fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Error returned when attempting to create a [`HourOfDay`] from an
/// out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHourError {
    /// The invalid hour that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidHourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid hour {}: expected 0-23", self.value)
    }
}

impl std::error::Error for InvalidHourError {}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn hour_range_valid() {
        for v in 0..24u8 {
            assert_eq!(HourOfDay::from_value(v).unwrap().value(), v);
        }
        assert!(HourOfDay::from_value(24).is_err());
        assert!(HourOfDay::from_value(u8::MAX).is_err());
    }

    #[test]
    fn hour_from_clock_time() {
        let time = chrono::NaiveTime::from_hms_opt(21, 45, 0).unwrap();
        assert_eq!(HourOfDay::from_time(&time).value(), 21);
    }

    #[test]
    fn peak_traffic_windows() {
        let peak: Vec<u8> = (0..24u8)
            .filter(|h| HourOfDay::from_value(*h).unwrap().is_peak_traffic())
            .collect();
        assert_eq!(peak, vec![8, 9, 10, 11, 17, 18, 19, 20]);
    }

    #[test]
    fn night_window_wraps_midnight() {
        let night: Vec<u8> = (0..24u8)
            .filter(|h| HourOfDay::from_value(*h).unwrap().is_night())
            .collect();
        assert_eq!(night, vec![0, 1, 2, 3, 4, 5, 6, 20, 21, 22, 23]);
    }

    #[test]
    fn quality_downgrade_never_upgrades() {
        assert_eq!(QualityScore::High.downgrade(QualityScore::Medium), QualityScore::Medium);
        assert_eq!(QualityScore::Low.downgrade(QualityScore::Medium), QualityScore::Low);
        assert_eq!(QualityScore::Medium.downgrade(QualityScore::High), QualityScore::Medium);
    }

    #[test]
    fn every_source_has_fixed_confidence_and_reasoning() {
        let inference = SourceInference::from(DominantSource::Industrial);
        assert_eq!(inference.confidence, Confidence::High);
        assert_eq!(
            inference.reasoning,
            "Significant SO₂ levels indicate industrial fuel burning (coal/oil)."
        );
        assert_eq!(DominantSource::WasteBiomass.confidence(), Confidence::Medium);
        assert_eq!(DominantSource::BackgroundRegional.confidence(), Confidence::Low);
    }

    #[test]
    fn labels_match_display_names() {
        assert_eq!(Pollutant::Pm25.to_string(), "PM2.5");
        assert_eq!(Pollutant::Pm25.key(), "pm25");
        assert_eq!(AqiCategory::VeryPoor.to_string(), "Very Poor");
        assert_eq!(
            DominantSource::DustConstruction.to_string(),
            "Road Dust / Construction"
        );
        assert_eq!(SourceCategory::WasteBiomass.as_ref(), "Waste / Biomass");
        assert_eq!(
            "Industrial Emissions".parse::<DominantSource>().unwrap(),
            DominantSource::Industrial
        );
    }

    #[test]
    fn raw_reading_decodes_nulls_and_millisecond_timestamp() {
        let raw: RawReading = serde_json::from_str(
            r#"{ "pm25": 45, "pm10": null, "so2": -3.5, "timestamp": 1730793600000 }"#,
        )
        .unwrap();

        assert_eq!(raw.value(Pollutant::Pm25), Some(45.0));
        assert_eq!(raw.value(Pollutant::Pm10), None);
        assert_eq!(raw.value(Pollutant::No2), None);
        assert_eq!(raw.value(Pollutant::So2), Some(-3.5));
        assert_eq!(
            raw.timestamp,
            Some(chrono::Utc.with_ymd_and_hms(2024, 11, 5, 8, 0, 0).unwrap())
        );
    }
}
