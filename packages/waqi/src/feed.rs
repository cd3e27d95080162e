//! WAQI response types and parsing.
//!
//! Every WAQI endpoint wraps its payload in `{ "status": ..., "data": ... }`.
//! On failure `status` is `"error"` and `data` is a message string.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use ward_aqi_pollution_models::{Pollutant, RawReading};

use crate::WaqiError;

/// Station name fragment preferred when a search returns several stations.
const PREFERRED_STATION: &str = "Sector 8";

/// Live feed of one monitoring station.
#[derive(Debug, Clone, Deserialize)]
pub struct WaqiFeed {
    /// WAQI station index.
    pub idx: i64,
    /// Station location.
    pub city: WaqiCity,
    /// Individual pollutant readings keyed by lowercase pollutant name.
    #[serde(default)]
    pub iaqi: BTreeMap<String, IaqiValue>,
}

/// Station location as reported in a feed.
#[derive(Debug, Clone, Deserialize)]
pub struct WaqiCity {
    /// Station display name.
    pub name: String,
    /// `[latitude, longitude]`.
    #[serde(default)]
    pub geo: Vec<f64>,
}

/// One individual pollutant reading.
#[derive(Debug, Clone, Deserialize)]
pub struct IaqiValue {
    /// The reported value. Usually a number, occasionally a placeholder
    /// string.
    pub v: serde_json::Value,
}

impl WaqiFeed {
    /// Numeric value reported for `pollutant`, if any.
    #[must_use]
    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        self.iaqi
            .get(pollutant.key())
            .and_then(|entry| entry.v.as_f64())
    }

    /// Maps the feed onto a raw reading captured at `timestamp`.
    #[must_use]
    pub fn raw_reading(&self, timestamp: DateTime<Utc>) -> RawReading {
        RawReading {
            pm25: self.value(Pollutant::Pm25),
            pm10: self.value(Pollutant::Pm10),
            no2: self.value(Pollutant::No2),
            so2: self.value(Pollutant::So2),
            co: self.value(Pollutant::Co),
            o3: self.value(Pollutant::O3),
            timestamp: Some(timestamp),
        }
    }

    /// Station coordinates as `(latitude, longitude)`.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.city.geo.as_slice() {
            [lat, lon, ..] => Some((*lat, *lon)),
            _ => None,
        }
    }
}

/// A station returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WaqiStation {
    /// Station id, used as `@<uid>` in feed URLs.
    pub uid: i64,
    /// Station details.
    pub station: WaqiStationInfo,
}

/// Station details in a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct WaqiStationInfo {
    /// Station display name.
    pub name: String,
}

/// Unwraps the `data` field of an `ok` response.
fn ok_data(body: &serde_json::Value) -> Result<&serde_json::Value, WaqiError> {
    match body["status"].as_str() {
        Some("ok") => Ok(&body["data"]),
        _ => Err(WaqiError::Api {
            message: body["data"]
                .as_str()
                .map_or_else(|| body["data"].to_string(), String::from),
        }),
    }
}

/// Parses a `/feed/...` response.
///
/// # Errors
///
/// Returns [`WaqiError::Api`] for a non-`ok` status, or
/// [`WaqiError::Parse`] if the payload does not look like a feed.
pub fn parse_feed(body: &serde_json::Value) -> Result<WaqiFeed, WaqiError> {
    let data = ok_data(body)?;
    WaqiFeed::deserialize(data).map_err(|e| WaqiError::Parse {
        message: format!("Invalid WAQI feed: {e}"),
    })
}

/// Parses a `/search/` response.
///
/// # Errors
///
/// Returns [`WaqiError::Api`] for a non-`ok` status, or
/// [`WaqiError::Parse`] if `data` is not a list of stations.
pub fn parse_search(body: &serde_json::Value) -> Result<Vec<WaqiStation>, WaqiError> {
    let data = ok_data(body)?;
    Vec::<WaqiStation>::deserialize(data).map_err(|e| WaqiError::Parse {
        message: format!("Invalid WAQI search result: {e}"),
    })
}

/// Picks the station to read from a search result: the first one whose name
/// mentions the preferred sector, otherwise the first result.
#[must_use]
pub fn pick_station(stations: &[WaqiStation]) -> Option<&WaqiStation> {
    stations
        .iter()
        .find(|s| s.station.name.contains(PREFERRED_STATION))
        .or_else(|| stations.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_body() -> serde_json::Value {
        serde_json::json!({
            "status": "ok",
            "data": {
                "aqi": 152,
                "idx": 10124,
                "city": {
                    "geo": [28.5627, 77.1180],
                    "name": "Dwarka-Sector 8, Delhi, India"
                },
                "dominentpol": "pm25",
                "iaqi": {
                    "pm25": { "v": 152 },
                    "pm10": { "v": 98.5 },
                    "no2": { "v": 21.3 },
                    "o3": { "v": "-" },
                    "t": { "v": 24 }
                }
            }
        })
    }

    #[test]
    fn parses_feed() {
        let feed = parse_feed(&feed_body()).unwrap();
        assert_eq!(feed.idx, 10124);
        assert_eq!(feed.city.name, "Dwarka-Sector 8, Delhi, India");
        let (lat, lon) = feed.coordinates().unwrap();
        assert!((lat - 28.5627).abs() < 1e-4);
        assert!((lon - 77.1180).abs() < 1e-4);
    }

    #[test]
    fn maps_iaqi_onto_raw_reading() {
        let feed = parse_feed(&feed_body()).unwrap();
        let at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let raw = feed.raw_reading(at);
        assert_eq!(raw.pm25, Some(152.0));
        assert_eq!(raw.pm10, Some(98.5));
        assert_eq!(raw.no2, Some(21.3));
        assert_eq!(raw.so2, None);
        assert_eq!(raw.co, None);
        // Non-numeric placeholders count as missing.
        assert_eq!(raw.o3, None);
        assert_eq!(raw.timestamp, Some(at));
    }

    #[test]
    fn error_status_is_api_error() {
        let body = serde_json::json!({ "status": "error", "data": "Unknown station" });
        match parse_feed(&body) {
            Err(WaqiError::Api { message }) => assert_eq!(message, "Unknown station"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_feed_is_parse_error() {
        let body = serde_json::json!({ "status": "ok", "data": { "idx": "abc" } });
        assert!(matches!(parse_feed(&body), Err(WaqiError::Parse { .. })));
    }

    #[test]
    fn prefers_sector_8_station() {
        let body = serde_json::json!({
            "status": "ok",
            "data": [
                { "uid": 1, "station": { "name": "Dwarka Sector 23, Delhi" } },
                { "uid": 2, "station": { "name": "Dwarka-Sector 8, Delhi" } }
            ]
        });
        let stations = parse_search(&body).unwrap();
        assert_eq!(pick_station(&stations).unwrap().uid, 2);
        assert_eq!(pick_station(&stations[..1]).unwrap().uid, 1);
        assert!(pick_station(&[]).is_none());
    }
}
