//! Assembles the dashboard payload from a WAQI feed and its pipeline result.

use ward_aqi_pollution::severity::pollutant_status;
use ward_aqi_pollution_models::{Pollutant, ProcessedReading};
use ward_aqi_server_models::{
    ApiActionItem, ApiAqiResponse, ApiCompositionEntry, ApiCoordinates, ApiDailyActions,
    ApiPollutant,
};
use ward_aqi_waqi::WaqiFeed;

/// AQI above which citizens are told to stay indoors.
const HAZARDOUS_ADVICE_AQI: u32 = 300;

const LIVE_LABEL: &str = "Live from Sensor";

const fn display_name(pollutant: Pollutant) -> &'static str {
    match pollutant {
        Pollutant::Pm25 => "PM2.5",
        Pollutant::Pm10 => "PM10",
        Pollutant::No2 => "NO₂",
        Pollutant::So2 => "SO₂",
        Pollutant::Co => "CO",
        Pollutant::O3 => "O₃",
    }
}

const fn description(pollutant: Pollutant) -> &'static str {
    match pollutant {
        Pollutant::Pm25 => "Fine particles that can penetrate deep into lungs.",
        Pollutant::Pm10 => "Coarse particles from dust and construction.",
        Pollutant::No2 => "Gas from burning fuel, mainly from cars.",
        Pollutant::So2 => "Gas from industrial burning of coal/oil.",
        Pollutant::Co => "Gas from incomplete combustion.",
        Pollutant::O3 => "Gas formed by sunlight acting on other pollutants.",
    }
}

/// Citizen-facing one-liner for an AQI value.
#[must_use]
pub const fn contextual_advice(aqi: u32) -> &'static str {
    if aqi > HAZARDOUS_ADVICE_AQI {
        "Air is hazardous. Stay indoors."
    } else {
        "Air quality is acceptable."
    }
}

/// Suggested actions shown alongside live readings.
fn daily_actions() -> ApiDailyActions {
    ApiDailyActions {
        dos: vec![ApiActionItem::new("Wear a mask", "High Impact")],
        avoids: vec![ApiActionItem::new("Outdoor exercise", "High Impact")],
    }
}

/// Builds the live dashboard response.
///
/// Cards and composition cover the indexed pollutants only, using the
/// cleaned concentrations so they agree with the AQI.
#[must_use]
pub fn build_response(feed: &WaqiFeed, processed: &ProcessedReading) -> ApiAqiResponse {
    let pollutants: Vec<ApiPollutant> = Pollutant::indexed()
        .iter()
        .map(|&p| {
            let value = processed.cleaned.value(p);
            ApiPollutant {
                name: display_name(p).to_string(),
                value,
                unit: p.unit().to_string(),
                status: pollutant_status(p, value),
                description: description(p).to_string(),
            }
        })
        .collect();

    let pollutant_composition = pollutants
        .iter()
        .map(|card| ApiCompositionEntry {
            name: card.name.clone(),
            value: card.value,
            color: card.status.color().to_string(),
        })
        .collect();

    ApiAqiResponse {
        id: format!("waqi-{}", feed.idx),
        name: feed.city.name.clone(),
        aqi: processed.aqi.aqi,
        category: processed.aqi.category,
        dominant_pollutant: processed.aqi.dominant_pollutant,
        last_updated: LIVE_LABEL.to_string(),
        dominant_source: processed.inference.dominant_source,
        source_confidence: processed.inference.confidence,
        source_reasoning: processed.inference.reasoning.clone(),
        data_quality_score: processed.cleaned.data_quality_score,
        flags: processed.cleaned.flags.clone(),
        pollutants,
        source_contribution: processed.contribution.clone(),
        alerts: Vec::new(),
        pollutant_composition,
        daily_actions: daily_actions(),
        contextual_advice: contextual_advice(processed.aqi.aqi).to_string(),
        coordinates: feed
            .coordinates()
            .map(|(lat, lon)| ApiCoordinates { lat, lon }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use serde_json::json;
    use ward_aqi_pollution::{process_pollution_data, standards::Standards};
    use ward_aqi_pollution_models::{
        AqiCategory, DominantSource, HourOfDay, PollutantStatus, QualityScore,
    };

    use super::*;

    fn feed() -> WaqiFeed {
        serde_json::from_value(json!({
            "idx": 10124,
            "city": { "name": "Dwarka Sector 8, Delhi", "geo": [28.5710, 77.0719] },
            "iaqi": {
                "pm25": { "v": 45 },
                "pm10": { "v": 80 },
                "no2": { "v": 20 },
                "so2": { "v": 10 },
                "co": { "v": 1 },
                "o3": { "v": 30 }
            }
        }))
        .unwrap()
    }

    fn response(feed: &WaqiFeed, hour: u8) -> ApiAqiResponse {
        let timestamp = Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap();
        let processed = process_pollution_data(
            &feed.raw_reading(timestamp),
            &Standards::cpcb(),
            HourOfDay::from_value(hour).unwrap(),
        );
        build_response(feed, &processed)
    }

    #[test]
    fn builds_live_response() {
        let response = response(&feed(), 12);

        assert_eq!(response.id, "waqi-10124");
        assert_eq!(response.name, "Dwarka Sector 8, Delhi");
        assert_eq!(response.aqi, 80);
        assert_eq!(response.category, AqiCategory::Moderate);
        assert_eq!(response.dominant_pollutant, Pollutant::Pm10);
        assert_eq!(response.last_updated, "Live from Sensor");
        assert_eq!(response.dominant_source, DominantSource::BackgroundRegional);
        assert_eq!(response.data_quality_score, QualityScore::High);
        assert_eq!(response.contextual_advice, "Air quality is acceptable.");
        assert_eq!(
            response.coordinates,
            Some(ApiCoordinates {
                lat: 28.5710,
                lon: 77.0719
            })
        );
    }

    #[test]
    fn cards_cover_indexed_pollutants() {
        let response = response(&feed(), 12);
        let names: Vec<&str> = response.pollutants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PM2.5", "PM10", "NO₂", "SO₂"]);

        let pm25 = &response.pollutants[0];
        assert_eq!(pm25.unit, "µg/m³");
        assert_eq!(pm25.status, PollutantStatus::Moderate);
        assert_eq!(
            pm25.description,
            "Fine particles that can penetrate deep into lungs."
        );

        assert_eq!(response.pollutant_composition.len(), 4);
        assert_eq!(response.pollutant_composition[0].color, "#EAB308");
    }

    #[test]
    fn carries_static_alerts_and_actions() {
        let json = serde_json::to_value(response(&feed(), 12)).unwrap();
        assert_eq!(json["alerts"], json!([]));
        assert_eq!(
            json["dailyActions"],
            json!({
                "dos": [{ "text": "Wear a mask", "impact": "High Impact" }],
                "avoids": [{ "text": "Outdoor exercise", "impact": "High Impact" }]
            })
        );
    }

    #[test]
    fn severe_reading_gets_hazard_advice_and_colors() {
        let mut feed = feed();
        feed.iaqi.insert(
            "pm25".to_string(),
            serde_json::from_value(json!({ "v": 250 })).unwrap(),
        );
        let response = response(&feed, 12);

        // 250 / 60 × 100 = 416.67
        assert_eq!(response.aqi, 417);
        assert_eq!(response.category, AqiCategory::Hazardous);
        assert_eq!(response.contextual_advice, "Air is hazardous. Stay indoors.");
        assert_eq!(response.pollutants[0].status, PollutantStatus::Severe);
        assert_eq!(response.pollutant_composition[0].color, "#EF4444");
    }

    #[test]
    fn advice_threshold_is_exclusive() {
        assert_eq!(contextual_advice(300), "Air quality is acceptable.");
        assert_eq!(contextual_advice(301), "Air is hazardous. Stay indoors.");
    }

    #[test]
    fn missing_geo_has_no_coordinates() {
        let mut feed = feed();
        feed.city.geo.clear();
        assert!(response(&feed, 12).coordinates.is_none());
    }
}
