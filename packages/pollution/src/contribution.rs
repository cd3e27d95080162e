//! Modeled source contribution breakdown.
//!
//! Starts from a fixed baseline split across the five
//! [`SourceCategory`] values, shifts weight toward the inferred dominant
//! source, and renormalizes to whole percentages.

use ward_aqi_pollution_models::{
    DominantSource, SourceCategory, SourceContribution, SourceInference,
};

/// Baseline weights in [`SourceCategory::all`] order.
const BASELINE: [i32; 5] = [30, 25, 15, 15, 15];

/// Weight shifts applied on top of [`BASELINE`] for each dominant source.
const fn adjustment(source: DominantSource) -> [i32; 5] {
    match source {
        DominantSource::Vehicular => [25, -10, 0, -10, -5],
        DominantSource::DustConstruction => [-10, 30, 0, -10, -10],
        DominantSource::Industrial => [-10, -10, 30, 0, -10],
        DominantSource::WasteBiomass => [-10, -10, 0, 25, -5],
        DominantSource::MixedUrban | DominantSource::BackgroundRegional => [0; 5],
    }
}

/// Estimates the percentage contribution of each source category.
///
/// Each category is rounded independently, so the percentages may not add
/// up to exactly 100.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_contribution(inference: &SourceInference) -> Vec<SourceContribution> {
    let shift = adjustment(inference.dominant_source);

    let mut weights = BASELINE;
    for (weight, delta) in weights.iter_mut().zip(shift) {
        *weight += delta;
    }

    let total: i32 = weights.iter().sum();

    SourceCategory::all()
        .iter()
        .zip(weights)
        .map(|(category, weight)| SourceContribution {
            source: *category,
            percentage: (f64::from(weight) / f64::from(total) * 100.0).round() as u32,
            color: category.color().to_string(),
        })
        .collect()
}
