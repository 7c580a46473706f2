//! Composite sustainability score.
//!
//! Weights are fixed: 60% of the eco-score, a flat
//! packaging bonus, and a carbon term that shrinks with emissions. The total
//! is not clamped to 100, so a high eco-score can push it above that.

const ECO_WEIGHT: f64 = 0.6;
const RECYCLABLE_POINTS: f64 = 20.0;
const NON_RECYCLABLE_POINTS: f64 = 10.0;
const CARBON_BASE: f64 = 20.0;
const CARBON_KG_PER_POINT: f64 = 10.0;
// Above this, f64 has no fractional digits left and `v * 100.0` can overflow.
const ROUNDING_LIMIT: f64 = 1e15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SustainabilityScore {
    pub eco_component: f64,
    pub packaging_component: f64,
    pub carbon_component: f64,
    pub total: f64,
}

pub fn score(eco_score_value: Option<f64>, recyclable: bool, carbon_emission_kg: f64) -> SustainabilityScore {
    let eco_component = (eco_score_value.unwrap_or(0.0) * ECO_WEIGHT).max(0.0);
    let packaging_component = if recyclable {
        RECYCLABLE_POINTS
    } else {
        NON_RECYCLABLE_POINTS
    };
    let carbon_component = (CARBON_BASE - carbon_emission_kg / CARBON_KG_PER_POINT).max(0.0);

    SustainabilityScore {
        eco_component,
        packaging_component,
        carbon_component,
        total: round2(eco_component + packaging_component + carbon_component),
    }
}

fn round2(v: f64) -> f64 {
    if !v.is_finite() || v.abs() >= ROUNDING_LIMIT {
        return v;
    }
    (v * 100.0).round() / 100.0
}
