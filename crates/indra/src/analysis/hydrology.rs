use std::collections::BTreeMap;

use super::location::Permeability;
use super::round_to;
use crate::remote::ArAnalysis;

const DAILY_DEMAND_PER_PERSON_L: f64 = 50.0;
const STORAGE_DAYS: f64 = 15.0;
const SUPPLY_SHARE: f64 = 0.20;
const TANK_INCREMENT_L: f64 = 500.0;

const SHALLOW_DEPTH_M: f64 = 5.0;
const IDEAL_DEPTH_M: f64 = 10.0;
const MIN_RECHARGE_SPACE_SQM: f64 = 10.0;
const TRENCH_SPACE_SQM: f64 = 20.0;

pub const RECHARGE_PIT: &str = "Recharge Pit";
pub const RECHARGE_TRENCH: &str = "Recharge Trench";

/// Predicted depth to the water table in metres below ground level.
pub fn groundwater_depth(rainfall_mm: f64, permeability: Permeability) -> f64 {
    let depth = 10.0 + (1500.0 - rainfall_mm) * 0.02 - 2.0 * permeability.index();
    round_to(depth.max(0.0), 2)
}

/// Keyed on the lower-cased roof label as sent over the wire. Only the exact
/// keys "concrete" and "tiles" have their own coefficient, so the app's
/// "Tiled" label falls through to the default.
pub fn runoff_coefficient(roof_label: &str) -> f64 {
    match roof_label.trim().to_lowercase().as_str() {
        "concrete" => 0.8,
        "tiles" => 0.9,
        _ => 0.75,
    }
}

/// Potential annual rooftop runoff in litres.
pub fn annual_runoff_liters(roof_label: &str, roof_area_sqm: f64, rainfall_mm: f64) -> f64 {
    let runoff = runoff_coefficient(roof_label) * (rainfall_mm / 1000.0) * roof_area_sqm * 1000.0;
    round_to(runoff, 2)
}

/// Smaller of fifteen days of non-potable demand and a fifth of the annual
/// runoff, rounded up to the next 500 L.
pub fn tank_size_liters(annual_runoff_liters: f64, dwellers: u32) -> u64 {
    let demand = f64::from(dwellers) * DAILY_DEMAND_PER_PERSON_L * STORAGE_DAYS;
    let supply = annual_runoff_liters * SUPPLY_SHARE;
    let size = demand.min(supply).max(0.0);
    ((size / TANK_INCREMENT_L).ceil() * TANK_INCREMENT_L) as u64
}

pub fn recharge_analysis(
    open_space_sqm: f64,
    permeability: Permeability,
    depth_mbgl: f64,
) -> ArAnalysis {
    let infeasible = |notes: &str| ArAnalysis {
        is_feasible: false,
        notes: notes.to_string(),
        ..ArAnalysis::default()
    };

    if depth_mbgl < SHALLOW_DEPTH_M {
        return infeasible(
            "Groundwater level is too shallow (< 5m), posing a risk of waterlogging.",
        );
    }
    if permeability == Permeability::Low {
        return infeasible("Soil permeability is too low for effective recharge.");
    }
    if open_space_sqm < MIN_RECHARGE_SPACE_SQM {
        return infeasible(
            "Insufficient open space (< 10 sqm) available for a standard recharge structure.",
        );
    }

    let (structure, dimensions): (&str, &[(&str, &str)]) =
        if open_space_sqm > TRENCH_SPACE_SQM && permeability == Permeability::High {
            (
                RECHARGE_TRENCH,
                &[("Length", "5m"), ("Width", "2m"), ("Depth", "1.5m")],
            )
        } else {
            (RECHARGE_PIT, &[("Diameter", "2m"), ("Depth", "3m")])
        };

    ArAnalysis {
        is_feasible: true,
        recommended_structure_type: Some(structure.to_string()),
        structure_dimensions: dimensions
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<BTreeMap<_, _>>(),
        notes: "Location is suitable for artificial recharge.".to_string(),
    }
}

/// Weighted 0-100 rating; halved over shallow groundwater.
pub fn feasibility_score(
    rainfall_mm: f64,
    open_space_sqm: f64,
    permeability: Permeability,
    depth_mbgl: f64,
) -> f64 {
    let rainfall = (rainfall_mm / 1500.0).min(1.0);
    let space = (open_space_sqm / 100.0).min(1.0);
    let mut score = (0.4 * rainfall + 0.2 * space + 0.4 * permeability.score_weight()) * 100.0;
    if depth_mbgl < SHALLOW_DEPTH_M {
        score *= 0.5;
    }
    round_to(score.clamp(0.0, 100.0), 2)
}

pub fn insights(rainfall_mm: f64, permeability: Permeability, depth_mbgl: f64) -> String {
    let rainfall = if rainfall_mm > 1000.0 { "high" } else { "moderate" };
    let soil = if permeability == Permeability::Low {
        "poor"
    } else {
        "good"
    };
    let depth = if depth_mbgl > IDEAL_DEPTH_M {
        "ideal"
    } else {
        "adequate"
    };
    format!(
        "Score is primarily driven by {rainfall} rainfall and {soil} soil permeability. \
         The groundwater level at {depth_mbgl}m is {depth} for recharge."
    )
}
