//! Site analysis behind the `assess` endpoint: regional hydrology lookup,
//! rooftop harvesting and artificial recharge sizing, and a cost-benefit
//! estimate.

pub mod economics;
pub mod hydrology;
pub mod location;

use tracing::debug;

pub use location::{HydroProfile, Permeability};

use crate::assessment::InputIssue;
use crate::remote::{AssessmentRequest, AssessmentResponse, LocationInfo, RwhAnalysis};

const RWH_NOTES: &str =
    "Based on average rainfall and standard water demand for non-potable uses.";

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SiteAnalyzer;

impl SiteAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResponse, Vec<InputIssue>> {
        let coordinates = request.validate()?;
        let profile = location::profile_for(coordinates);
        let rainfall = profile.avg_annual_rainfall_mm;
        let permeability = profile.permeability;

        let depth = hydrology::groundwater_depth(rainfall, permeability);
        let runoff =
            hydrology::annual_runoff_liters(&request.roof_type, request.roof_area_sqm, rainfall);
        let rwh_analysis = RwhAnalysis {
            potential_annual_runoff_liters: runoff,
            recommended_tank_size_liters: hydrology::tank_size_liters(
                runoff,
                request.num_dwellers,
            ),
            notes: RWH_NOTES.to_string(),
        };
        let ar_analysis = hydrology::recharge_analysis(request.open_space_sqm, permeability, depth);
        let feasibility_score =
            hydrology::feasibility_score(rainfall, request.open_space_sqm, permeability, depth);
        let cost_benefit_analysis = economics::cost_benefit(&rwh_analysis, &ar_analysis);

        debug!(
            region = profile.region,
            depth,
            score = feasibility_score,
            "site analyzed"
        );

        Ok(AssessmentResponse {
            location_info: LocationInfo {
                avg_annual_rainfall_mm: rainfall,
                principal_aquifer: profile.principal_aquifer.to_string(),
                soil_type: profile.soil_type.to_string(),
                soil_permeability: permeability.label().to_string(),
                predicted_groundwater_depth_mbgl: depth,
            },
            feasibility_score,
            feasibility_insights: hydrology::insights(rainfall, permeability, depth),
            rwh_analysis,
            ar_analysis,
            cost_benefit_analysis,
        })
    }
}
