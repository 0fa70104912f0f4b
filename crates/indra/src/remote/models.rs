//! Request and response bodies shared by the HTTP clients and handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::{AssessmentInput, InputIssue};
use crate::records::Coordinates;

/// Body of `POST assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub num_dwellers: u32,
    pub roof_area_sqm: f64,
    pub open_space_sqm: f64,
    pub roof_type: String,
}

impl AssessmentRequest {
    pub fn from_input(input: &AssessmentInput, coordinates: Coordinates) -> Self {
        Self {
            name: input.name.clone(),
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            num_dwellers: input.dwellers,
            roof_area_sqm: input.roof_area,
            open_space_sqm: input.open_space,
            roof_type: input.roof_type.label().to_string(),
        }
    }

    pub fn validate(&self) -> Result<Coordinates, Vec<InputIssue>> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(InputIssue::MissingName);
        }
        let coordinates = match Coordinates::new(self.latitude, self.longitude) {
            Ok(coordinates) => Some(coordinates),
            Err(issue) => {
                issues.push(issue);
                None
            }
        };
        if self.num_dwellers == 0 {
            issues.push(InputIssue::NoDwellers);
        }
        if !self.roof_area_sqm.is_finite() || self.roof_area_sqm <= 0.0 {
            issues.push(InputIssue::RoofAreaNotPositive(self.roof_area_sqm));
        }
        if !self.open_space_sqm.is_finite() || self.open_space_sqm < 0.0 {
            issues.push(InputIssue::NegativeOpenSpace(self.open_space_sqm));
        }

        match coordinates {
            Some(coordinates) if issues.is_empty() => Ok(coordinates),
            _ => Err(issues),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationInfo {
    pub avg_annual_rainfall_mm: f64,
    pub principal_aquifer: String,
    pub soil_type: String,
    pub soil_permeability: String,
    pub predicted_groundwater_depth_mbgl: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RwhAnalysis {
    pub potential_annual_runoff_liters: f64,
    pub recommended_tank_size_liters: u64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArAnalysis {
    pub is_feasible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_structure_type: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub structure_dimensions: BTreeMap<String, String>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostBenefitAnalysis {
    pub estimated_initial_investment: f64,
    pub annual_operating_maintenance_cost: f64,
    pub annual_water_savings_liters: f64,
    pub annual_monetary_savings: f64,
    /// Absent when the site yields no savings.
    pub payback_period_years: Option<f64>,
}

/// Body returned by `POST assess`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentResponse {
    pub location_info: LocationInfo,
    pub feasibility_score: f64,
    pub feasibility_insights: String,
    pub rwh_analysis: RwhAnalysis,
    pub ar_analysis: ArAnalysis,
    pub cost_benefit_analysis: CostBenefitAnalysis,
}

/// Body of `POST query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotRequest {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotAnswer {
    pub query: String,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotResponse {
    pub answer: ChatbotAnswer,
}

/// Body of the knowledge-base `POST chat` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeQuery {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeReply {
    pub answer: String,
    pub source: String,
}
