use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::{AssessmentInput, FeasibilityEstimate, RoofType};
use crate::store::Document;

/// Identifier wrapper for persisted reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl ReportId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a feasibility assessment as stored for the owning user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub id: ReportId,
    pub name: String,
    pub location: String,
    pub dwellers: u32,
    pub roof_area: f64,
    pub open_space: f64,
    pub feasibility_score: f32,
    pub annual_harvesting_potential_liters: u64,
    pub recommended_solution: String,
    pub estimated_cost_inr: u64,
    pub timestamp: i64,
}

impl Report {
    /// Measurements are stored as the estimator used them, so a non-finite
    /// or negative entry is saved as zero.
    pub fn from_estimate(
        id: ReportId,
        input: &AssessmentInput,
        estimate: &FeasibilityEstimate,
        timestamp: i64,
    ) -> Self {
        Self {
            id,
            name: input.name.clone(),
            location: input.location.clone(),
            dwellers: input.dwellers,
            roof_area: input.effective_roof_area(),
            open_space: input.effective_open_space(),
            feasibility_score: estimate.score.clamp(0.0, 100.0),
            annual_harvesting_potential_liters: estimate.harvest_volume_liters,
            recommended_solution: estimate.solution.label().to_string(),
            estimated_cost_inr: estimate.estimated_cost_inr,
            timestamp,
        }
    }

    /// Reports are immutable; an edit produces a fresh report under a new id.
    /// Blank name or location in the edited input keep this report's values.
    pub fn revise(
        &self,
        input: &AssessmentInput,
        estimate: &FeasibilityEstimate,
        timestamp: i64,
    ) -> Self {
        let mut revised = Self::from_estimate(ReportId::generate(), input, estimate, timestamp);
        if revised.name.trim().is_empty() {
            revised.name = self.name.clone();
        }
        if revised.location.trim().is_empty() {
            revised.location = self.location.clone();
        }
        revised
    }

    /// Input that reproduces this report's property attributes.
    pub fn to_input(&self, roof_type: RoofType) -> AssessmentInput {
        AssessmentInput {
            location: self.location.clone(),
            name: self.name.clone(),
            dwellers: self.dwellers,
            roof_area: self.roof_area,
            open_space: self.open_space,
            roof_type,
        }
    }
}

impl Document for Report {
    const COLLECTION: &'static str = "reports";

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}
