use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::report::Report;
use crate::assessment::InputIssue;
use crate::store::Document;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Residential,
    Commercial,
    Industrial,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::Industrial => "Industrial",
        }
    }
}

/// Validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InputIssue> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InputIssue::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InputIssue::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Where and what kind of property a report is being promoted into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyPlacement {
    /// Falls back to the report's location when absent.
    pub address: Option<String>,
    pub coordinates: Coordinates,
    pub property_type: PropertyType,
}

/// A tracked property carrying its latest assessment outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub feasibility_score: f32,
    pub annual_harvesting_potential_liters: u64,
    pub recommended_solution: String,
    pub estimated_cost_inr: u64,
    pub last_assessment_date: i64,
    pub property_type: PropertyType,
    pub roof_area: f64,
    pub open_space: f64,
    pub dwellers: u32,
}

impl Property {
    pub fn from_report(report: &Report, placement: PropertyPlacement) -> Self {
        let PropertyPlacement {
            address,
            coordinates,
            property_type,
        } = placement;

        let address = address
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| report.location.clone());

        let mut property = Self {
            id: PropertyId::generate(),
            name: report.name.clone(),
            address,
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            property_type,
            ..Self::default()
        };
        property.apply_report(report);
        property
    }

    /// Refreshes the assessment-derived fields from a newer report.
    pub fn apply_report(&mut self, report: &Report) {
        self.feasibility_score = report.feasibility_score;
        self.annual_harvesting_potential_liters = report.annual_harvesting_potential_liters;
        self.recommended_solution = report.recommended_solution.clone();
        self.estimated_cost_inr = report.estimated_cost_inr;
        self.last_assessment_date = report.timestamp;
        self.roof_area = report.roof_area;
        self.open_space = report.open_space;
        self.dwellers = report.dwellers;
    }

    pub fn coordinates(&self) -> Result<Coordinates, InputIssue> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl Document for Property {
    const COLLECTION: &'static str = "properties";

    fn document_id(&self) -> &str {
        self.id.as_str()
    }
}
