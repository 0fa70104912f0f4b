use std::fmt;

use serde::{Deserialize, Serialize};

/// Roof surface material; drives the runoff coefficient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoofType {
    #[default]
    Concrete,
    Tiled,
    Other(String),
}

impl RoofType {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "concrete" => Self::Concrete,
            "tiled" | "tiles" | "tile" => Self::Tiled,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Concrete => "Concrete",
            Self::Tiled => "Tiled",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for RoofType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for RoofType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<RoofType> for String {
    fn from(value: RoofType) -> Self {
        match value {
            RoofType::Other(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for RoofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Property attributes entered for a single assessment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInput {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dwellers: u32,
    #[serde(default)]
    pub roof_area: f64,
    #[serde(default)]
    pub open_space: f64,
    #[serde(default)]
    pub roof_type: RoofType,
}

impl AssessmentInput {
    /// Reports every field that would make the estimate degenerate.
    pub fn validate(&self) -> Result<(), Vec<InputIssue>> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(InputIssue::MissingName);
        }
        if !self.roof_area.is_finite() || self.roof_area <= 0.0 {
            issues.push(InputIssue::RoofAreaNotPositive(self.roof_area));
        }
        if !self.open_space.is_finite() || self.open_space < 0.0 {
            issues.push(InputIssue::NegativeOpenSpace(self.open_space));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub(crate) fn effective_roof_area(&self) -> f64 {
        non_negative(self.roof_area)
    }

    pub(crate) fn effective_open_space(&self) -> f64 {
        non_negative(self.open_space)
    }
}

/// Raw text captured by the assessment form before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentForm {
    pub name: String,
    pub location: String,
    pub dwellers: String,
    pub roof_area: String,
    pub open_space: String,
    pub roof_type: String,
}

impl AssessmentForm {
    /// Unparsable numbers collapse to zero so estimation never fails.
    pub fn coerce(&self) -> AssessmentInput {
        AssessmentInput {
            location: self.location.trim().to_string(),
            name: self.name.trim().to_string(),
            dwellers: self.dwellers.trim().parse::<u32>().unwrap_or(0),
            roof_area: parse_measure(&self.roof_area),
            open_space: parse_measure(&self.open_space),
            roof_type: RoofType::parse(&self.roof_type),
        }
    }
}

fn parse_measure(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(non_negative).unwrap_or(0.0)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputIssue {
    #[error("property name is required")]
    MissingName,
    #[error("number of dwellers must be at least one")]
    NoDwellers,
    #[error("roof area must be greater than zero (got {0})")]
    RoofAreaNotPositive(f64),
    #[error("open space cannot be negative (got {0})")]
    NegativeOpenSpace(f64),
    #[error("latitude must be within [-90, 90] (got {0})")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be within [-180, 180] (got {0})")]
    LongitudeOutOfRange(f64),
}
