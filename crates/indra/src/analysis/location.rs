use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permeability {
    Low,
    Moderate,
    High,
}

impl Permeability {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Ordinal used by the groundwater depth model.
    pub const fn index(self) -> f64 {
        match self {
            Self::Low => 0.0,
            Self::Moderate => 1.0,
            Self::High => 2.0,
        }
    }

    /// Hydrogeology factor of the feasibility score.
    pub const fn score_weight(self) -> f64 {
        match self {
            Self::Low => 0.1,
            Self::Moderate => 0.6,
            Self::High => 1.0,
        }
    }
}

impl fmt::Display for Permeability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rainfall and subsurface characteristics of a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydroProfile {
    pub region: &'static str,
    pub avg_annual_rainfall_mm: f64,
    pub principal_aquifer: &'static str,
    pub soil_type: &'static str,
    pub permeability: Permeability,
}

pub const DELHI: HydroProfile = HydroProfile {
    region: "Delhi",
    avg_annual_rainfall_mm: 714.0,
    principal_aquifer: "Alluvium",
    soil_type: "Loamy Sand",
    permeability: Permeability::Moderate,
};

pub const MUMBAI: HydroProfile = HydroProfile {
    region: "Mumbai",
    avg_annual_rainfall_mm: 2422.0,
    principal_aquifer: "Basalt",
    soil_type: "Clay Loam",
    permeability: Permeability::Low,
};

pub const JAIPUR: HydroProfile = HydroProfile {
    region: "Jaipur",
    avg_annual_rainfall_mm: 605.0,
    principal_aquifer: "Alluvium & Hard Rock",
    soil_type: "Sandy Loam",
    permeability: Permeability::High,
};

/// Picks a profile by latitude band; unknown bands fall back to Delhi.
pub fn profile_for(coordinates: Coordinates) -> &'static HydroProfile {
    let lat = coordinates.latitude();
    if lat > 28.0 && lat < 29.0 {
        &DELHI
    } else if lat > 18.0 && lat < 20.0 {
        &MUMBAI
    } else if lat > 26.0 && lat < 27.0 {
        &JAIPUR
    } else {
        &DELHI
    }
}
