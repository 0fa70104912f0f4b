use serde::{Deserialize, Serialize};

use super::input::{AssessmentInput, RoofType};
use super::jitter::JitterSource;
use crate::config::EstimatorSettings;

const VOLUME_THRESHOLD_LITERS: u64 = 20_000;
const OPEN_SPACE_THRESHOLD_SQM: f64 = 10.0;
const ROOF_AREA_THRESHOLD_SQM: f64 = 50.0;
const RECHARGE_PIT_OPEN_SPACE_SQM: f64 = 15.0;

const VOLUME_POINTS: u8 = 40;
const OPEN_SPACE_POINTS: u8 = 30;
const ROOF_AREA_POINTS: u8 = 20;

const PIT_COST_PER_SQM_INR: f64 = 800.0;
const PIT_BASE_COST_INR: u64 = 10_000;
const TANK_LITERS_PER_RUPEE: u64 = 10;
const TANK_MINIMUM_COST_INR: u64 = 15_000;

/// Rainfall and runoff assumptions applied to every estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub avg_annual_rainfall_mm: f64,
    pub concrete_coefficient: f64,
    pub tiled_coefficient: f64,
    pub default_coefficient: f64,
    pub max_jitter: u8,
}

impl EstimatorConfig {
    pub fn runoff_coefficient(&self, roof_type: &RoofType) -> f64 {
        match roof_type {
            RoofType::Concrete => self.concrete_coefficient,
            RoofType::Tiled => self.tiled_coefficient,
            RoofType::Other(_) => self.default_coefficient,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            avg_annual_rainfall_mm: EstimatorSettings::DEFAULT_RAINFALL_MM,
            concrete_coefficient: 0.85,
            tiled_coefficient: 0.80,
            default_coefficient: 0.80,
            max_jitter: 10,
        }
    }
}

impl From<&EstimatorSettings> for EstimatorConfig {
    fn from(settings: &EstimatorSettings) -> Self {
        Self {
            avg_annual_rainfall_mm: settings.avg_annual_rainfall_mm,
            ..Self::default()
        }
    }
}

/// Harvesting structure recommended for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedSolution {
    RechargePit,
    StorageTank,
}

impl RecommendedSolution {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RechargePit => "Recharge Pit",
            Self::StorageTank => "Storage Tank",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    HarvestVolume,
    OpenSpace,
    RoofArea,
    Variability,
}

/// Discrete contribution to a feasibility score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityEstimate {
    pub harvest_volume_liters: u64,
    pub runoff_coefficient: f64,
    pub score: f32,
    pub components: Vec<ScoreComponent>,
    pub solution: RecommendedSolution,
    pub estimated_cost_inr: u64,
}

impl FeasibilityEstimate {
    /// Score before the variability term is added.
    pub fn base_score(&self) -> u32 {
        self.components
            .iter()
            .filter(|component| component.factor != ScoreFactor::Variability)
            .map(|component| u32::from(component.points))
            .sum()
    }

    pub fn jitter(&self) -> u8 {
        self.components
            .iter()
            .find(|component| component.factor == ScoreFactor::Variability)
            .map(|component| component.points)
            .unwrap_or(0)
    }
}

/// Stateless evaluator turning property attributes into a feasibility estimate.
#[derive(Debug, Clone, Default)]
pub struct FeasibilityEstimator {
    config: EstimatorConfig,
}

impl FeasibilityEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Annual roof runoff in litres for the given input.
    pub fn harvest_volume_liters(&self, input: &AssessmentInput) -> u64 {
        let rainfall_meters = self.config.avg_annual_rainfall_mm.max(0.0) / 1000.0;
        let coefficient = self.config.runoff_coefficient(&input.roof_type);
        let cubic_meters = input.effective_roof_area() * rainfall_meters * coefficient;
        (cubic_meters * 1000.0).round() as u64
    }

    pub fn estimate(
        &self,
        input: &AssessmentInput,
        jitter: &mut dyn JitterSource,
    ) -> FeasibilityEstimate {
        let roof_area = input.effective_roof_area();
        let open_space = input.effective_open_space();
        let harvest_volume_liters = self.harvest_volume_liters(input);

        let mut components = Vec::with_capacity(4);
        if harvest_volume_liters > VOLUME_THRESHOLD_LITERS {
            components.push(ScoreComponent {
                factor: ScoreFactor::HarvestVolume,
                points: VOLUME_POINTS,
                notes: format!("{harvest_volume_liters} L/year exceeds {VOLUME_THRESHOLD_LITERS} L"),
            });
        }
        if open_space > OPEN_SPACE_THRESHOLD_SQM {
            components.push(ScoreComponent {
                factor: ScoreFactor::OpenSpace,
                points: OPEN_SPACE_POINTS,
                notes: format!("{open_space} sq. m open space leaves room for a pit"),
            });
        }
        if roof_area > ROOF_AREA_THRESHOLD_SQM {
            components.push(ScoreComponent {
                factor: ScoreFactor::RoofArea,
                points: ROOF_AREA_POINTS,
                notes: format!("{roof_area} sq. m catchment"),
            });
        }

        let variability = jitter.sample(self.config.max_jitter).min(self.config.max_jitter);
        components.push(ScoreComponent {
            factor: ScoreFactor::Variability,
            points: variability,
            notes: "variability term".to_string(),
        });

        let raw: u32 = components
            .iter()
            .map(|component| u32::from(component.points))
            .sum();
        let score = raw.min(100) as f32;

        let solution = if open_space > RECHARGE_PIT_OPEN_SPACE_SQM {
            RecommendedSolution::RechargePit
        } else {
            RecommendedSolution::StorageTank
        };

        let estimated_cost_inr = match solution {
            RecommendedSolution::RechargePit => {
                (open_space * PIT_COST_PER_SQM_INR).round() as u64 + PIT_BASE_COST_INR
            }
            RecommendedSolution::StorageTank => {
                (harvest_volume_liters / TANK_LITERS_PER_RUPEE).max(TANK_MINIMUM_COST_INR)
            }
        };

        FeasibilityEstimate {
            harvest_volume_liters,
            runoff_coefficient: self.config.runoff_coefficient(&input.roof_type),
            score,
            components,
            solution,
            estimated_cost_inr,
        }
    }
}
