//! Feasibility assessment: form input, the estimator, and the report flow.

pub mod estimator;
pub mod input;
pub mod jitter;
pub mod service;

pub use estimator::{
    EstimatorConfig, FeasibilityEstimate, FeasibilityEstimator, RecommendedSolution,
    ScoreComponent, ScoreFactor,
};
pub use input::{AssessmentForm, AssessmentInput, InputIssue, RoofType};
pub use jitter::{FixedJitter, JitterSource, NoJitter, SeededJitter, ThreadJitter};
pub use service::{AssessmentService, GeneratedReport, ReportFactory};
