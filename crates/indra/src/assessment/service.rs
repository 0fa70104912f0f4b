use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use super::estimator::{FeasibilityEstimate, FeasibilityEstimator};
use super::input::AssessmentInput;
use super::jitter::JitterSource;
use crate::clock::Clock;
use crate::records::{Report, ReportId};
use crate::store::{ReportRepository, RepositoryError};

pub const SAVED_NOTICE: &str = "Report generated and saved successfully!";
pub const UNSAVED_NOTICE: &str = "Report generated but failed to save. Please try again.";

/// Turns inputs into stamped reports using a shared jitter source and clock.
pub struct ReportFactory {
    estimator: FeasibilityEstimator,
    jitter: Mutex<Box<dyn JitterSource>>,
    clock: Arc<dyn Clock>,
}

impl ReportFactory {
    pub fn new(
        estimator: FeasibilityEstimator,
        jitter: Box<dyn JitterSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            estimator,
            jitter: Mutex::new(jitter),
            clock,
        }
    }

    pub fn estimator(&self) -> &FeasibilityEstimator {
        &self.estimator
    }

    pub fn estimate(&self, input: &AssessmentInput) -> FeasibilityEstimate {
        let mut jitter = self
            .jitter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.estimator.estimate(input, jitter.as_mut())
    }

    pub fn issue(&self, input: &AssessmentInput) -> (Report, FeasibilityEstimate) {
        let estimate = self.estimate(input);
        let report = Report::from_estimate(
            ReportId::generate(),
            input,
            &estimate,
            self.clock.now_millis(),
        );
        (report, estimate)
    }
}

/// Outcome of the assessment flow. The report exists even when saving failed.
#[derive(Debug)]
pub struct GeneratedReport {
    pub report: Report,
    pub estimate: FeasibilityEstimate,
    pub save_error: Option<RepositoryError>,
}

impl GeneratedReport {
    pub fn saved(&self) -> bool {
        self.save_error.is_none()
    }

    pub fn notice(&self) -> &'static str {
        if self.saved() {
            SAVED_NOTICE
        } else {
            UNSAVED_NOTICE
        }
    }
}

/// Estimate-then-persist flow behind the "Generate Report" action.
pub struct AssessmentService {
    factory: ReportFactory,
    reports: ReportRepository,
}

impl AssessmentService {
    pub fn new(factory: ReportFactory, reports: ReportRepository) -> Self {
        Self { factory, reports }
    }

    pub fn reports(&self) -> &ReportRepository {
        &self.reports
    }

    pub async fn generate(&self, input: &AssessmentInput) -> GeneratedReport {
        if let Err(issues) = input.validate() {
            let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
            warn!(?issues, "estimating degenerate assessment input");
        }

        let (report, estimate) = self.factory.issue(input);
        let save_error = self.reports.add(&report).await.err();

        match &save_error {
            None => info!(
                report_id = %report.id,
                score = report.feasibility_score,
                solution = %report.recommended_solution,
                "report generated and saved"
            ),
            Some(err) => warn!(report_id = %report.id, error = %err, "report generated but not saved"),
        }

        GeneratedReport {
            report,
            estimate,
            save_error,
        }
    }
}
