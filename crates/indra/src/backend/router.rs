use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::BackendService;
use crate::assessment::{AssessmentInput, FeasibilityEstimate};
use crate::error::AppError;
use crate::records::Report;
use crate::remote::{AssessmentRequest, ChatbotRequest, KnowledgeQuery};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateView {
    pub report: Report,
    pub estimate: FeasibilityEstimate,
}

/// Router builder exposing the assessment, query, chat and estimate endpoints.
pub fn backend_router(service: Arc<BackendService>) -> Router {
    Router::new()
        .route("/assess", post(assess_handler))
        .route("/query", post(query_handler))
        .route("/chat", post(chat_handler))
        .route("/api/v1/estimate", post(estimate_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<BackendService>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response {
    match service.assess(&request) {
        Ok(response) => {
            info!(
                score = response.feasibility_score,
                feasible = response.ar_analysis.is_feasible,
                "assessment served"
            );
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(issues) => AppError::InvalidInput(issues).into_response(),
    }
}

pub(crate) async fn query_handler(
    State(service): State<Arc<BackendService>>,
    axum::Json(request): axum::Json<ChatbotRequest>,
) -> Response {
    match service.query(&request) {
        Some(answer) => (StatusCode::OK, axum::Json(answer)).into_response(),
        None => {
            let payload = json!({
                "error": "question must not be blank",
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn chat_handler(
    State(service): State<Arc<BackendService>>,
    axum::Json(request): axum::Json<KnowledgeQuery>,
) -> Response {
    (StatusCode::OK, axum::Json(service.chat(&request))).into_response()
}

pub(crate) async fn estimate_handler(
    State(service): State<Arc<BackendService>>,
    axum::Json(input): axum::Json<AssessmentInput>,
) -> Response {
    let view = service.estimate(&input);
    (StatusCode::OK, axum::Json(view)).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::SiteAnalyzer;
    use crate::assessment::{FeasibilityEstimator, FixedJitter, ReportFactory};
    use crate::clock::FixedClock;
    use crate::knowledge::KnowledgeBase;

    fn router() -> Router {
        let factory = ReportFactory::new(
            FeasibilityEstimator::default(),
            Box::new(FixedJitter(0)),
            Arc::new(FixedClock(1_720_000_000_000)),
        );
        backend_router(Arc::new(BackendService::new(
            SiteAnalyzer::new(),
            KnowledgeBase::default(),
            factory,
        )))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn assess_returns_snake_case_analysis() {
        let (status, body) = post_json(
            "/assess",
            json!({
                "name": "Arjun Sharma",
                "latitude": 28.6139,
                "longitude": 77.2090,
                "num_dwellers": 4,
                "roof_area_sqm": 150.0,
                "open_space_sqm": 50.0,
                "roof_type": "concrete"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location_info"]["soil_type"], "Loamy Sand");
        assert_eq!(body["rwh_analysis"]["recommended_tank_size_liters"], 3000);
        assert_eq!(body["ar_analysis"]["recommended_structure_type"], "Recharge Pit");
    }

    #[tokio::test]
    async fn assess_rejects_invalid_requests_with_issue_list() {
        let (status, body) = post_json(
            "/assess",
            json!({
                "name": "",
                "latitude": 95.0,
                "longitude": 77.2,
                "num_dwellers": 0,
                "roof_area_sqm": 0.0,
                "open_space_sqm": 5.0,
                "roof_type": "concrete"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["issues"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn query_answers_and_rejects_blank_questions() {
        let (status, body) = post_json("/query", json!({ "question": "What is feasibility?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"]["query"], "What is feasibility?");
        assert_eq!(body["answer"]["source"], "CGWB Guidelines");

        let (status, _) = post_json("/query", json!({ "question": "  " })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn chat_returns_flat_answer_and_source() {
        let (status, body) = post_json("/chat", json!({ "query": "What is a Recharge Pit?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "CGWB Manual, Chapter 4");
        assert!(body["answer"]
            .as_str()
            .is_some_and(|answer| answer.starts_with("A recharge pit")));

        let (status, body) = post_json("/chat", json!({ "query": "weather tomorrow" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "Internal");
    }

    #[tokio::test]
    async fn estimate_returns_report_and_breakdown() {
        let (status, body) = post_json(
            "/api/v1/estimate",
            json!({
                "name": "Green Villa",
                "location": "Pune",
                "dwellers": 4,
                "roofArea": 50.0,
                "openSpace": 20.0,
                "roofType": "Concrete"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["annualHarvestingPotentialLiters"], 28_900);
        assert_eq!(body["report"]["recommendedSolution"], "Recharge Pit");
        assert_eq!(body["report"]["timestamp"], 1_720_000_000_000_i64);
        assert_eq!(body["estimate"]["estimated_cost_inr"], 26_000);
    }
}
