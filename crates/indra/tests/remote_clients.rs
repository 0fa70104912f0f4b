//! HTTP client scenarios against a locally bound backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

use indra::analysis::SiteAnalyzer;
use indra::assessment::{FeasibilityEstimator, NoJitter, ReportFactory};
use indra::backend::{backend_router, BackendService};
use indra::chat::{ChatSession, Sender};
use indra::clock::FixedClock;
use indra::knowledge::KnowledgeBase;
use indra::remote::{
    AssessmentApi, AssessmentRequest, ChatbotRepository, HttpAssessmentApi, HttpSettings,
    NetworkChatbotRepository, RemoteError,
};

fn settings() -> HttpSettings {
    HttpSettings {
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    }
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    format!("http://{}:{}", addr.ip(), addr.port())
}

async fn backend() -> String {
    let factory = ReportFactory::new(
        FeasibilityEstimator::default(),
        Box::new(NoJitter),
        Arc::new(FixedClock(0)),
    );
    serve(backend_router(Arc::new(BackendService::new(
        SiteAnalyzer::new(),
        KnowledgeBase::default(),
        factory,
    ))))
    .await
}

fn delhi_request() -> AssessmentRequest {
    AssessmentRequest {
        name: "Arjun Sharma".to_string(),
        latitude: 28.6139,
        longitude: 77.2090,
        num_dwellers: 4,
        roof_area_sqm: 150.0,
        open_space_sqm: 50.0,
        roof_type: "concrete".to_string(),
    }
}

#[tokio::test]
async fn assessment_client_decodes_analysis() {
    let base = backend().await;
    let api = HttpAssessmentApi::with_settings(&base, settings()).expect("client");

    let response = api.assess(&delhi_request()).await.expect("assessment");

    assert_eq!(response.location_info.soil_type, "Loamy Sand");
    assert_eq!(response.rwh_analysis.recommended_tank_size_liters, 3_000);
    assert!(response.ar_analysis.is_feasible);
}

#[tokio::test]
async fn assessment_client_surfaces_http_status() {
    let base = backend().await;
    let api = HttpAssessmentApi::with_settings(&base, settings()).expect("client");
    let mut request = delhi_request();
    request.num_dwellers = 0;

    let err = api.assess(&request).await.expect_err("rejected");

    match err {
        RemoteError::Status { code, .. } => assert_eq!(code, 422),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn chatbot_client_returns_answer_text() {
    let base = backend().await;
    let chatbot = NetworkChatbotRepository::with_settings(&base, settings()).expect("client");

    let answer = chatbot.ask("What is a recharge pit?").await.expect("answer");

    assert!(answer.starts_with("A recharge pit"));
}

#[tokio::test]
async fn chat_session_apologizes_when_backend_is_down() {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let chatbot =
        NetworkChatbotRepository::with_settings(&format!("http://{addr}"), settings())
            .expect("client");
    let err = chatbot.ask("anyone there?").await.expect_err("connection refused");
    assert!(err.is_transport());

    let mut session = ChatSession::new(Arc::new(chatbot), Arc::new(FixedClock(0)));
    let reply = session.send("anyone there?").await.expect("reply posted");
    assert_eq!(reply.sender, Sender::Bot);
    assert!(reply.text.starts_with("Sorry"));
}

#[tokio::test]
async fn empty_and_malformed_bodies_are_distinguished() {
    let app = Router::new()
        .route("/empty/query", post(|| async { (StatusCode::OK, "") }))
        .route("/null/query", post(|| async { (StatusCode::OK, "null") }))
        .route(
            "/garbled/query",
            post(|| async { (StatusCode::OK, r#"{"answer":"#) }),
        );
    let base = serve(app).await;

    for prefix in ["empty", "null"] {
        let chatbot =
            NetworkChatbotRepository::with_settings(&format!("{base}/{prefix}"), settings())
                .expect("client");
        assert!(matches!(
            chatbot.ask("hello").await,
            Err(RemoteError::EmptyBody)
        ));
    }

    let chatbot = NetworkChatbotRepository::with_settings(&format!("{base}/garbled"), settings())
        .expect("client");
    assert!(matches!(
        chatbot.ask("hello").await,
        Err(RemoteError::Decode(_))
    ));
}
