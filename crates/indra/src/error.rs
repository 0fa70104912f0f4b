use crate::assessment::InputIssue;
use crate::config::ConfigError;
use crate::remote::RemoteError;
use crate::store::RepositoryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Remote(RemoteError),
    Repository(RepositoryError),
    InvalidInput(Vec<InputIssue>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Remote(err) => write!(f, "remote service error: {}", err),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
            AppError::InvalidInput(issues) => {
                write!(f, "invalid input: {} issue(s)", issues.len())
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Remote(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::InvalidInput(issues) => issues
                .first()
                .map(|issue| issue as &(dyn std::error::Error + 'static)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, body) = match &self {
            AppError::InvalidInput(issues) => {
                let issues: Vec<String> = issues.iter().map(ToString::to_string).collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "error": error, "issues": issues }),
                )
            }
            AppError::Repository(_) => (StatusCode::BAD_REQUEST, json!({ "error": error })),
            AppError::Remote(_) => (StatusCode::BAD_GATEWAY, json!({ "error": error })),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": error }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RemoteError> for AppError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<Vec<InputIssue>> for AppError {
    fn from(value: Vec<InputIssue>) -> Self {
        Self::InvalidInput(value)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn invalid_input_lists_every_issue() {
        let (status, body) = render(AppError::InvalidInput(vec![
            InputIssue::MissingName,
            InputIssue::NoDwellers,
        ]))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["issues"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn repository_errors_are_client_errors() {
        let (status, body) = render(AppError::Repository(RepositoryError::NotSignedIn)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("issues").is_none());
    }
}
