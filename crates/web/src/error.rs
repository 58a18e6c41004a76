use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scoring::ScoringError;
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Scoring(ScoringError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scoring(e) => write!(f, "Scoring error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Scoring(e) => match e {
                ScoringError::InvalidScore(_) => StatusCode::BAD_REQUEST,
                ScoringError::NotFound => StatusCode::NOT_FOUND,
                ScoringError::UnknownJudge(_) | ScoringError::NotAssigned { .. } => {
                    StatusCode::FORBIDDEN
                }
                ScoringError::Locked(_) => StatusCode::LOCKED,
                ScoringError::ConfirmationRequired => StatusCode::CONFLICT,
                ScoringError::Sync(_) => StatusCode::SERVICE_UNAVAILABLE,
                ScoringError::Serialization(_)
                | ScoringError::InvalidConfig(_)
                | ScoringError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Scoring(ScoringError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Scoring(e @ ScoringError::Sync(_)) => {
                tracing::error!("Sync error: {:?}", e);
                json!({
                    "error": "Scores could not be saved or loaded, nothing was changed. Try again."
                })
            }
            Self::Scoring(e) if status_code == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Scoring error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Scoring(e) => {
                json!({
                    "error": e.to_string()
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<ScoringError> for WebError {
    fn from(error: ScoringError) -> Self {
        Self::Scoring(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}
