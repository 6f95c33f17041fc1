use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect as SeeOther, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domains::wizard::actions::StepError;
use crate::domains::wizard::{FieldErrors, WizardError};

/// Route-boundary error: redirects become `303 See Other`, form problems `422`,
/// everything else is logged and answered generically.
#[derive(Debug)]
pub enum ApiError {
    Wizard(WizardError),
    Invalid(FieldErrors),
    NotFound,
}

impl From<WizardError> for ApiError {
    fn from(error: WizardError) -> Self {
        ApiError::Wizard(error)
    }
}

impl From<StepError> for ApiError {
    fn from(error: StepError) -> Self {
        match error {
            StepError::Invalid(errors) => ApiError::Invalid(errors),
            StepError::Wizard(error) => ApiError::Wizard(error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Wizard(WizardError::Redirect(redirect)) => {
                SeeOther::to(&redirect.location).into_response()
            }
            ApiError::Wizard(WizardError::InvalidId(id)) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid application id: {}", id) })),
            )
                .into_response(),
            ApiError::Wizard(failure) => {
                error!(error = %failure, "wizard request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal error" })),
                )
                    .into_response()
            }
            ApiError::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not found" })),
            )
                .into_response(),
        }
    }
}
