//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::warn;

use crate::domains::wizard::{ApplicantStep, ChildStep, FlowKind};
use crate::kernel::ServerDeps;
use crate::server::routes::{
    applicant_information_handler, applicant_step_handler, benefits_question_handler,
    child_benefits_question_handler, child_dental_benefits_handler,
    child_dental_insurance_handler, child_step_handler, clear_state_handler,
    confirmation_handler, dental_benefits_handler, dental_insurance_handler, health_handler,
    load_state_handler, marital_status_handler, review_handler, save_state_handler,
    start_handler, submit_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Routes of one flow, mounted under `/{lang}/{flow root}`
fn flow_router(flow: FlowKind) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route(
            "/:id/state",
            get(load_state_handler)
                .patch(save_state_handler)
                .delete(clear_state_handler),
        )
        .route(
            "/:id/:variant/applicant-information",
            post(applicant_information_handler),
        )
        .route(
            "/:id/:variant/marital-status",
            get(applicant_step_handler)
                .post(marital_status_handler)
                .layer(Extension(ApplicantStep::MaritalStatus)),
        )
        .route(
            "/:id/:variant/dental-insurance",
            get(applicant_step_handler)
                .post(dental_insurance_handler)
                .layer(Extension(ApplicantStep::DentalInsurance)),
        )
        .route(
            "/:id/:variant/confirm-federal-provincial-territorial-benefits",
            get(applicant_step_handler)
                .post(benefits_question_handler)
                .layer(Extension(ApplicantStep::BenefitsQuestion)),
        )
        .route(
            "/:id/:variant/update-federal-provincial-territorial-benefits",
            get(applicant_step_handler)
                .post(dental_benefits_handler)
                .layer(Extension(ApplicantStep::DentalBenefits)),
        )
        .route(
            "/:id/:variant/children/:child_id/dental-insurance",
            get(child_step_handler)
                .post(child_dental_insurance_handler)
                .layer(Extension(ChildStep::DentalInsurance)),
        )
        .route(
            "/:id/:variant/children/:child_id/confirm-federal-provincial-territorial-benefits",
            get(child_step_handler)
                .post(child_benefits_question_handler)
                .layer(Extension(ChildStep::BenefitsQuestion)),
        )
        .route(
            "/:id/:variant/children/:child_id/update-federal-provincial-territorial-benefits",
            get(child_step_handler)
                .post(child_dental_benefits_handler)
                .layer(Extension(ChildStep::DentalBenefits)),
        )
        .route(
            "/:id/:variant/review-information",
            get(review_handler).post(submit_handler),
        )
        .route("/:id/:variant/confirmation", get(confirmation_handler))
        .layer(Extension(flow))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PATCH, Method::DELETE];
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        // Allow any origin for development
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE])
    } else {
        // Session cookie must travel cross-origin
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true)
    }
}

/// Build the Axum application router
pub fn build_app(
    deps: ServerDeps,
    sessions: SessionManagerLayer<MemoryStore>,
    allowed_origins: &[String],
) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    let mut router = Router::new().route("/health", get(health_handler));
    for flow in FlowKind::ALL {
        router = router.nest(&format!("/:lang/{}", flow.route_root()), flow_router(flow));
    }

    router
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(sessions) // Issue or resume portal_session
        .layer(Extension(app_state)) // Add shared state
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
