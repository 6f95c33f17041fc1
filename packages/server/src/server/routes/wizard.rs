//! JSON routes of the application and renewal flows.
//!
//! Every handler runs in the flow it was mounted under (`Extension<FlowKind>`)
//! and the [`Session`] resumed by the session layer. Unknown languages and
//! variants answer 404 before any state is read.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect as SeeOther, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::error::ApiError;
use crate::domains::wizard::actions;
use crate::domains::wizard::forms::{
    ApplicantInformationForm, BenefitsQuestionForm, DentalBenefitsForm, DentalInsuranceForm,
    MaritalStatusForm,
};
use crate::domains::wizard::{
    ApplicantStep, ChildStep, FlowKind, Language, LoadScope, Navigator, RouteParams, StateField,
    StatePatch, Step, Variant, WizardError,
};
use crate::server::app::AppState;

fn language(code: &str) -> Result<Language, ApiError> {
    Language::from_code(code).ok_or(ApiError::NotFound)
}

#[derive(Debug, Deserialize)]
pub struct LangPath {
    pub lang: String,
}

#[derive(Debug, Deserialize)]
pub struct FlowPath {
    pub lang: String,
    pub id: String,
}

impl FlowPath {
    fn params(self) -> Result<RouteParams, ApiError> {
        Ok(RouteParams::new(language(&self.lang)?, self.id))
    }
}

#[derive(Debug, Deserialize)]
pub struct StepPath {
    pub lang: String,
    pub id: String,
    pub variant: String,
}

impl StepPath {
    fn split(self) -> Result<(RouteParams, Variant), ApiError> {
        let lang = language(&self.lang)?;
        let variant = Variant::from_slug(&self.variant).ok_or(ApiError::NotFound)?;
        Ok((RouteParams::new(lang, self.id), variant))
    }
}

#[derive(Debug, Deserialize)]
pub struct ChildStepPath {
    pub lang: String,
    pub id: String,
    pub variant: String,
    pub child_id: String,
}

impl ChildStepPath {
    fn split(self) -> Result<(RouteParams, Variant), ApiError> {
        let lang = language(&self.lang)?;
        let variant = Variant::from_slug(&self.variant).ok_or(ApiError::NotFound)?;
        let params = RouteParams::new(lang, self.id).with_child(self.child_id);
        Ok((params, variant))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveRequest {
    #[serde(default)]
    pub patch: StatePatch,
    #[serde(default)]
    pub remove: Option<StateField>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    pub submitted_on: DateTime<Utc>,
}

fn see_other(location: &str) -> Response {
    SeeOther::to(location).into_response()
}

/// POST /{lang}/{flow}/start; the body is the seed and may be `{}`
pub async fn start_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<LangPath>,
    Json(seed): Json<StatePatch>,
) -> Result<Response, ApiError> {
    let lang = language(&path.lang)?;
    let manager = state.deps.state_manager(flow, &session);
    let (_, entry) = actions::start_application(&manager, lang, seed).await?;
    Ok(see_other(&entry.location))
}

/// GET /{lang}/{flow}/{id}/state
pub async fn load_state_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<FlowPath>,
) -> Result<Response, ApiError> {
    let params = path.params()?;
    let manager = state.deps.state_manager(flow, &session);
    let wizard_state = manager.load(&params, LoadScope::Form).await?;
    Ok(Json(wizard_state).into_response())
}

/// PATCH /{lang}/{flow}/{id}/state
pub async fn save_state_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<FlowPath>,
    Json(request): Json<SaveRequest>,
) -> Result<Response, ApiError> {
    let params = path.params()?;
    let manager = state.deps.state_manager(flow, &session);
    let saved = actions::save_answers(&manager, &params, request.patch, request.remove).await?;
    Ok(Json(saved).into_response())
}

/// DELETE /{lang}/{flow}/{id}/state
pub async fn clear_state_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<FlowPath>,
) -> Result<Response, ApiError> {
    let params = path.params()?;
    let manager = state.deps.state_manager(flow, &session);
    manager.clear(&params).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// POST /{lang}/{flow}/{id}/{variant}/applicant-information
pub async fn applicant_information_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
    Json(form): Json<ApplicantInformationForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_applicant_information(&manager, &params, variant, &form)
        .await?;
    Ok(see_other(&next.location))
}

/// GET of an applicant answer step; the step comes from the route layer
pub async fn applicant_step_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    Extension(step): Extension<ApplicantStep>,
    session: Session,
    Path(path): Path<StepPath>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let page = actions::applicant_step_page(&manager, &params, variant, step).await?;
    Ok(Json(page).into_response())
}

/// POST /{lang}/{flow}/{id}/{variant}/marital-status
pub async fn marital_status_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
    Json(form): Json<MaritalStatusForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_marital_status(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// POST /{lang}/{flow}/{id}/{variant}/dental-insurance
pub async fn dental_insurance_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
    Json(form): Json<DentalInsuranceForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_dental_insurance(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// POST /{lang}/{flow}/{id}/{variant}/confirm-federal-provincial-territorial-benefits
pub async fn benefits_question_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
    Json(form): Json<BenefitsQuestionForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_benefits_question(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// POST /{lang}/{flow}/{id}/{variant}/update-federal-provincial-territorial-benefits
pub async fn dental_benefits_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
    Json(form): Json<DentalBenefitsForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_dental_benefits(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// GET of a child answer step; the step comes from the route layer
pub async fn child_step_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    Extension(step): Extension<ChildStep>,
    session: Session,
    Path(path): Path<ChildStepPath>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let page = actions::child_step_page(&manager, &params, variant, step).await?;
    Ok(Json(page).into_response())
}

/// POST /{lang}/{flow}/{id}/{variant}/children/{childId}/dental-insurance
pub async fn child_dental_insurance_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<ChildStepPath>,
    Json(form): Json<DentalInsuranceForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_child_dental_insurance(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// POST /{lang}/{flow}/{id}/{variant}/children/{childId}/confirm-federal-provincial-territorial-benefits
pub async fn child_benefits_question_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<ChildStepPath>,
    Json(form): Json<BenefitsQuestionForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_child_benefits_question(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// POST /{lang}/{flow}/{id}/{variant}/children/{childId}/update-federal-provincial-territorial-benefits
pub async fn child_dental_benefits_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<ChildStepPath>,
    Json(form): Json<DentalBenefitsForm>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let next = actions::save_child_dental_benefits(&manager, &params, variant, &form).await?;
    Ok(see_other(&next.location))
}

/// GET /{lang}/{flow}/{id}/{variant}/review-information
pub async fn review_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let projection = actions::review_application(&manager, &params, variant).await?;
    Ok(Json(projection).into_response())
}

/// POST /{lang}/{flow}/{id}/{variant}/review-information
pub async fn submit_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
) -> Result<Response, ApiError> {
    let (params, variant) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    actions::submit_application(&manager, state.deps.submitter.as_ref(), &params, variant).await?;
    let confirmation = Navigator::new(flow, &params).path(Step::confirmation(variant));
    Ok(see_other(&confirmation))
}

/// GET /{lang}/{flow}/{id}/{variant}/confirmation
pub async fn confirmation_handler(
    Extension(state): Extension<AppState>,
    Extension(flow): Extension<FlowKind>,
    session: Session,
    Path(path): Path<StepPath>,
) -> Result<Response, ApiError> {
    let (params, _) = path.split()?;
    let manager = state.deps.state_manager(flow, &session);
    let submitted = actions::confirmation(&manager, &params).await?;
    let info = submitted
        .submission_info
        .ok_or_else(|| WizardError::invariant("submissionInfo"))?;

    Ok(Json(ConfirmationResponse {
        id: submitted.id.to_string(),
        confirmation_code: info.confirmation_code,
        submitted_on: info.submitted_on,
    })
    .into_response())
}
