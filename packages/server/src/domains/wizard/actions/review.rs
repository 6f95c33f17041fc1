//! Review page and submission.

use serde::Serialize;
use tracing::info;

use crate::domains::wizard::edit_mode::{enter_review, revalidate};
use crate::domains::wizard::errors::{WizardError, WizardResult};
use crate::domains::wizard::guards::load_variant_step;
use crate::domains::wizard::lifecycle::{LoadScope, StateManager};
use crate::domains::wizard::models::{StatePatch, SubmissionInfo, TermsAndConditions, WizardState};
use crate::domains::wizard::review::{ReviewContext, ReviewProjection};
use crate::domains::wizard::routing::{FlowKind, RouteParams, Variant};
use crate::kernel::BaseBenefitSubmitter;

/// Body sent to the benefit application service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload<'a> {
    pub flow: FlowKind,
    pub terms_and_conditions: &'a TermsAndConditions,
    pub application: &'a ReviewProjection,
}

fn review_context<'a>(manager: &StateManager<'a>, params: &'a RouteParams) -> ReviewContext<'a> {
    ReviewContext::new(manager.flow(), params, manager.rules(), manager.clock().today())
}

/// Loads the review page of `variant`, switching edit mode on.
pub async fn review_application(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
) -> WizardResult<ReviewProjection> {
    let state = load_variant_step(manager, params, variant).await?;
    enter_review(manager, &state, variant, &review_context(manager, params)).await
}

/// Re-validates, sends the application and locks the state as submitted.
pub async fn submit_application(
    manager: &StateManager<'_>,
    submitter: &dyn BaseBenefitSubmitter,
    params: &RouteParams,
    variant: Variant,
) -> WizardResult<SubmissionInfo> {
    let state = load_variant_step(manager, params, variant).await?;
    let projection = revalidate(manager, &state, variant, &review_context(manager, params)).await?;
    let terms = state
        .terms_and_conditions
        .as_ref()
        .ok_or_else(|| WizardError::invariant("termsAndConditions"))?;

    let payload = serde_json::to_value(SubmissionPayload {
        flow: manager.flow(),
        terms_and_conditions: terms,
        application: &projection,
    })?;
    let confirmation_code = submitter
        .submit(&payload)
        .await
        .map_err(WizardError::Submission)?;

    let submission_info = SubmissionInfo {
        confirmation_code: Some(confirmation_code),
        submitted_on: manager.clock().now(),
    };
    manager
        .save(
            params,
            StatePatch {
                edit_mode: Some(false),
                submission_info: Some(submission_info.clone()),
                ..Default::default()
            },
            None,
        )
        .await?;

    info!(
        flow = manager.flow().key_prefix(),
        id = %state.id,
        variant = variant.slug(),
        children = projection.children().len(),
        "application submitted"
    );
    Ok(submission_info)
}

/// Confirmation page: only a submitted application gets here.
pub async fn confirmation(manager: &StateManager<'_>, params: &RouteParams) -> WizardResult<WizardState> {
    manager.load(params, LoadScope::Confirmation).await
}
