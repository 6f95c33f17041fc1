//! Edit-mode navigation.
//!
//! Edit mode is switched on when the review page validates, and makes every
//! later step save return to review. When a review check fails, the flag is
//! persisted as off before the redirect propagates, so the user walks forward
//! through the steps that became incomplete.

use tracing::debug;

use super::errors::{Redirect, WizardError, WizardResult};
use super::lifecycle::StateManager;
use super::models::{StatePatch, WizardState};
use super::review::{validate_for_review, ReviewContext, ReviewProjection};
use super::routing::{Navigator, Step, Variant};

/// Where a successful step save goes: review in edit mode, `natural` otherwise.
pub fn next_after_save(state: &WizardState, variant: Variant, natural: Step, nav: &Navigator<'_>) -> Redirect {
    if state.edit_mode {
        nav.redirect(Step::review(variant))
    } else {
        nav.redirect(natural)
    }
}

/// Target of a step's back link.
pub fn back_target(state: &WizardState, variant: Variant, previous: Step, nav: &Navigator<'_>) -> String {
    if state.edit_mode {
        nav.path(Step::review(variant))
    } else {
        nav.path(previous)
    }
}

/// Passes `result` through, first persisting `editMode = false` when it is a
/// review redirect for a state in edit mode.
pub async fn reset_on_redirect<T>(
    manager: &StateManager<'_>,
    nav: &Navigator<'_>,
    state: &WizardState,
    result: WizardResult<T>,
) -> WizardResult<T> {
    if let Err(WizardError::Redirect(redirect)) = &result {
        if state.edit_mode {
            debug!(id = %state.id, to = %redirect, "leaving edit mode");
            manager
                .save(nav.params(), StatePatch::edit_mode(false), None)
                .await?;
        }
    }
    result
}

/// Validates for review without changing edit mode on success (submit path).
pub async fn revalidate(
    manager: &StateManager<'_>,
    state: &WizardState,
    variant: Variant,
    ctx: &ReviewContext<'_>,
) -> WizardResult<ReviewProjection> {
    let result = validate_for_review(state, variant, ctx);
    reset_on_redirect(manager, &ctx.navigator(), state, result).await
}

/// Entering the review page: a validated state switches edit mode on.
pub async fn enter_review(
    manager: &StateManager<'_>,
    state: &WizardState,
    variant: Variant,
    ctx: &ReviewContext<'_>,
) -> WizardResult<ReviewProjection> {
    let projection = revalidate(manager, state, variant, ctx).await?;
    if !state.edit_mode {
        manager
            .save(ctx.params, StatePatch::edit_mode(true), None)
            .await?;
    }
    Ok(projection)
}
