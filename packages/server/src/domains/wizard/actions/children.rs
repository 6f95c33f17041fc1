//! Saving the answer steps of one child.

use crate::domains::wizard::edit_mode::back_target;
use crate::domains::wizard::errors::Redirect;
use crate::domains::wizard::forms::{BenefitsQuestionForm, DentalBenefitsForm, DentalInsuranceForm};
use crate::domains::wizard::guards::load_child_answer_step;
use crate::domains::wizard::lifecycle::StateManager;
use crate::domains::wizard::models::{ChildState, StatePatch, WizardState};
use crate::domains::wizard::routing::{Navigator, RouteParams, Step, Variant};
use crate::domains::wizard::steps::{ChildStep, StepPage};
use crate::domains::wizard::WizardResult;

use super::steps::{save_and_advance, StepError};

/// Step page of a child answer step, with its back link.
pub async fn child_step_page(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    step: ChildStep,
) -> WizardResult<StepPage<ChildState>> {
    let (state, child) = load_child_answer_step(manager, params, variant, step).await?;
    let nav = Navigator::new(manager.flow(), params);
    let back = back_target(&state, variant, step.previous(variant, child.id), &nav);
    Ok(StepPage {
        back,
        answers: child,
    })
}

pub async fn save_child_dental_insurance(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &DentalInsuranceForm,
) -> Result<Redirect, StepError> {
    let step = ChildStep::DentalInsurance;
    let (state, mut child) = load_child_answer_step(manager, params, variant, step).await?;
    child.dental_insurance = Some(form.validate()?);

    let next = step.next(variant, child.id, false);
    save_child(manager, params, variant, state, child, next).await
}

/// The child's benefits question; a "no" drops the child's benefit details.
pub async fn save_child_benefits_question(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &BenefitsQuestionForm,
) -> Result<Redirect, StepError> {
    let step = ChildStep::BenefitsQuestion;
    let (state, mut child) = load_child_answer_step(manager, params, variant, step).await?;
    let has_benefits = form.validate()?;
    child.has_federal_provincial_territorial_benefits = Some(has_benefits);
    if !has_benefits {
        child.dental_benefits = None;
    }

    let next = step.next(variant, child.id, has_benefits);
    save_child(manager, params, variant, state, child, next).await
}

pub async fn save_child_dental_benefits(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &DentalBenefitsForm,
) -> Result<Redirect, StepError> {
    let step = ChildStep::DentalBenefits;
    let (state, mut child) = load_child_answer_step(manager, params, variant, step).await?;
    child.dental_benefits = Some(form.validate()?);

    let next = step.next(variant, child.id, true);
    save_child(manager, params, variant, state, child, next).await
}

/// Writes `child` back into the children list, keeping its position.
async fn save_child(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    state: WizardState,
    child: ChildState,
    next: Step,
) -> Result<Redirect, StepError> {
    let children = state
        .children
        .into_iter()
        .map(|existing| if existing.id == child.id { child.clone() } else { existing })
        .collect();
    let patch = StatePatch {
        children: Some(children),
        ..Default::default()
    };
    save_and_advance(manager, params, variant, patch, None, next).await
}
