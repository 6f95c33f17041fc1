//! Starting an application and saving applicant form steps.

use thiserror::Error;
use tracing::{info, warn};

use crate::common::ApplicationId;
use crate::domains::wizard::edit_mode::{back_target, next_after_save};
use crate::domains::wizard::errors::{FieldErrors, Redirect, WizardError};
use crate::domains::wizard::forms::{
    ApplicantInformationForm, BenefitsQuestionForm, DentalBenefitsForm, DentalInsuranceForm,
    MaritalStatusForm,
};
use crate::domains::wizard::guards::{load_applicant_step, load_variant_step};
use crate::domains::wizard::lifecycle::StateManager;
use crate::domains::wizard::models::{StateField, StatePatch, WizardState};
use crate::domains::wizard::routing::{Language, Navigator, RouteParams, Step, Variant};
use crate::domains::wizard::steps::{ApplicantStep, StepPage};
use crate::domains::wizard::WizardResult;

const NOT_WRITABLE: &str = "field-not-writable";

/// Failure of a form step: either the input or the wizard said no.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Invalid(#[from] FieldErrors),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Starts a new application under a fresh id; returns it with the redirect to
/// its first step.
pub async fn start_application(
    manager: &StateManager<'_>,
    lang: Language,
    seed: StatePatch,
) -> WizardResult<(WizardState, Redirect)> {
    let id = ApplicationId::new();
    let state = manager.start(&id.to_string(), seed).await?;
    let params = RouteParams::new(lang, id.to_string());
    let entry = Navigator::new(manager.flow(), &params).entry();
    info!(flow = manager.flow().key_prefix(), id = %state.id, "redirecting new application to {}", entry);
    Ok((state, entry))
}

/// Validates and stores the applicant-information form; returns where to go next.
pub async fn save_applicant_information(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &ApplicantInformationForm,
) -> Result<Redirect, StepError> {
    load_variant_step(manager, params, variant).await?;
    let applicant_information = form.validate(manager.clock().today())?;

    let patch = StatePatch {
        applicant_information: Some(applicant_information),
        ..Default::default()
    };
    let natural = ApplicantInformationForm::next_step(manager.flow(), variant);
    save_and_advance(manager, params, variant, patch, None, natural).await
}

/// Stores client answers without running a step's navigation.
///
/// Edit mode and the submission record belong to the review and submit
/// actions; a patch naming either is rejected as a whole.
pub async fn save_answers(
    manager: &StateManager<'_>,
    params: &RouteParams,
    patch: StatePatch,
    remove: Option<StateField>,
) -> Result<WizardState, StepError> {
    let mut errors = FieldErrors::new();
    if patch.edit_mode.is_some() {
        errors.add("editMode", NOT_WRITABLE);
    }
    if patch.submission_info.is_some() {
        errors.add("submissionInfo", NOT_WRITABLE);
    }
    if !errors.is_empty() {
        warn!(flow = manager.flow().key_prefix(), id = %params.id, "rejected patch of engine-owned fields");
        return Err(errors.into());
    }
    Ok(manager.save(params, patch, remove).await?)
}

/// Step page of an applicant answer step, with its back link.
pub async fn applicant_step_page(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    step: ApplicantStep,
) -> WizardResult<StepPage<WizardState>> {
    let state = load_applicant_step(manager, params, variant, step).await?;
    let nav = Navigator::new(manager.flow(), params);
    let back = back_target(&state, variant, step.previous(manager.flow(), variant), &nav);
    Ok(StepPage {
        back,
        answers: state,
    })
}

/// Marital status, with partner information exactly when partnered.
pub async fn save_marital_status(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &MaritalStatusForm,
) -> Result<Redirect, StepError> {
    let step = ApplicantStep::MaritalStatus;
    load_applicant_step(manager, params, variant, step).await?;
    let answers = form.validate(manager.rules(), manager.clock().today())?;

    let remove = answers
        .partner_information
        .is_none()
        .then_some(StateField::PartnerInformation);
    let patch = StatePatch {
        marital_status: Some(answers.marital_status),
        partner_information: answers.partner_information,
        ..Default::default()
    };
    let natural = step.next(manager.flow(), variant, false);
    save_and_advance(manager, params, variant, patch, remove, natural).await
}

pub async fn save_dental_insurance(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &DentalInsuranceForm,
) -> Result<Redirect, StepError> {
    let step = ApplicantStep::DentalInsurance;
    load_applicant_step(manager, params, variant, step).await?;
    let patch = StatePatch {
        dental_insurance: Some(form.validate()?),
        ..Default::default()
    };
    let natural = step.next(manager.flow(), variant, false);
    save_and_advance(manager, params, variant, patch, None, natural).await
}

/// The benefits question; a "no" drops benefit details given earlier.
pub async fn save_benefits_question(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &BenefitsQuestionForm,
) -> Result<Redirect, StepError> {
    let step = ApplicantStep::BenefitsQuestion;
    load_applicant_step(manager, params, variant, step).await?;
    let has_benefits = form.validate()?;

    let remove = (!has_benefits).then_some(StateField::DentalBenefits);
    let patch = StatePatch {
        has_federal_provincial_territorial_benefits: Some(has_benefits),
        ..Default::default()
    };
    let natural = step.next(manager.flow(), variant, has_benefits);
    save_and_advance(manager, params, variant, patch, remove, natural).await
}

pub async fn save_dental_benefits(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    form: &DentalBenefitsForm,
) -> Result<Redirect, StepError> {
    let step = ApplicantStep::DentalBenefits;
    load_applicant_step(manager, params, variant, step).await?;
    let patch = StatePatch {
        dental_benefits: Some(form.validate()?),
        ..Default::default()
    };
    let natural = step.next(manager.flow(), variant, true);
    save_and_advance(manager, params, variant, patch, None, natural).await
}

/// Saves a step's answers and picks the next location: review in edit mode,
/// `natural` otherwise.
pub(crate) async fn save_and_advance(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    patch: StatePatch,
    remove: Option<StateField>,
    natural: Step,
) -> Result<Redirect, StepError> {
    let saved = manager.save(params, patch, remove).await?;
    let nav = Navigator::new(manager.flow(), params);
    Ok(next_after_save(&saved, variant, natural, &nav))
}
