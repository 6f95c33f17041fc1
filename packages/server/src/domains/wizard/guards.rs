//! Step loaders.
//!
//! Every step page loads state through one of these before rendering. They
//! only check what the page itself needs (terms accepted, right variant, a known
//! child); completeness of earlier answers is the review chain's job.

use tracing::debug;

use super::errors::WizardResult;
use super::lifecycle::{LoadScope, StateManager};
use super::models::{ChildState, WizardState};
use super::routing::{slug, Navigator, RouteParams, Step, Variant};
use super::steps::{ApplicantStep, ChildStep};
use crate::common::ChildId;

/// Any step after the terms page.
pub async fn load_flow_step(manager: &StateManager<'_>, params: &RouteParams) -> WizardResult<WizardState> {
    let nav = Navigator::new(manager.flow(), params);
    let state = manager.load(params, LoadScope::Form).await?;
    if state.terms_and_conditions.is_none() {
        debug!(id = %state.id, "terms not accepted");
        return Err(nav.entry().into());
    }
    Ok(state)
}

/// A step under `/{variant}/…`: the type answer must route into `variant`.
pub async fn load_variant_step(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
) -> WizardResult<WizardState> {
    let nav = Navigator::new(manager.flow(), params);
    let state = load_flow_step(manager, params).await?;
    if state.type_of_application != Some(variant.type_of_application()) {
        debug!(
            id = %state.id,
            variant = variant.slug(),
            "type of application does not match variant"
        );
        return Err(nav.redirect(nav.type_step()).into());
    }
    Ok(state)
}

/// A step of one child, named by the `childId` route parameter.
pub async fn load_child_step(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
) -> WizardResult<(WizardState, ChildState)> {
    let nav = Navigator::new(manager.flow(), params);
    let children_step = Step::Variant(variant, slug::CHILDREN);
    if !variant.includes_children() {
        return Err(nav.redirect(nav.type_step()).into());
    }

    let state = load_variant_step(manager, params, variant).await?;
    let child_id = params
        .child_id
        .as_deref()
        .and_then(|raw| ChildId::parse(raw).ok());
    let child = child_id.and_then(|id| state.child(id)).cloned();

    match child {
        Some(child) => Ok((state, child)),
        None => {
            debug!(id = %state.id, child_id = ?params.child_id, "unknown child");
            Err(nav.redirect(children_step).into())
        }
    }
}

/// An applicant answer step. Renewals ask marital status only after a reported
/// change, and child-only variants never ask the applicant's dental questions.
pub async fn load_applicant_step(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    step: ApplicantStep,
) -> WizardResult<WizardState> {
    let nav = Navigator::new(manager.flow(), params);
    let state = load_variant_step(manager, params, variant).await?;

    let asks_applicant = match step {
        ApplicantStep::MaritalStatus => {
            !manager.flow().is_renewal() || variant.includes_applicant_benefits()
        }
        _ => variant.includes_applicant_benefits(),
    };
    if !asks_applicant {
        return Err(nav.redirect(nav.type_step()).into());
    }

    let unmet = match step {
        ApplicantStep::MaritalStatus
            if manager.flow().is_renewal() && state.has_marital_status_changed != Some(true) =>
        {
            Some(slug::CONFIRM_MARITAL_STATUS)
        }
        ApplicantStep::DentalBenefits
            if state.has_federal_provincial_territorial_benefits != Some(true) =>
        {
            Some(slug::CONFIRM_BENEFITS)
        }
        _ => None,
    };
    if let Some(target) = unmet {
        debug!(id = %state.id, step = step.slug(), "step not reachable");
        return Err(nav.redirect(Step::Variant(variant, target)).into());
    }
    Ok(state)
}

/// A dental answer step of one child.
pub async fn load_child_answer_step(
    manager: &StateManager<'_>,
    params: &RouteParams,
    variant: Variant,
    step: ChildStep,
) -> WizardResult<(WizardState, ChildState)> {
    let (state, child) = load_child_step(manager, params, variant).await?;
    if step == ChildStep::DentalBenefits && child.has_federal_provincial_territorial_benefits != Some(true) {
        let nav = Navigator::new(manager.flow(), params);
        return Err(nav
            .redirect(Step::Child(variant, child.id, slug::CONFIRM_BENEFITS))
            .into());
    }
    Ok((state, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::wizard::config::WizardConfig;
    use crate::domains::wizard::models::{StatePatch, TermsAndConditions, TypeOfApplication};
    use crate::domains::wizard::routing::{FlowKind, Language};
    use crate::kernel::test_dependencies::{InMemorySession, ManualClock};
    use chrono::Utc;

    const ID: &str = "2c4e6a8b-0d1f-4a3c-9e5b-7d9f1b3d5f70";

    fn terms() -> TermsAndConditions {
        TermsAndConditions {
            acknowledge_terms: true,
            acknowledge_privacy: true,
            share_data: true,
        }
    }

    #[tokio::test]
    async fn test_terms_required_before_steps() {
        let session = InMemorySession::new();
        let clock = ManualClock::new(Utc::now());
        let config = WizardConfig::default();
        let manager = StateManager::new(FlowKind::Apply, &session, &clock, &config);
        manager.start(ID, StatePatch::default()).await.unwrap();

        let params = RouteParams::new(Language::En, ID);
        let err = load_flow_step(&manager, &params).await.unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/apply/{}/terms-and-conditions", ID).as_str())
        );
    }

    #[tokio::test]
    async fn test_variant_mismatch_redirects_to_type_step() {
        let session = InMemorySession::new();
        let clock = ManualClock::new(Utc::now());
        let config = WizardConfig::default();
        let manager = StateManager::new(FlowKind::Renew, &session, &clock, &config);
        let seed = StatePatch {
            terms_and_conditions: Some(terms()),
            type_of_application: Some(TypeOfApplication::Adult),
            ..Default::default()
        };
        manager.start(ID, seed).await.unwrap();

        let params = RouteParams::new(Language::En, ID);
        assert!(load_variant_step(&manager, &params, Variant::Adult).await.is_ok());
        let err = load_variant_step(&manager, &params, Variant::Child).await.unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/renew/{}/type-renewal", ID).as_str())
        );
    }

    #[tokio::test]
    async fn test_unknown_child_redirects_to_children_list() {
        let session = InMemorySession::new();
        let clock = ManualClock::new(Utc::now());
        let config = WizardConfig::default();
        let manager = StateManager::new(FlowKind::Apply, &session, &clock, &config);
        let child = ChildState::new();
        let seed = StatePatch {
            terms_and_conditions: Some(terms()),
            type_of_application: Some(TypeOfApplication::Child),
            children: Some(vec![child.clone()]),
            ..Default::default()
        };
        manager.start(ID, seed).await.unwrap();

        let known = RouteParams::new(Language::En, ID).with_child(child.id.to_string());
        let (_, loaded) = load_child_step(&manager, &known, Variant::Child).await.unwrap();
        assert_eq!(loaded.id, child.id);

        let unknown = RouteParams::new(Language::En, ID).with_child("not-a-child");
        let err = load_child_step(&manager, &unknown, Variant::Child).await.unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/apply/{}/child/children", ID).as_str())
        );
    }

    #[tokio::test]
    async fn test_renewal_marital_status_needs_reported_change() {
        let session = InMemorySession::new();
        let clock = ManualClock::new(Utc::now());
        let config = WizardConfig::default();
        let manager = StateManager::new(FlowKind::Renew, &session, &clock, &config);
        let seed = StatePatch {
            terms_and_conditions: Some(terms()),
            type_of_application: Some(TypeOfApplication::Adult),
            has_marital_status_changed: Some(false),
            ..Default::default()
        };
        manager.start(ID, seed).await.unwrap();
        let params = RouteParams::new(Language::En, ID);

        let err = load_applicant_step(&manager, &params, Variant::Adult, ApplicantStep::MaritalStatus)
            .await
            .unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/renew/{}/adult/confirm-marital-status", ID).as_str())
        );

        let err = load_applicant_step(&manager, &params, Variant::Adult, ApplicantStep::DentalBenefits)
            .await
            .unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/renew/{}/adult/confirm-federal-provincial-territorial-benefits", ID).as_str())
        );
        assert!(
            load_applicant_step(&manager, &params, Variant::Adult, ApplicantStep::DentalInsurance)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_child_variant_skips_applicant_dental_steps() {
        let session = InMemorySession::new();
        let clock = ManualClock::new(Utc::now());
        let config = WizardConfig::default();
        let manager = StateManager::new(FlowKind::Apply, &session, &clock, &config);
        let seed = StatePatch {
            terms_and_conditions: Some(terms()),
            type_of_application: Some(TypeOfApplication::Child),
            ..Default::default()
        };
        manager.start(ID, seed).await.unwrap();
        let params = RouteParams::new(Language::En, ID);

        assert!(
            load_applicant_step(&manager, &params, Variant::Child, ApplicantStep::MaritalStatus)
                .await
                .is_ok()
        );
        let err = load_applicant_step(&manager, &params, Variant::Child, ApplicantStep::DentalInsurance)
            .await
            .unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/apply/{}/type-application", ID).as_str())
        );
    }
}
