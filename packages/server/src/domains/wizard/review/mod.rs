//! Review validation.
//!
//! Before the review page renders, and again on submit, the whole accumulated
//! state is re-validated against the flow's ordered guard chain. The first unmet
//! guard redirects to the step that fixes it; success yields a typed
//! [`ReviewProjection`] for the variant.

pub mod apply;
pub mod children;
pub mod projection;
pub mod renew;
pub mod segments;

pub use children::{validate_children_for_review, ChildrenPolicy};
pub use projection::*;

use chrono::NaiveDate;
use tracing::debug;

use super::chain::ApplicantFacts;
use super::classifier::FlowRules;
use super::errors::WizardResult;
use super::models::WizardState;
use super::routing::{FlowKind, Navigator, RouteParams, Variant};

/// Everything a review needs besides the state itself.
#[derive(Debug, Clone, Copy)]
pub struct ReviewContext<'a> {
    pub flow: FlowKind,
    pub params: &'a RouteParams,
    pub rules: &'a FlowRules,
    /// Reference date for age categories.
    pub today: NaiveDate,
}

impl<'a> ReviewContext<'a> {
    pub fn new(
        flow: FlowKind,
        params: &'a RouteParams,
        rules: &'a FlowRules,
        today: NaiveDate,
    ) -> Self {
        Self {
            flow,
            params,
            rules,
            today,
        }
    }

    pub fn navigator(&self) -> Navigator<'a> {
        Navigator::new(self.flow, self.params)
    }

    pub(crate) fn facts<'s>(&'s self, state: &'s WizardState, variant: Variant) -> ApplicantFacts<'s> {
        ApplicantFacts::new(state, self.rules, self.today, variant)
    }
}

/// Validates `state` for the review page of `variant` in the context's flow.
pub fn validate_for_review(
    state: &WizardState,
    variant: Variant,
    ctx: &ReviewContext<'_>,
) -> WizardResult<ReviewProjection> {
    debug!(
        flow = ctx.flow.key_prefix(),
        variant = variant.slug(),
        id = %state.id,
        "validating state for review"
    );
    if ctx.flow.is_renewal() {
        return renew::validate_renewal_for_review(state, variant, ctx).map(ReviewProjection::Renewal);
    }
    match variant {
        Variant::Adult => apply::validate_adult_for_review(state, ctx).map(ReviewProjection::Adult),
        Variant::AdultChild => {
            apply::validate_adult_child_for_review(state, ctx).map(ReviewProjection::AdultChild)
        }
        Variant::Child => apply::validate_child_for_review(state, ctx).map(ReviewProjection::Child),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ApplicationId;
    use crate::domains::wizard::models::{
        Address, ApplicantInformation, ApplicationYear, CommunicationPreferences, PreferredMethod,
        TypeOfApplication,
    };
    use crate::domains::wizard::routing::Language;
    use chrono::Utc;

    const ID: &str = "0a4d8f6e-1c3b-4e2a-9f7d-5b6c8e0a2d4f";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn adult_state() -> WizardState {
        let mut state = WizardState::new(ApplicationId::parse(ID).unwrap(), Utc::now());
        state.application_year = Some(ApplicationYear {
            intake_year_id: "2026".into(),
            renewal_year_id: None,
            tax_year: "2025".into(),
            coverage_start_date: date(2026, 7, 1),
        });
        state.type_of_application = Some(TypeOfApplication::Adult);
        state.tax_filing = Some(true);
        state.date_of_birth = Some(date(1985, 1, 10));
        state.disability_tax_credit = Some(true);
        state.applicant_information = Some(ApplicantInformation {
            first_name: "Alex".into(),
            last_name: "Martin".into(),
            date_of_birth: date(1985, 1, 10),
            social_insurance_number: "046 454 286".into(),
            client_number: None,
        });
        state.marital_status = Some("3".into());
        state.mailing_address = Some(Address {
            address: "10 Rue Principale".into(),
            city: "Gatineau".into(),
            province: Some("QC".into()),
            postal_code: Some("J8X 1A1".into()),
            country: "CAN".into(),
        });
        state.is_home_address_same_as_mailing_address = Some(true);
        state.communication_preferences = Some(CommunicationPreferences {
            preferred_language: "fr".into(),
            preferred_method: PreferredMethod::Mail,
        });
        state.dental_insurance = Some(false);
        state.has_federal_provincial_territorial_benefits = Some(false);
        state
    }

    fn review(state: &WizardState, flow: FlowKind) -> WizardResult<ReviewProjection> {
        let params = RouteParams::new(Language::En, ID);
        let rules = FlowRules::default();
        let ctx = ReviewContext::new(flow, &params, &rules, date(2026, 6, 1));
        validate_for_review(state, Variant::Adult, &ctx)
    }

    #[test]
    fn test_complete_adult_state_projects() {
        let projection = review(&adult_state(), FlowKind::Apply).unwrap();
        match projection {
            ReviewProjection::Adult(review) => {
                assert_eq!(review.date_of_birth, date(1985, 1, 10));
                assert!(review.contact.contact_information.is_none());
            }
            other => panic!("unexpected projection: {:?}", other),
        }
    }

    #[test]
    fn test_protected_apply_requires_contact_information() {
        let err = review(&adult_state(), FlowKind::ProtectedApply).unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/protected/apply/{}/adult/contact-information", ID).as_str())
        );
    }

    #[test]
    fn test_email_preference_requires_verified_email() {
        let mut state = adult_state();
        state.communication_preferences = Some(CommunicationPreferences {
            preferred_language: "en".into(),
            preferred_method: PreferredMethod::Email,
        });
        state.email = Some("alex@example.com".into());
        let err = review(&state, FlowKind::Apply).unwrap_err();
        assert!(err.redirect_location().unwrap().ends_with("/adult/verify-email"));

        state.email_verified = Some(true);
        assert!(review(&state, FlowKind::Apply).is_ok());
    }
}
