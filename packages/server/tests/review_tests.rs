//! Review chain tests: the first unmet guard decides the redirect, and a
//! complete state yields the variant's projection.

mod common;

use common::*;
use portal_core::domains::wizard::{
    validate_for_review, FlowKind, FlowRules, Language, ReviewContext, ReviewProjection, RouteParams,
    StatePatch, TypeOfApplication, Variant, WizardError, WizardResult, WizardState,
};

fn review(flow: FlowKind, variant: Variant, state: &WizardState) -> WizardResult<ReviewProjection> {
    let params = RouteParams::new(Language::En, APP_ID);
    let rules = FlowRules::default();
    let ctx = ReviewContext::new(flow, &params, &rules, now().date_naive());
    validate_for_review(state, variant, &ctx)
}

fn redirect(flow: FlowKind, variant: Variant, state: &WizardState) -> String {
    review(flow, variant, state)
        .unwrap_err()
        .redirect_location()
        .expect("review should redirect")
        .to_string()
}

fn apply_path(rest: &str) -> String {
    format!("/en/apply/{}/{}", APP_ID, rest)
}

fn renew_path(rest: &str) -> String {
    format!("/en/renew/{}/{}", APP_ID, rest)
}

// =============================================================================
// Adult applications
// =============================================================================

#[test]
fn complete_adult_state_projects() {
    let state = state_from(&complete_adult_patch());

    let projection = review(FlowKind::Apply, Variant::Adult, &state).unwrap();
    let ReviewProjection::Adult(adult) = projection else {
        panic!("expected an adult projection");
    };
    assert_eq!(adult.addresses.home_address, mailing_address());
    assert!(!adult.benefits.dental_benefits.has_federal_benefits);
    assert!(adult.contact.contact_information.is_none());
    assert!(adult.marital_status.partner_information.is_none());
}

#[test]
fn eligibility_walkthrough_for_adult_applicant() {
    let mut state = state_from(&StatePatch {
        type_of_application: Some(TypeOfApplication::Adult),
        tax_filing: Some(true),
        date_of_birth: Some(date(1985, 1, 10)),
        ..Default::default()
    });
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/disability-tax-credit")
    );

    state.disability_tax_credit = Some(false);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/dob-eligibility")
    );
}

#[test]
fn only_missing_type_sends_to_type_question() {
    let mut state = state_from(&complete_adult_patch());
    state.type_of_application = None;

    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("type-application")
    );
}

#[test]
fn missing_guaranteed_field_is_an_invariant_failure() {
    let mut state = state_from(&complete_adult_patch());
    state.application_year = None;

    let err = review(FlowKind::Apply, Variant::Adult, &state).unwrap_err();
    assert!(matches!(err, WizardError::Invariant(_)));
    assert!(!err.is_redirect());
}

#[test]
fn earliest_missing_step_wins() {
    let mut state = state_from(&complete_adult_patch());
    state.tax_filing = None;
    state.marital_status = None;
    state.mailing_address = None;

    assert_eq!(redirect(FlowKind::Apply, Variant::Adult, &state), apply_path("tax-filing"));

    state.tax_filing = Some(false);
    assert_eq!(redirect(FlowKind::Apply, Variant::Adult, &state), apply_path("file-taxes"));

    state.tax_filing = Some(true);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/marital-status")
    );
}

#[test]
fn delegate_and_mismatched_type_go_back_to_type_questions() {
    let mut state = state_from(&complete_adult_patch());
    state.type_of_application = Some(TypeOfApplication::Delegate);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("application-delegate")
    );

    state.type_of_application = Some(TypeOfApplication::Adult);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::AdultChild, &state),
        apply_path("type-application")
    );
}

#[test]
fn youth_must_live_independently() {
    let mut state = state_from(&complete_adult_patch());
    state.date_of_birth = Some(date(2009, 3, 1));
    state.disability_tax_credit = None;

    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/living-independently")
    );

    state.living_independently = Some(false);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/parent-or-guardian")
    );

    state.living_independently = Some(true);
    assert!(review(FlowKind::Apply, Variant::Adult, &state).is_ok());
}

#[test]
fn adults_need_disability_tax_credit_but_seniors_do_not() {
    let mut state = state_from(&complete_adult_patch());
    state.disability_tax_credit = Some(false);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/dob-eligibility")
    );

    state.date_of_birth = Some(date(1950, 5, 20));
    state.disability_tax_credit = None;
    assert!(review(FlowKind::Apply, Variant::Adult, &state).is_ok());
}

#[test]
fn child_aged_applicant_is_sent_to_parent_or_guardian() {
    let mut state = state_from(&complete_adult_patch());
    state.date_of_birth = Some(date(2014, 9, 9));

    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/parent-or-guardian")
    );
}

#[test]
fn partner_information_follows_marital_status() {
    let mut state = state_from(&complete_adult_patch());
    state.marital_status = Some("1".to_string());
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/marital-status")
    );

    state.partner_information = Some(partner());
    let ReviewProjection::Adult(adult) = review(FlowKind::Apply, Variant::Adult, &state).unwrap() else {
        panic!("expected an adult projection");
    };
    assert_eq!(adult.marital_status.partner_information, Some(partner()));

    // Single with leftover partner answers
    state.marital_status = Some("3".to_string());
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/marital-status")
    );
}

#[test]
fn separate_home_address_is_required_when_not_same() {
    let mut state = state_from(&complete_adult_patch());
    state.is_home_address_same_as_mailing_address = Some(false);
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/home-address")
    );

    state.home_address = Some(home_address());
    let ReviewProjection::Adult(adult) = review(FlowKind::Apply, Variant::Adult, &state).unwrap() else {
        panic!("expected an adult projection");
    };
    assert_eq!(adult.addresses.home_address, home_address());
}

#[test]
fn declared_benefits_must_be_described() {
    let mut state = state_from(&complete_adult_patch());
    state.has_federal_provincial_territorial_benefits = Some(true);

    assert_eq!(
        redirect(FlowKind::Apply, Variant::Adult, &state),
        apply_path("adult/update-federal-provincial-territorial-benefits")
    );
}

#[test]
fn protected_apply_checks_contact_information() {
    let mut state = state_from(&complete_adult_patch());

    assert_eq!(
        redirect(FlowKind::ProtectedApply, Variant::Adult, &state),
        format!("/en/protected/apply/{}/adult/contact-information", APP_ID)
    );

    state.contact_information = Some(contact_information());
    let ReviewProjection::Adult(adult) =
        review(FlowKind::ProtectedApply, Variant::Adult, &state).unwrap()
    else {
        panic!("expected an adult projection");
    };
    assert_eq!(adult.contact.contact_information, Some(contact_information()));
}

// =============================================================================
// Children
// =============================================================================

#[test]
fn adult_child_without_children_goes_to_children_page() {
    let state = state_from(&StatePatch {
        children: Some(Vec::new()),
        ..complete_adult_child_patch()
    });

    assert_eq!(
        redirect(FlowKind::Apply, Variant::AdultChild, &state),
        apply_path("adult-child/children")
    );
}

#[test]
fn first_incomplete_child_halts_review() {
    let mut first = complete_child("Riley", date(2016, 4, 2));
    first.dental_insurance = None;
    let second = complete_child("Avery", date(2019, 11, 30));
    let state = state_from(&StatePatch {
        children: Some(vec![first.clone(), second]),
        ..complete_adult_child_patch()
    });

    assert_eq!(
        redirect(FlowKind::Apply, Variant::AdultChild, &state),
        apply_path(&format!("adult-child/children/{}/dental-insurance", first.id))
    );
}

#[test]
fn child_checks_use_the_child_id() {
    let mut grown = complete_child("Jesse", date(2007, 1, 15));
    let state = state_from(&StatePatch {
        children: Some(vec![grown.clone()]),
        ..complete_adult_child_patch()
    });
    assert_eq!(
        redirect(FlowKind::Apply, Variant::AdultChild, &state),
        apply_path(&format!("adult-child/children/{}/cannot-apply-child", grown.id))
    );

    if let Some(info) = grown.information.as_mut() {
        info.is_parent = false;
    }
    let state = state_from(&StatePatch {
        children: Some(vec![grown.clone()]),
        ..complete_adult_child_patch()
    });
    assert_eq!(
        redirect(FlowKind::Apply, Variant::AdultChild, &state),
        apply_path(&format!("adult-child/children/{}/parent-or-guardian", grown.id))
    );
}

#[test]
fn complete_adult_child_projects_children() {
    let state = state_from(&complete_adult_child_patch());

    let projection = review(FlowKind::Apply, Variant::AdultChild, &state).unwrap();
    assert_eq!(projection.children().len(), 1);
    assert_eq!(projection.children()[0].first_name, "Riley");
    assert!(matches!(projection, ReviewProjection::AdultChild(_)));
}

#[test]
fn child_application_checks_children_before_parent() {
    let mut child = complete_child("Riley", date(2016, 4, 2));
    child.information = None;
    let mut state = state_from(&StatePatch {
        children: Some(vec![child.clone()]),
        ..complete_child_patch()
    });
    state.applicant_information = None;

    assert_eq!(
        redirect(FlowKind::Apply, Variant::Child, &state),
        apply_path(&format!("child/children/{}/information", child.id))
    );
}

#[test]
fn parent_applying_for_children_must_not_be_a_child() {
    let mut state = state_from(&complete_child_patch());
    assert!(matches!(
        review(FlowKind::Apply, Variant::Child, &state).unwrap(),
        ReviewProjection::Child(_)
    ));

    state.applicant_information = Some(applicant("Casey", date(2012, 2, 2)));
    assert_eq!(
        redirect(FlowKind::Apply, Variant::Child, &state),
        apply_path("child/contact-apply-child")
    );
}

// =============================================================================
// Renewals
// =============================================================================

#[test]
fn unchanged_renewal_projects_without_changes() {
    let state = state_from(&complete_renewal_patch());

    let ReviewProjection::Renewal(renewal) =
        review(FlowKind::Renew, Variant::AdultChild, &state).unwrap()
    else {
        panic!("expected a renewal projection");
    };
    assert!(renewal.marital_status_change.is_none());
    assert!(renewal.address_change.is_none());
    assert!(renewal.benefits.is_some());
    assert_eq!(renewal.children.len(), 1);
}

#[test]
fn renewal_reviews_existing_children_only() {
    let existing = complete_child("Riley", date(2016, 4, 2));
    let added = new_child("Avery", date(2020, 8, 8));
    let state = state_from(&StatePatch {
        children: Some(vec![existing.clone(), added]),
        ..complete_renewal_patch()
    });

    let projection = review(FlowKind::Renew, Variant::AdultChild, &state).unwrap();
    let ids: Vec<_> = projection.children().iter().map(|child| child.id).collect();
    assert_eq!(ids, vec![existing.id]);

    let only_new = state_from(&StatePatch {
        children: Some(vec![new_child("Avery", date(2020, 8, 8))]),
        ..complete_renewal_patch()
    });
    assert_eq!(
        redirect(FlowKind::Renew, Variant::AdultChild, &only_new),
        renew_path("adult-child/children")
    );
}

#[test]
fn renewal_requires_children_under_18_attestation() {
    let mut state = state_from(&complete_renewal_patch());
    state.all_children_under18 = Some(false);

    assert_eq!(
        redirect(FlowKind::Renew, Variant::AdultChild, &state),
        renew_path("adult-child/children/cannot-renew-child")
    );
}

#[test]
fn reported_changes_are_re_collected() {
    let mut state = state_from(&complete_renewal_patch());
    state.has_marital_status_changed = Some(true);
    assert_eq!(
        redirect(FlowKind::Renew, Variant::AdultChild, &state),
        renew_path("adult-child/marital-status")
    );

    state.marital_status = Some("3".to_string());
    state.has_address_changed = Some(true);
    assert_eq!(
        redirect(FlowKind::Renew, Variant::AdultChild, &state),
        renew_path("adult-child/mailing-address")
    );

    state.mailing_address = Some(mailing_address());
    state.is_home_address_same_as_mailing_address = Some(true);
    let ReviewProjection::Renewal(renewal) =
        review(FlowKind::Renew, Variant::AdultChild, &state).unwrap()
    else {
        panic!("expected a renewal projection");
    };
    assert_eq!(
        renewal.marital_status_change.map(|change| change.marital_status),
        Some("3".to_string())
    );
    assert!(renewal.address_change.is_some());
}

#[test]
fn renewal_type_mismatch_goes_to_renewal_type_question() {
    let state = state_from(&complete_renewal_patch());

    assert_eq!(
        redirect(FlowKind::Renew, Variant::Adult, &state),
        renew_path("type-renewal")
    );
}

#[test]
fn protected_renewal_may_renew_without_children() {
    let state = state_from(&StatePatch {
        children: Some(Vec::new()),
        ..complete_protected_renewal_patch()
    });

    let ReviewProjection::Renewal(renewal) =
        review(FlowKind::ProtectedRenew, Variant::AdultChild, &state).unwrap()
    else {
        panic!("expected a renewal projection");
    };
    assert!(renewal.children.is_empty());
    assert!(renewal.demographic_survey.is_some());
}

#[test]
fn protected_renewal_requires_demographic_survey() {
    let mut state = state_from(&complete_protected_renewal_patch());
    state.demographic_survey = None;

    assert_eq!(
        redirect(FlowKind::ProtectedRenew, Variant::AdultChild, &state),
        format!(
            "/en/protected/renew/{}/adult-child/demographic-survey",
            APP_ID
        )
    );
}
