//! Reusable pieces of the applicant-level review chains.
//!
//! Each flow variant concatenates these in its canonical step order. Segments
//! only decide *what* to check; which segments a flow includes is decided by the
//! chain builders in `apply` and `renew`.

use crate::domains::wizard::chain::{applicant_guard, ApplicantGuard};
use crate::domains::wizard::classifier::AgeCategory;
use crate::domains::wizard::models::{PreferredMethod, TypeOfApplication};
use crate::domains::wizard::routing::{slug, Navigator, Step, Variant};

/// Type question answered, not a delegate, and matching the variant under review.
pub fn application_type<'a>(nav: &Navigator<'_>) -> Vec<ApplicantGuard<'a>> {
    vec![
        applicant_guard("type-of-application-defined", nav.type_step(), |f| {
            f.state.type_of_application.is_some()
        }),
        applicant_guard("not-a-delegate", nav.delegate_step(), |f| {
            f.state.type_of_application != Some(TypeOfApplication::Delegate)
        }),
        applicant_guard("type-matches-variant", nav.type_step(), |f| {
            f.state.type_of_application == Some(f.variant.type_of_application())
        }),
    ]
}

pub fn tax_filing<'a>() -> Vec<ApplicantGuard<'a>> {
    vec![
        applicant_guard("tax-filing-defined", Step::Flow(slug::TAX_FILING), |f| {
            f.state.tax_filing.is_some()
        }),
        applicant_guard("taxes-filed", Step::Flow(slug::FILE_TAXES), |f| {
            f.state.tax_filing == Some(true)
        }),
    ]
}

/// Age branch of an adult applicant: children are sent to a parent or guardian,
/// youth must live independently, adults under the senior threshold need the
/// disability tax credit. Seniors pass straight through.
pub fn adult_eligibility<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let step = |slug| Step::Variant(variant, slug);
    vec![
        applicant_guard("date-of-birth-defined", step(slug::DATE_OF_BIRTH), |f| {
            f.state.date_of_birth.is_some()
        }),
        applicant_guard("applicant-not-a-child", step(slug::PARENT_OR_GUARDIAN), |f| {
            !f.is_age(AgeCategory::Children)
        }),
        applicant_guard(
            "youth-living-independently-defined",
            step(slug::LIVING_INDEPENDENTLY),
            |f| !f.is_age(AgeCategory::Youth) || f.state.living_independently.is_some(),
        ),
        applicant_guard(
            "youth-living-independently",
            step(slug::PARENT_OR_GUARDIAN),
            |f| !f.is_age(AgeCategory::Youth) || f.state.living_independently == Some(true),
        ),
        applicant_guard(
            "adult-disability-tax-credit-defined",
            step(slug::DISABILITY_TAX_CREDIT),
            |f| !f.is_age(AgeCategory::Adults) || f.state.disability_tax_credit.is_some(),
        ),
        applicant_guard(
            "adult-disability-tax-credit",
            step(slug::DOB_ELIGIBILITY),
            |f| !f.is_age(AgeCategory::Adults) || f.state.disability_tax_credit == Some(true),
        ),
    ]
}

pub fn applicant_information<'a>(target: Step) -> Vec<ApplicantGuard<'a>> {
    vec![applicant_guard(
        "applicant-information-defined",
        target,
        |f| f.state.applicant_information.is_some(),
    )]
}

/// A parent or guardian applying for children must not be a child themselves.
pub fn parent_not_a_child<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    vec![applicant_guard(
        "parent-not-a-child",
        Step::Variant(variant, slug::CONTACT_APPLY_CHILD),
        |f| f.applicant_age_category() != Some(AgeCategory::Children),
    )]
}

/// Marital status answered and partner information present exactly when the
/// status means the applicant has a partner.
pub fn marital_status<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let target = Step::Variant(variant, slug::MARITAL_STATUS);
    vec![
        applicant_guard("marital-status-defined", target, |f| {
            f.state.marital_status.is_some()
        }),
        applicant_guard("partner-information-when-partnered", target, |f| {
            !f.has_partner() || f.state.partner_information.is_some()
        }),
        applicant_guard("no-partner-information-when-single", target, |f| {
            f.has_partner() || f.state.partner_information.is_none()
        }),
    ]
}

/// Renewal form of [`marital_status`]: only checked when the applicant reported
/// a change.
pub fn marital_status_change<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let target = Step::Variant(variant, slug::MARITAL_STATUS);
    vec![
        applicant_guard(
            "marital-status-change-defined",
            Step::Variant(variant, slug::CONFIRM_MARITAL_STATUS),
            |f| f.state.has_marital_status_changed.is_some(),
        ),
        applicant_guard("changed-marital-status-defined", target, |f| {
            !f.marital_status_changed() || f.state.marital_status.is_some()
        }),
        applicant_guard("changed-partner-information-when-partnered", target, |f| {
            !f.marital_status_changed() || !f.has_partner() || f.state.partner_information.is_some()
        }),
        applicant_guard("changed-no-partner-information-when-single", target, |f| {
            !f.marital_status_changed() || f.has_partner() || f.state.partner_information.is_none()
        }),
    ]
}

/// Phone and email confirmation, collected in authenticated flows only.
pub fn contact_information<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    vec![applicant_guard(
        "contact-information-defined",
        Step::Variant(variant, slug::CONTACT_INFORMATION),
        |f| f.state.contact_information.is_some(),
    )]
}

pub fn addresses<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let mailing = Step::Variant(variant, slug::MAILING_ADDRESS);
    vec![
        applicant_guard("mailing-address-defined", mailing, |f| {
            f.state.mailing_address.is_some()
        }),
        applicant_guard("home-address-choice-defined", mailing, |f| {
            f.state.is_home_address_same_as_mailing_address.is_some()
        }),
        applicant_guard(
            "home-address-defined",
            Step::Variant(variant, slug::HOME_ADDRESS),
            |f| {
                f.state.is_home_address_same_as_mailing_address == Some(true)
                    || f.state.home_address.is_some()
            },
        ),
    ]
}

/// Renewal form of [`addresses`]: only checked when the applicant reported a move.
pub fn address_change<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let mailing = Step::Variant(variant, slug::MAILING_ADDRESS);
    vec![
        applicant_guard(
            "address-change-defined",
            Step::Variant(variant, slug::CONFIRM_ADDRESS),
            |f| f.state.has_address_changed.is_some(),
        ),
        applicant_guard("changed-mailing-address-defined", mailing, |f| {
            !f.address_changed() || f.state.mailing_address.is_some()
        }),
        applicant_guard("changed-home-address-choice-defined", mailing, |f| {
            !f.address_changed() || f.state.is_home_address_same_as_mailing_address.is_some()
        }),
        applicant_guard(
            "changed-home-address-defined",
            Step::Variant(variant, slug::HOME_ADDRESS),
            |f| {
                !f.address_changed()
                    || f.state.is_home_address_same_as_mailing_address == Some(true)
                    || f.state.home_address.is_some()
            },
        ),
    ]
}

/// Communication preferences answered; choosing email requires a verified address.
pub fn communication<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    vec![
        applicant_guard(
            "communication-preferences-defined",
            Step::Variant(variant, slug::COMMUNICATION_PREFERENCE),
            |f| f.state.communication_preferences.is_some(),
        ),
        applicant_guard(
            "email-verified-for-email-method",
            Step::Variant(variant, slug::VERIFY_EMAIL),
            |f| {
                let wants_email = f
                    .state
                    .communication_preferences
                    .as_ref()
                    .is_some_and(|prefs| prefs.preferred_method == PreferredMethod::Email);
                !wants_email
                    || (f.state.email.is_some() && f.state.email_verified == Some(true))
            },
        ),
    ]
}

pub fn dental_answers<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    vec![
        applicant_guard(
            "dental-insurance-defined",
            Step::Variant(variant, slug::DENTAL_INSURANCE),
            |f| f.state.dental_insurance.is_some(),
        ),
        applicant_guard(
            "benefits-question-defined",
            Step::Variant(variant, slug::CONFIRM_BENEFITS),
            |f| f.state.has_federal_provincial_territorial_benefits.is_some(),
        ),
        applicant_guard(
            "dental-benefits-defined",
            Step::Variant(variant, slug::UPDATE_BENEFITS),
            |f| {
                f.state.has_federal_provincial_territorial_benefits != Some(true)
                    || f.state.dental_benefits.is_some()
            },
        ),
    ]
}

pub fn demographic_survey<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    vec![applicant_guard(
        "demographic-survey-defined",
        Step::Variant(variant, slug::DEMOGRAPHIC_SURVEY),
        |f| f.state.demographic_survey.is_some(),
    )]
}

/// Renewal attestation on the children page that every child is still under 18.
pub fn children_under_18<'a>(variant: Variant) -> Vec<ApplicantGuard<'a>> {
    vec![
        applicant_guard(
            "all-children-under-18-defined",
            Step::Variant(variant, slug::CHILDREN),
            |f| f.state.all_children_under18.is_some(),
        ),
        applicant_guard(
            "all-children-under-18",
            Step::Variant(variant, slug::CANNOT_RENEW_CHILD),
            |f| f.state.all_children_under18 == Some(true),
        ),
    ]
}
