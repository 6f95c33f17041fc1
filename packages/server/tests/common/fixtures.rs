//! Test fixtures for building wizard states.
//!
//! Each `complete_*` fixture passes its flow's whole review chain; tests knock
//! single answers out to walk the chain.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use portal_core::common::ApplicationId;
use portal_core::domains::wizard::{
    Address, ApplicantInformation, ApplicationYear, ChildInformation, ChildState,
    CommunicationPreferences, ContactInformation, DemographicSurvey, PartnerInformation,
    PreferredMethod, StatePatch, TermsAndConditions, TypeOfApplication, WizardState,
};

pub const APP_ID: &str = "5d7f9b1c-3e5a-4c7e-9a1b-2c4d6e8f0a1b";

/// Frozen "now" of every test: 2026-06-01 12:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn terms() -> TermsAndConditions {
    TermsAndConditions {
        acknowledge_terms: true,
        acknowledge_privacy: true,
        share_data: true,
    }
}

pub fn application_year() -> ApplicationYear {
    ApplicationYear {
        intake_year_id: "2026".to_string(),
        renewal_year_id: Some("2026-R".to_string()),
        tax_year: "2025".to_string(),
        coverage_start_date: date(2026, 7, 1),
    }
}

pub fn applicant(first_name: &str, date_of_birth: NaiveDate) -> ApplicantInformation {
    ApplicantInformation {
        first_name: first_name.to_string(),
        last_name: "Gagnon".to_string(),
        date_of_birth,
        social_insurance_number: "046454286".to_string(),
        client_number: None,
    }
}

pub fn mailing_address() -> Address {
    Address {
        address: "221 Rue Laurier".to_string(),
        city: "Gatineau".to_string(),
        province: Some("QC".to_string()),
        postal_code: Some("J8X 3W6".to_string()),
        country: "CAN".to_string(),
    }
}

pub fn home_address() -> Address {
    Address {
        address: "17 Elm Street".to_string(),
        city: "Ottawa".to_string(),
        province: Some("ON".to_string()),
        postal_code: Some("K1P 5G3".to_string()),
        country: "CAN".to_string(),
    }
}

pub fn partner() -> PartnerInformation {
    PartnerInformation {
        confirm: true,
        date_of_birth: None,
        year_of_birth: Some(1983),
        social_insurance_number: "130692544".to_string(),
        first_name: None,
        last_name: None,
    }
}

pub fn mail_preferences() -> CommunicationPreferences {
    CommunicationPreferences {
        preferred_language: "en".to_string(),
        preferred_method: PreferredMethod::Mail,
    }
}

pub fn contact_information() -> ContactInformation {
    ContactInformation {
        phone_number: Some("613-555-0142".to_string()),
        phone_number_alt: None,
        email: None,
    }
}

/// A child with every per-child answer given
pub fn complete_child(first_name: &str, date_of_birth: NaiveDate) -> ChildState {
    let mut child = ChildState::new();
    child.information = Some(ChildInformation {
        first_name: first_name.to_string(),
        last_name: "Gagnon".to_string(),
        date_of_birth,
        is_parent: true,
        social_insurance_number: None,
    });
    child.dental_insurance = Some(false);
    child.has_federal_provincial_territorial_benefits = Some(false);
    child
}

/// A child added during a renewal; no dental answer yet
pub fn new_child(first_name: &str, date_of_birth: NaiveDate) -> ChildState {
    let mut child = complete_child(first_name, date_of_birth);
    child.dental_insurance = None;
    child.has_federal_provincial_territorial_benefits = None;
    child
}

/// Adult applicant, aged 41 on review day, single, mail preference, no benefits
pub fn complete_adult_patch() -> StatePatch {
    StatePatch {
        application_year: Some(application_year()),
        terms_and_conditions: Some(terms()),
        type_of_application: Some(TypeOfApplication::Adult),
        tax_filing: Some(true),
        date_of_birth: Some(date(1985, 1, 10)),
        disability_tax_credit: Some(true),
        applicant_information: Some(applicant("Morgan", date(1985, 1, 10))),
        marital_status: Some("3".to_string()),
        mailing_address: Some(mailing_address()),
        is_home_address_same_as_mailing_address: Some(true),
        communication_preferences: Some(mail_preferences()),
        dental_insurance: Some(false),
        has_federal_provincial_territorial_benefits: Some(false),
        ..Default::default()
    }
}

pub fn complete_adult_child_patch() -> StatePatch {
    StatePatch {
        type_of_application: Some(TypeOfApplication::AdultChild),
        children: Some(vec![complete_child("Riley", date(2016, 4, 2))]),
        ..complete_adult_patch()
    }
}

/// Parent or guardian applying for children only
pub fn complete_child_patch() -> StatePatch {
    StatePatch {
        application_year: Some(application_year()),
        terms_and_conditions: Some(terms()),
        type_of_application: Some(TypeOfApplication::Child),
        tax_filing: Some(true),
        applicant_information: Some(applicant("Morgan", date(1985, 1, 10))),
        marital_status: Some("3".to_string()),
        mailing_address: Some(mailing_address()),
        is_home_address_same_as_mailing_address: Some(true),
        communication_preferences: Some(mail_preferences()),
        children: Some(vec![complete_child("Riley", date(2016, 4, 2))]),
        ..Default::default()
    }
}

/// Renewal with no reported changes and one existing child
pub fn complete_renewal_patch() -> StatePatch {
    StatePatch {
        application_year: Some(application_year()),
        terms_and_conditions: Some(terms()),
        type_of_application: Some(TypeOfApplication::AdultChild),
        applicant_information: Some(ApplicantInformation {
            client_number: Some("00000000001".to_string()),
            ..applicant("Morgan", date(1985, 1, 10))
        }),
        has_marital_status_changed: Some(false),
        has_address_changed: Some(false),
        communication_preferences: Some(mail_preferences()),
        dental_insurance: Some(false),
        has_federal_provincial_territorial_benefits: Some(false),
        all_children_under18: Some(true),
        children: Some(vec![complete_child("Riley", date(2016, 4, 2))]),
        ..Default::default()
    }
}

/// Protected renewal: contact details and demographic survey added
pub fn complete_protected_renewal_patch() -> StatePatch {
    StatePatch {
        contact_information: Some(contact_information()),
        demographic_survey: Some(DemographicSurvey::default()),
        all_children_under18: None,
        ..complete_renewal_patch()
    }
}

/// `patch` laid over a fresh state, as `start` would store it
pub fn state_from(patch: &StatePatch) -> WizardState {
    let initial = WizardState::new(ApplicationId::parse(APP_ID).unwrap(), now());
    portal_core::domains::wizard::codec::apply_patch(&initial, patch, None).unwrap()
}
