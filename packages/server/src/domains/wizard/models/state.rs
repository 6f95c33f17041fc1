//! Wizard state record and its nested answer types.
//!
//! Every answer is optional: a field stays `None` until the step that collects it
//! has been saved. Absent answers are omitted from the stored JSON, so "unset" and
//! "missing key" mean the same thing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{ApplicationId, ChildId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeOfApplication {
    Adult,
    AdultChild,
    Child,
    Delegate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationYear {
    pub intake_year_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_year_id: Option<String>,
    pub tax_year: String,
    pub coverage_start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsAndConditions {
    pub acknowledge_terms: bool,
    pub acknowledge_privacy: bool,
    pub share_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInformation {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub social_insurance_number: String,
    /// Existing client number, known for renewals only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_number: Option<String>,
}

/// Spouse or common-law partner. Either a full date of birth or only the year
/// is collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInformation {
    pub confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
    pub social_insurance_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredMethod {
    Email,
    Mail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationPreferences {
    pub preferred_language: String,
    pub preferred_method: PreferredMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentalBenefits {
    pub has_federal_benefits: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_social_program: Option<String>,
    pub has_provincial_territorial_benefits: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provincial_territorial_social_program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicSurvey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indigenous_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ethnic_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    pub submitted_on: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildInformation {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub is_parent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_insurance_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildState {
    pub id: ChildId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<ChildInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dental_insurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dental_benefits: Option<DentalBenefits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_federal_provincial_territorial_benefits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographic_survey: Option<DemographicSurvey>,
}

impl ChildState {
    /// A child entry with a fresh id and no answers.
    pub fn new() -> Self {
        Self::with_id(ChildId::new())
    }

    pub fn with_id(id: ChildId) -> Self {
        Self {
            id,
            information: None,
            dental_insurance: None,
            dental_benefits: None,
            has_federal_provincial_territorial_benefits: None,
            demographic_survey: None,
        }
    }
}

impl Default for ChildState {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulated answers for one application in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub id: ApplicationId,
    #[serde(default)]
    pub edit_mode: bool,
    pub last_updated_on: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_year: Option<ApplicationYear>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<TermsAndConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_application: Option<TypeOfApplication>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_filing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_tax_credit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_independently: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_children_under18: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_information: Option<ApplicantInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_information: Option<PartnerInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_marital_status_changed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_preferences: Option<CommunicationPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_address_changed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_home_address_same_as_mailing_address: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dental_insurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_federal_provincial_territorial_benefits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dental_benefits: Option<DentalBenefits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographic_survey: Option<DemographicSurvey>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_info: Option<SubmissionInfo>,
}

impl WizardState {
    /// A freshly started application: only meta fields are populated.
    pub fn new(id: ApplicationId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            edit_mode: false,
            last_updated_on: now,
            application_year: None,
            terms_and_conditions: None,
            type_of_application: None,
            tax_filing: None,
            date_of_birth: None,
            disability_tax_credit: None,
            living_independently: None,
            all_children_under18: None,
            applicant_information: None,
            marital_status: None,
            partner_information: None,
            has_marital_status_changed: None,
            contact_information: None,
            communication_preferences: None,
            email: None,
            email_verified: None,
            has_address_changed: None,
            mailing_address: None,
            home_address: None,
            is_home_address_same_as_mailing_address: None,
            dental_insurance: None,
            has_federal_provincial_territorial_benefits: None,
            dental_benefits: None,
            demographic_survey: None,
            children: Vec::new(),
            submission_info: None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submission_info.is_some()
    }

    pub fn child(&self, child_id: ChildId) -> Option<&ChildState> {
        self.children.iter().find(|child| child.id == child_id)
    }
}
