//! Partial updates to a stored [`WizardState`](super::WizardState).
//!
//! A patch names only the answers a step collected. It is serialized with absent
//! fields skipped and overlaid key by key onto the stored record, so a save can
//! never clobber answers it does not mention. `id` and `lastUpdatedOn` are not
//! patchable.

use serde::{Deserialize, Serialize};

use super::state::{
    Address, ApplicantInformation, ApplicationYear, ChildState, CommunicationPreferences,
    ContactInformation, DemographicSurvey, DentalBenefits, PartnerInformation, SubmissionInfo,
    TermsAndConditions, TypeOfApplication,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_year: Option<ApplicationYear>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<TermsAndConditions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_application: Option<TypeOfApplication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_filing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<chrono::NaiveDate>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_info: Option<SubmissionInfo>,
}

impl StatePatch {
    pub fn edit_mode(edit_mode: bool) -> Self {
        Self {
            edit_mode: Some(edit_mode),
            ..Default::default()
        }
    }
}

/// A stored answer that a save may delete outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateField {
    TypeOfApplication,
    DateOfBirth,
    DisabilityTaxCredit,
    LivingIndependently,
    AllChildrenUnder18,
    ApplicantInformation,
    MaritalStatus,
    PartnerInformation,
    ContactInformation,
    CommunicationPreferences,
    Email,
    EmailVerified,
    MailingAddress,
    HomeAddress,
    IsHomeAddressSameAsMailingAddress,
    DentalInsurance,
    HasFederalProvincialTerritorialBenefits,
    DentalBenefits,
    DemographicSurvey,
    Children,
}

impl StateField {
    /// Key of the field in the stored record.
    pub fn key(&self) -> &'static str {
        match self {
            StateField::TypeOfApplication => "typeOfApplication",
            StateField::DateOfBirth => "dateOfBirth",
            StateField::DisabilityTaxCredit => "disabilityTaxCredit",
            StateField::LivingIndependently => "livingIndependently",
            StateField::AllChildrenUnder18 => "allChildrenUnder18",
            StateField::ApplicantInformation => "applicantInformation",
            StateField::MaritalStatus => "maritalStatus",
            StateField::PartnerInformation => "partnerInformation",
            StateField::ContactInformation => "contactInformation",
            StateField::CommunicationPreferences => "communicationPreferences",
            StateField::Email => "email",
            StateField::EmailVerified => "emailVerified",
            StateField::MailingAddress => "mailingAddress",
            StateField::HomeAddress => "homeAddress",
            StateField::IsHomeAddressSameAsMailingAddress => "isHomeAddressSameAsMailingAddress",
            StateField::DentalInsurance => "dentalInsurance",
            StateField::HasFederalProvincialTerritorialBenefits => {
                "hasFederalProvincialTerritorialBenefits"
            }
            StateField::DentalBenefits => "dentalBenefits",
            StateField::DemographicSurvey => "demographicSurvey",
            StateField::Children => "children",
        }
    }
}
