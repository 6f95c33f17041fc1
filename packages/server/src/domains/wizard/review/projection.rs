//! Typed review projections.
//!
//! A projection is built only after its chain has validated, so every field it
//! carries is known to be present. A value the chain guarantees but that is missing
//! anyway is reported as [`WizardError::Invariant`] rather than guessed.

use chrono::NaiveDate;
use serde::Serialize;

use crate::common::{ApplicationId, ChildId};
use crate::domains::wizard::errors::{WizardError, WizardResult};
use crate::domains::wizard::models::{
    Address, ApplicantInformation, ApplicationYear, ChildState, CommunicationPreferences,
    ContactInformation, DemographicSurvey, DentalBenefits, PartnerInformation, WizardState,
};
use crate::domains::wizard::routing::Variant;

/// Clone of a value the chain has already required.
pub(crate) fn present<T: Clone>(value: &Option<T>, field: &str) -> WizardResult<T> {
    value.clone().ok_or_else(|| WizardError::invariant(field))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedMaritalStatus {
    pub marital_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_information: Option<PartnerInformation>,
}

impl ReviewedMaritalStatus {
    fn from_state(state: &WizardState) -> WizardResult<Self> {
        Ok(Self {
            marital_status: present(&state.marital_status, "maritalStatus")?,
            partner_information: state.partner_information.clone(),
        })
    }
}

/// Mailing and home address, with "same as mailing" already resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedAddresses {
    pub mailing_address: Address,
    pub home_address: Address,
}

impl ReviewedAddresses {
    fn from_state(state: &WizardState) -> WizardResult<Self> {
        let mailing_address = present(&state.mailing_address, "mailingAddress")?;
        let home_address = if state.is_home_address_same_as_mailing_address == Some(true) {
            mailing_address.clone()
        } else {
            present(&state.home_address, "homeAddress")?
        };
        Ok(Self {
            mailing_address,
            home_address,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedContact {
    /// Collected in authenticated flows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<ContactInformation>,
    pub communication_preferences: CommunicationPreferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ReviewedContact {
    fn from_state(state: &WizardState, protected: bool) -> WizardResult<Self> {
        let contact_information = if protected {
            Some(present(&state.contact_information, "contactInformation")?)
        } else {
            None
        };
        Ok(Self {
            contact_information,
            communication_preferences: present(
                &state.communication_preferences,
                "communicationPreferences",
            )?,
            email: state.email.clone(),
        })
    }
}

/// Dental answers of one person. Benefits default to "none" when the person said
/// they have no federal, provincial or territorial benefits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedBenefits {
    pub dental_insurance: bool,
    pub dental_benefits: DentalBenefits,
}

impl ReviewedBenefits {
    fn resolve(
        dental_insurance: Option<bool>,
        has_benefits: Option<bool>,
        dental_benefits: &Option<DentalBenefits>,
        prefix: &str,
    ) -> WizardResult<Self> {
        let dental_insurance = dental_insurance
            .ok_or_else(|| WizardError::invariant(&format!("{}dentalInsurance", prefix)))?;
        let dental_benefits = match has_benefits {
            Some(true) => dental_benefits
                .clone()
                .ok_or_else(|| WizardError::invariant(&format!("{}dentalBenefits", prefix)))?,
            Some(false) => DentalBenefits::default(),
            None => {
                return Err(WizardError::invariant(&format!(
                    "{}hasFederalProvincialTerritorialBenefits",
                    prefix
                )))
            }
        };
        Ok(Self {
            dental_insurance,
            dental_benefits,
        })
    }

    fn applicant(state: &WizardState) -> WizardResult<Self> {
        Self::resolve(
            state.dental_insurance,
            state.has_federal_provincial_territorial_benefits,
            &state.dental_benefits,
            "",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedChild {
    pub id: ChildId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_insurance_number: Option<String>,
    pub benefits: ReviewedBenefits,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographic_survey: Option<DemographicSurvey>,
}

impl ReviewedChild {
    pub(crate) fn from_child(child: &ChildState) -> WizardResult<Self> {
        let information = present(&child.information, "children[].information")?;
        Ok(Self {
            id: child.id,
            first_name: information.first_name,
            last_name: information.last_name,
            date_of_birth: information.date_of_birth,
            social_insurance_number: information.social_insurance_number,
            benefits: ReviewedBenefits::resolve(
                child.dental_insurance,
                child.has_federal_provincial_territorial_benefits,
                &child.dental_benefits,
                "children[].",
            )?,
            demographic_survey: child.demographic_survey.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdultApplicationReview {
    pub id: ApplicationId,
    pub application_year: ApplicationYear,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disability_tax_credit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_independently: Option<bool>,
    pub applicant_information: ApplicantInformation,
    pub marital_status: ReviewedMaritalStatus,
    pub contact: ReviewedContact,
    pub addresses: ReviewedAddresses,
    pub benefits: ReviewedBenefits,
}

impl AdultApplicationReview {
    pub(crate) fn from_state(state: &WizardState, protected: bool) -> WizardResult<Self> {
        Ok(Self {
            id: state.id,
            application_year: present(&state.application_year, "applicationYear")?,
            date_of_birth: present(&state.date_of_birth, "dateOfBirth")?,
            disability_tax_credit: state.disability_tax_credit,
            living_independently: state.living_independently,
            applicant_information: present(&state.applicant_information, "applicantInformation")?,
            marital_status: ReviewedMaritalStatus::from_state(state)?,
            contact: ReviewedContact::from_state(state, protected)?,
            addresses: ReviewedAddresses::from_state(state)?,
            benefits: ReviewedBenefits::applicant(state)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdultChildApplicationReview {
    #[serde(flatten)]
    pub adult: AdultApplicationReview,
    pub children: Vec<ReviewedChild>,
}

/// Application filed by a parent or guardian for their children only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildApplicationReview {
    pub id: ApplicationId,
    pub application_year: ApplicationYear,
    pub applicant_information: ApplicantInformation,
    pub marital_status: ReviewedMaritalStatus,
    pub contact: ReviewedContact,
    pub addresses: ReviewedAddresses,
    pub children: Vec<ReviewedChild>,
}

impl ChildApplicationReview {
    pub(crate) fn from_state(
        state: &WizardState,
        protected: bool,
        children: Vec<ReviewedChild>,
    ) -> WizardResult<Self> {
        Ok(Self {
            id: state.id,
            application_year: present(&state.application_year, "applicationYear")?,
            applicant_information: present(&state.applicant_information, "applicantInformation")?,
            marital_status: ReviewedMaritalStatus::from_state(state)?,
            contact: ReviewedContact::from_state(state, protected)?,
            addresses: ReviewedAddresses::from_state(state)?,
            children,
        })
    }
}

/// Renewal of existing coverage. Marital status and addresses are only carried
/// when the applicant reported a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalReview {
    pub id: ApplicationId,
    pub variant: Variant,
    pub application_year: ApplicationYear,
    pub applicant_information: ApplicantInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status_change: Option<ReviewedMaritalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_change: Option<ReviewedAddresses>,
    pub contact: ReviewedContact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<ReviewedBenefits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographic_survey: Option<DemographicSurvey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReviewedChild>,
}

impl RenewalReview {
    pub(crate) fn from_state(
        state: &WizardState,
        variant: Variant,
        protected: bool,
        children: Vec<ReviewedChild>,
    ) -> WizardResult<Self> {
        let marital_status_change = if state.has_marital_status_changed == Some(true) {
            Some(ReviewedMaritalStatus::from_state(state)?)
        } else {
            None
        };
        let address_change = if state.has_address_changed == Some(true) {
            Some(ReviewedAddresses::from_state(state)?)
        } else {
            None
        };
        let benefits = if variant.includes_applicant_benefits() {
            Some(ReviewedBenefits::applicant(state)?)
        } else {
            None
        };
        let demographic_survey = if protected {
            Some(present(&state.demographic_survey, "demographicSurvey")?)
        } else {
            None
        };

        Ok(Self {
            id: state.id,
            variant,
            application_year: present(&state.application_year, "applicationYear")?,
            applicant_information: present(&state.applicant_information, "applicantInformation")?,
            marital_status_change,
            address_change,
            contact: ReviewedContact::from_state(state, protected)?,
            benefits,
            demographic_survey,
            children,
        })
    }
}

/// Result of a successful review, one shape per flow variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ReviewProjection {
    Adult(AdultApplicationReview),
    AdultChild(AdultChildApplicationReview),
    Child(ChildApplicationReview),
    Renewal(RenewalReview),
}

impl ReviewProjection {
    pub fn id(&self) -> ApplicationId {
        match self {
            ReviewProjection::Adult(review) => review.id,
            ReviewProjection::AdultChild(review) => review.adult.id,
            ReviewProjection::Child(review) => review.id,
            ReviewProjection::Renewal(review) => review.id,
        }
    }

    pub fn children(&self) -> &[ReviewedChild] {
        match self {
            ReviewProjection::Adult(_) => &[],
            ReviewProjection::AdultChild(review) => &review.children,
            ReviewProjection::Child(review) => &review.children,
            ReviewProjection::Renewal(review) => &review.children,
        }
    }
}
