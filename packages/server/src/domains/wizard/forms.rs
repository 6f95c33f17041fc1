//! Form input validation.
//!
//! Problems with submitted values come back as [`FieldErrors`] keyed by form
//! field, for the same step to re-render. They never redirect.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::classifier::FlowRules;
use super::errors::FieldErrors;
use super::models::{ApplicantInformation, DentalBenefits, PartnerInformation};
use super::routing::{slug, FlowKind, Step, Variant};

const MAX_NAME_LENGTH: usize = 100;

lazy_static! {
    // 9 digits, optionally grouped 3-3-3 by spaces or hyphens
    static ref SIN_REGEX: Regex = Regex::new(r"^\d{3}[ -]?\d{3}[ -]?\d{3}$").unwrap();
}

/// Raw applicant-information form as posted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInformationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub social_insurance_number: String,
    #[serde(default)]
    pub client_number: Option<String>,
}

impl ApplicantInformationForm {
    pub fn validate(&self, today: NaiveDate) -> Result<ApplicantInformation, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.add("firstName", "first-name-required");
        } else if first_name.chars().count() > MAX_NAME_LENGTH {
            errors.add("firstName", "first-name-too-long");
        }

        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            errors.add("lastName", "last-name-required");
        } else if last_name.chars().count() > MAX_NAME_LENGTH {
            errors.add("lastName", "last-name-too-long");
        }

        let date_of_birth = match parse_date_of_birth(&self.date_of_birth, today) {
            Ok(date) => Some(date),
            Err(code) => {
                errors.add("dateOfBirth", code);
                None
            }
        };

        let social_insurance_number = match normalize_sin(&self.social_insurance_number) {
            Ok(sin) => Some(sin),
            Err(code) => {
                errors.add("socialInsuranceNumber", code);
                None
            }
        };

        match (date_of_birth, social_insurance_number) {
            (Some(date_of_birth), Some(social_insurance_number)) if errors.is_empty() => {
                Ok(ApplicantInformation {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    date_of_birth,
                    social_insurance_number,
                    client_number: self
                        .client_number
                        .as_deref()
                        .map(str::trim)
                        .filter(|number| !number.is_empty())
                        .map(str::to_string),
                })
            }
            _ => Err(errors),
        }
    }

    /// Step that follows applicant information outside of edit mode.
    pub fn next_step(flow: FlowKind, variant: Variant) -> Step {
        if !flow.is_renewal() {
            return Step::Variant(variant, slug::MARITAL_STATUS);
        }
        if variant.includes_applicant_benefits() {
            Step::Variant(variant, slug::CONFIRM_MARITAL_STATUS)
        } else if flow.is_protected() {
            Step::Variant(variant, slug::CONTACT_INFORMATION)
        } else {
            Step::Variant(variant, slug::CONFIRM_ADDRESS)
        }
    }
}

/// Raw partner fields of the marital-status form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInformationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub social_insurance_number: String,
    #[serde(default)]
    pub confirm: bool,
}

/// Raw marital-status form. Partner fields are read only when the status means
/// the applicant has a partner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaritalStatusForm {
    #[serde(default)]
    pub marital_status: String,
    #[serde(default)]
    pub partner_information: Option<PartnerInformationForm>,
}

/// Validated marital-status answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaritalStatusAnswers {
    pub marital_status: String,
    pub partner_information: Option<PartnerInformation>,
}

impl MaritalStatusForm {
    pub fn validate(&self, rules: &FlowRules, today: NaiveDate) -> Result<MaritalStatusAnswers, FieldErrors> {
        let mut errors = FieldErrors::new();

        let marital_status = self.marital_status.trim();
        if marital_status.is_empty() {
            errors.add("maritalStatus", "marital-status-required");
            return Err(errors);
        }
        if marital_status.parse::<u32>().is_err() {
            errors.add("maritalStatus", "marital-status-invalid");
            return Err(errors);
        }

        if !rules.has_partner(marital_status) {
            return Ok(MaritalStatusAnswers {
                marital_status: marital_status.to_string(),
                partner_information: None,
            });
        }

        let Some(partner) = &self.partner_information else {
            errors.add("partnerInformation", "partner-information-required");
            return Err(errors);
        };

        let first_name = partner.first_name.trim();
        if first_name.is_empty() {
            errors.add("partnerFirstName", "first-name-required");
        }
        let last_name = partner.last_name.trim();
        if last_name.is_empty() {
            errors.add("partnerLastName", "last-name-required");
        }
        let date_of_birth = parse_date_of_birth(&partner.date_of_birth, today)
            .map_err(|code| errors.add("partnerDateOfBirth", code))
            .ok();
        let social_insurance_number = normalize_sin(&partner.social_insurance_number)
            .map_err(|code| errors.add("partnerSocialInsuranceNumber", code))
            .ok();
        if !partner.confirm {
            errors.add("partnerConfirm", "partner-consent-required");
        }

        match (date_of_birth, social_insurance_number) {
            (Some(date_of_birth), Some(social_insurance_number)) if errors.is_empty() => {
                Ok(MaritalStatusAnswers {
                    marital_status: marital_status.to_string(),
                    partner_information: Some(PartnerInformation {
                        confirm: true,
                        date_of_birth: Some(date_of_birth),
                        year_of_birth: None,
                        social_insurance_number,
                        first_name: Some(first_name.to_string()),
                        last_name: Some(last_name.to_string()),
                    }),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Dental insurance question, asked of the applicant and of each child.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentalInsuranceForm {
    #[serde(default)]
    pub dental_insurance: Option<bool>,
}

impl DentalInsuranceForm {
    pub fn validate(&self) -> Result<bool, FieldErrors> {
        required_answer(self.dental_insurance, "dentalInsurance", "dental-insurance-required")
    }
}

/// Whether the person has federal, provincial or territorial dental benefits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitsQuestionForm {
    #[serde(default)]
    pub has_federal_provincial_territorial_benefits: Option<bool>,
}

impl BenefitsQuestionForm {
    pub fn validate(&self) -> Result<bool, FieldErrors> {
        required_answer(
            self.has_federal_provincial_territorial_benefits,
            "hasFederalProvincialTerritorialBenefits",
            "benefits-answer-required",
        )
    }
}

/// Details of the benefits, when the benefits question was answered yes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DentalBenefitsForm {
    #[serde(default)]
    pub has_federal_benefits: Option<bool>,
    #[serde(default)]
    pub federal_social_program: Option<String>,
    #[serde(default)]
    pub has_provincial_territorial_benefits: Option<bool>,
    #[serde(default)]
    pub provincial_territorial_social_program: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
}

impl DentalBenefitsForm {
    pub fn validate(&self) -> Result<DentalBenefits, FieldErrors> {
        let mut errors = FieldErrors::new();

        let has_federal_benefits = self.has_federal_benefits;
        if has_federal_benefits.is_none() {
            errors.add("hasFederalBenefits", "federal-benefits-answer-required");
        }
        let federal_social_program = non_blank(&self.federal_social_program);
        if has_federal_benefits == Some(true) && federal_social_program.is_none() {
            errors.add("federalSocialProgram", "federal-program-required");
        }

        let has_provincial_territorial_benefits = self.has_provincial_territorial_benefits;
        if has_provincial_territorial_benefits.is_none() {
            errors.add(
                "hasProvincialTerritorialBenefits",
                "provincial-benefits-answer-required",
            );
        }
        let province = non_blank(&self.province);
        let provincial_territorial_social_program =
            non_blank(&self.provincial_territorial_social_program);
        if has_provincial_territorial_benefits == Some(true) {
            if province.is_none() {
                errors.add("province", "province-required");
            }
            if provincial_territorial_social_program.is_none() {
                errors.add(
                    "provincialTerritorialSocialProgram",
                    "provincial-program-required",
                );
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let has_federal_benefits = has_federal_benefits == Some(true);
        let has_provincial_territorial_benefits = has_provincial_territorial_benefits == Some(true);
        Ok(DentalBenefits {
            has_federal_benefits,
            federal_social_program: federal_social_program.filter(|_| has_federal_benefits),
            has_provincial_territorial_benefits,
            provincial_territorial_social_program: provincial_territorial_social_program
                .filter(|_| has_provincial_territorial_benefits),
            province: province.filter(|_| has_provincial_territorial_benefits),
        })
    }
}

fn required_answer(answer: Option<bool>, field: &str, code: &str) -> Result<bool, FieldErrors> {
    answer.ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.add(field, code);
        errors
    })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_date_of_birth(raw: &str, today: NaiveDate) -> Result<NaiveDate, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("date-of-birth-required");
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| "date-of-birth-invalid")?;
    if date > today {
        return Err("date-of-birth-future");
    }
    Ok(date)
}

/// Digits of a social insurance number, if it is well formed and passes the
/// Luhn check.
pub fn normalize_sin(raw: &str) -> Result<String, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("sin-required");
    }
    if !SIN_REGEX.is_match(raw) {
        return Err("sin-invalid");
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if !luhn_valid(&digits) {
        return Err("sin-invalid");
    }
    Ok(digits)
}

fn luhn_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}
