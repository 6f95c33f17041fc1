//! Order of the answer steps handled by the engine.
//!
//! Each step knows the step before it (for the back link) and the step after it
//! (for a save outside of edit mode). Both depend on the flow and the variant.

use serde::Serialize;

use super::routing::{slug, FlowKind, Step, Variant};
use crate::common::ChildId;

/// Applicant-level answer steps under `/{variant}/…`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicantStep {
    MaritalStatus,
    DentalInsurance,
    BenefitsQuestion,
    DentalBenefits,
}

impl ApplicantStep {
    pub fn slug(&self) -> &'static str {
        match self {
            ApplicantStep::MaritalStatus => slug::MARITAL_STATUS,
            ApplicantStep::DentalInsurance => slug::DENTAL_INSURANCE,
            ApplicantStep::BenefitsQuestion => slug::CONFIRM_BENEFITS,
            ApplicantStep::DentalBenefits => slug::UPDATE_BENEFITS,
        }
    }

    pub fn previous(&self, flow: FlowKind, variant: Variant) -> Step {
        let slug = match self {
            ApplicantStep::MaritalStatus if flow.is_renewal() => slug::CONFIRM_MARITAL_STATUS,
            ApplicantStep::MaritalStatus => slug::APPLICANT_INFORMATION,
            ApplicantStep::DentalInsurance => slug::COMMUNICATION_PREFERENCE,
            ApplicantStep::BenefitsQuestion => slug::DENTAL_INSURANCE,
            ApplicantStep::DentalBenefits => slug::CONFIRM_BENEFITS,
        };
        Step::Variant(variant, slug)
    }

    /// Next step after a save; `has_benefits` is the benefits answer just given.
    pub fn next(&self, flow: FlowKind, variant: Variant, has_benefits: bool) -> Step {
        match self {
            ApplicantStep::MaritalStatus => {
                let slug = if flow.is_protected() {
                    slug::CONTACT_INFORMATION
                } else if flow.is_renewal() {
                    slug::CONFIRM_ADDRESS
                } else {
                    slug::MAILING_ADDRESS
                };
                Step::Variant(variant, slug)
            }
            ApplicantStep::DentalInsurance => Step::Variant(variant, slug::CONFIRM_BENEFITS),
            ApplicantStep::BenefitsQuestion if has_benefits => {
                Step::Variant(variant, slug::UPDATE_BENEFITS)
            }
            ApplicantStep::BenefitsQuestion | ApplicantStep::DentalBenefits => {
                after_applicant_benefits(flow, variant)
            }
        }
    }
}

fn after_applicant_benefits(flow: FlowKind, variant: Variant) -> Step {
    if flow == FlowKind::ProtectedRenew {
        Step::Variant(variant, slug::DEMOGRAPHIC_SURVEY)
    } else if variant.includes_children() {
        Step::Variant(variant, slug::CHILDREN)
    } else {
        Step::review(variant)
    }
}

/// Answer steps of one child under `/{variant}/children/{childId}/…`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStep {
    DentalInsurance,
    BenefitsQuestion,
    DentalBenefits,
}

impl ChildStep {
    pub fn slug(&self) -> &'static str {
        match self {
            ChildStep::DentalInsurance => slug::DENTAL_INSURANCE,
            ChildStep::BenefitsQuestion => slug::CONFIRM_BENEFITS,
            ChildStep::DentalBenefits => slug::UPDATE_BENEFITS,
        }
    }

    pub fn previous(&self, variant: Variant, child_id: ChildId) -> Step {
        let slug = match self {
            ChildStep::DentalInsurance => slug::CHILD_INFORMATION,
            ChildStep::BenefitsQuestion => slug::DENTAL_INSURANCE,
            ChildStep::DentalBenefits => slug::CONFIRM_BENEFITS,
        };
        Step::Child(variant, child_id, slug)
    }

    /// Next step after a save; the last answer of a child returns to the list.
    pub fn next(&self, variant: Variant, child_id: ChildId, has_benefits: bool) -> Step {
        match self {
            ChildStep::DentalInsurance => Step::Child(variant, child_id, slug::CONFIRM_BENEFITS),
            ChildStep::BenefitsQuestion if has_benefits => {
                Step::Child(variant, child_id, slug::UPDATE_BENEFITS)
            }
            ChildStep::BenefitsQuestion | ChildStep::DentalBenefits => {
                Step::Variant(variant, slug::CHILDREN)
            }
        }
    }
}

/// What a step page renders: its back link and the answers it edits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPage<T> {
    pub back: String,
    pub answers: T,
}
