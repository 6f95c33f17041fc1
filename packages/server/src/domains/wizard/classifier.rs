//! Category facts derived from raw answers.
//!
//! Age cut-offs and marital status codes are business rules owned by the program,
//! so they live in [`FlowRules`] and are loaded from configuration instead of being
//! spelled out in each chain.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::models::ChildState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    Children,
    Youth,
    Adults,
    Seniors,
}

impl AgeCategory {
    /// Adults and seniors can no longer be covered as someone's dependant.
    pub fn is_adult(&self) -> bool {
        matches!(self, AgeCategory::Adults | AgeCategory::Seniors)
    }
}

/// Lower bounds, in completed years, of each age category above `children`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeThresholds {
    pub youth: i32,
    pub adults: i32,
    pub seniors: i32,
}

impl Default for AgeThresholds {
    fn default() -> Self {
        Self {
            youth: 16,
            adults: 18,
            seniors: 65,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRules {
    pub ages: AgeThresholds,
    pub marital_status_married: u32,
    pub marital_status_commonlaw: u32,
}

impl Default for FlowRules {
    fn default() -> Self {
        Self {
            ages: AgeThresholds::default(),
            marital_status_married: 1,
            marital_status_commonlaw: 2,
        }
    }
}

impl FlowRules {
    pub fn age_category(&self, date_of_birth: NaiveDate, reference: NaiveDate) -> AgeCategory {
        let age = age_in_years(date_of_birth, reference);
        if age >= self.ages.seniors {
            AgeCategory::Seniors
        } else if age >= self.ages.adults {
            AgeCategory::Adults
        } else if age >= self.ages.youth {
            AgeCategory::Youth
        } else {
            AgeCategory::Children
        }
    }

    /// `true` when the marital status code is married or common-law.
    pub fn has_partner(&self, marital_status: &str) -> bool {
        match marital_status.trim().parse::<u32>() {
            Ok(code) => {
                code == self.marital_status_married || code == self.marital_status_commonlaw
            }
            Err(_) => false,
        }
    }
}

/// Completed years between `date_of_birth` and `reference`; negative for
/// births after the reference date.
pub fn age_in_years(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// A child is new until the dental insurance question has been answered for them.
pub fn is_new_child(child: &ChildState) -> bool {
    child.dental_insurance.is_none()
}
