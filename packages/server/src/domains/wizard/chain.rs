//! Declarative guard chains.
//!
//! A chain is an ordered list of `(name, target, predicate)` entries. The runner
//! walks it top to bottom and stops at the first entry whose predicate does not
//! hold; the order of a chain is the canonical step order of its flow.

use chrono::NaiveDate;
use tracing::debug;

use super::classifier::{AgeCategory, FlowRules};
use super::errors::Redirect;
use super::models::{ChildState, WizardState};
use super::routing::{Navigator, Step, Variant};

/// One precondition of a review chain.
pub struct Guard<F> {
    pub name: &'static str,
    pub target: Step,
    pub satisfied: fn(&F) -> bool,
}

impl<F> Guard<F> {
    pub fn new(name: &'static str, target: Step, satisfied: fn(&F) -> bool) -> Self {
        Self {
            name,
            target,
            satisfied,
        }
    }
}

pub type ApplicantGuard<'a> = Guard<ApplicantFacts<'a>>;
pub type ChildGuard<'a> = Guard<ChildFacts<'a>>;

pub fn applicant_guard<'a>(
    name: &'static str,
    target: Step,
    satisfied: fn(&ApplicantFacts<'a>) -> bool,
) -> ApplicantGuard<'a> {
    Guard::new(name, target, satisfied)
}

pub fn child_guard<'a>(
    name: &'static str,
    target: Step,
    satisfied: fn(&ChildFacts<'a>) -> bool,
) -> ChildGuard<'a> {
    Guard::new(name, target, satisfied)
}

/// First guard in `chain` that `facts` do not satisfy.
pub fn first_unmet<'c, F>(chain: &'c [Guard<F>], facts: &F) -> Option<&'c Guard<F>> {
    chain.iter().find(|guard| !(guard.satisfied)(facts))
}

/// Runs `chain`, redirecting to the target of the first unmet guard.
pub fn enforce<F>(chain: &[Guard<F>], facts: &F, nav: &Navigator<'_>) -> Result<(), Redirect> {
    match first_unmet(chain, facts) {
        Some(guard) => {
            debug!(
                guard = guard.name,
                step = guard.target.slug(),
                "review chain stopped"
            );
            Err(nav.redirect(guard.target))
        }
        None => Ok(()),
    }
}

/// Everything an applicant-level predicate may look at.
pub struct ApplicantFacts<'a> {
    pub state: &'a WizardState,
    pub rules: &'a FlowRules,
    pub today: NaiveDate,
    /// Variant whose review is being validated.
    pub variant: Variant,
}

impl<'a> ApplicantFacts<'a> {
    pub fn new(
        state: &'a WizardState,
        rules: &'a FlowRules,
        today: NaiveDate,
        variant: Variant,
    ) -> Self {
        Self {
            state,
            rules,
            today,
            variant,
        }
    }

    /// Age category from the eligibility date of birth.
    pub fn age_category(&self) -> Option<AgeCategory> {
        self.state
            .date_of_birth
            .map(|dob| self.rules.age_category(dob, self.today))
    }

    /// Age category of the person filling in the application, from their
    /// identity answers.
    pub fn applicant_age_category(&self) -> Option<AgeCategory> {
        self.state
            .applicant_information
            .as_ref()
            .map(|info| self.rules.age_category(info.date_of_birth, self.today))
    }

    pub fn has_partner(&self) -> bool {
        self.state
            .marital_status
            .as_deref()
            .is_some_and(|status| self.rules.has_partner(status))
    }

    pub fn is_age(&self, category: AgeCategory) -> bool {
        self.age_category() == Some(category)
    }

    /// Renewals only re-collect marital status when the applicant says it changed.
    pub fn marital_status_changed(&self) -> bool {
        self.state.has_marital_status_changed == Some(true)
    }

    pub fn address_changed(&self) -> bool {
        self.state.has_address_changed == Some(true)
    }
}

/// Everything a per-child predicate may look at.
pub struct ChildFacts<'a> {
    pub child: &'a ChildState,
    pub rules: &'a FlowRules,
    pub today: NaiveDate,
}

impl<'a> ChildFacts<'a> {
    pub fn age_category(&self) -> Option<AgeCategory> {
        self.child
            .information
            .as_ref()
            .map(|info| self.rules.age_category(info.date_of_birth, self.today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::wizard::routing::{FlowKind, Language, RouteParams};

    struct Counter(u32);

    fn chain() -> Vec<Guard<Counter>> {
        vec![
            Guard::new("positive", Step::Flow("one"), |c: &Counter| c.0 > 0),
            Guard::new("even", Step::Flow("two"), |c: &Counter| c.0 % 2 == 0),
            Guard::new("large", Step::Flow("three"), |c: &Counter| c.0 > 10),
        ]
    }

    #[test]
    fn test_first_unmet_short_circuits_in_order() {
        let chain = chain();
        assert_eq!(first_unmet(&chain, &Counter(0)).map(|g| g.name), Some("positive"));
        assert_eq!(first_unmet(&chain, &Counter(3)).map(|g| g.name), Some("even"));
        assert_eq!(first_unmet(&chain, &Counter(4)).map(|g| g.name), Some("large"));
        assert!(first_unmet(&chain, &Counter(12)).is_none());
    }

    #[test]
    fn test_enforce_builds_redirect_from_target() {
        let params = RouteParams::new(Language::En, "abc");
        let nav = Navigator::new(FlowKind::Apply, &params);
        let redirect = enforce(&chain(), &Counter(3), &nav).unwrap_err();
        assert_eq!(redirect.location, "/en/apply/abc/two");
        assert!(enforce(&chain(), &Counter(12), &nav).is_ok());
    }
}
