//! Review of the children sub-collection.
//!
//! Every child runs the same chain, with targets parameterized by the child's id.
//! Children are checked in list order and the first incomplete child halts the
//! review, even when later children are complete.

use tracing::debug;

use super::projection::ReviewedChild;
use super::ReviewContext;
use crate::common::ChildId;
use crate::domains::wizard::chain::{child_guard, enforce, ChildFacts, ChildGuard};
use crate::domains::wizard::classifier::is_new_child;
use crate::domains::wizard::errors::WizardResult;
use crate::domains::wizard::models::ChildState;
use crate::domains::wizard::routing::{slug, Step, Variant};

/// Which children take part in a review and whether none is acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildrenPolicy {
    /// Skip children whose dental insurance question is unanswered (renewals).
    pub only_existing: bool,
    pub allow_empty: bool,
}

pub fn child_chain<'a>(variant: Variant, child_id: ChildId) -> Vec<ChildGuard<'a>> {
    let step = |slug| Step::Child(variant, child_id, slug);
    vec![
        child_guard("child-information-defined", step(slug::CHILD_INFORMATION), |f| {
            f.child.information.is_some()
        }),
        child_guard("child-has-parent-applicant", step(slug::PARENT_OR_GUARDIAN), |f| {
            f.child.information.as_ref().is_some_and(|info| info.is_parent)
        }),
        child_guard("child-still-a-dependant", step(slug::CHILD_CANNOT_APPLY), |f| {
            !f.age_category().is_some_and(|category| category.is_adult())
        }),
        child_guard("child-dental-insurance-defined", step(slug::DENTAL_INSURANCE), |f| {
            f.child.dental_insurance.is_some()
        }),
        child_guard("child-benefits-question-defined", step(slug::CONFIRM_BENEFITS), |f| {
            f.child.has_federal_provincial_territorial_benefits.is_some()
        }),
        child_guard("child-dental-benefits-defined", step(slug::UPDATE_BENEFITS), |f| {
            f.child.has_federal_provincial_territorial_benefits != Some(true)
                || f.child.dental_benefits.is_some()
        }),
    ]
}

pub fn validate_children_for_review(
    children: &[ChildState],
    variant: Variant,
    policy: ChildrenPolicy,
    ctx: &ReviewContext<'_>,
) -> WizardResult<Vec<ReviewedChild>> {
    let nav = ctx.navigator();
    let effective: Vec<&ChildState> = children
        .iter()
        .filter(|child| !policy.only_existing || !is_new_child(child))
        .collect();

    if effective.is_empty() {
        if policy.allow_empty {
            return Ok(Vec::new());
        }
        debug!(variant = variant.slug(), "no children to review");
        return Err(nav.redirect(Step::Variant(variant, slug::CHILDREN)).into());
    }

    effective
        .into_iter()
        .map(|child| {
            let facts = ChildFacts {
                child,
                rules: ctx.rules,
                today: ctx.today,
            };
            enforce(&child_chain(variant, child.id), &facts, &nav)?;
            ReviewedChild::from_child(child)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::wizard::classifier::FlowRules;
    use crate::domains::wizard::models::ChildInformation;
    use crate::domains::wizard::routing::{FlowKind, Language, RouteParams};
    use chrono::NaiveDate;

    const APP_ID: &str = "6f1c2d3e-4b5a-4c6d-8e7f-9a0b1c2d3e4f";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn complete_child(born: NaiveDate) -> ChildState {
        let mut child = ChildState::new();
        child.information = Some(ChildInformation {
            first_name: "Sam".into(),
            last_name: "Tremblay".into(),
            date_of_birth: born,
            is_parent: true,
            social_insurance_number: None,
        });
        child.dental_insurance = Some(false);
        child.has_federal_provincial_territorial_benefits = Some(false);
        child
    }

    fn run(
        children: &[ChildState],
        policy: ChildrenPolicy,
    ) -> WizardResult<Vec<ReviewedChild>> {
        let params = RouteParams::new(Language::En, APP_ID);
        let rules = FlowRules::default();
        let ctx = ReviewContext::new(FlowKind::Apply, &params, &rules, today());
        validate_children_for_review(children, Variant::AdultChild, policy, &ctx)
    }

    fn born(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 3, 1).unwrap()
    }

    #[test]
    fn test_empty_list_redirects_to_children_step() {
        let err = run(&[], ChildrenPolicy::default()).unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(format!("/en/apply/{}/adult-child/children", APP_ID).as_str())
        );

        let allowed = ChildrenPolicy {
            allow_empty: true,
            ..Default::default()
        };
        assert!(run(&[], allowed).unwrap().is_empty());
    }

    #[test]
    fn test_first_incomplete_child_wins() {
        let a = complete_child(born(2015));
        let mut b = complete_child(born(2016));
        b.dental_insurance = None;
        let mut c = complete_child(born(2017));
        c.information = None;

        let err = run(&[a, b.clone(), c], ChildrenPolicy::default()).unwrap_err();
        assert_eq!(
            err.redirect_location(),
            Some(
                format!(
                    "/en/apply/{}/adult-child/children/{}/dental-insurance",
                    APP_ID, b.id
                )
                .as_str()
            )
        );
    }

    #[test]
    fn test_adult_child_cannot_be_covered() {
        let grown = complete_child(born(2000));
        let err = run(&[grown.clone()], ChildrenPolicy::default()).unwrap_err();
        assert!(err
            .redirect_location()
            .unwrap()
            .ends_with(&format!("/children/{}/cannot-apply-child", grown.id)));
    }

    #[test]
    fn test_renewal_policy_skips_new_children() {
        let existing = complete_child(born(2014));
        let mut added = ChildState::new();
        added.information = None;

        let policy = ChildrenPolicy {
            only_existing: true,
            allow_empty: false,
        };
        let reviewed = run(&[added, existing.clone()], policy).unwrap();
        assert_eq!(reviewed.len(), 1);
        assert_eq!(reviewed[0].id, existing.id);
    }

    #[test]
    fn test_success_preserves_order() {
        let first = complete_child(born(2012));
        let second = complete_child(born(2019));
        let reviewed = run(&[first.clone(), second.clone()], ChildrenPolicy::default()).unwrap();
        let ids: Vec<_> = reviewed.iter().map(|child| child.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
