//! Review chains of the application flows (public and protected).

use super::children::{validate_children_for_review, ChildrenPolicy};
use super::projection::{AdultApplicationReview, AdultChildApplicationReview, ChildApplicationReview};
use super::segments;
use super::ReviewContext;
use crate::domains::wizard::chain::{enforce, ApplicantFacts, ApplicantGuard};
use crate::domains::wizard::errors::WizardResult;
use crate::domains::wizard::models::WizardState;
use crate::domains::wizard::routing::{slug, Navigator, Step, Variant};

/// Applicant chain shared by the adult and adult-child variants.
pub fn adult_chain<'a>(nav: &Navigator<'_>, variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let protected = nav.flow().is_protected();
    let mut chain = segments::application_type(nav);
    chain.extend(segments::tax_filing());
    chain.extend(segments::adult_eligibility(variant));
    chain.extend(segments::applicant_information(Step::Variant(
        variant,
        slug::APPLICANT_INFORMATION,
    )));
    chain.extend(segments::marital_status(variant));
    if protected {
        chain.extend(segments::contact_information(variant));
    }
    chain.extend(segments::addresses(variant));
    chain.extend(segments::communication(variant));
    chain.extend(segments::dental_answers(variant));
    chain
}

/// Part of the child-variant chain that precedes the children.
pub fn child_head_chain<'a>(nav: &Navigator<'_>) -> Vec<ApplicantGuard<'a>> {
    let mut chain = segments::application_type(nav);
    chain.extend(segments::tax_filing());
    chain
}

/// Parent or guardian answers, checked once every child is complete.
pub fn child_tail_chain<'a>(nav: &Navigator<'_>) -> Vec<ApplicantGuard<'a>> {
    let variant = Variant::Child;
    let mut chain = segments::applicant_information(Step::Variant(
        variant,
        slug::APPLICANT_INFORMATION,
    ));
    chain.extend(segments::parent_not_a_child(variant));
    chain.extend(segments::marital_status(variant));
    if nav.flow().is_protected() {
        chain.extend(segments::contact_information(variant));
    }
    chain.extend(segments::addresses(variant));
    chain.extend(segments::communication(variant));
    chain
}

pub fn validate_adult_for_review(
    state: &WizardState,
    ctx: &ReviewContext<'_>,
) -> WizardResult<AdultApplicationReview> {
    let nav = ctx.navigator();
    let facts = ctx.facts(state, Variant::Adult);
    enforce(&adult_chain(&nav, Variant::Adult), &facts, &nav)?;
    AdultApplicationReview::from_state(state, ctx.flow.is_protected())
}

pub fn validate_adult_child_for_review(
    state: &WizardState,
    ctx: &ReviewContext<'_>,
) -> WizardResult<AdultChildApplicationReview> {
    let nav = ctx.navigator();
    let facts = ctx.facts(state, Variant::AdultChild);
    enforce(&adult_chain(&nav, Variant::AdultChild), &facts, &nav)?;
    let children = validate_children_for_review(
        &state.children,
        Variant::AdultChild,
        ChildrenPolicy::default(),
        ctx,
    )?;
    Ok(AdultChildApplicationReview {
        adult: AdultApplicationReview::from_state(state, ctx.flow.is_protected())?,
        children,
    })
}

pub fn validate_child_for_review(
    state: &WizardState,
    ctx: &ReviewContext<'_>,
) -> WizardResult<ChildApplicationReview> {
    let nav = ctx.navigator();
    let facts: ApplicantFacts<'_> = ctx.facts(state, Variant::Child);
    enforce(&child_head_chain(&nav), &facts, &nav)?;
    let children = validate_children_for_review(
        &state.children,
        Variant::Child,
        ChildrenPolicy::default(),
        ctx,
    )?;
    enforce(&child_tail_chain(&nav), &facts, &nav)?;
    ChildApplicationReview::from_state(state, ctx.flow.is_protected(), children)
}
