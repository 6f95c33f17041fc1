//! Review chain of the renewal flows.
//!
//! Renewals start from a known client, so identity is seeded and marital status
//! and addresses are only re-collected when the applicant reports a change.
//! Authenticated renewals also confirm contact details and answer the
//! demographic survey, and may renew without any child.

use super::children::{validate_children_for_review, ChildrenPolicy};
use super::projection::RenewalReview;
use super::segments;
use super::ReviewContext;
use crate::domains::wizard::chain::{enforce, ApplicantGuard};
use crate::domains::wizard::errors::WizardResult;
use crate::domains::wizard::models::WizardState;
use crate::domains::wizard::routing::{slug, Navigator, Step, Variant};

pub fn renewal_chain<'a>(nav: &Navigator<'_>, variant: Variant) -> Vec<ApplicantGuard<'a>> {
    let protected = nav.flow().is_protected();
    let adult = variant.includes_applicant_benefits();

    let mut chain = segments::application_type(nav);
    chain.extend(segments::applicant_information(Step::Variant(
        variant,
        slug::APPLICANT_INFORMATION,
    )));
    if adult {
        chain.extend(segments::marital_status_change(variant));
    }
    if protected {
        chain.extend(segments::contact_information(variant));
    }
    chain.extend(segments::address_change(variant));
    chain.extend(segments::communication(variant));
    if adult {
        chain.extend(segments::dental_answers(variant));
    }
    if protected {
        chain.extend(segments::demographic_survey(variant));
    } else if variant.includes_children() {
        chain.extend(segments::children_under_18(variant));
    }
    chain
}

pub fn children_policy(protected: bool) -> ChildrenPolicy {
    ChildrenPolicy {
        only_existing: true,
        allow_empty: protected,
    }
}

pub fn validate_renewal_for_review(
    state: &WizardState,
    variant: Variant,
    ctx: &ReviewContext<'_>,
) -> WizardResult<RenewalReview> {
    let nav = ctx.navigator();
    let protected = ctx.flow.is_protected();
    let facts = ctx.facts(state, variant);
    enforce(&renewal_chain(&nav, variant), &facts, &nav)?;

    let children = if variant.includes_children() {
        validate_children_for_review(&state.children, variant, children_policy(protected), ctx)?
    } else {
        Vec::new()
    };
    RenewalReview::from_state(state, variant, protected, children)
}
