//! Flow kinds, variants, step locations and redirect URL construction.
//!
//! Every redirect the engine issues is built here from the flow, the route
//! parameters of the current request and a [`Step`], so the same chain produces a
//! different, deterministic target per application and per child.

use serde::{Deserialize, Serialize};

use super::errors::Redirect;
use super::models::TypeOfApplication;
use crate::common::ChildId;

/// One top-level wizard. Each flow stores its state under its own session key
/// prefix and serves its pages under its own route root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowKind {
    Apply,
    ProtectedApply,
    Renew,
    ProtectedRenew,
}

impl FlowKind {
    pub const ALL: [FlowKind; 4] = [
        FlowKind::Apply,
        FlowKind::ProtectedApply,
        FlowKind::Renew,
        FlowKind::ProtectedRenew,
    ];

    /// Prefix of the session key, `"<prefix>-flow-<uuid>"`.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            FlowKind::Apply => "apply",
            FlowKind::ProtectedApply => "protected-apply",
            FlowKind::Renew => "renew",
            FlowKind::ProtectedRenew => "protected-renew",
        }
    }

    /// Path segment(s) the flow is served under, after the language.
    pub fn route_root(&self) -> &'static str {
        match self {
            FlowKind::Apply => "apply",
            FlowKind::ProtectedApply => "protected/apply",
            FlowKind::Renew => "renew",
            FlowKind::ProtectedRenew => "protected/renew",
        }
    }

    /// Authenticated flows: idle-timeout purging and the contact-information step.
    pub fn is_protected(&self) -> bool {
        matches!(self, FlowKind::ProtectedApply | FlowKind::ProtectedRenew)
    }

    pub fn is_renewal(&self) -> bool {
        matches!(self, FlowKind::Renew | FlowKind::ProtectedRenew)
    }
}

/// Who the application covers, once the type question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Adult,
    AdultChild,
    Child,
}

impl Variant {
    pub fn slug(&self) -> &'static str {
        match self {
            Variant::Adult => "adult",
            Variant::AdultChild => "adult-child",
            Variant::Child => "child",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "adult" => Some(Variant::Adult),
            "adult-child" => Some(Variant::AdultChild),
            "child" => Some(Variant::Child),
            _ => None,
        }
    }

    /// The `typeOfApplication` answer that routes into this variant.
    pub fn type_of_application(&self) -> TypeOfApplication {
        match self {
            Variant::Adult => TypeOfApplication::Adult,
            Variant::AdultChild => TypeOfApplication::AdultChild,
            Variant::Child => TypeOfApplication::Child,
        }
    }

    pub fn from_type(type_of_application: TypeOfApplication) -> Option<Self> {
        match type_of_application {
            TypeOfApplication::Adult => Some(Variant::Adult),
            TypeOfApplication::AdultChild => Some(Variant::AdultChild),
            TypeOfApplication::Child => Some(Variant::Child),
            TypeOfApplication::Delegate => None,
        }
    }

    /// Whether the applicant answers the adult eligibility and dental questions.
    pub fn includes_applicant_benefits(&self) -> bool {
        !matches!(self, Variant::Child)
    }

    pub fn includes_children(&self) -> bool {
        !matches!(self, Variant::Adult)
    }
}

/// Step slugs shared by the chains, guards and navigation.
pub mod slug {
    pub const TERMS_AND_CONDITIONS: &str = "terms-and-conditions";
    pub const TYPE_APPLICATION: &str = "type-application";
    pub const APPLICATION_DELEGATE: &str = "application-delegate";
    pub const TYPE_RENEWAL: &str = "type-renewal";
    pub const RENEWAL_DELEGATE: &str = "renewal-delegate";
    pub const TAX_FILING: &str = "tax-filing";
    pub const FILE_TAXES: &str = "file-taxes";
    pub const APPLICANT_INFORMATION: &str = "applicant-information";

    pub const DATE_OF_BIRTH: &str = "date-of-birth";
    pub const PARENT_OR_GUARDIAN: &str = "parent-or-guardian";
    pub const LIVING_INDEPENDENTLY: &str = "living-independently";
    pub const DISABILITY_TAX_CREDIT: &str = "disability-tax-credit";
    pub const DOB_ELIGIBILITY: &str = "dob-eligibility";
    pub const CONTACT_APPLY_CHILD: &str = "contact-apply-child";
    pub const CONFIRM_MARITAL_STATUS: &str = "confirm-marital-status";
    pub const MARITAL_STATUS: &str = "marital-status";
    pub const CONTACT_INFORMATION: &str = "contact-information";
    pub const CONFIRM_ADDRESS: &str = "confirm-address";
    pub const MAILING_ADDRESS: &str = "mailing-address";
    pub const HOME_ADDRESS: &str = "home-address";
    pub const COMMUNICATION_PREFERENCE: &str = "communication-preference";
    pub const VERIFY_EMAIL: &str = "verify-email";
    pub const DENTAL_INSURANCE: &str = "dental-insurance";
    pub const CONFIRM_BENEFITS: &str = "confirm-federal-provincial-territorial-benefits";
    pub const UPDATE_BENEFITS: &str = "update-federal-provincial-territorial-benefits";
    pub const DEMOGRAPHIC_SURVEY: &str = "demographic-survey";
    pub const CHILDREN: &str = "children";
    pub const CANNOT_RENEW_CHILD: &str = "children/cannot-renew-child";
    pub const REVIEW_INFORMATION: &str = "review-information";
    pub const CONFIRMATION: &str = "confirmation";

    pub const CHILD_INFORMATION: &str = "information";
    pub const CHILD_CANNOT_APPLY: &str = "cannot-apply-child";
}

/// A wizard location relative to one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `/{lang}/{root}/{id}/{slug}`
    Flow(&'static str),
    /// `/{lang}/{root}/{id}/{variant}/{slug}`
    Variant(Variant, &'static str),
    /// `/{lang}/{root}/{id}/{variant}/children/{childId}/{slug}`
    Child(Variant, ChildId, &'static str),
}

impl Step {
    pub fn slug(&self) -> &'static str {
        match self {
            Step::Flow(slug) | Step::Variant(_, slug) | Step::Child(_, _, slug) => slug,
        }
    }

    pub fn review(variant: Variant) -> Self {
        Step::Variant(variant, slug::REVIEW_INFORMATION)
    }

    pub fn confirmation(variant: Variant) -> Self {
        Step::Variant(variant, slug::CONFIRMATION)
    }
}

/// Page language. Only these codes are served, so the first segment of every
/// redirect built from route parameters is one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Route parameters of the current request. The id and child id stay raw
/// until a load validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub lang: Language,
    pub id: String,
    pub child_id: Option<String>,
}

impl RouteParams {
    pub fn new(lang: Language, id: impl Into<String>) -> Self {
        Self {
            lang,
            id: id.into(),
            child_id: None,
        }
    }

    pub fn with_child(mut self, child_id: impl Into<String>) -> Self {
        self.child_id = Some(child_id.into());
        self
    }
}

/// Builds wizard URLs for one flow and one request.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    flow: FlowKind,
    params: &'a RouteParams,
}

impl<'a> Navigator<'a> {
    pub fn new(flow: FlowKind, params: &'a RouteParams) -> Self {
        Self { flow, params }
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn params(&self) -> &RouteParams {
        self.params
    }

    pub fn path(&self, step: Step) -> String {
        let base = format!(
            "/{}/{}/{}",
            self.params.lang,
            self.flow.route_root(),
            self.params.id
        );
        match step {
            Step::Flow(slug) => format!("{}/{}", base, slug),
            Step::Variant(variant, slug) => format!("{}/{}/{}", base, variant.slug(), slug),
            Step::Child(variant, child_id, slug) => format!(
                "{}/{}/children/{}/{}",
                base,
                variant.slug(),
                child_id,
                slug
            ),
        }
    }

    pub fn redirect(&self, step: Step) -> Redirect {
        Redirect::to(self.path(step))
    }

    /// Landing page of the flow, used when no usable state exists.
    pub fn fallback(&self) -> Redirect {
        Redirect::to(format!("/{}/{}", self.params.lang, self.flow.route_root()))
    }

    /// First page of a started application.
    pub fn entry(&self) -> Redirect {
        self.redirect(Step::Flow(slug::TERMS_AND_CONDITIONS))
    }

    /// The type question differs in wording and location between apply and renew.
    pub fn type_step(&self) -> Step {
        if self.flow.is_renewal() {
            Step::Flow(slug::TYPE_RENEWAL)
        } else {
            Step::Flow(slug::TYPE_APPLICATION)
        }
    }

    pub fn delegate_step(&self) -> Step {
        if self.flow.is_renewal() {
            Step::Flow(slug::RENEWAL_DELEGATE)
        } else {
            Step::Flow(slug::APPLICATION_DELEGATE)
        }
    }
}
