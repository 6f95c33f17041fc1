//! Dental care plan application and renewal wizard.
//!
//! State for one application lives in the user's session, keyed per flow. Step
//! loaders guard individual pages, the review chains re-validate the whole state
//! before review and submit, and edit mode decides where saves navigate.

pub mod actions;
pub mod chain;
pub mod classifier;
pub mod codec;
pub mod config;
pub mod edit_mode;
pub mod errors;
pub mod forms;
pub mod guards;
pub mod lifecycle;
pub mod models;
pub mod review;
pub mod routing;
pub mod steps;

pub use classifier::{age_in_years, is_new_child, AgeCategory, AgeThresholds, FlowRules};
pub use config::WizardConfig;
pub use errors::{FieldErrors, Redirect, WizardError, WizardResult};
pub use lifecycle::{LoadScope, StateManager};
pub use models::*;
pub use review::{validate_for_review, ReviewContext, ReviewProjection};
pub use routing::{slug, FlowKind, Language, Navigator, RouteParams, Step, Variant};
pub use steps::{ApplicantStep, ChildStep, StepPage};
