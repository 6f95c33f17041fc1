//! Typed errors for the wizard engine.
//!
//! Three classes are kept apart:
//!
//! - [`Redirect`]: control flow. The state does not satisfy a precondition for the
//!   requested step and the user must be sent to the step that fixes it.
//! - Hard failures: every other [`WizardError`] variant. Logged at the route boundary
//!   and answered with a generic error response.
//! - [`FieldErrors`]: user-input problems on a single form, re-rendered on the
//!   same step. Never a redirect and never fatal.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A request to send the user to another wizard location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

/// Errors that can occur while loading, validating or mutating wizard state.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Send the user elsewhere. Not a failure.
    #[error("redirect to {0}")]
    Redirect(Redirect),

    /// The application id handed to `start` is not a UUID
    #[error("invalid application id: {0}")]
    InvalidId(String),

    /// A value the review chain guarantees is missing anyway
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// The session collaborator failed
    #[error("session store error: {0}")]
    Session(#[source] anyhow::Error),

    /// A stored record could not be encoded or decoded
    #[error("state codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The outbound benefit-submission service failed
    #[error("submission failed: {0}")]
    Submission(#[source] anyhow::Error),
}

impl WizardError {
    /// Target location when this is a control-flow redirect.
    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            WizardError::Redirect(redirect) => Some(&redirect.location),
            _ => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, WizardError::Redirect(_))
    }

    pub(crate) fn invariant(field: &str) -> Self {
        WizardError::Invariant(format!("expected `{}` to be defined", field))
    }
}

impl From<Redirect> for WizardError {
    fn from(redirect: Redirect) -> Self {
        WizardError::Redirect(redirect)
    }
}

pub type WizardResult<T> = Result<T, WizardError>;

/// Field-level validation messages for one submitted form.
///
/// Keys are form field names; values are stable message codes the UI layer
/// translates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} invalid field(s)", .errors.len())]
pub struct FieldErrors {
    pub errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the first message for a field; later ones are ignored.
    pub fn add(&mut self, field: &str, code: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| code.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}
