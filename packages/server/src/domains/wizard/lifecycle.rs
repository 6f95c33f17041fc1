//! Start, load, save and clear wizard state for one flow.
//!
//! `load` either returns a usable state or a redirect: invalid ids, missing
//! records, expired records and the submission checkpoint are all navigation,
//! not failures. Only collaborator and codec errors are hard failures.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::classifier::{AgeCategory, FlowRules};
use super::codec::{self, Decoded};
use super::config::WizardConfig;
use super::errors::{Redirect, WizardError, WizardResult};
use super::models::{ChildState, StateField, StatePatch, WizardState};
use super::routing::{FlowKind, Navigator, RouteParams, Step, Variant};
use crate::common::ApplicationId;
use crate::kernel::{BaseClock, BaseSession};

/// Which pages a load is serving, for the submission checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadScope {
    /// Any step of the form; submitted state is locked.
    Form,
    /// The confirmation page; unsubmitted state is sent back to the start.
    Confirmation,
    /// Bookkeeping loads that must work in either phase.
    Any,
}

/// Wizard state of one flow within one user session.
pub struct StateManager<'a> {
    flow: FlowKind,
    session: &'a dyn BaseSession,
    clock: &'a dyn BaseClock,
    config: &'a WizardConfig,
}

impl<'a> StateManager<'a> {
    pub fn new(
        flow: FlowKind,
        session: &'a dyn BaseSession,
        clock: &'a dyn BaseClock,
        config: &'a WizardConfig,
    ) -> Self {
        Self {
            flow,
            session,
            clock,
            config,
        }
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn rules(&self) -> &'a FlowRules {
        &self.config.rules
    }

    pub fn clock(&self) -> &'a dyn BaseClock {
        self.clock
    }

    /// Creates the record for a new application.
    ///
    /// Fails with [`WizardError::InvalidId`] when `id` is not a UUID. Renewals keep
    /// only seeded children still under 18 at the coverage start date.
    pub async fn start(&self, id: &str, seed: StatePatch) -> WizardResult<WizardState> {
        let application_id = ApplicationId::parse(id).map_err(|_| {
            warn!(flow = self.flow.key_prefix(), id, "refusing to start with invalid id");
            WizardError::InvalidId(id.to_string())
        })?;

        let initial = WizardState::new(application_id, self.clock.now());
        let mut state = codec::apply_patch(&initial, &seed, None)?;
        state.edit_mode = false;
        state.submission_info = None;

        if self.flow.is_renewal() {
            let before = state.children.len();
            state.children = self.renewable_children(&state);
            if state.children.len() != before {
                debug!(
                    dropped = before - state.children.len(),
                    "dropped children too old to renew"
                );
            }
        }

        self.write(&state).await?;
        info!(
            flow = self.flow.key_prefix(),
            id = %state.id,
            children = state.children.len(),
            "application started"
        );
        Ok(state)
    }

    pub async fn load(&self, params: &RouteParams, scope: LoadScope) -> WizardResult<WizardState> {
        let nav = Navigator::new(self.flow, params);
        let id = match ApplicationId::parse(&params.id) {
            Ok(id) => id,
            Err(_) => {
                warn!(flow = self.flow.key_prefix(), id = %params.id, "invalid application id");
                return Err(nav.fallback().into());
            }
        };
        let key = codec::session_key(self.flow, &id);

        let record = match self.session.get(&key).await.map_err(WizardError::Session)? {
            Some(record) => record,
            None => {
                debug!(key = %key, "no wizard state in session");
                return Err(nav.fallback().into());
            }
        };

        let state = match codec::decode(record)? {
            Decoded::Current(state) => state,
            Decoded::Unsupported { version } => {
                warn!(key = %key, version, "discarding wizard state with unsupported version");
                self.purge(&key).await?;
                return Err(nav.fallback().into());
            }
        };

        if self.flow.is_protected() && self.is_stale(&state) {
            warn!(key = %key, last_updated_on = %state.last_updated_on, "discarding idle wizard state");
            self.purge(&key).await?;
            return Err(nav.fallback().into());
        }

        match scope {
            LoadScope::Form if state.is_submitted() => Err(confirmation_redirect(&nav, &state).into()),
            LoadScope::Confirmation if !state.is_submitted() => Err(nav.entry().into()),
            _ => Ok(state),
        }
    }

    /// Reloads, overlays `patch`, stamps `lastUpdatedOn`, removes `remove` and
    /// writes the result back.
    ///
    /// Stamps only increase per record. Between two overlapping saves the order
    /// of their stamps is not defined.
    pub async fn save(
        &self,
        params: &RouteParams,
        patch: StatePatch,
        remove: Option<StateField>,
    ) -> WizardResult<WizardState> {
        let current = self.load(params, LoadScope::Form).await?;
        let mut state = codec::apply_patch(&current, &patch, remove)?;
        state.id = current.id;
        state.last_updated_on = next_stamp(current.last_updated_on, self.clock.now());
        self.write(&state).await?;
        debug!(id = %state.id, edit_mode = state.edit_mode, "wizard state saved");
        Ok(state)
    }

    /// Abandons the application.
    pub async fn clear(&self, params: &RouteParams) -> WizardResult<()> {
        let state = self.load(params, LoadScope::Any).await?;
        self.purge(&codec::session_key(self.flow, &state.id)).await?;
        info!(flow = self.flow.key_prefix(), id = %state.id, "application cleared");
        Ok(())
    }

    fn is_stale(&self, state: &WizardState) -> bool {
        self.clock.now().signed_duration_since(state.last_updated_on) >= self.config.idle_timeout
    }

    fn renewable_children(&self, state: &WizardState) -> Vec<ChildState> {
        let reference = state
            .application_year
            .as_ref()
            .map(|year| year.coverage_start_date)
            .unwrap_or_else(|| self.clock.today());
        state
            .children
            .iter()
            .filter(|child| match &child.information {
                Some(info) => matches!(
                    self.config.rules.age_category(info.date_of_birth, reference),
                    AgeCategory::Children | AgeCategory::Youth
                ),
                None => true,
            })
            .cloned()
            .collect()
    }

    async fn write(&self, state: &WizardState) -> WizardResult<()> {
        let key = codec::session_key(self.flow, &state.id);
        let record = codec::encode(state)?;
        self.session
            .set(&key, record)
            .await
            .map_err(WizardError::Session)
    }

    async fn purge(&self, key: &str) -> WizardResult<()> {
        self.session.unset(key).await.map_err(WizardError::Session)
    }
}

/// Where a submitted application lives: its variant's confirmation page.
fn confirmation_redirect(nav: &Navigator<'_>, state: &WizardState) -> Redirect {
    match state.type_of_application.and_then(Variant::from_type) {
        Some(variant) => nav.redirect(Step::confirmation(variant)),
        None => nav.fallback(),
    }
}

/// Keeps `lastUpdatedOn` strictly increasing across saves.
fn next_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
