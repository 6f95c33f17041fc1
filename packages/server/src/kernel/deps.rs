//! Server dependencies for route handlers (using traits for testability)
//!
//! This module provides the central dependency container shared by all routes.
//! Every external collaborator sits behind a trait so tests can swap it.

use std::sync::Arc;

use crate::domains::wizard::{FlowKind, StateManager, WizardConfig};
use crate::kernel::{BaseBenefitSubmitter, BaseClock, BaseSession};

/// Server dependencies accessible to routes
#[derive(Clone)]
pub struct ServerDeps {
    pub submitter: Arc<dyn BaseBenefitSubmitter>,
    pub clock: Arc<dyn BaseClock>,
    pub wizard: WizardConfig,
}

impl ServerDeps {
    pub fn new(
        submitter: Arc<dyn BaseBenefitSubmitter>,
        clock: Arc<dyn BaseClock>,
        wizard: WizardConfig,
    ) -> Self {
        Self {
            submitter,
            clock,
            wizard,
        }
    }

    /// State manager of `flow` bound to one request's session
    pub fn state_manager<'a>(&'a self, flow: FlowKind, session: &'a dyn BaseSession) -> StateManager<'a> {
        StateManager::new(flow, session, self.clock.as_ref(), &self.wizard)
    }
}
