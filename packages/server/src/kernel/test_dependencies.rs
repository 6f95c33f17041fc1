// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseBenefitSubmitter, BaseClock, BaseSession, ServerDeps};
use crate::domains::wizard::WizardConfig;

// =============================================================================
// In-memory Session
// =============================================================================

/// Single session backed by a map, for driving the wizard without HTTP
#[derive(Default)]
pub struct InMemorySession {
    records: Mutex<HashMap<String, Value>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw record, bypassing the codec
    pub fn insert(&self, key: &str, value: Value) {
        self.records.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn raw(&self, key: &str) -> Option<Value> {
        self.records.lock().unwrap().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.lock().unwrap().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl BaseSession for InMemorySession {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.insert(key, value);
        Ok(())
    }

    async fn unset(&self, key: &str) -> Result<()> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }
}

// =============================================================================
// Manual Clock
// =============================================================================

/// Clock that only moves when told to
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

impl BaseClock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// =============================================================================
// Mock Benefit Submitter
// =============================================================================

pub struct MockBenefitSubmitter {
    confirmation_code: String,
    fail: bool,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl MockBenefitSubmitter {
    pub fn new() -> Self {
        Self {
            confirmation_code: "CONF-0001".to_string(),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_confirmation_code(mut self, code: &str) -> Self {
        self.confirmation_code = code.to_string();
        self
    }

    /// Every submission fails with a service error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Payloads received so far
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockBenefitSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseBenefitSubmitter for MockBenefitSubmitter {
    async fn submit(&self, payload: &Value) -> Result<String> {
        self.calls.lock().unwrap().push(payload.clone());
        if self.fail {
            return Err(anyhow!("benefit service unavailable"));
        }
        Ok(self.confirmation_code.clone())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mock collaborators bundled for building a test server
pub struct TestDependencies {
    pub submitter: Arc<MockBenefitSubmitter>,
    pub clock: ManualClock,
    pub config: WizardConfig,
}

impl TestDependencies {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            submitter: Arc::new(MockBenefitSubmitter::new()),
            clock: ManualClock::new(now),
            config: WizardConfig::default(),
        }
    }

    pub fn with_submitter(mut self, submitter: MockBenefitSubmitter) -> Self {
        self.submitter = Arc::new(submitter);
        self
    }

    /// Deps sharing this bundle's clock and submitter, so tests can keep
    /// steering them after the server is built
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.submitter.clone(),
            Arc::new(self.clock.clone()),
            self.config,
        )
    }
}
