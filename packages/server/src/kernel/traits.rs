// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Wizard rules live in domains/wizard and reach collaborators through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseSession, BaseClock)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

// =============================================================================
// Session Trait (Infrastructure - opaque key/value store of one user session)
// =============================================================================

#[async_trait]
pub trait BaseSession: Send + Sync {
    /// Read the record stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous record
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Remove `key`; removing an absent key is not an error
    async fn unset(&self, key: &str) -> Result<()>;
}

// =============================================================================
// Clock Trait (Infrastructure - current time, swappable in tests)
// =============================================================================

pub trait BaseClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl BaseClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// =============================================================================
// Benefit Submission Trait (Infrastructure - outbound application service)
// =============================================================================

#[async_trait]
pub trait BaseBenefitSubmitter: Send + Sync {
    /// Submit a fully validated application payload.
    /// Returns the confirmation code issued by the service.
    async fn submit(&self, payload: &Value) -> Result<String>;
}
