use chrono::Duration;

use super::classifier::FlowRules;

/// Business settings of the wizard engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    pub rules: FlowRules,
    /// Idle time after which authenticated flows discard their state.
    pub idle_timeout: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            rules: FlowRules::default(),
            idle_timeout: Duration::minutes(20),
        }
    }
}
