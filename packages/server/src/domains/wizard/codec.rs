//! Versioned session records.
//!
//! A record is stored as `{"version": 1, "state": {...}}` under the key
//! `"<flow>-flow-<uuid>"`. Partial updates are applied at the JSON object level:
//! top-level keys named by the patch replace stored keys, everything else is
//! carried over untouched.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::models::{StateField, StatePatch, WizardState};
use super::routing::FlowKind;
use crate::common::ApplicationId;

/// Current layout of stored records.
pub const STATE_VERSION: u64 = 1;

#[derive(Serialize, Deserialize)]
struct StoredRecord<S> {
    version: u64,
    state: S,
}

/// Outcome of reading a stored record.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Current(WizardState),
    /// Written by another layout version; unusable.
    Unsupported { version: u64 },
}

/// Session key for an application in a flow.
pub fn session_key(flow: FlowKind, id: &ApplicationId) -> String {
    format!("{}-flow-{}", flow.key_prefix(), id)
}

pub fn encode(state: &WizardState) -> Result<Value, serde_json::Error> {
    serde_json::to_value(StoredRecord {
        version: STATE_VERSION,
        state,
    })
}

pub fn decode(record: Value) -> Result<Decoded, serde_json::Error> {
    match record.get("version").and_then(Value::as_u64) {
        Some(STATE_VERSION) => {
            let stored: StoredRecord<WizardState> = serde_json::from_value(record)?;
            Ok(Decoded::Current(stored.state))
        }
        Some(version) => Ok(Decoded::Unsupported { version }),
        None => Err(serde_json::Error::missing_field("version")),
    }
}

/// Shallow-merges `patch` over `state`, then deletes `remove` if given.
pub fn apply_patch(
    state: &WizardState,
    patch: &StatePatch,
    remove: Option<StateField>,
) -> Result<WizardState, serde_json::Error> {
    let mut merged = into_object(serde_json::to_value(state)?)?;
    for (key, value) in into_object(serde_json::to_value(patch)?)? {
        merged.insert(key, value);
    }
    if let Some(field) = remove {
        merged.remove(field.key());
    }
    serde_json::from_value(Value::Object(merged))
}

fn into_object(value: Value) -> Result<Map<String, Value>, serde_json::Error> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(serde_json::Error::custom(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}
