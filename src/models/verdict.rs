//! Verdict model
//!
//! The engine owns the verdict's field set. The gateway treats it as an
//! opaque JSON object and only ever adds keys to it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured result of one engine run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict(Map<String, Value>);

impl Verdict {
    /// Parse one protocol record. Anything other than a JSON object is rejected.
    pub fn parse(line: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(fields)) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Insert a gateway field without touching engine data.
    ///
    /// Returns `false` and leaves the verdict unchanged when the engine
    /// already reported `key`.
    pub fn annotate(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.0.contains_key(key) {
            return false;
        }
        self.0.insert(key.to_string(), value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
