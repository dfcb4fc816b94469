//! The formatter capability stored on an [`EchoTarget`].

use std::fmt;

use serde_json::{Map, Value};

use super::error::InvokeError;
use super::target::EchoTarget;
use super::{ECHO_KEY, VALUE_KEY};

/// A behavior that can live in a target's field and be invoked by key.
pub trait Formatter: Send + Sync + fmt::Debug {
    /// Build the response value from the target's current state.
    fn format(&self, target: &EchoTarget) -> Result<Value, InvokeError>;
}

/// Default formatter: `{"echo": <value>}`.
///
/// Reads `value` at call time, so it sees whatever the merge left there.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoFormatter;

impl Formatter for EchoFormatter {
    fn format(&self, target: &EchoTarget) -> Result<Value, InvokeError> {
        let value = target.data(VALUE_KEY).cloned().unwrap_or(Value::Null);
        let mut out = Map::new();
        out.insert(ECHO_KEY.to_string(), value);
        Ok(Value::Object(out))
    }
}
