//! The per-request object a client body is merged into.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{InvokeError, MergeError};
use super::formatter::{EchoFormatter, Formatter};
use super::merge::{deep_merge, kind_of};
use super::{DEFAULT_LABEL, FORMATTER_KEY, VALUE_KEY};

/// How a request body is allowed to touch a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Any key may be written, behavior fields included.
    #[default]
    Unchecked,
    /// Bodies naming a behavior field are refused.
    Guarded,
}

/// A single slot of an [`EchoTarget`].
#[derive(Debug, Clone)]
pub enum Field {
    /// Plain JSON data.
    Data(Value),
    /// An invocable behavior.
    Behavior(Arc<dyn Formatter>),
}

impl Field {
    pub fn is_behavior(&self) -> bool {
        matches!(self, Field::Behavior(_))
    }
}

/// String-keyed map of data and behavior fields.
///
/// Built fresh for every request and dropped with the response.
#[derive(Debug, Clone, Default)]
pub struct EchoTarget {
    fields: BTreeMap<String, Field>,
}

impl EchoTarget {
    /// A target with no fields at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `value = "echo"` and the default formatter.
    pub fn with_defaults() -> Self {
        Self::with_label(DEFAULT_LABEL)
    }

    /// Default target with a custom label under `value`.
    pub fn with_label(label: impl Into<String>) -> Self {
        let mut target = Self::empty();
        target.insert_data(VALUE_KEY, Value::String(label.into()));
        target.insert_behavior(FORMATTER_KEY, Arc::new(EchoFormatter));
        target
    }

    pub fn insert_data(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), Field::Data(value));
    }

    pub fn insert_behavior(&mut self, key: impl Into<String>, behavior: Arc<dyn Formatter>) {
        self.fields.insert(key.into(), Field::Behavior(behavior));
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Data stored under `key`, or `None` if absent or a behavior.
    pub fn data(&self, key: &str) -> Option<&Value> {
        match self.fields.get(key) {
            Some(Field::Data(value)) => Some(value),
            _ => None,
        }
    }

    pub fn is_invocable(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(Field::is_behavior)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge `body` according to `mode`.
    pub fn merge(&mut self, body: Map<String, Value>, mode: MergeMode) -> Result<(), MergeError> {
        match mode {
            MergeMode::Unchecked => {
                self.merge_unchecked(body);
                Ok(())
            }
            MergeMode::Guarded => self.merge_guarded(body),
        }
    }

    /// Deep-merge `body` with no restriction on which keys it writes.
    ///
    /// Data fields are merged recursively. A behavior field named by the body
    /// is replaced outright by the body's value, which leaves it
    /// non-invocable.
    pub fn merge_unchecked(&mut self, body: Map<String, Value>) {
        for (key, value) in body {
            match self.fields.entry(key) {
                Entry::Occupied(mut slot) => {
                    if slot.get().is_behavior() {
                        tracing::debug!(key = %slot.key(), "Behavior field overwritten by merge");
                        slot.insert(Field::Data(value));
                    } else if let Field::Data(existing) = slot.get_mut() {
                        deep_merge(existing, value);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(Field::Data(value));
                }
            }
        }
    }

    /// Deep-merge `body` unless it names a behavior field.
    ///
    /// On refusal the target is left exactly as it was.
    pub fn merge_guarded(&mut self, body: Map<String, Value>) -> Result<(), MergeError> {
        if let Some(key) = body.keys().find(|key| self.is_invocable(key)) {
            return Err(MergeError::ProtectedField(key.clone()));
        }
        self.merge_unchecked(body);
        Ok(())
    }

    /// Call the behavior stored under `key`.
    pub fn invoke(&self, key: &str) -> Result<Value, InvokeError> {
        match self.fields.get(key) {
            Some(Field::Behavior(behavior)) => behavior.format(self),
            Some(Field::Data(value)) => Err(InvokeError::NotInvocable {
                key: key.to_string(),
                kind: kind_of(value),
            }),
            None => Err(InvokeError::Missing(key.to_string())),
        }
    }

    /// Data fields as a JSON object. Behavior fields are left out.
    pub fn to_value(&self) -> Value {
        let data = self
            .fields
            .iter()
            .filter_map(|(key, field)| match field {
                Field::Data(value) => Some((key.clone(), value.clone())),
                Field::Behavior(_) => None,
            })
            .collect::<Map<String, Value>>();
        Value::Object(data)
    }
}
