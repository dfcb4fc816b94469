//! Error types for the echo subsystem.

use thiserror::Error;

/// Failure to invoke a behavior field on an [`EchoTarget`](super::EchoTarget).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// Nothing is stored under the key.
    #[error("field `{0}` is not present")]
    Missing(String),

    /// The key holds plain data, typically because a merge overwrote it.
    #[error("field `{key}` holds {kind} and cannot be invoked")]
    NotInvocable { key: String, kind: &'static str },
}

/// Failure of a guarded merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// The body tried to write a behavior field.
    #[error("field `{0}` is not writable")]
    ProtectedField(String),
}
