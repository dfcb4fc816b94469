//! Echo subsystem: the per-request object and the merge that mutates it.
//!
//! # Data Flow
//! ```text
//! POST /echo body (JSON object)
//!     → target.rs (EchoTarget::with_label: `value` + `formatter`)
//!     → merge.rs (deep merge of the body, key by key)
//!     → target.rs (invoke `formatter`)
//!     → formatter.rs (EchoFormatter builds {"echo": value})
//!     → JSON response
//! ```
//!
//! # Design Decisions
//! - Behavior lives next to data in one map, as a tagged `Field`
//! - `merge_unchecked` lets data overwrite behavior; `merge_guarded` refuses
//! - A target never outlives the request that built it

pub mod error;
pub mod formatter;
pub mod merge;
pub mod target;

pub use error::{InvokeError, MergeError};
pub use formatter::{EchoFormatter, Formatter};
pub use merge::deep_merge;
pub use target::{EchoTarget, Field, MergeMode};

/// Key of the data field echoed back to the client.
pub const VALUE_KEY: &str = "value";

/// Key of the behavior field invoked to build the response.
pub const FORMATTER_KEY: &str = "formatter";

/// Key under which the formatter places the echoed value.
pub const ECHO_KEY: &str = "echo";

/// Label stored under [`VALUE_KEY`] before any merge.
pub const DEFAULT_LABEL: &str = "echo";
