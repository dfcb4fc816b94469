//! Merge-and-echo HTTP server library.
//!
//! A single `POST /echo` endpoint deep-merges the client's JSON object into
//! a per-request object whose `formatter` field is a behavior, then answers
//! with what that behavior returns. With the default unchecked merge a
//! client can overwrite `formatter` itself, which is the injection point
//! this server exists to demonstrate.

pub mod config;
pub mod echo;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use echo::{EchoTarget, MergeMode};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
