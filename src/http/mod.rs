//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned, propagated to the response)
//!     → extract.rs (body → JSON object, lenient on content type)
//!     → handlers.rs (POST /echo: merge body, invoke formatter)
//!     → error.rs (handler failures → status codes)
//!     → Send to client
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use extract::{BodyRejection, EchoBody};
pub use request::{request_id, request_id_header, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
