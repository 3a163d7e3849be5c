//! HTTP surface.
//!
//! Serves the four shell pages as HTML forms and a JSON API under `/api/`.
//! Every response passes through the audit logger and carries
//! `Cache-Control: no-store`.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::app_router;
pub use server::{start_server_on, AppServer, ServerSession};
pub use types::ApiContext;
