//! HTTP surface for the portal.
//!
//! Serves the role landing page, the worker flow and the doctor flow.
//! Handlers are thin: they turn requests into form drafts, call the
//! `Portal`, and map `PortalError` to JSON error bodies.

pub mod endpoints;
pub mod error;
pub mod pages;
pub mod router;
pub mod server;
pub mod types;

pub use router::portal_router;
pub use server::{PortalServer, ServerSession};
pub use types::ApiContext;
