//! # SelectorLab Session
//!
//! Session-scoped state for one inspection session.
//!
//! ## Features
//!
//! - Explicitly owned [`SessionContext`] with "new session" teardown
//! - Locator set transfer between the inspection and configuration surfaces
//! - Request tickets for discarding late results after a reset
//! - Two-step synthesize-then-name interaction

pub mod context;
pub mod error;
pub mod surface;
pub mod transfer;

pub use context::{RequestTicket, SessionContext};
pub use error::SessionError;
pub use surface::{ConfigurationSurface, InspectionSurface, accept_refinement, discard_refinement};
pub use transfer::{export_payload, import_payload};
