//! Error types for the SelectorLab pipeline.
//!
//! Every error maps onto one [`ErrorKind`] so that component boundaries can
//! report structured failures instead of empty results.

mod kind;
mod fetch;
mod selector;
mod verify;
mod synthesis;
mod assistant;
mod provider;
mod transfer;

pub use kind::*;
pub use fetch::*;
pub use selector::*;
pub use verify::*;
pub use synthesis::*;
pub use assistant::*;
pub use provider::*;
pub use transfer::*;
