//! Core data types for the locator pipeline.

mod document;
mod locator;
mod locator_set;
mod suggestion;
mod verification;

pub use document::*;
pub use locator::*;
pub use locator_set::*;
pub use suggestion::*;
pub use verification::*;
