//! HamCaller Core
//!
//! Types and errors shared across HamCaller components.
//!
//! This crate provides:
//! - The request/result types exchanged with the web page
//! - The error taxonomy surfaced when the model runtime misbehaves

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassificationRequest, ClassificationResult, Label};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationRequest, ClassificationResult, Label};
}
