//! Core types for depviz.
//!
//! Home of the error taxonomy shared by every other module. The split that
//! matters: [`DepvizError::MetadataError`] and
//! [`DepvizError::PackageNotFound`] are fatal only when raised for the root
//! package; during expansion they degrade the affected dependency to an
//! unexpanded leaf instead of failing the run.

pub mod error;

pub use error::{DepvizError, ErrorContext, user_friendly_error};
