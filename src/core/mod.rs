//! Core types shared across fieldgraph.
//!
//! Currently this is the error system: [`FieldError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting them.

pub mod error;

pub use error::{ErrorContext, FieldError, user_friendly_error};
