//! # Migboard Common
//!
//! Shared types, errors, and utilities for Migboard.
//!
//! This crate provides the foundational record type, the month label newtype
//! and the workspace-wide error enum used by every other crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use types::*;
pub use utils::*;
