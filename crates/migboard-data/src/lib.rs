//! # Migboard Data
//!
//! The in-memory migration table and everything that produces or reads it.
//!
//! Tables are immutable once built: the generator and the CSV reader both
//! produce fresh tables, and the [`TableStore`] swaps whole tables in and out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod csv_io;
pub mod filter;
pub mod generator;
pub mod store;
pub mod table;

pub use csv_io::*;
pub use filter::*;
pub use generator::*;
pub use store::*;
pub use table::*;
