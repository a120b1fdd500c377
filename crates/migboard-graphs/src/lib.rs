//! # Migboard Graphs
//!
//! Graph generation for migration tables.
//!
//! Two outputs are produced from the same table: a serializable animated bar
//! chart description for client-side rendering, and an MP4 animation built
//! from plotters-rendered bitmap frames.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod frame;
pub mod style;
pub mod video;

pub use chart::*;
pub use frame::*;
pub use style::*;
pub use video::*;
