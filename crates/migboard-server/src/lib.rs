//! # Migboard Server
//!
//! Web dashboard for workspace migration tracking.
//!
//! This is the main binary crate: it wires the shared table store, the chart
//! and video renderers and the HTTP endpoints into an axum application.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;
pub mod video_service;

pub use error::*;
pub use logging::*;
pub use routes::*;
pub use server::*;
pub use state::*;
pub use video_service::*;
