//! Domain layer for workshop coverage analysis
//!
//! Models, the distance engine, radius filtering and the session context
//! that ties a loaded dataset to the currently selected radius.

pub mod model;
pub mod repository;
pub mod service;
pub mod session;

pub use session::{CoverageSession, Dataset};
