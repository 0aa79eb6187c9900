//! Application use cases

pub mod coverage_service;

pub use coverage_service::{
    build_session, open_session, resolve_data_paths, DataPaths, LoadedSession,
};
