//! Application service layer - config, coverage use case, export, presentation helpers

pub mod app;
pub mod config;
pub mod export;
pub mod presentation;
pub mod repository;
