//! # Tasklane Shared Library
//!
//! This crate contains the data models and persistence layer shared by the
//! Tasklane API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `db`: Connection pool and migration utilities

pub mod db;
pub mod models;

/// Current version of the Tasklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
