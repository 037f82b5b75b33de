//! # Tasklane API Server Library
//!
//! This library provides the HTTP layer of the Tasklane service: a
//! two-resource REST API over users and tasks.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
