/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD endpoints
/// - `tasks`: Task CRUD, status lifecycle, and days-elapsed endpoints

pub mod health;
pub mod tasks;
pub mod users;
