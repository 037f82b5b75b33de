/// Database models for Tasklane
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts identified by unique email
/// - `task`: Units of work with a status lifecycle and an optional owner
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::models::user::{User, CreateUser};
/// use tasklane_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     name: "Nico".to_string(),
///     email: "nico@unmail.com".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
