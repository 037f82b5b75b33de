/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (pool + migrations)
/// - Router construction
/// - Entity creation helpers
/// - A request helper driving the router via tower::Service
///
/// Tests share one database, so every helper uses unique emails and the
/// assertions in the suite avoid whole-table exactness claims.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use tasklane_api::app::{build_router, AppState};
use tasklane_api::config::Config;
use tasklane_shared::models::task::{CreateTask, Task};
use tasklane_shared::models::user::{CreateUser, User};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a migrated database and a router
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to Cargo.toml, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }
}

/// Returns an email no other test run has used
pub fn unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

/// Helper to create a test user directly through the model layer
pub async fn create_test_user(ctx: &TestContext, name: &str) -> anyhow::Result<User> {
    let user = User::create(
        &ctx.db,
        CreateUser {
            name: name.to_string(),
            email: unique_email(),
        },
    )
    .await?;

    Ok(user)
}

/// Helper to create a test task directly through the model layer
pub async fn create_test_task(
    ctx: &TestContext,
    title: &str,
    user_id: Option<i64>,
) -> anyhow::Result<Task> {
    let task = Task::create(
        &ctx.db,
        CreateTask {
            title: title.to_string(),
            description: format!("description for {}", title),
            user_id,
        },
    )
    .await?;

    Ok(task)
}

/// Rewrites a task's creation timestamp to `days` days in the past
///
/// The API never allows this; it exists so days-elapsed tests have a task
/// with a known age.
pub async fn backdate_task(ctx: &TestContext, id: i64, days: i64) -> anyhow::Result<()> {
    sqlx::query("UPDATE tasks SET created_date = NOW() - ($2 * INTERVAL '1 day') WHERE id = $1")
        .bind(id)
        .bind(days)
        .execute(&ctx.db)
        .await?;

    Ok(())
}

/// Sends a request to the router and returns status plus parsed JSON body
///
/// The body value is `Null` for empty responses (e.g., 204).
pub async fn send(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
