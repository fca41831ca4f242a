/// Shared application state
use sqlx::SqlitePool;

/// Application state shared across all handlers
///
/// `SqlitePool` is reference-counted internally, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
