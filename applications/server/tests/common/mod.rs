/// Common test utilities and fixtures
use anyhow::Result;
use axum::Router;
use lyra_server::{create_router, AppState, StaticDirs};
use sqlx::SqlitePool;
use std::fs;
use tempfile::TempDir;

/// Router plus the resources it points at
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub music_dir: TempDir,
    pub web_dir: TempDir,
}

/// Create a router over a migrated in-memory database and empty directories
pub async fn create_test_app() -> Result<TestApp> {
    let pool = lyra_storage::create_memory_pool().await?;
    let music_dir = TempDir::new()?;
    let web_dir = TempDir::new()?;

    let dirs = StaticDirs {
        music_dir: music_dir.path().to_path_buf(),
        web_dir: web_dir.path().to_path_buf(),
    };
    let router = create_router(AppState::new(pool.clone()), &dirs);

    Ok(TestApp {
        router,
        pool,
        music_dir,
        web_dir,
    })
}

/// Test fixtures
pub mod fixtures {
    pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body><audio id=\"audio\"></audio></body></html>";
    pub const APP_JS: &str = "console.log('lyra');";
    pub const AUDIO_BYTES: &[u8] = b"ID3\x03\x00fake-mp3-frames";
}

pub fn write_file(dir: &TempDir, name: &str, contents: &[u8]) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
