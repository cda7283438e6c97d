#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tempfile::TempDir;
use tokio::sync::broadcast;

use tutor_backend::config::{Config, LessonConfig};
use tutor_backend::routes::build_router;
use tutor_backend::srs::clock::FixedClock;
use tutor_backend::srs::{ReviewClock, SystemClock};
use tutor_backend::state::AppState;
use tutor_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

pub async fn spawn_test_server() -> TestApp {
    spawn_with_clock(Arc::new(SystemClock)).await
}

/// Test server whose clock is pinned to `now`.
pub async fn spawn_test_server_at(now: DateTime<Utc>) -> TestApp {
    spawn_with_clock(Arc::new(FixedClock(now))).await
}

async fn spawn_with_clock(clock: Arc<dyn ReviewClock>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("tutor-test.sled");

    // Construct Config directly; set_var would race across test threads.
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        lesson: LessonConfig::default(),
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(store, clock, &config, shutdown_tx);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        _temp_dir: temp_dir,
    }
}
