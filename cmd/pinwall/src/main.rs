//! # Pinwall Server
//!
//! The entry point that assembles the application from the adapters
//! compiled into this build and serves the HTTP API plus the static
//! front-end.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use api_adapters::{app_router, AppState};
use auth_adapters::{AdminGuard, LockoutConfig};
use configs::{AppConfig, NotesBackend};
use domains::{CounterStore, NoteRepo};
use services::{NoteService, RateLimitConfig, RateLimiter};
use storage_adapters::MemoryCounterStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-sqlite")]
use storage_adapters::SqliteNoteRepo;

#[cfg(feature = "store-file")]
use storage_adapters::JsonFileNoteRepo;

#[cfg(feature = "redis")]
use storage_adapters::RedisCounterStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let repo = open_note_repo(&config).await?;
    let counters = open_counter_store(&config)?;

    let state = AppState {
        notes: NoteService::new(repo),
        limiter: RateLimiter::new(
            counters.clone(),
            RateLimitConfig {
                per_minute: config.rate_limit_per_minute,
                minute_window: Duration::from_secs(config.rate_limit_minute_window_secs),
                per_day: config.rate_limit_per_day,
                day_window: Duration::from_secs(config.rate_limit_day_window_secs),
            },
        ),
        admin: AdminGuard::new(
            config.admin_password.clone(),
            counters,
            LockoutConfig {
                max_failures: config.lockout_max_failures,
                window: Duration::from_secs(config.lockout_window_secs),
            },
        ),
    };

    let app = app_router(state, Path::new("public"));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "pinwall listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server exited")
}

async fn open_note_repo(config: &AppConfig) -> anyhow::Result<Arc<dyn NoteRepo>> {
    match config.notes_backend {
        #[cfg(feature = "db-sqlite")]
        NotesBackend::Sqlite => {
            info!(path = %config.database_path, "using sqlite note store");
            let repo = SqliteNoteRepo::open(Path::new(&config.database_path)).await?;
            Ok(Arc::new(repo))
        }
        #[cfg(feature = "store-file")]
        NotesBackend::File => {
            info!(path = %config.notes_file, "using flat-file note store");
            Ok(Arc::new(JsonFileNoteRepo::new(config.notes_file.clone().into())))
        }
        #[allow(unreachable_patterns)]
        other => anyhow::bail!("note backend {other:?} is not compiled into this binary"),
    }
}

fn open_counter_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CounterStore>> {
    match config.redis_url.as_deref().filter(|url| !url.is_empty()) {
        #[cfg(feature = "redis")]
        Some(url) => {
            info!("using redis counter store");
            Ok(Arc::new(RedisCounterStore::new(url)?))
        }
        #[cfg(not(feature = "redis"))]
        Some(_) => {
            anyhow::bail!("REDIS_URL is set but this binary was built without redis support")
        }
        None => {
            warn!("REDIS_URL not set; rate limits and lockouts only hold within this instance");
            Ok(Arc::new(MemoryCounterStore::new()))
        }
    }
}
