use std::sync::Arc;

use notes_server::{
    config,
    repository::{MemoryRepository, NoteRepository, PgRepository},
    service::NoteService,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded notes server config");

    // Repository creation and migration
    let repo: Arc<dyn NoteRepository> = if let Some(dsn) = cfg.pg_dsn.as_deref() {
        let mut repo = PgRepository::new(dsn).await.unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

        repo.migrate().await.unwrap_or_else(|e| {
            tracing::error!("Failed to migrate database: {e}");
            panic!("failed to migrate database: {e}");
        });

        Arc::new(repo)
    } else {
        tracing::warn!("No database DSN configured, notes are kept in memory only");
        Arc::new(MemoryRepository::new())
    };

    // Service creation
    let service = Arc::new(NoteService::new(repo));

    let router = notes_server::router(service);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("Failed to read bound address");

    tracing::info!("Notes server starting, listening on {}", addr);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
