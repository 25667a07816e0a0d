use std::sync::Arc;

use softcrud::config::Config;
use softcrud::observability::{init_tracing, shutdown_tracing};
use softcrud::repository::InMemoryStore;
use softcrud::server::Server;

use notes_service::{app, SERVICE_NAME};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service(SERVICE_NAME)?;
    init_tracing(&config)?;

    let store = Arc::new(InMemoryStore::new());
    let router = app(store, &config.api);

    tracing::info!(
        body_policy = ?config.api.body_policy,
        format = %config.api.serialization_format,
        "notes resource mounted at /notes"
    );

    Server::new(config).serve(router).await?;

    shutdown_tracing();
    Ok(())
}
