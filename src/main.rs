use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use scribed::application::services::TranscriptionService;
use scribed::infrastructure::audio::TranscriptionEngineFactory;
use scribed::infrastructure::observability::init_tracing;
use scribed::infrastructure::storage::LocalStagingStore;
use scribed::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().map_err(anyhow::Error::msg)?;

    init_tracing(&settings.logging, settings.server.port);

    // model weights are fetched and loaded once here; every request shares the engine
    let engine = TranscriptionEngineFactory::create(&settings.transcription)?;

    let staging = Arc::new(LocalStagingStore::new(settings.uploads.dir.clone().into())?);

    let transcription_service = Arc::new(TranscriptionService::new(engine, staging));

    let state = AppState {
        transcription_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let host: std::net::IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
