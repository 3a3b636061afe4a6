use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use parlance::application::services::TranscriptionService;
use parlance::infrastructure::observability::{init_tracing, TracingConfig};
use parlance::infrastructure::speech::{GoogleSpeechClient, GoogleSpeechConfig};
use parlance::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::from(&settings.logging), settings.server.port);

    if settings.speech.api_key.is_empty() {
        tracing::warn!("SPEECH_API_KEY is not set; transcription requests will fail with 503");
    }

    let mut speech_config = GoogleSpeechConfig::new(settings.speech.api_key.clone())
        .with_poll_interval(Duration::from_secs(settings.speech.poll_interval_seconds));
    if let Some(base_url) = &settings.speech.base_url {
        speech_config = speech_config.with_base_url(base_url);
    }

    let recognizer = Arc::new(GoogleSpeechClient::new(speech_config));
    let transcription_service = Arc::new(TranscriptionService::new(recognizer));

    let state = AppState {
        transcription_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
