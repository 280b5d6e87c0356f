use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use casebrief::application::services::{
    BriefExporter, BriefGenerator, DocumentPipeline, OcrBridge, RetryPolicy, TextExtractor,
};
use casebrief::infrastructure::export::DocxBriefRenderer;
use casebrief::infrastructure::identity::IdentityVerifierFactory;
use casebrief::infrastructure::llm::OpenAiClient;
use casebrief::infrastructure::observability::{TracingConfig, init_tracing};
use casebrief::infrastructure::persistence::DocumentRepositoryFactory;
use casebrief::infrastructure::storage::BlobStoreFactory;
use casebrief::infrastructure::text_processing::{PdfAdapter, VisionOcrAdapter};
use casebrief::presentation::config::{Environment, StorageProviderSetting};
use casebrief::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::try_from(
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
    )
    .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));
    tracing::info!(environment = %environment, "Starting casebrief");

    let blob_store = BlobStoreFactory::create(&settings.storage)?;
    let repository = DocumentRepositoryFactory::create(&settings.database).await?;
    let identity_verifier = IdentityVerifierFactory::create(&settings.identity)?;
    let llm_client = Arc::new(OpenAiClient::new(&settings.llm)?);

    if settings.storage.provider == StorageProviderSetting::Local {
        tracing::warn!("Local blob storage is not reachable by the OCR engine; scanned PDFs will fail");
    }
    let bucket = settings.storage.bucket.clone().unwrap_or_default();
    let ocr_engine = Arc::new(VisionOcrAdapter::new(&settings.ocr, &bucket)?);

    let retry = &settings.pipeline.retry;
    let retry_policy = RetryPolicy::new(
        retry.max_attempts,
        retry.multiplier,
        Duration::from_secs_f64(retry.min_backoff_secs),
        Duration::from_secs_f64(retry.max_backoff_secs),
    );

    let text_extractor = TextExtractor::new(
        Arc::new(PdfAdapter::new()),
        settings.pipeline.min_native_chars,
    );
    let ocr_bridge = OcrBridge::new(
        Arc::clone(&blob_store),
        ocr_engine,
        Duration::from_secs(settings.ocr.poll_interval_secs),
        Duration::from_secs(settings.ocr.poll_timeout_secs),
    );
    let brief_generator = BriefGenerator::new(llm_client, Arc::clone(&repository), retry_policy);

    let pipeline = Arc::new(DocumentPipeline::new(
        text_extractor,
        ocr_bridge,
        brief_generator,
        Arc::clone(&blob_store),
        Arc::clone(&repository),
        settings.pipeline.max_upload_bytes,
    ));
    let exporter = Arc::new(BriefExporter::new(
        Arc::clone(&repository),
        Arc::new(DocxBriefRenderer::new()),
    ));

    let state = AppState {
        pipeline,
        exporter,
        identity_verifier,
        allowed_origins: settings.server.allowed_origins.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
