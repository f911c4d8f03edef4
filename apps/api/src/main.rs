mod assistant;
mod config;
mod db;
mod errors;
mod hunt;
mod llm_client;
mod notify;
mod report;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::agent::Assistant;
use crate::assistant::tools::ToolBox;
use crate::config::Config;
use crate::db::create_pool;
use crate::hunt::fetcher::ReaderProxyFetcher;
use crate::hunt::orchestrator::HuntOrchestrator;
use crate::hunt::scheduler::start_scheduler;
use crate::llm_client::{LanguageModel, LlmClient};
use crate::notify::{EmailNotifier, BREVO_BASE_URL};
use crate::report::pdf::PdfRenderer;
use crate::report::FileReportEmitter;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::DocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobOs API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite (chat history)
    let db = create_pool(&config.database_url).await?;

    // Initialize document store client
    let store = DocumentStore::new(&config.pocketbase_url)?;
    info!("Document store client initialized ({})", config.pocketbase_url);

    // Initialize LLM client
    let llm: Arc<dyn LanguageModel> = Arc::new(LlmClient::new(config.groq_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Hunt pipeline
    let fetcher = ReaderProxyFetcher::new(&config.reader_base_url, config.jina_api_key.clone())?;
    if config.jina_api_key.is_none() {
        warn!("JINA_API_KEY not set; reader proxy requests are unauthenticated");
    }
    let renderer = PdfRenderer::new(&config.pdf_renderer);
    let reporter = FileReportEmitter::new(&config.reports_dir, renderer.clone(), store.clone());
    let hunt = Arc::new(HuntOrchestrator::new(
        Arc::new(fetcher),
        llm.clone(),
        Arc::new(reporter),
    ));

    // Daily scheduled hunt; kept alive for the lifetime of the server
    let notifier = EmailNotifier::new(
        BREVO_BASE_URL,
        config.brevo_api_key.clone(),
        &config.email_sender,
    )?;
    let _scheduler = start_scheduler(
        hunt.clone(),
        notifier,
        &config.hunt_schedule,
        config.notify_email.clone(),
    )
    .await?;

    let assistant = Assistant::new(llm.clone(), ToolBox::new(store.clone()), db);

    // Build app state
    let state = AppState {
        hunt,
        assistant: Arc::new(assistant),
        llm,
        store,
        renderer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS restricted to the configured origins. Origins that fail to parse are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
