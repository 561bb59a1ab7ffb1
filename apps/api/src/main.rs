mod config;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::airtable::AirtableClient;
use crate::store::fields::FieldMapping;
use crate::store::RecordStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Upwork Job Processor v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.openai_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the table store client
    let table = Arc::new(AirtableClient::new(
        config.airtable_api_key.clone(),
        config.airtable_base_id.clone(),
        config.airtable_table_id.clone(),
        config.airtable_view_id.clone(),
    ));

    // Resolve canonical fields against the deployed table's column names.
    // Runs once; the mapping is read-only for the process lifetime.
    let mapping = Arc::new(FieldMapping::discover(table.as_ref()).await?);
    let store = Arc::new(RecordStore::new(table, mapping));
    info!("Record store initialized: {:?}", store.mapping());

    if config.slack_bot_token.is_some() {
        info!("Notification credential present (channel not exercised by the pipeline)");
    }

    // Build app state
    let state = AppState { llm, store };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
