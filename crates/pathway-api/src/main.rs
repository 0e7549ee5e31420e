use std::sync::Arc;

use pathway_api::config::ApiConfig;
use pathway_api::state::AppState;
use pathway_storage::{MemoryStore, S3Store, Store};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;

    let store: Arc<dyn Store> = match &config.bucket {
        Some(bucket) => {
            let s3 = pathway_storage::client::build_client_with_region(&config.region).await;
            tracing::info!(bucket = %bucket, region = %config.region, "using S3 store");
            Arc::new(S3Store::new(s3, bucket.clone()))
        }
        None => {
            tracing::warn!("PATHWAY_BUCKET not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let app = pathway_api::router(AppState::new(store));

    if config.lambda {
        lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
    } else {
        let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
        tracing::info!(addr = %config.bind_addr, "listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
