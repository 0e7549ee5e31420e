use std::env;
use std::net::SocketAddr;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";

/// Process configuration, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// S3 bucket for persistence. `None` selects the in-memory store.
    pub bucket: Option<String>,
    pub region: String,
    pub bind_addr: SocketAddr,
    /// Serve through the Lambda runtime instead of a local listener.
    pub lambda: bool,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("PATHWAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("invalid PATHWAY_BIND_ADDR '{bind_addr}': {e}"))?;

        Ok(Self {
            bucket: get("PATHWAY_BUCKET"),
            region: get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bind_addr,
            lambda: get("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}
