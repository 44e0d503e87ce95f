//! LCD REST client
//!
//! `GET /auth/accounts/{address}` and `POST /txs`. Successful bodies are
//! returned verbatim; non-2xx responses become `HttpStatus` errors that
//! carry the raw body. No request is ever retried.

use async_trait::async_trait;
use serde::Serialize;

use super::{AccountResolver, Broadcaster};
use crate::config::ClientConfig;
use crate::error::{CosmosError, CosmosResult};
use crate::types::{AccountDetails, AccountInfo, BroadcastMode, BroadcastRequest, SignedTx};
use crate::utils::{get_json_u64, parse_body_lenient};
use crate::{log_debug, log_warn};

/// Async client for a single REST endpoint
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> CosmosResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| CosmosError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Client for `endpoint` with default timeouts
    pub fn with_endpoint(endpoint: &str) -> CosmosResult<Self> {
        Self::new(ClientConfig::default().with_endpoint(endpoint)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// GET a path and return the JSON body
    pub async fn get_json(&self, path: &str) -> CosmosResult<serde_json::Value> {
        let url = self.config.url(path);
        log_debug!("rest", "GET", url = url);

        let response = self.client.get(&url).send().await?;
        read_response(&url, response).await
    }

    /// POST a JSON body to a path and return the JSON body
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> CosmosResult<serde_json::Value> {
        let url = self.config.url(path);
        log_debug!("rest", "POST", url = url);

        let response = self.client.post(&url).json(body).send().await?;
        read_response(&url, response).await
    }

    /// Full account record for an address
    pub async fn account_details(&self, address: &str) -> CosmosResult<AccountDetails> {
        let body = self.get_json(&format!("auth/accounts/{}", address)).await?;
        log_debug!("rest", "Account fetched", address = address, height = get_json_u64(&body, "height").unwrap_or_default());

        serde_json::from_value(body.clone()).map_err(|e| {
            CosmosError::parse_error(format!("Malformed account response: {}", e))
                .with_details(body.to_string())
        })
    }

    /// `POST /txs` with `{tx, mode}`
    pub async fn broadcast_tx(
        &self,
        tx: &SignedTx,
        mode: BroadcastMode,
    ) -> CosmosResult<serde_json::Value> {
        self.post_json("txs", &BroadcastRequest { tx, mode }).await
    }
}

async fn read_response(url: &str, response: reqwest::Response) -> CosmosResult<serde_json::Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        log_warn!("rest", "Non-success response", url = url, status = status.as_u16());
        return Err(CosmosError::http_status(status.as_u16(), url, body));
    }

    Ok(parse_body_lenient(&body))
}

#[async_trait]
impl AccountResolver for RestClient {
    async fn account_info(&self, address: &str) -> CosmosResult<AccountInfo> {
        let details = self.account_details(address).await?;
        Ok(AccountInfo::from(&details))
    }
}

#[async_trait]
impl Broadcaster for RestClient {
    async fn submit(&self, tx: &SignedTx, mode: BroadcastMode) -> CosmosResult<serde_json::Value> {
        self.broadcast_tx(tx, mode).await
    }
}
