//! REST Collaborators
//!
//! The signing pipeline talks to the chain through two seams:
//! - `AccountResolver`: current account number and sequence for an address
//! - `Broadcaster`: submits the finished transaction
//!
//! `RestClient` implements both against a legacy LCD REST server.

mod client;
mod nameservice;

pub use client::*;
pub use nameservice::*;

use async_trait::async_trait;

use crate::error::CosmosResult;
use crate::types::{AccountInfo, BroadcastMode, SignedTx};

/// Fetches fresh on-chain account state
#[async_trait]
pub trait AccountResolver: Send + Sync {
    async fn account_info(&self, address: &str) -> CosmosResult<AccountInfo>;
}

/// Submits a signed transaction and returns the server's response body
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn submit(&self, tx: &SignedTx, mode: BroadcastMode) -> CosmosResult<serde_json::Value>;
}

