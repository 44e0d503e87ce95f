//! Nameservice tx generation
//!
//! The nameservice REST module builds unsigned transactions server-side:
//! `POST /nameservice/names` returns an `UnsignedStdTx` that can be fed
//! straight into `TransactionBuilder::from_unsigned`.

use serde::Serialize;

use super::RestClient;
use crate::error::{CosmosError, CosmosResult};
use crate::types::UnsignedStdTx;

/// Parameters for a `BuyName` transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNameRequest {
    pub chain_id: String,
    /// Buyer and fee payer address
    pub buyer: String,
    pub name: String,
    pub amount: u64,
    pub denom: String,
}

#[derive(Debug, Serialize)]
struct BaseReq<'a> {
    chain_id: &'a str,
    from: &'a str,
}

#[derive(Debug, Serialize)]
struct BuyNameBody<'a> {
    base_req: BaseReq<'a>,
    name: &'a str,
    amount: String,
    buyer: &'a str,
}

impl BuyNameRequest {
    fn body(&self) -> BuyNameBody<'_> {
        BuyNameBody {
            base_req: BaseReq {
                chain_id: &self.chain_id,
                from: &self.buyer,
            },
            name: &self.name,
            amount: format!("{}{}", self.amount, self.denom),
            buyer: &self.buyer,
        }
    }
}

impl RestClient {
    /// Ask the server to generate an unsigned `BuyName` transaction
    pub async fn buy_name(&self, request: &BuyNameRequest) -> CosmosResult<UnsignedStdTx> {
        let body = self.post_json("nameservice/names", &request.body()).await?;

        serde_json::from_value(body.clone()).map_err(|e| {
            CosmosError::parse_error(format!("Malformed unsigned tx: {}", e))
                .with_details(body.to_string())
        })
    }
}
