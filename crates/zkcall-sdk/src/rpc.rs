// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Ethereum JSON-RPC chain client.
//!
//! Verification is a read-only `eth_call`; nothing is signed or sent. The
//! verifier contract must already be deployed: [`RpcChain`] only checks
//! that code exists at the configured address.
//!
//! # Example
//!
//! ```rust,no_run
//! use zkcall_sdk::chain::ChainClient;
//! use zkcall_sdk::rpc::RpcChain;
//!
//! # async fn example() -> Result<(), zkcall_sdk::error::ChainError> {
//! let verifier = "0x5fbdb2315678afecb367f032d93f642f64180aa3".parse().ok();
//! let chain = RpcChain::new("http://127.0.0.1:8545", verifier)?;
//! let address = chain.deploy_verifier().await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::chain::{Address, ChainClient};
use crate::error::ChainError;

/// JSON-RPC error code geth and anvil use for `execution reverted`.
const REVERT_CODE: i64 = 3;

pub struct RpcChain {
    url: String,
    verifier: Option<Address>,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl RpcChain {
    pub fn new(url: &str, verifier: Option<Address>) -> Result<Self, ChainError> {
        Ok(Self {
            url: url.to_string(),
            verifier,
            http: reqwest::Client::new(),
        })
    }

    pub fn with_timeout(
        url: &str,
        verifier: Option<Address>,
        timeout: Duration,
    ) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            verifier,
            http,
        })
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        tracing::debug!(url = %self.url, method, "rpc request");
        let resp: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.error {
            return Err(classify_error(err));
        }
        resp.result
            .ok_or_else(|| ChainError::MalformedResponse("neither result nor error".into()))
    }
}

#[async_trait]
impl ChainClient for RpcChain {
    async fn deploy_verifier(&self) -> Result<Address, ChainError> {
        let address = self.verifier.ok_or_else(|| {
            ChainError::Deploy(
                "no verifier address configured (deploy the contract, then set verifier_address)"
                    .into(),
            )
        })?;
        let code = self
            .request("eth_getCode", json!([address.to_string(), "latest"]))
            .await?;
        if parse_hex_data(&code)?.is_empty() {
            return Err(ChainError::NoCode(address));
        }
        tracing::info!(%address, "verifier located");
        Ok(address)
    }

    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        let tx = json!({
            "to": to.to_string(),
            "data": format!("0x{}", hex::encode(data)),
        });
        let ret = self.request("eth_call", json!([tx, "latest"])).await?;
        parse_hex_data(&ret)
    }
}

fn classify_error(err: RpcErrorBody) -> ChainError {
    if err.code == REVERT_CODE || err.message.contains("revert") {
        let detail = match err.data {
            Some(Value::String(data)) => format!("{} ({data})", err.message),
            _ => err.message,
        };
        ChainError::Reverted(detail)
    } else {
        ChainError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

fn parse_hex_data(value: &Value) -> Result<Vec<u8>, ChainError> {
    let s = value
        .as_str()
        .ok_or_else(|| ChainError::MalformedResponse(format!("expected hex string, got {value}")))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| ChainError::MalformedResponse(format!("invalid hex: {e}")))
}
