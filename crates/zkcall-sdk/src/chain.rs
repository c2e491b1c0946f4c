// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Chain client abstraction.
//!
//! A [`ChainClient`] can locate (or deploy) a verifier contract and make a
//! read-only call against it. Two implementations ship with the crate:
//!
//! | Client | Backend |
//! |---|---|
//! | [`LocalChain`](crate::local::LocalChain) | in-process verifier, no network |
//! | [`RpcChain`](crate::rpc::RpcChain) | Ethereum JSON-RPC (`eth_call`) |

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::abi;
use crate::calldata::CallData;
use crate::error::ChainError;

/// 20-byte contract address.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAddressError {
    #[error("expected 40 hex digits, got {0}")]
    Length(usize),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl Address {
    /// Last 20 bytes of a 32-byte hash, the way the EVM derives addresses.
    pub fn from_hash(hash: &[u8; 32]) -> Self {
        let mut out = [0u8; 20];
        out.copy_from_slice(&hash[12..]);
        Self(out)
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 40 {
            return Err(ParseAddressError::Length(digits.len()));
        }
        let mut out = [0u8; 20];
        hex::decode_to_slice(digits, &mut out)?;
        Ok(Self(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Address>().map_err(serde::de::Error::custom)
    }
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Deploy the verifier, or locate an existing one, and return its
    /// address.
    async fn deploy_verifier(&self) -> Result<Address, ChainError>;

    /// Read-only call. Returns the raw return data.
    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ChainError>;
}

#[async_trait]
impl<T: ChainClient + ?Sized> ChainClient for Box<T> {
    async fn deploy_verifier(&self) -> Result<Address, ChainError> {
        (**self).deploy_verifier().await
    }

    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        (**self).call(to, data).await
    }
}

/// Encode `verifyProof`, call `verifier`, decode the boolean answer.
///
/// A `false` answer is logged at `warn` and returned as `Ok(false)`.
pub async fn verify_on_chain<C: ChainClient + ?Sized>(
    chain: &C,
    verifier: &Address,
    calldata: &CallData,
) -> Result<bool, ChainError> {
    let data = abi::encode_verify_call(calldata);
    tracing::debug!(%verifier, bytes = data.len(), "calling verifyProof");
    let ret = chain.call(verifier, &data).await?;
    let verified = abi::decode_bool(&ret)?;
    if verified {
        tracing::info!(%verifier, "proof verified");
    } else {
        tracing::warn!(%verifier, "verifier rejected the proof");
    }
    Ok(verified)
}
