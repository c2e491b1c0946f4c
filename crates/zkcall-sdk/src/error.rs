// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Typed errors for the prove → encode → verify pipeline.
//!
//! A verifier answering `false` is a result, not an error: only a call
//! that never produced an answer ends up as [`ChainError`].

use std::path::PathBuf;

use zkcall_types::{EncodingError, NativeFormatError};

use crate::abi::AbiError;
use crate::chain::Address;

#[derive(Debug, thiserror::Error)]
pub enum ProverError {
    #[error("malformed circuit input: {0}")]
    MalformedInput(String),

    #[error("missing artifact: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("circuit: {0}")]
    Circuit(String),

    #[error("{step} failed: {message}")]
    Command { step: &'static str, message: String },

    #[error("malformed prover output: {0}")]
    MalformedOutput(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("prover task: {0}")]
    Internal(String),
}

#[cfg(feature = "prove")]
impl From<zkcall_circuit::CircuitError> for ProverError {
    fn from(e: zkcall_circuit::CircuitError) -> Self {
        ProverError::Circuit(e.to_string())
    }
}

impl From<NativeFormatError> for ProverError {
    fn from(e: NativeFormatError) -> Self {
        ProverError::MalformedOutput(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("verifier unreachable: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("verifier call reverted: {0}")]
    Reverted(String),

    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),

    #[error("no verifier deployed at {0}")]
    NoCode(Address),

    #[error("verifier deployment failed: {0}")]
    Deploy(String),

    #[error("unexpected verifier return data: {0}")]
    MalformedReturn(#[from] AbiError),
}

impl From<reqwest::Error> for ChainError {
    fn from(e: reqwest::Error) -> Self {
        ChainError::Transport(e.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("encoding: {0}")]
    Encoding(#[from] EncodingError),

    #[error("prover: {0}")]
    Prover(#[from] ProverError),

    #[error("chain: {0}")]
    Chain(#[from] ChainError),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
