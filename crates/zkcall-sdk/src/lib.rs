// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # zkcall-sdk
//!
//! Turns Groth16 proofs into calldata for an on-chain pairing-check
//! verifier and submits them.
//!
//! The encoder ([`calldata`]) is pure: a normalized proof and its public
//! signals go in, fixed-width 32-byte words come out, with the G2 limbs
//! reordered for the verifier. Everything around it (proving, chain
//! access, config, artifacts) sits behind small traits so the pipeline
//! can run against snarkjs and a real node, or entirely in-process.
//!
//! ## Crate layout
//!
//! | Module | Purpose |
//! |---|---|
//! | *crate root* | Re-exports core types (`FieldElement`, `Proof`, `Word`, …) |
//! | [`calldata`] | Field element → word encoding, G2 limb swap, `CallData` |
//! | [`abi`] | `verifyProof` selector and static ABI framing |
//! | [`prover`] | `ProverService` trait, `CircuitInput`, in-process `ArkProver` |
//! | [`snarkjs`] | `snarkjs` CLI prover |
//! | [`chain`] | `ChainClient` trait, `Address` |
//! | [`local`] | In-process verifier contract |
//! | [`rpc`] | JSON-RPC `eth_call` client |
//! | [`pipeline`] | deploy → prove → encode → verify orchestration |
//! | [`config`] | `~/.zkcall/config.json` with env overrides |
//! | [`artifact`] | Proof artifact files |
//!
//! ## Features
//!
//! - `prove` (default): in-process proving with the bundled circuits.

pub use zkcall_types::{
    EncodingError, FieldElement, G1Point, G2Point, NativeFormatError, Proof, PublicSignals,
    SnarkjsProof, Word,
};

pub mod abi;
pub mod ark;
pub mod artifact;
pub mod calldata;
pub mod chain;
pub mod config;
pub mod error;
pub mod local;
pub mod pipeline;
pub mod prover;
pub mod rpc;
pub mod snarkjs;

pub use calldata::{build_calldata, encode_field_element, CallData};
pub use chain::{Address, ChainClient};
pub use error::{ChainError, PipelineError, PipelineResult, ProverError};
pub use pipeline::{Pipeline, VerificationResult};
pub use prover::{CircuitInput, ProverOutput, ProverService};
