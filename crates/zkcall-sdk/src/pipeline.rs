// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Orchestrator: deploy → prove → encode → verify.
//!
//! Stages run strictly one after another and the first failure ends the
//! run with its own error kind. Nothing is retried. A verifier answering
//! `false` is reported in [`VerificationResult::verified`], never as an
//! error.
//!
//! ```rust,no_run
//! use zkcall_circuit::CircuitKind;
//! use zkcall_sdk::local::LocalChain;
//! use zkcall_sdk::pipeline::Pipeline;
//! use zkcall_sdk::prover::{ArkProver, CircuitInput};
//!
//! # async fn example() -> zkcall_sdk::error::PipelineResult<()> {
//! let (prover, vk) = ArkProver::setup(CircuitKind::Multiplier, 42)?;
//! let pipeline = Pipeline::new(prover, LocalChain::new(vk));
//! let result = pipeline.run(&CircuitInput::new().with("a", 3).with("b", 4)).await?;
//! assert!(result.verified);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use serde::Serialize;
use zkcall_types::{Proof, PublicSignals};

use crate::artifact::save_artifact;
use crate::calldata::{build_calldata, CallData};
use crate::chain::{verify_on_chain, Address, ChainClient};
use crate::error::PipelineResult;
use crate::prover::{CircuitInput, ProverService};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    pub deployed_address: Address,
    pub verified: bool,
    pub calldata: CallData,
}

pub struct Pipeline<P, C> {
    prover: P,
    chain: C,
    artifact_path: Option<PathBuf>,
}

impl<P: ProverService, C: ChainClient> Pipeline<P, C> {
    pub fn new(prover: P, chain: C) -> Self {
        Self {
            prover,
            chain,
            artifact_path: None,
        }
    }

    /// Persist the raw prover output here after every proving run.
    pub fn with_artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }

    pub fn prover(&self) -> &P {
        &self.prover
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub async fn run_proof(&self, input: &CircuitInput) -> PipelineResult<(Proof, PublicSignals)> {
        tracing::info!(signals = input.0.len(), "generating proof");
        let output = self.prover.prove(input).await?;

        if let Some(path) = &self.artifact_path {
            save_artifact(path, &output)?;
            tracing::debug!(path = %path.display(), "proof artifact written");
        }

        let (proof, signals) = output.normalize()?;
        tracing::info!(public_inputs = signals.len(), "proof generated");
        Ok((proof, signals))
    }

    pub async fn submit_verification(
        &self,
        verifier: &Address,
        calldata: &CallData,
    ) -> PipelineResult<bool> {
        tracing::info!(%verifier, "submitting verification");
        Ok(verify_on_chain(&self.chain, verifier, calldata).await?)
    }

    #[tracing::instrument(name = "pipeline", skip_all)]
    pub async fn run(&self, input: &CircuitInput) -> PipelineResult<VerificationResult> {
        let deployed_address = self.chain.deploy_verifier().await?;
        tracing::info!(address = %deployed_address, "verifier ready");

        let (proof, signals) = self.run_proof(input).await?;

        let calldata = build_calldata(&proof, &signals)?;
        tracing::debug!(words = calldata.word_count(), "calldata encoded");

        let verified = self.submit_verification(&deployed_address, &calldata).await?;
        Ok(VerificationResult {
            deployed_address,
            verified,
            calldata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChainError, PipelineError, ProverError};
    use crate::prover::ProverOutput;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use zkcall_types::{FieldElement, G1Point, G2Point};

    struct FixedProver(ProverOutput);

    #[async_trait]
    impl ProverService for FixedProver {
        async fn prove(&self, _: &CircuitInput) -> Result<ProverOutput, ProverError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProver;

    #[async_trait]
    impl ProverService for FailingProver {
        async fn prove(&self, _: &CircuitInput) -> Result<ProverOutput, ProverError> {
            Err(ProverError::Command {
                step: "witness calculation",
                message: "boom".into(),
            })
        }
    }

    /// Answers every call with a fixed payload and counts calls.
    struct ScriptedChain {
        answer: Result<Vec<u8>, fn() -> ChainError>,
        calls: AtomicUsize,
    }

    impl ScriptedChain {
        fn answering(answer: Result<Vec<u8>, fn() -> ChainError>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChainClient for ScriptedChain {
        async fn deploy_verifier(&self) -> Result<Address, ChainError> {
            Ok(Address([0xab; 20]))
        }

        async fn call(&self, _: &Address, _: &[u8]) -> Result<Vec<u8>, ChainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(ret) => Ok(ret.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn output() -> ProverOutput {
        let fe = |v: u64| FieldElement::from(v);
        let proof = Proof {
            a: G1Point::new(fe(1), fe(2)),
            b: G2Point::new([fe(3), fe(4)], [fe(5), fe(6)]),
            c: G1Point::new(fe(7), fe(8)),
        };
        ProverOutput::from_normalized(&proof, &vec![fe(12)])
    }

    #[tokio::test]
    async fn run_reports_true() {
        let chain = ScriptedChain::answering(Ok(crate::abi::encode_bool(true)));
        let pipeline = Pipeline::new(FixedProver(output()), chain);
        let result = pipeline.run(&CircuitInput::new()).await.unwrap();
        assert!(result.verified);
        assert_eq!(result.deployed_address, Address([0xab; 20]));
        assert_eq!(result.calldata.inputs.len(), 1);
    }

    #[tokio::test]
    async fn false_is_a_result() {
        let chain = ScriptedChain::answering(Ok(crate::abi::encode_bool(false)));
        let pipeline = Pipeline::new(FixedProver(output()), chain);
        let result = pipeline.run(&CircuitInput::new()).await.unwrap();
        assert!(!result.verified);
    }

    #[tokio::test]
    async fn chain_failure_is_chain_error() {
        let chain = ScriptedChain::answering(Err(|| ChainError::Transport("refused".into())));
        let pipeline = Pipeline::new(FixedProver(output()), chain);
        let err = pipeline.run(&CircuitInput::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Chain(ChainError::Transport(_))));
    }

    #[tokio::test]
    async fn garbage_return_is_chain_error() {
        let chain = ScriptedChain::answering(Ok(vec![7u8; 32]));
        let pipeline = Pipeline::new(FixedProver(output()), chain);
        let err = pipeline.run(&CircuitInput::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Chain(ChainError::MalformedReturn(_))));
    }

    #[tokio::test]
    async fn prover_failure_stops_before_chain_call() {
        let chain = ScriptedChain::answering(Ok(crate::abi::encode_bool(true)));
        let pipeline = Pipeline::new(FailingProver, chain);
        let err = pipeline.run(&CircuitInput::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Prover(ProverError::Command { .. })));
        assert_eq!(pipeline.chain().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oversized_signal_is_encoding_error() {
        let mut out = output();
        out.public_signals = vec![format!("0x1{}", "0".repeat(64))];
        let chain = ScriptedChain::answering(Ok(crate::abi::encode_bool(true)));
        let pipeline = Pipeline::new(FixedProver(out), chain);
        let err = pipeline.run(&CircuitInput::new()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Encoding(_)));
        assert_eq!(pipeline.chain().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn run_proof_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof.json");
        let pipeline = Pipeline::new(
            FixedProver(output()),
            ScriptedChain::answering(Ok(crate::abi::encode_bool(true))),
        )
        .with_artifact_path(&path);
        let (_, signals) = pipeline.run_proof(&CircuitInput::new()).await.unwrap();
        assert_eq!(signals, vec![FieldElement::from(12u64)]);
        assert_eq!(crate::artifact::load_artifact(&path).unwrap(), output());
    }
}
