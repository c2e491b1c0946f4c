// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Prover service contract.
//!
//! A prover takes named circuit inputs and returns a proof plus public
//! signals in the snarkjs layout. The pipeline never looks inside: it
//! only normalizes whatever comes back.
//!
//! Two implementations:
//!
//! - [`ArkProver`] (feature `prove`): in-process arkworks Groth16 over
//!   one of the bundled circuits.
//! - [`SnarkjsProver`](crate::snarkjs::SnarkjsProver): shells out to the
//!   `snarkjs` CLI with a compiled circuit and proving key.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zkcall_types::{normalize_public_signals, FieldElement, Proof, PublicSignals, SnarkjsProof};

use crate::error::ProverError;

/// Named input signals, e.g. `{"a": 3, "b": "4"}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitInput(pub Map<String, Value>);

impl CircuitInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn from_json(s: &str) -> Result<Self, ProverError> {
        serde_json::from_str(s).map_err(|e| ProverError::MalformedInput(e.to_string()))
    }

    /// Every signal as a [`FieldElement`]. Accepts non-negative integers
    /// and decimal or `0x` hex strings.
    pub fn signals(&self) -> Result<BTreeMap<String, FieldElement>, ProverError> {
        self.0
            .iter()
            .map(|(name, value)| {
                let fe = match value {
                    Value::Number(n) => n.as_u64().map(FieldElement::from).ok_or_else(|| {
                        ProverError::MalformedInput(format!("{name}: {n} is not a non-negative integer"))
                    })?,
                    Value::String(s) => s
                        .parse::<FieldElement>()
                        .map_err(|e| ProverError::MalformedInput(format!("{name}: {e}")))?,
                    other => {
                        return Err(ProverError::MalformedInput(format!(
                            "{name}: expected number or string, got {other}"
                        )))
                    }
                };
                Ok((name.clone(), fe))
            })
            .collect()
    }
}

/// Raw prover output, as snarkjs writes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverOutput {
    pub proof: SnarkjsProof,
    #[serde(rename = "publicSignals")]
    pub public_signals: Vec<String>,
}

impl ProverOutput {
    pub fn from_normalized(proof: &Proof, signals: &PublicSignals) -> Self {
        Self {
            proof: SnarkjsProof::from_proof(proof),
            public_signals: signals.iter().map(FieldElement::to_decimal).collect(),
        }
    }

    pub fn normalize(&self) -> Result<(Proof, PublicSignals), ProverError> {
        Ok((
            self.proof.normalize()?,
            normalize_public_signals(&self.public_signals)?,
        ))
    }
}

#[async_trait]
pub trait ProverService: Send + Sync {
    async fn prove(&self, input: &CircuitInput) -> Result<ProverOutput, ProverError>;
}

#[async_trait]
impl<T: ProverService + ?Sized> ProverService for Box<T> {
    async fn prove(&self, input: &CircuitInput) -> Result<ProverOutput, ProverError> {
        (**self).prove(input).await
    }
}

#[cfg(feature = "prove")]
pub use ark_prover::ArkProver;

#[cfg(feature = "prove")]
mod ark_prover {
    use std::sync::Arc;

    use ark_bn254::{Bn254, Fr};
    use ark_groth16::{ProvingKey, VerifyingKey};
    use zkcall_circuit::{CircuitKind, Witness};

    use super::*;
    use crate::ark::{proof_from_ark, signal_to_ark, signals_from_ark};

    /// In-process Groth16 prover for a bundled circuit.
    #[derive(Clone)]
    pub struct ArkProver {
        circuit: CircuitKind,
        pk: Arc<ProvingKey<Bn254>>,
    }

    impl ArkProver {
        pub fn new(circuit: CircuitKind, pk: ProvingKey<Bn254>) -> Self {
            Self {
                circuit,
                pk: Arc::new(pk),
            }
        }

        /// Deterministic setup from `seed`. Returns the prover and the
        /// matching verifying key.
        pub fn setup(
            circuit: CircuitKind,
            seed: u64,
        ) -> Result<(Self, VerifyingKey<Bn254>), ProverError> {
            let (pk, vk) = circuit.setup_deterministic(seed)?;
            tracing::debug!(%circuit, seed, constraints = circuit.constraint_count(), "groth16 setup");
            Ok((Self::new(circuit, pk), vk))
        }

        pub fn circuit(&self) -> CircuitKind {
            self.circuit
        }

        fn witness(&self, input: &CircuitInput) -> Result<Witness, ProverError> {
            input
                .signals()?
                .into_iter()
                .map(|(name, value)| {
                    let fr: Fr = signal_to_ark(&value).ok_or_else(|| {
                        ProverError::MalformedInput(format!(
                            "{name}: value is not below the scalar field modulus"
                        ))
                    })?;
                    Ok((name, fr))
                })
                .collect()
        }
    }

    #[async_trait]
    impl ProverService for ArkProver {
        async fn prove(&self, input: &CircuitInput) -> Result<ProverOutput, ProverError> {
            let witness = self.witness(input)?;
            let circuit = self.circuit;
            let pk = Arc::clone(&self.pk);

            let (proof, public) = tokio::task::spawn_blocking(move || {
                circuit.prove(&pk, &witness, &mut rand::thread_rng())
            })
            .await
            .map_err(|e| ProverError::Internal(e.to_string()))??;

            Ok(ProverOutput::from_normalized(
                &proof_from_ark(&proof),
                &signals_from_ark(&public),
            ))
        }
    }
}
