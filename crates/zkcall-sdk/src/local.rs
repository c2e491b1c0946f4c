// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! In-process verifier "chain".
//!
//! [`LocalVerifier`] behaves like the generated Solidity Groth16 verifier:
//!
//! - unknown selector or wrong calldata length → revert
//! - public input ≥ scalar modulus → `false`
//! - coordinate ≥ base modulus, point off curve or outside the subgroup → `false`
//! - `(0, 0)` is the point at infinity
//! - otherwise the pairing check decides
//!
//! It reads `b` in verifier limb order and undoes the swap before handing
//! the point to arkworks, so a proof whose limbs were swapped zero or two
//! times fails here exactly as it would on chain.

use std::collections::HashMap;

use ark_bn254::Bn254;
use ark_groth16::{Groth16, PreparedVerifyingKey, VerifyingKey};
use ark_serialize::CanonicalSerialize;
use ark_snark::SNARK;
use async_trait::async_trait;
use tokio::sync::RwLock;
use zkcall_types::{G1Point, G2Point, Proof, Word};

use crate::abi;
use crate::ark::{proof_to_ark, signal_to_ark};
use crate::calldata::{swap_g2_limbs, CallData};
use crate::chain::{Address, ChainClient};
use crate::error::ChainError;

pub struct LocalVerifier {
    pvk: PreparedVerifyingKey<Bn254>,
    n_inputs: usize,
}

impl LocalVerifier {
    pub fn new(vk: &VerifyingKey<Bn254>) -> Self {
        Self {
            pvk: PreparedVerifyingKey::from(vk.clone()),
            n_inputs: vk.gamma_abc_g1.len().saturating_sub(1),
        }
    }

    pub fn public_input_count(&self) -> usize {
        self.n_inputs
    }

    /// Run one `verifyProof` call. `Err` is a revert.
    pub fn execute(&self, data: &[u8]) -> Result<bool, ChainError> {
        let calldata = abi::decode_verify_call(data, self.n_inputs)
            .map_err(|e| ChainError::Reverted(e.to_string()))?;
        Ok(self.check(&calldata))
    }

    fn check(&self, calldata: &CallData) -> bool {
        let mut inputs = Vec::with_capacity(calldata.inputs.len());
        for word in &calldata.inputs {
            match signal_to_ark(&word.to_field_element()) {
                Some(fr) => inputs.push(fr),
                None => return false,
            }
        }

        let g1 = |w: &[Word; 2]| G1Point::new(w[0].to_field_element(), w[1].to_field_element());
        let [bx, by] = swap_g2_limbs(&calldata.b);
        let proof = Proof {
            a: g1(&calldata.a),
            b: G2Point::new(
                [bx[0].to_field_element(), bx[1].to_field_element()],
                [by[0].to_field_element(), by[1].to_field_element()],
            ),
            c: g1(&calldata.c),
        };
        let Some(proof) = proof_to_ark(&proof) else {
            return false;
        };

        Groth16::<Bn254>::verify_with_processed_vk(&self.pvk, &inputs, &proof).unwrap_or(false)
    }
}

/// Content-addressed verifier registry.
///
/// Deploying the same verifying key twice yields the same address.
pub struct LocalChain {
    vk: VerifyingKey<Bn254>,
    contracts: RwLock<HashMap<Address, LocalVerifier>>,
}

impl LocalChain {
    pub fn new(vk: VerifyingKey<Bn254>) -> Self {
        Self {
            vk,
            contracts: RwLock::new(HashMap::new()),
        }
    }

    /// Address a verifier for `vk` is deployed under.
    pub fn verifier_address(vk: &VerifyingKey<Bn254>) -> Result<Address, ChainError> {
        let mut bytes = Vec::new();
        vk.serialize_compressed(&mut bytes)
            .map_err(|e| ChainError::Deploy(e.to_string()))?;
        Ok(Address::from_hash(&abi::keccak256(&bytes)))
    }

    /// Deploy a verifier for an arbitrary key on this chain.
    pub async fn deploy(&self, vk: &VerifyingKey<Bn254>) -> Result<Address, ChainError> {
        let address = Self::verifier_address(vk)?;
        let mut contracts = self.contracts.write().await;
        if !contracts.contains_key(&address) {
            let verifier = LocalVerifier::new(vk);
            tracing::info!(%address, inputs = verifier.public_input_count(), "verifier deployed");
            contracts.insert(address, verifier);
        }
        Ok(address)
    }
}

#[async_trait]
impl ChainClient for LocalChain {
    async fn deploy_verifier(&self) -> Result<Address, ChainError> {
        self.deploy(&self.vk).await
    }

    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        let contracts = self.contracts.read().await;
        let verifier = contracts.get(to).ok_or(ChainError::NoCode(*to))?;
        verifier.execute(data).map(abi::encode_bool)
    }
}
