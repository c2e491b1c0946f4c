// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Proof artifacts on disk.
//!
//! One pretty-printed JSON file holding `{ "proof": ..., "publicSignals": [...] }`,
//! the same shape a prover returns. Separate snarkjs `proof.json` /
//! `public.json` pairs can be loaded too.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use zkcall_types::SnarkjsProof;

use crate::prover::ProverOutput;

pub fn save_artifact(path: &Path, output: &ProverOutput) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(output)?;
    fs::write(path, json).with_context(|| format!("cannot write artifact to {}", path.display()))?;
    Ok(())
}

pub fn load_artifact(path: &Path) -> Result<ProverOutput> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read artifact at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid proof artifact JSON")
}

pub fn load_snarkjs_files(proof_path: &Path, public_path: &Path) -> Result<ProverOutput> {
    let proof_data = fs::read_to_string(proof_path)
        .with_context(|| format!("cannot read {}", proof_path.display()))?;
    let public_data = fs::read_to_string(public_path)
        .with_context(|| format!("cannot read {}", public_path.display()))?;
    let proof: SnarkjsProof = serde_json::from_str(&proof_data).context("invalid proof JSON")?;
    let public_signals: Vec<String> =
        serde_json::from_str(&public_data).context("invalid public signals JSON")?;
    Ok(ProverOutput {
        proof,
        public_signals,
    })
}
