// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Prover backed by the `snarkjs` CLI.
//!
//! Needs a compiled circuit (`.wasm`), a proving key (`.zkey`) and
//! [snarkjs](https://github.com/iden3/snarkjs) on `$PATH`. Each call runs
//! two steps in `work_dir`:
//!
//! ```text
//! snarkjs wtns calculate <wasm> input.json witness.wtns
//! snarkjs groth16 prove <zkey> witness.wtns proof.json public.json
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ProverError;
use crate::prover::{CircuitInput, ProverOutput, ProverService};

const INPUT_FILE: &str = "input.json";
const WITNESS_FILE: &str = "witness.wtns";
const PROOF_FILE: &str = "proof.json";
const PUBLIC_FILE: &str = "public.json";

pub struct SnarkjsProver {
    wasm: PathBuf,
    zkey: PathBuf,
    work_dir: PathBuf,
    binary: String,
}

impl SnarkjsProver {
    pub fn new(wasm: impl Into<PathBuf>, zkey: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            wasm: wasm.into(),
            zkey: zkey.into(),
            work_dir: work_dir.into(),
            binary: "snarkjs".to_string(),
        }
    }

    /// Use a different executable, e.g. `npx` wrappers or a pinned path.
    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    async fn run(&self, step: &'static str, args: &[&OsStr]) -> Result<(), ProverError> {
        tracing::debug!(step, binary = %self.binary, "running prover step");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| ProverError::Command {
                step,
                message: format!("failed to run `{}`, is it installed? ({e})", self.binary),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ProverError::Command {
                step,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl ProverService for SnarkjsProver {
    async fn prove(&self, input: &CircuitInput) -> Result<ProverOutput, ProverError> {
        for artifact in [&self.wasm, &self.zkey] {
            if !artifact.exists() {
                return Err(ProverError::MissingArtifact(artifact.clone()));
            }
        }
        tokio::fs::create_dir_all(&self.work_dir).await?;

        let input_path = self.work_dir.join(INPUT_FILE);
        let witness_path = self.work_dir.join(WITNESS_FILE);
        let proof_path = self.work_dir.join(PROOF_FILE);
        let public_path = self.work_dir.join(PUBLIC_FILE);

        let json = serde_json::to_string_pretty(input)
            .map_err(|e| ProverError::MalformedInput(e.to_string()))?;
        tokio::fs::write(&input_path, json).await?;

        self.run(
            "witness calculation",
            &[
                OsStr::new("wtns"),
                OsStr::new("calculate"),
                self.wasm.as_os_str(),
                input_path.as_os_str(),
                witness_path.as_os_str(),
            ],
        )
        .await?;

        self.run(
            "proof generation",
            &[
                OsStr::new("groth16"),
                OsStr::new("prove"),
                self.zkey.as_os_str(),
                witness_path.as_os_str(),
                proof_path.as_os_str(),
                public_path.as_os_str(),
            ],
        )
        .await?;

        read_outputs(&self.work_dir).await
    }
}

/// Read `proof.json` and `public.json` from a snarkjs output directory.
pub async fn read_outputs(dir: &Path) -> Result<ProverOutput, ProverError> {
    let proof = read_json(&dir.join(PROOF_FILE)).await?;
    let public_signals = read_json(&dir.join(PUBLIC_FILE)).await?;
    Ok(ProverOutput {
        proof,
        public_signals,
    })
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ProverError> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ProverError::MissingArtifact(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&data)
        .map_err(|e| ProverError::MalformedOutput(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkcall_types::FieldElement;

    const PROOF_JSON: &str = r#"{
        "pi_a": ["1", "2", "1"],
        "pi_b": [["3", "4"], ["5", "6"], ["1", "0"]],
        "pi_c": ["7", "8", "1"],
        "protocol": "groth16",
        "curve": "bn128"
    }"#;

    #[tokio::test]
    async fn missing_artifacts_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let prover = SnarkjsProver::new(
            dir.path().join("circuit.wasm"),
            dir.path().join("circuit.zkey"),
            dir.path().join("work"),
        );
        let err = prover.prove(&CircuitInput::new().with("a", 3)).await.unwrap_err();
        assert!(matches!(err, ProverError::MissingArtifact(ref p) if p.ends_with("circuit.wasm")));
    }

    #[tokio::test]
    async fn missing_binary_is_command_error() {
        let dir = tempfile::tempdir().unwrap();
        let wasm = dir.path().join("circuit.wasm");
        let zkey = dir.path().join("circuit.zkey");
        std::fs::write(&wasm, b"").unwrap();
        std::fs::write(&zkey, b"").unwrap();

        let prover = SnarkjsProver::new(&wasm, &zkey, dir.path().join("work"))
            .with_binary("zkcall-test-no-such-binary");
        let err = prover.prove(&CircuitInput::new().with("a", 3)).await.unwrap_err();
        assert!(
            matches!(err, ProverError::Command { step: "witness calculation", .. }),
            "{err}"
        );
        // input is written before the first step runs
        assert!(dir.path().join("work").join(INPUT_FILE).exists());
    }

    #[tokio::test]
    async fn reads_snarkjs_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROOF_FILE), PROOF_JSON).unwrap();
        std::fs::write(dir.path().join(PUBLIC_FILE), r#"["12"]"#).unwrap();

        let out = read_outputs(dir.path()).await.unwrap();
        let (proof, signals) = out.normalize().unwrap();
        assert_eq!(proof.b.x, [FieldElement::from(3u64), FieldElement::from(4u64)]);
        assert_eq!(signals, vec![FieldElement::from(12u64)]);
    }

    #[tokio::test]
    async fn missing_or_malformed_outputs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_outputs(dir.path()).await,
            Err(ProverError::MissingArtifact(_))
        ));

        std::fs::write(dir.path().join(PROOF_FILE), "{").unwrap();
        std::fs::write(dir.path().join(PUBLIC_FILE), "[]").unwrap();
        assert!(matches!(
            read_outputs(dir.path()).await,
            Err(ProverError::MalformedOutput(_))
        ));
    }
}
