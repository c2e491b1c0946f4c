pub mod calldata;
pub mod circuits;
pub mod config;
pub mod prove;
pub mod verify;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use zkcall_sdk::artifact::{load_artifact, load_snarkjs_files};
use zkcall_sdk::config::Config;
use zkcall_sdk::{CircuitInput, ProverOutput};

/// Inline JSON (`{"a": 3, "b": 4}`) or a path to a JSON file.
pub fn read_input(arg: &str) -> Result<CircuitInput> {
    let text = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        fs::read_to_string(arg).with_context(|| format!("cannot read input file {arg}"))?
    };
    Ok(CircuitInput::from_json(&text)?)
}

/// Where a proof comes from: a snarkjs `proof.json` + `public.json` pair,
/// an explicit artifact, or the configured `proof_out`.
pub struct ProofSource {
    pub artifact: Option<PathBuf>,
    pub proof: Option<PathBuf>,
    pub public: Option<PathBuf>,
}

impl ProofSource {
    pub fn load(&self, config: &Config) -> Result<ProverOutput> {
        match (&self.proof, &self.public) {
            (Some(proof), Some(public)) => load_snarkjs_files(proof, public),
            _ => {
                let path = self
                    .artifact
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&config.proof_out));
                load_artifact(Path::new(&path))
            }
        }
    }
}
