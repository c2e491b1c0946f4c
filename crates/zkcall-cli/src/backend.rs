//! Picks the prover and chain client from config and flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ark_bn254::Bn254;
use ark_groth16::VerifyingKey;
use zkcall_circuit::CircuitKind;
use zkcall_sdk::config::Config;
use zkcall_sdk::local::LocalChain;
use zkcall_sdk::prover::ArkProver;
use zkcall_sdk::rpc::RpcChain;
use zkcall_sdk::snarkjs::SnarkjsProver;
use zkcall_sdk::{ChainClient, ProverService};

use crate::output;

/// `circuit = "snarkjs"` selects the external prover.
const SNARKJS: &str = "snarkjs";

pub struct Backend {
    pub prover: Box<dyn ProverService>,
    /// Verifying key of an in-process setup; `None` for snarkjs.
    pub vk: Option<VerifyingKey<Bn254>>,
}

fn bundled_circuit(config: &Config) -> Result<Option<CircuitKind>> {
    if config.circuit == SNARKJS {
        return Ok(None);
    }
    let kind = config.circuit.parse::<CircuitKind>().map_err(|e| {
        output::fail_with_hint(
            &format!("{e}"),
            "set `circuit` to multiplier, sum_product or snarkjs (`zkcall config set circuit ...`)",
        )
    })?;
    Ok(Some(kind))
}

pub fn prover(config: &Config) -> Result<Backend> {
    match bundled_circuit(config)? {
        Some(kind) => {
            let (prover, vk) = ArkProver::setup(kind, config.setup_seed)?;
            Ok(Backend {
                prover: Box::new(prover),
                vk: Some(vk),
            })
        }
        None => {
            let wasm = config
                .wasm_path
                .as_deref()
                .context("snarkjs prover needs `wasm_path` (zkcall config set wasm_path ...)")?;
            let zkey = config
                .zkey_path
                .as_deref()
                .context("snarkjs prover needs `zkey_path` (zkcall config set zkey_path ...)")?;
            let work_dir = std::env::temp_dir().join("zkcall");
            Ok(Backend {
                prover: Box::new(SnarkjsProver::new(PathBuf::from(wasm), PathBuf::from(zkey), work_dir)),
                vk: None,
            })
        }
    }
}

/// `local` runs the verifier in-process against the setup's key;
/// otherwise `eth_call` against the configured node and address.
pub fn chain(
    config: &Config,
    local: bool,
    vk: Option<VerifyingKey<Bn254>>,
) -> Result<Box<dyn ChainClient>> {
    if local {
        let vk = vk.ok_or_else(|| {
            output::fail_with_hint(
                "--local needs the verifying key of a bundled circuit",
                "use `circuit = multiplier` or `sum_product`, or verify against a node",
            )
        })?;
        return Ok(Box::new(LocalChain::new(vk)));
    }
    // a seed-derived key exists only in this process
    if vk.is_some() {
        return Err(output::fail_with_hint(
            "proofs from a bundled circuit only verify against its in-process key",
            "pass --local, or set `circuit = snarkjs` with the zkey your deployed verifier was exported from",
        ));
    }
    let verifier = config.rpc_target().map_err(|e| {
        output::fail_with_hint(&e.to_string(), "zkcall config set <key> <value> (or pass --local)")
    })?;
    Ok(Box::new(RpcChain::with_timeout(
        config.rpc_url.trim(),
        Some(verifier),
        config.request_timeout(),
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERIFIER: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

    fn bundled_vk() -> VerifyingKey<Bn254> {
        ArkProver::setup(CircuitKind::Multiplier, 1).unwrap().1
    }

    fn rpc_config() -> Config {
        let mut config = Config::default();
        config.set("verifier_address", VERIFIER).unwrap();
        config
    }

    #[test]
    fn bundled_key_is_refused_for_a_node() {
        let err = chain(&rpc_config(), false, Some(bundled_vk())).err().unwrap();
        assert!(err.to_string().contains("--local"), "{err}");
    }

    #[test]
    fn bundled_key_runs_locally() {
        assert!(chain(&Config::default(), true, Some(bundled_vk())).is_ok());
    }

    #[test]
    fn local_without_key_is_refused() {
        assert!(chain(&Config::default(), true, None).is_err());
    }

    #[test]
    fn node_needs_verifier_address() {
        let err = chain(&Config::default(), false, None).err().unwrap();
        assert!(err.to_string().contains("verifier_address"), "{err}");
        assert!(chain(&rpc_config(), false, None).is_ok());
    }

    #[test]
    fn unknown_circuit_is_refused() {
        let mut config = Config::default();
        config.circuit = "cubic".into();
        assert!(prover(&config).is_err());
    }
}
