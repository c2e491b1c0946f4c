// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Persistent settings at `~/.zkcall/config.json`.
//!
//! A missing file means defaults. Environment variables win over the file:
//!
//! | Variable | Field |
//! |---|---|
//! | `ZKCALL_RPC_URL` | `rpc_url` |
//! | `ZKCALL_VERIFIER_ADDRESS` | `verifier_address` |
//! | `ZKCALL_CIRCUIT` | `circuit` |
//! | `ZKCALL_LOG` | `log_level` |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::chain::Address;
use crate::error::{PipelineError, PipelineResult};

pub const PLACEHOLDER: &str = "PLACEHOLDER";

pub const ALLOWED_KEYS: &[&str] = &[
    "circuit",
    "setup_seed",
    "rpc_url",
    "verifier_address",
    "wasm_path",
    "zkey_path",
    "proof_out",
    "log_level",
    "request_timeout_secs",
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Bundled circuit name, or `snarkjs` to use the external prover.
    pub circuit: String,
    pub setup_seed: u64,
    pub rpc_url: String,
    pub verifier_address: String,
    pub wasm_path: Option<String>,
    pub zkey_path: Option<String>,
    /// Where the raw proof artifact is written after proving.
    pub proof_out: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            circuit: "multiplier".to_string(),
            setup_seed: 42,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            verifier_address: PLACEHOLDER.to_string(),
            wasm_path: None,
            zkey_path: None,
            proof_out: "proof.json".to_string(),
            log_level: "warn".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// `None` while the address is still the placeholder.
    pub fn verifier_address(&self) -> Result<Option<Address>> {
        let s = self.verifier_address.trim();
        if s.is_empty() || s == PLACEHOLDER {
            return Ok(None);
        }
        let address = s
            .parse::<Address>()
            .with_context(|| format!("invalid verifier_address {s:?}"))?;
        Ok(Some(address))
    }

    /// Verifier address for `eth_call` verification, after checking the
    /// settings an [`RpcChain`](crate::rpc::RpcChain) is built from.
    pub fn rpc_target(&self) -> PipelineResult<Address> {
        let url = self.rpc_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PipelineError::Config(format!(
                "rpc_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(PipelineError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        match self.verifier_address() {
            Ok(Some(address)) => Ok(address),
            Ok(None) => Err(PipelineError::Config(
                "verifier_address is not configured".into(),
            )),
            Err(e) => Err(PipelineError::Config(format!("{e:#}"))),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("ZKCALL_RPC_URL") {
            self.rpc_url = v;
        }
        if let Some(v) = lookup("ZKCALL_VERIFIER_ADDRESS") {
            self.verifier_address = v;
        }
        if let Some(v) = lookup("ZKCALL_CIRCUIT") {
            self.circuit = v;
        }
        if let Some(v) = lookup("ZKCALL_LOG") {
            self.log_level = v;
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "circuit" => self.circuit = value.to_string(),
            "setup_seed" => {
                self.setup_seed = value.parse().context("setup_seed must be an integer")?
            }
            "rpc_url" => self.rpc_url = value.to_string(),
            "verifier_address" => {
                if value != PLACEHOLDER {
                    value
                        .parse::<Address>()
                        .with_context(|| format!("invalid address {value:?}"))?;
                }
                self.verifier_address = value.to_string();
            }
            "wasm_path" => self.wasm_path = optional(value),
            "zkey_path" => self.zkey_path = optional(value),
            "proof_out" => self.proof_out = value.to_string(),
            "log_level" => self.log_level = value.to_string(),
            "request_timeout_secs" => {
                self.request_timeout_secs =
                    value.parse().context("request_timeout_secs must be an integer")?
            }
            _ => bail!(
                "unknown config key: {key} (allowed keys: {})",
                ALLOWED_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".zkcall").join("config.json"))
}

/// Load from the default location, then apply environment overrides.
pub fn load_config() -> Result<Config> {
    let mut config = load_config_from(&config_path()?)?;
    config.apply_env();
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read config at {}", path.display()))?;
    serde_json::from_str(&data).context("invalid config JSON")
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.verifier_address().unwrap(), None);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::default();
        config.set("circuit", "sum_product").unwrap();
        config.set("setup_seed", "7").unwrap();
        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"rpc_url": "http://node:8545"}"#).unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(config.circuit, "multiplier");
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("ZKCALL_RPC_URL", "http://other:8545"),
            ("ZKCALL_LOG", "debug"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.rpc_url, "http://other:8545");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.circuit, "multiplier");
    }

    #[test]
    fn set_validates_keys_and_values() {
        let mut config = Config::default();
        assert!(config.set("indexer_url", "x").is_err());
        assert!(config.set("setup_seed", "abc").is_err());
        assert!(config.set("verifier_address", "0x1234").is_err());

        let addr = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
        config.set("verifier_address", addr).unwrap();
        assert_eq!(config.verifier_address().unwrap().map(|a| a.to_string()), Some(addr.to_string()));

        config.set("wasm_path", "build/circuit.wasm").unwrap();
        assert_eq!(config.wasm_path.as_deref(), Some("build/circuit.wasm"));
        config.set("wasm_path", "").unwrap();
        assert_eq!(config.wasm_path, None);
    }

    #[test]
    fn rpc_target_reports_config_errors() {
        let mut config = Config::default();
        let err = config.rpc_target().unwrap_err();
        assert!(matches!(err, PipelineError::Config(ref m) if m.contains("verifier_address")));

        let addr = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
        config.set("verifier_address", addr).unwrap();
        assert_eq!(config.rpc_target().unwrap().to_string(), addr);

        config.verifier_address = "0x1234".into();
        assert!(matches!(config.rpc_target(), Err(PipelineError::Config(_))));
        config.verifier_address = addr.into();

        config.rpc_url = "127.0.0.1:8545".into();
        assert!(matches!(config.rpc_target(), Err(PipelineError::Config(ref m)) if m.contains("rpc_url")));
        config.rpc_url = "https://node.example".into();

        config.request_timeout_secs = 0;
        assert!(matches!(config.rpc_target(), Err(PipelineError::Config(ref m)) if m.contains("timeout")));
    }
}
