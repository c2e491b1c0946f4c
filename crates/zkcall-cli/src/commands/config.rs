use anyhow::Result;
use zkcall_sdk::config::{self, Config, ALLOWED_KEYS, PLACEHOLDER};

use crate::output;

pub fn set(key: &str, value: &str) -> Result<()> {
    if !ALLOWED_KEYS.contains(&key) {
        return Err(output::fail_with_hint(
            &format!("unknown config key: {key}"),
            &format!("allowed keys: {}", ALLOWED_KEYS.join(", ")),
        ));
    }

    // edit the file as stored, without env overrides baked in
    let path = config::config_path()?;
    let mut stored = config::load_config_from(&path)?;
    stored.set(key, value)?;
    config::save_config_to(&path, &stored)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "key": key, "value": value }));
    } else {
        output::success(&format!("{key} updated"));
    }
    Ok(())
}

/// RPC URLs often embed provider API keys.
fn mask(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 24 || s == PLACEHOLDER {
        return s.to_string();
    }
    let head: String = chars[..16].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}

fn opt(s: &Option<String>) -> String {
    s.clone().unwrap_or_else(|| "-".to_string())
}

pub fn show(config: &Config) -> Result<()> {
    let path = config::config_path()?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "path": path.display().to_string(),
            "circuit": config.circuit,
            "setup_seed": config.setup_seed,
            "rpc_url": mask(&config.rpc_url),
            "verifier_address": config.verifier_address,
            "wasm_path": config.wasm_path,
            "zkey_path": config.zkey_path,
            "proof_out": config.proof_out,
            "log_level": config.log_level,
            "request_timeout_secs": config.request_timeout_secs,
        }));
    } else {
        output::label("path", &path.display().to_string());
        output::label("circuit", &config.circuit);
        output::label("setup_seed", &config.setup_seed.to_string());
        output::label("rpc_url", &mask(&config.rpc_url));
        output::label("verifier_address", &config.verifier_address);
        output::label("wasm_path", &opt(&config.wasm_path));
        output::label("zkey_path", &opt(&config.zkey_path));
        output::label("proof_out", &config.proof_out);
        output::label("log_level", &config.log_level);
        output::label("request_timeout_secs", &config.request_timeout_secs.to_string());
    }
    Ok(())
}
