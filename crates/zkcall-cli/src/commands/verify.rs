use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use zkcall_sdk::chain::verify_on_chain;
use zkcall_sdk::config::Config;
use zkcall_sdk::{build_calldata, Pipeline, VerificationResult};

use super::ProofSource;
use crate::backend;
use crate::output;

/// Submit a stored proof. Returns the verifier's answer.
pub async fn verify(config: &Config, source: &ProofSource, local: bool) -> Result<bool> {
    let (proof, signals) = source.load(config)?.normalize()?;
    let calldata = build_calldata(&proof, &signals)?;

    // only the in-process verifier needs a key
    let vk = if local { backend::prover(config)?.vk } else { None };
    let chain = backend::chain(config, local, vk)?;

    let address = chain.deploy_verifier().await?;
    let pb = output::spinner("verifying...");
    let verified = verify_on_chain(chain.as_ref(), &address, &calldata).await;
    pb.finish_and_clear();
    let verified = verified?;

    report(&VerificationResult {
        deployed_address: address,
        verified,
        calldata,
    });
    Ok(verified)
}

/// Prove, encode and verify. Returns the verifier's answer.
pub async fn run(config: &Config, input: &str, local: bool, out: Option<PathBuf>) -> Result<bool> {
    let input = super::read_input(input)?;
    let backend = backend::prover(config)?;
    let chain = backend::chain(config, local, backend.vk)?;
    let artifact = out.unwrap_or_else(|| PathBuf::from(&config.proof_out));
    let pipeline = Pipeline::new(backend.prover, chain).with_artifact_path(&artifact);

    let pb = output::spinner(&format!("proving and verifying ({})...", config.circuit));
    let result = pipeline.run(&input).await;
    pb.finish_and_clear();
    let result = result?;

    report(&result);
    output::label("artifact", &artifact.display().to_string());
    Ok(result.verified)
}

fn report(result: &VerificationResult) {
    if output::is_json() {
        output::json_output(serde_json::json!({
            "deployed_address": result.deployed_address,
            "verified": result.verified,
            "inputs": result.calldata.inputs,
        }));
        return;
    }
    output::label("verifier", &result.deployed_address.to_string());
    let inputs: Vec<String> = result.calldata.inputs.iter().map(|w| w.to_string()).collect();
    output::label("inputs", &inputs.join(", "));
    if result.verified {
        output::label("result", &"verified".green().to_string());
    } else {
        output::label("result", &"rejected".red().to_string());
        output::warn("the verifier answered false: the proof does not match its public inputs");
    }
}
