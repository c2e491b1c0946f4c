use std::path::PathBuf;

use anyhow::Result;
use zkcall_sdk::artifact::save_artifact;
use zkcall_sdk::config::Config;

use crate::backend;
use crate::output;

pub async fn run(config: &Config, input: &str, out: Option<PathBuf>) -> Result<()> {
    let input = super::read_input(input)?;
    let backend = backend::prover(config)?;
    let out = out.unwrap_or_else(|| PathBuf::from(&config.proof_out));

    let pb = output::spinner(&format!("proving ({})...", config.circuit));
    let result = backend.prover.prove(&input).await;
    pb.finish_and_clear();
    let proof_output = result?;

    // reject malformed prover output before it lands on disk
    proof_output.normalize()?;
    save_artifact(&out, &proof_output)?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "circuit": config.circuit,
            "artifact": out.display().to_string(),
            "publicSignals": proof_output.public_signals,
        }));
    } else {
        output::success("proof generated");
        output::label("circuit", &config.circuit);
        output::label("artifact", &out.display().to_string());
        output::label("public signals", &proof_output.public_signals.join(", "));
    }
    Ok(())
}
