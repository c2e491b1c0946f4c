use anyhow::Result;
use zkcall_sdk::abi::encode_verify_call;
use zkcall_sdk::build_calldata;
use zkcall_sdk::config::Config;

use super::ProofSource;
use crate::output;

/// Print verifier arguments for a stored proof.
///
/// Default output is the `[a],[[b]],[c],[inputs]` argument list; `raw`
/// prints the full ABI-encoded `verifyProof` call instead.
pub fn run(config: &Config, source: &ProofSource, raw: bool) -> Result<()> {
    let (proof, signals) = source.load(config)?.normalize()?;
    let calldata = build_calldata(&proof, &signals)?;
    let encoded = format!("0x{}", hex::encode(encode_verify_call(&calldata)));

    if output::is_json() {
        output::json_output(serde_json::json!({
            "a": calldata.a,
            "b": calldata.b,
            "c": calldata.c,
            "inputs": calldata.inputs,
            "data": encoded,
        }));
    } else if raw {
        output::data(&encoded);
    } else {
        output::label("public inputs", &calldata.inputs.len().to_string());
        output::data(&calldata.to_solidity_args());
    }
    Ok(())
}
