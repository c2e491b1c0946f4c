use anyhow::Result;
use zkcall_circuit::CircuitKind;

use crate::output;

pub fn run() -> Result<()> {
    if output::is_json() {
        let circuits: Vec<_> = CircuitKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "name": kind.name(),
                    "private_signals": kind.private_signals(),
                    "public_signals": kind.public_signals(),
                    "constraints": kind.constraint_count(),
                })
            })
            .collect();
        output::json_output(serde_json::json!(circuits));
    } else {
        for kind in CircuitKind::ALL {
            output::label(
                kind.name(),
                &format!(
                    "private [{}], public [{}], {} constraints",
                    kind.private_signals().join(", "),
                    kind.public_signals().join(", "),
                    kind.constraint_count()
                ),
            );
        }
    }
    Ok(())
}
