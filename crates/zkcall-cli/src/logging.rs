//! `tracing` subscriber setup. Logs go to stderr so stdout stays clean
//! for calldata and `--json` output.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise `level` applies to the zkcall crates only.
pub fn init(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(level)))?;

    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init()?;
    }
    Ok(())
}

fn directives(level: &str) -> String {
    let level = level.trim().to_lowercase();
    format!("warn,zkcall={level},zkcall_sdk={level},zkcall_circuit={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_scope_level_to_our_crates() {
        assert_eq!(
            directives(" DEBUG "),
            "warn,zkcall=debug,zkcall_sdk=debug,zkcall_circuit=debug"
        );
        assert!(EnvFilter::try_new(directives("info")).is_ok());
    }
}
