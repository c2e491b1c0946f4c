mod backend;
mod commands;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::ProofSource;

#[derive(Parser)]
#[command(
    name = "zkcall",
    version,
    about = "Encode Groth16 proofs as verifier calldata and submit them"
)]
struct Cli {
    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Log level for zkcall crates (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Generate a proof and write it as an artifact
    Prove {
        /// Circuit input: inline JSON or a path to a JSON file
        input: String,
        /// Artifact path (default: config `proof_out`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Encode a stored proof as verifier calldata
    Calldata {
        #[command(flatten)]
        source: SourceArgs,
        /// Print the ABI-encoded verifyProof call instead of the argument list
        #[arg(long)]
        raw: bool,
    },
    /// Submit a stored proof to the verifier
    Verify {
        #[command(flatten)]
        source: SourceArgs,
        /// Verify in-process instead of calling a node
        #[arg(long)]
        local: bool,
    },
    /// Prove, encode and verify in one go
    Run {
        /// Circuit input: inline JSON or a path to a JSON file
        input: String,
        /// Verify in-process instead of calling a node
        #[arg(long)]
        local: bool,
        /// Artifact path (default: config `proof_out`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List bundled circuits
    Circuits,
    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Proof artifact (default: config `proof_out`)
    #[arg(long, conflicts_with_all = ["proof", "public"])]
    artifact: Option<PathBuf>,
    /// snarkjs proof.json
    #[arg(long, requires = "public")]
    proof: Option<PathBuf>,
    /// snarkjs public.json
    #[arg(long, requires = "proof")]
    public: Option<PathBuf>,
}

impl From<SourceArgs> for ProofSource {
    fn from(args: SourceArgs) -> Self {
        ProofSource {
            artifact: args.artifact,
            proof: args.proof,
            public: args.public,
        }
    }
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Print effective settings
    Show,
    /// Persist one setting
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);

    let mut config = zkcall_sdk::config::load_config()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logging::init(&config.log_level, cli.json)?;
    tracing::debug!(circuit = %config.circuit, seed = config.setup_seed, "config loaded");

    let verified = match cli.command {
        Cmd::Prove { input, out } => {
            commands::prove::run(&config, &input, out).await?;
            true
        }
        Cmd::Calldata { source, raw } => {
            commands::calldata::run(&config, &source.into(), raw)?;
            true
        }
        Cmd::Verify { source, local } => {
            commands::verify::verify(&config, &source.into(), local).await?
        }
        Cmd::Run { input, local, out } => commands::verify::run(&config, &input, local, out).await?,
        Cmd::Circuits => {
            commands::circuits::run()?;
            true
        }
        Cmd::Config { action } => {
            match action {
                ConfigCmd::Show => commands::config::show(&config)?,
                ConfigCmd::Set { key, value } => commands::config::set(&key, &value)?,
            }
            true
        }
    };

    // a rejected proof is a result, but scripts still need to see it
    Ok(if verified { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
