//! Verifies one Adscore signature and prints the result as JSON.
//!
//! Usage:
//!   adscore-verify --signature <SIG> --key <KEY> --ip 1.2.3.4 --user-agent "..." --role master
//!   adscore-verify --config request.json
//!
//! Flags given on the command line override values read from `--config`.
//! Exits with status 1 and prints the error code on failure.

use std::path::PathBuf;
use std::process::ExitCode;

use adscore_signature::{verify, SignRole, VerificationRequest};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding a verification request
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base64url signature payload
    #[arg(short, long)]
    signature: Option<String>,

    /// HMAC secret (base64) or PEM public key
    #[arg(short, long)]
    key: Option<String>,

    /// Candidate client address; repeat to try several in order
    #[arg(long = "ip", value_name = "ADDRESS")]
    ip_addresses: Vec<String>,

    #[arg(short, long)]
    user_agent: Option<String>,

    /// master or customer
    #[arg(short, long)]
    role: Option<SignRole>,

    /// Maximum signature age in seconds
    #[arg(short, long)]
    expire: Option<u64>,

    /// Use the key verbatim instead of base64-decoding it
    #[arg(long)]
    raw_key: bool,
}

fn load_request(cli: Cli) -> Result<VerificationRequest, String> {
    let mut request = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid request in {}: {e}", path.display()))?
        }
        None => VerificationRequest::default(),
    };
    if let Some(signature) = cli.signature {
        request.signature = signature;
    }
    if let Some(key) = cli.key {
        request.key = key;
    }
    if !cli.ip_addresses.is_empty() {
        request.ip_addresses = cli.ip_addresses;
    }
    if let Some(user_agent) = cli.user_agent {
        request.user_agent = user_agent;
    }
    if let Some(role) = cli.role {
        request.sign_role = role;
    }
    if let Some(expire) = cli.expire {
        request.expire_seconds = expire;
    }
    if cli.raw_key {
        request.use_raw_key = true;
    }
    Ok(request)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let request = match load_request(Cli::parse()) {
        Ok(request) => request,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match verify(&request) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("cannot serialize result: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error {}: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
