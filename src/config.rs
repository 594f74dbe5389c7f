use clap::Parser;
use std::path::PathBuf;

/// Logging is configured through `RUST_LOG` only, defaulting to warnings.
#[derive(Debug, Clone, Parser)]
#[command(name = "genomicsctl")]
#[command(about = "Looks up read bases and a called genotype for one sample at one position")]
pub struct Config {
    /// The filename of a client_secrets.json file from a Google "Client ID for native
    /// application" that has the Genomics API enabled
    #[arg(
        long = "client_secrets_filename",
        alias = "client-secrets-filename",
        env = "GENOMICS_CLIENT_SECRETS",
        default_value = "client_secrets.json"
    )]
    pub client_secrets_filename: PathBuf,
}
