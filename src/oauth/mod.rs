mod authorize;
mod credentials;
mod oauth_client;
mod secrets;
mod storage;
mod token;

use std::path::PathBuf;

pub use authorize::{AuthorizationPrompt, ConsolePrompt};
pub use credentials::CredentialManager;
pub use oauth_client::{OAuthClient, TokenExchange};
pub use secrets::ClientSecrets;
pub use storage::TokenCache;
pub use token::Token;

/// Possible error types while obtaining credentials.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("unable to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("invalid client secrets: {0}")]
    InvalidSecrets(&'static str),

    #[error("invalid authorization URL: {0}")]
    Url(#[source] url::ParseError),

    #[error("unable to read authorization code: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("no authorization code was entered")]
    MissingCode,

    #[error("token request failed: {0}")]
    Reqwest(#[source] reqwest::Error),

    #[error("token endpoint responded with status {status}: {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("token has expired and carries no refresh token")]
    NoRefreshToken,
}
