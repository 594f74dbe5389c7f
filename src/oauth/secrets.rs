use serde::Deserialize;
use std::{fs, path::Path};

use super::OAuthError;

/// The scope every token we request is bound to.
pub const GENOMICS_SCOPE: &str = "https://www.googleapis.com/auth/genomics";

/// The on-disk layout of a Google client secrets file.
///
/// Exactly one of the two application types is expected to be present.
#[derive(Deserialize)]
struct SecretsFile {
    installed: Option<ApplicationSecrets>,
    web: Option<ApplicationSecrets>,
}

#[derive(Deserialize)]
struct ApplicationSecrets {
    client_id: String,
    client_secret: String,
    auth_uri: String,
    token_uri: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

/// Everything needed to run the authorization-code flow against one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl ClientSecrets {
    /// Reads and parses a client secrets file, scoping it to the genomics API.
    pub fn from_file(path: &Path) -> Result<Self, OAuthError> {
        let contents = fs::read_to_string(path).map_err(|source| OAuthError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, GENOMICS_SCOPE)
    }

    pub fn from_json(contents: &str, scope: &str) -> Result<Self, OAuthError> {
        let file: SecretsFile = serde_json::from_str(contents).map_err(OAuthError::Parse)?;
        let Some(application) = file.installed.or(file.web) else {
            return Err(OAuthError::InvalidSecrets(
                "expected an \"installed\" or \"web\" entry",
            ));
        };

        // Only the first redirect URI is ever used.
        let Some(redirect_uri) = application.redirect_uris.into_iter().next() else {
            return Err(OAuthError::InvalidSecrets("no redirect URIs configured"));
        };

        Ok(Self {
            client_id: application.client_id,
            client_secret: application.client_secret,
            auth_uri: application.auth_uri,
            token_uri: application.token_uri,
            redirect_uri,
            scope: scope.to_string(),
        })
    }
}
