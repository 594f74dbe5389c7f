use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{OAuthError, Token};

/// Where tokens are cached between runs, relative to the working directory.
pub const TOKEN_CACHE_FILE: &str = "credentials.dat";

/// A single JSON file holding the last token obtained via the web flow.
///
/// Whatever parses is trusted as-is: neither expiry nor provenance is checked here.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(TOKEN_CACHE_FILE)
    }
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached token. Fails if the file is absent or not a token.
    pub fn load(&self) -> Result<Token, OAuthError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| OAuthError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(OAuthError::Parse)
    }

    /// Overwrites the cache with the given token.
    pub fn persist(&self, token: &Token) -> Result<(), OAuthError> {
        println!("Saving credential file to: {}", self.path.display());
        let contents = serde_json::to_string(token).map_err(OAuthError::Parse)?;
        fs::write(&self.path, contents).map_err(|source| OAuthError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
