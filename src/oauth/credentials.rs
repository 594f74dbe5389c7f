use super::{
    authorize, AuthorizationPrompt, ClientSecrets, OAuthError, Token, TokenCache, TokenExchange,
};

/// Produces a token for the genomics scope, from the cache when possible
/// and by asking the user to authorize us otherwise.
pub struct CredentialManager<'a, P, E> {
    secrets: &'a ClientSecrets,
    cache: TokenCache,
    prompt: P,
    exchange: E,
}

impl<'a, P: AuthorizationPrompt, E: TokenExchange> CredentialManager<'a, P, E> {
    pub fn new(secrets: &'a ClientSecrets, cache: TokenCache, prompt: P, exchange: E) -> Self {
        Self {
            secrets,
            cache,
            prompt,
            exchange,
        }
    }

    /// Retrieves a token from the credential file.
    /// If not possible, the user will be requested to authorize us, and the file rewritten.
    ///
    /// A cached token is used even if it has expired.
    pub async fn obtain(&mut self) -> Result<Token, OAuthError> {
        match self.cache.load() {
            Ok(token) => {
                tracing::info!("using cached token from {}", self.cache.path().display());
                return Ok(token);
            }
            Err(err) => {
                tracing::debug!("no usable cached token: {err}");
            }
        }

        let token = self.obtain_from_web().await?;
        self.cache.persist(&token)?;
        Ok(token)
    }

    async fn obtain_from_web(&mut self) -> Result<Token, OAuthError> {
        let url = authorize::authorization_url(self.secrets)?;
        let code = self.prompt.request_code(&url)?;
        self.exchange.exchange(&code).await
    }
}
