use async_trait::async_trait;
use chrono::Utc;

use super::{
    token::TokenResponse,
    ClientSecrets, OAuthError, Token,
};

/// Turns an authorization code into a token.
#[async_trait]
pub trait TokenExchange {
    async fn exchange(&self, code: &str) -> Result<Token, OAuthError>;
}

/// Talks to the token endpoint named within our client secrets.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    secrets: ClientSecrets,
}

impl OAuthClient {
    pub fn new(secrets: ClientSecrets) -> Self {
        Self {
            http: reqwest::Client::new(),
            secrets,
        }
    }

    fn exchange_form<'a>(&'a self, code: &'a str) -> [(&'static str, &'a str); 5] {
        [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.secrets.redirect_uri.as_str()),
            ("client_id", self.secrets.client_id.as_str()),
            ("client_secret", self.secrets.client_secret.as_str()),
        ]
    }

    fn refresh_form<'a>(&'a self, refresh_token: &'a str) -> [(&'static str, &'a str); 4] {
        [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.secrets.client_id.as_str()),
            ("client_secret", self.secrets.client_secret.as_str()),
        ]
    }

    /// Obtains a fresh access token using the given token's refresh token.
    ///
    /// Providers commonly omit the refresh token from refresh responses,
    /// in which case the one we already hold carries over.
    pub async fn refresh(&self, token: &Token) -> Result<Token, OAuthError> {
        let Some(refresh_token) = token.refresh_token.as_deref() else {
            return Err(OAuthError::NoRefreshToken);
        };

        tracing::debug!("refreshing access token via {}", self.secrets.token_uri);
        let mut refreshed = self.request_token(&self.refresh_form(refresh_token)).await?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = token.refresh_token.clone();
        }
        Ok(refreshed)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<Token, OAuthError> {
        let result = self
            .http
            .post(&self.secrets.token_uri)
            .form(form)
            .send()
            .await
            .map_err(OAuthError::Reqwest)?;

        let status = result.status();
        let response_text = result.text().await.map_err(OAuthError::Reqwest)?;
        if !status.is_success() {
            return Err(OAuthError::TokenEndpoint {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let response: TokenResponse =
            serde_json::from_str(&response_text).map_err(OAuthError::Parse)?;
        Ok(Token::from_response(response, Utc::now()))
    }
}

#[async_trait]
impl TokenExchange for OAuthClient {
    async fn exchange(&self, code: &str) -> Result<Token, OAuthError> {
        tracing::debug!("exchanging authorization code via {}", self.secrets.token_uri);
        self.request_token(&self.exchange_form(code)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OAuthClient {
        OAuthClient::new(ClientSecrets {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
            scope: "scope".to_string(),
        })
    }

    #[test]
    fn exchange_form_carries_code_and_client_credentials() {
        let client = client();
        let form = client.exchange_form("4/code");
        assert!(form.contains(&("grant_type", "authorization_code")));
        assert!(form.contains(&("code", "4/code")));
        assert!(form.contains(&("redirect_uri", "urn:ietf:wg:oauth:2.0:oob")));
        assert!(form.contains(&("client_id", "client")));
        assert!(form.contains(&("client_secret", "secret")));
    }

    #[test]
    fn refresh_form_carries_refresh_token() {
        let client = client();
        let form = client.refresh_form("1//refresh");
        assert!(form.contains(&("grant_type", "refresh_token")));
        assert!(form.contains(&("refresh_token", "1//refresh")));
        assert!(!form.iter().any(|(name, _)| *name == "code"));
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_fails_without_network() {
        let token = Token {
            access_token: "a".to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: None,
            expiry: Some(Utc::now() - chrono::Duration::hours(1)),
        };
        let result = client().refresh(&token).await;
        assert!(matches!(result, Err(OAuthError::NoRefreshToken)));
    }
}
