use reqwest::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::oauth::{OAuthClient, OAuthError, Token};

/// The root every genomics collection hangs off of.
pub const GENOMICS_API_ROOT: &str = "https://genomics.googleapis.com/v1/";

/// Possible errors while talking to the genomics API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("unable to refresh access token: {0}")]
    Refresh(#[from] OAuthError),

    #[error("API responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The error envelope Google APIs respond with.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// An HTTP client carrying our OAuth2 credentials across API requests.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    root: Url,
    /// The token used for every request, refreshed in memory once expired.
    token: Token,
    oauth: OAuthClient,
}

impl ApiClient {
    /// Creates a new API client around the given token.
    pub fn new(token: Token, oauth: OAuthClient) -> Result<Self, ApiError> {
        Self::with_root(GENOMICS_API_ROOT, token, oauth)
    }

    pub fn with_root(root: &str, token: Token, oauth: OAuthClient) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            root: Url::parse(root)?,
            token,
            oauth,
        })
    }

    /// The endpoint for searching the given collection, restricted to a field mask.
    pub fn search_url(&self, collection: &str, fields: &str) -> Result<Url, ApiError> {
        let mut url = self.root.join(&format!("{collection}/search"))?;
        url.query_pairs_mut().append_pair("fields", fields);
        Ok(url)
    }

    /// Hands back an access token, refreshing it first if it has expired and can be refreshed.
    /// An expired token without a refresh token is sent as-is and left for the API to reject.
    async fn access_token(&mut self) -> Result<&str, ApiError> {
        if self.token.is_expired() && self.token.refresh_token.is_some() {
            tracing::info!("access token has expired, refreshing");
            self.token = self.oauth.refresh(&self.token).await?;
        }
        Ok(&self.token.access_token)
    }

    /// POSTs a search request to the given collection and decodes its response.
    pub async fn search<Req, Resp>(
        &mut self,
        collection: &str,
        fields: &str,
        request: &Req,
    ) -> Result<Resp, ApiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.search_url(collection, fields)?;
        tracing::debug!("searching {collection} via {url}");

        let access_token = self.access_token().await?.to_string();
        let result = self
            .http
            .request(Method::POST, url)
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await?;

        let status = result.status();
        let response_text = result.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&response_text),
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}

/// Pulls the human-readable message out of an error body, falling back to the body itself.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth::ClientSecrets;

    fn client() -> ApiClient {
        let token = Token {
            access_token: "ya29.a".to_string(),
            token_type: "Bearer".to_string(),
            refresh_token: None,
            expiry: None,
        };
        let oauth = OAuthClient::new(ClientSecrets {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
            scope: "scope".to_string(),
        });
        ApiClient::new(token, oauth).unwrap()
    }

    #[test]
    fn search_url_includes_field_mask() {
        let url = client()
            .search_url("readgroupsets", "readGroupSets(id)")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://genomics.googleapis.com/v1/readgroupsets/search?fields=readGroupSets%28id%29"
        );
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "fields" && v == "readGroupSets(id)"));
    }

    #[tokio::test]
    async fn unexpired_token_is_used_without_refresh() {
        let mut client = client();
        assert_eq!(client.access_token().await.unwrap(), "ya29.a");
    }

    #[tokio::test]
    async fn expired_token_without_refresh_token_is_sent_as_is() {
        let mut client = client();
        client.token.expiry = Some(chrono::Utc::now() - chrono::Duration::hours(1));
        assert_eq!(client.access_token().await.unwrap(), "ya29.a");
    }

    #[test]
    fn error_message_prefers_google_envelope() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "The caller does not have permission");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
