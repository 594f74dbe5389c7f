use std::io::{self, BufRead, Write};
use url::Url;

use super::{ClientSecrets, OAuthError};

/// The anti-forgery `state` we attach to every authorization request.
/// The code is pasted back by hand, so it is never compared against anything.
pub const AUTHORIZATION_STATE: &str = "state-token";

/// Builds the URL the user visits to grant us offline access.
pub fn authorization_url(secrets: &ClientSecrets) -> Result<Url, OAuthError> {
    let mut url = Url::parse(&secrets.auth_uri).map_err(OAuthError::Url)?;
    // Standard OAuth2 query parameters, plus offline access so we're handed a refresh token.
    url.query_pairs_mut().extend_pairs([
        ("access_type", "offline"),
        ("client_id", secrets.client_id.as_str()),
        ("redirect_uri", secrets.redirect_uri.as_str()),
        ("response_type", "code"),
        ("scope", secrets.scope.as_str()),
        ("state", AUTHORIZATION_STATE),
    ]);
    Ok(url)
}

/// Whatever stands between an authorization URL and the code it eventually yields.
pub trait AuthorizationPrompt {
    fn request_code(&mut self, url: &Url) -> Result<String, OAuthError>;
}

/// Asks the user on the terminal to visit the URL and paste back their code.
pub struct ConsolePrompt<R> {
    input: R,
}

impl ConsolePrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> ConsolePrompt<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> AuthorizationPrompt for ConsolePrompt<R> {
    fn request_code(&mut self, url: &Url) -> Result<String, OAuthError> {
        print!(
            "Go to the following link in your browser to authorize:\n{url}\n\nEnter the authorization code: "
        );
        io::stdout().flush().map_err(OAuthError::Prompt)?;

        let mut response = String::new();
        self.input
            .read_line(&mut response)
            .map_err(OAuthError::Prompt)?;

        let code = response.trim();
        if code.is_empty() {
            return Err(OAuthError::MissingCode);
        }
        Ok(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Cursor;

    fn secrets() -> ClientSecrets {
        ClientSecrets {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".to_string(),
            scope: "https://www.googleapis.com/auth/genomics".to_string(),
        }
    }

    #[test]
    fn authorization_url_requests_offline_access() {
        let url = authorization_url(&secrets()).unwrap();
        assert_eq!(url.host_str(), Some("accounts.google.com"));

        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(query["access_type"], "offline");
        assert_eq!(query["client_id"], "client");
        assert_eq!(query["redirect_uri"], "urn:ietf:wg:oauth:2.0:oob");
        assert_eq!(query["response_type"], "code");
        assert_eq!(query["scope"], "https://www.googleapis.com/auth/genomics");
        assert_eq!(query["state"], AUTHORIZATION_STATE);
        assert!(!query.contains_key("client_secret"));
    }

    #[test]
    fn invalid_auth_uri_is_rejected() {
        let mut secrets = secrets();
        secrets.auth_uri = "not a url".to_string();
        assert!(matches!(authorization_url(&secrets), Err(OAuthError::Url(_))));
    }

    #[test]
    fn console_prompt_trims_entered_code() {
        let url = authorization_url(&secrets()).unwrap();
        let mut prompt = ConsolePrompt::new(Cursor::new("  4/0Abc-code \n"));
        assert_eq!(prompt.request_code(&url).unwrap(), "4/0Abc-code");
    }

    #[test]
    fn console_prompt_rejects_empty_input() {
        let url = authorization_url(&secrets()).unwrap();
        let mut prompt = ConsolePrompt::new(Cursor::new(""));
        assert!(matches!(prompt.request_code(&url), Err(OAuthError::MissingCode)));
    }
}
