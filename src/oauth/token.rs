use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens this close to their expiry are already treated as expired.
const EXPIRY_SKEW_SECS: i64 = 10;

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// An OAuth2 token, in the same shape we keep within our credential file.
///
/// The field names and RFC 3339 `expiry` match the credential files written by
/// other OAuth2 clients, so an existing `credentials.dat` keeps working.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// When the access token stops being valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

/// The body returned by a token endpoint for both code exchanges and refreshes.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

impl Token {
    /// Converts a token endpoint response, anchoring its lifetime at `now`.
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            refresh_token: response.refresh_token,
            expiry: response
                .expires_in
                .map(|lifetime| now + Duration::seconds(lifetime)),
        }
    }

    /// Whether this token has an expiry that has (nearly) passed.
    ///
    /// A token without an expiry never expires. Expiries at or before the Unix epoch
    /// are zero-valued placeholders and count as absent.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) if expiry.timestamp() > 0 => {
                now + Duration::seconds(EXPIRY_SKEW_SECS) >= expiry
            }
            _ => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
