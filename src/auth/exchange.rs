//! OAuth token exchange
//!
//! Trades a short-lived upstream identity token for an MCP access token via
//! an RFC 8693 token-exchange POST to `{base_url}/oauth/token`. Failures are
//! logged here and returned as values; the broker interprets any failure as
//! "credential not available" and never lets it abort agent assembly.

use async_trait::async_trait;
use thiserror::Error;

use super::store::TokenPayload;

/// Fixed public client id for the exchange
pub const EXCHANGE_CLIENT_ID: &str = "mcp_default";

const GRANT_TYPE_TOKEN_EXCHANGE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const SUBJECT_TOKEN_TYPE_ACCESS: &str = "urn:ietf:params:oauth:token-type:access_token";

/// Failure of a token exchange attempt.
///
/// Carries enough of the response for logging; never propagated past the
/// broker.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Token endpoint answered with a non-2xx status
    #[error("token endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Request never completed (connect, DNS, TLS, timeout)
    #[error("token exchange transport error: {0}")]
    Transport(String),

    /// 2xx response whose body was not a well-formed token payload
    #[error("invalid token response: {0}")]
    Parse(String),
}

/// Seam for the exchange call, so the broker can be tested without a live
/// authorization server
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Exchange `identity_token` for an access token scoped to the resource
    /// at `resource_base_url`
    async fn exchange(
        &self,
        identity_token: &str,
        resource_base_url: &str,
    ) -> Result<TokenPayload, ExchangeError>;
}

/// HTTP token-exchange client
pub struct TokenExchanger {
    client: reqwest::Client,
}

impl TokenExchanger {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a preconfigured reqwest client (proxies, timeouts)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for TokenExchanger {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the form body for an exchange against `resource_base_url`.
///
/// The `resource` parameter points at the MCP endpoint under the base URL,
/// the token endpoint lives at `{base}/oauth/token`.
fn exchange_form(identity_token: &str, resource_base_url: &str) -> [(&'static str, String); 5] {
    let base = resource_base_url.trim_end_matches('/');
    [
        ("client_id", EXCHANGE_CLIENT_ID.to_string()),
        ("subject_token", identity_token.to_string()),
        ("grant_type", GRANT_TYPE_TOKEN_EXCHANGE.to_string()),
        ("resource", format!("{base}/mcp")),
        ("subject_token_type", SUBJECT_TOKEN_TYPE_ACCESS.to_string()),
    ]
}

#[async_trait]
impl TokenExchange for TokenExchanger {
    async fn exchange(
        &self,
        identity_token: &str,
        resource_base_url: &str,
    ) -> Result<TokenPayload, ExchangeError> {
        let base = resource_base_url.trim_end_matches('/');
        let endpoint = format!("{base}/oauth/token");

        tracing::debug!("Exchanging identity token at {endpoint}");

        let response = self
            .client
            .post(&endpoint)
            .form(&exchange_form(identity_token, resource_base_url))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error during token exchange: {e}");
                ExchangeError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            tracing::error!("Token exchange failed: {body}");
            return Err(ExchangeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<TokenPayload>().await.map_err(|e| {
            tracing::error!("Token exchange returned malformed payload: {e}");
            ExchangeError::Parse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_follow_rfc8693_shape() {
        let form = exchange_form("upstream-token", "https://mcp.example.com/");
        let get = |k: &str| {
            form.iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("client_id"), "mcp_default");
        assert_eq!(get("subject_token"), "upstream-token");
        assert_eq!(
            get("grant_type"),
            "urn:ietf:params:oauth:grant-type:token-exchange"
        );
        assert_eq!(
            get("subject_token_type"),
            "urn:ietf:params:oauth:token-type:access_token"
        );
        // trailing slash trimmed before the /mcp suffix
        assert_eq!(get("resource"), "https://mcp.example.com/mcp");
    }

    #[test]
    fn test_payload_parses_without_schema_validation() {
        let json = r#"{"access_token":"at_abc","expires_in":3600,"refresh_token":"rt","token_type":"Bearer"}"#;
        let payload: TokenPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.access_token, "at_abc");
        assert_eq!(payload.expires_in, 3600);
        assert_eq!(payload.extra["refresh_token"], "rt");
    }

    #[tokio::test]
    #[ignore] // Requires a live authorization server
    async fn test_exchange_against_live_server() {
        let exchanger = TokenExchanger::new();
        let result = exchanger
            .exchange("bogus-token", "http://localhost:8005")
            .await;
        // A live server must reject a bogus subject token with a status error
        assert!(matches!(result, Err(ExchangeError::Status { .. })));
    }
}
