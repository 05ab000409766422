use serde::Deserialize;
use tracing::debug;

use crate::config::GoogleOAuthConfig;
use crate::error::{ApiError, ErrorCode, Result};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Minimal Google OAuth authorization-code client.
#[derive(Clone)]
pub struct GoogleOAuthService {
    http: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl GoogleOAuthService {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Consent-screen URL the signin endpoint redirects to.
    pub fn authorize_url(&self, state: &str) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .map_err(|e| ApiError::Internal(format!("Failed to build authorize URL: {}", e)))?;

        Ok(url.to_string())
    }

    /// Exchange the callback code for an access token and fetch the profile.
    pub async fn exchange_code(&self, code: &str) -> Result<GoogleUserInfo> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| oauth_error("token request failed", e))?
            .error_for_status()
            .map_err(|e| oauth_error("token endpoint rejected the code", e))?
            .json()
            .await
            .map_err(|e| oauth_error("malformed token response", e))?;

        debug!("Google token exchange succeeded");

        let userinfo: GoogleUserInfo = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| oauth_error("userinfo request failed", e))?
            .error_for_status()
            .map_err(|e| oauth_error("userinfo request rejected", e))?
            .json()
            .await
            .map_err(|e| oauth_error("malformed userinfo response", e))?;

        Ok(userinfo)
    }
}

fn oauth_error(context: &str, err: reqwest::Error) -> ApiError {
    ApiError::with_details(
        ErrorCode::OAuthExchangeFailed,
        "Google sign-in failed",
        format!("{}: {}", context, err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_carries_client_and_state() {
        let service = GoogleOAuthService::new(GoogleOAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
        });

        let url = service.authorize_url("xyzzy").unwrap();
        assert!(url.starts_with(AUTH_URL));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=xyzzy"));
        assert!(url.contains("response_type=code"));
    }
}
