use oauth2::CsrfToken;
use serde::Deserialize;
use serde_json::Value;

use crate::{config::Config, service::error::ServiceError};

#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
}

#[derive(Clone)]
pub struct GoogleAuthService {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    client: reqwest::Client,
}

impl GoogleAuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            redirect_url: format!("{}/api/oauth/google/callback", config.app_url),
            client: reqwest::Client::new(),
        }
    }

    /// Authorization URL plus the CSRF state the caller must stash in a
    /// cookie and check on the way back.
    pub fn get_authorization_url(&self) -> (String, String) {
        let state = CsrfToken::new_random();

        let url = format!(
            "https://accounts.google.com/o/oauth2/v2/auth?\
             client_id={}&\
             response_type=code&\
             scope=openid%20email%20profile&\
             redirect_uri={}&\
             state={}&\
             access_type=offline",
            self.client_id,
            urlencoding::encode(&self.redirect_url),
            urlencoding::encode(state.secret()),
        );

        (url, state.secret().to_string())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<String, ServiceError> {
        let params = [
            ("code", code),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_url),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| ServiceError::Other(format!("Token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Other(format!(
                "Token exchange failed: HTTP {} - {}",
                status, error_text
            )));
        }

        let token_response: Value = response
            .json()
            .await
            .map_err(|e| ServiceError::Other(format!("Token response invalid: {}", e)))?;

        token_response["access_token"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ServiceError::Other("Access token missing from response".to_string()))
    }

    pub async fn get_user_info(&self, access_token: &str) -> Result<GoogleUserInfo, ServiceError> {
        let response = self
            .client
            .get("https://www.googleapis.com/oauth2/v3/userinfo")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ServiceError::Other(format!("Userinfo request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Other(format!(
                "Failed to fetch user info: {} - {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::Other(format!("Userinfo response invalid: {}", e)))
    }
}
