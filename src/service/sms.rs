use crate::{config::Config, service::error::ServiceError};

/// Sends SMS through the Twilio Messages API.
#[derive(Clone)]
pub struct SmsService {
    account_sid: String,
    auth_token: String,
    from_number: String,
    client: reqwest::Client,
}

impl SmsService {
    pub fn new(config: &Config) -> Self {
        Self {
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            from_number: config.twilio_from_number.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn send_sms(&self, to_number: &str, message: &str) -> Result<(), ServiceError> {
        if to_number.is_empty() {
            return Err(ServiceError::Notification(
                "SMS recipient cannot be empty".to_string(),
            ));
        }

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let params = [
            ("To", to_number),
            ("From", self.from_number.as_str()),
            ("Body", message),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| ServiceError::Notification(format!("Twilio request failed: {}", e)))?;

        if response.status().is_success() {
            tracing::info!("sms sent to {}", to_number);
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "No response body".to_string());
            Err(ServiceError::Notification(format!(
                "Twilio API error ({}): {}",
                status.as_u16(),
                body
            )))
        }
    }
}
