use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::Config, service::error::ServiceError};

#[derive(Debug, Serialize, Deserialize)]
pub struct StripeIntent {
    pub client_secret: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaystackInit {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlutterwaveInit {
    pub payment_link: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderVerification {
    pub successful: bool,
    pub amount: i64, // kobo
    pub gateway_reference: String,
}

/// Thin client over the three payment gateways. Amounts are kobo in and
/// kobo out; each provider's own unit quirks stay inside this module.
#[derive(Clone)]
pub struct PaymentProviderService {
    stripe_secret_key: String,
    paystack_secret_key: String,
    flutterwave_secret_key: String,
    frontend_url: String,
    client: reqwest::Client,
}

impl PaymentProviderService {
    pub fn new(config: &Config) -> Self {
        Self {
            stripe_secret_key: config.stripe_secret_key.clone(),
            paystack_secret_key: config.paystack_secret_key.clone(),
            flutterwave_secret_key: config.flutterwave_secret_key.clone(),
            frontend_url: config.frontend_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn generate_reference(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4().simple())
    }

    /// Stripe wants form-encoded bodies and the amount in the currency's
    /// minor unit, which kobo already is.
    pub async fn stripe_create_intent(
        &self,
        amount_kobo: i64,
        currency: &str,
        reference: &str,
    ) -> Result<StripeIntent, ServiceError> {
        let amount = amount_kobo.to_string();
        let currency = currency.to_lowercase();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency.as_str()),
            ("metadata[reference]", reference),
        ];

        let response = self
            .client
            .post("https://api.stripe.com/v1/payment_intents")
            .basic_auth(&self.stripe_secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| ServiceError::PaymentProvider(format!("Stripe request failed: {}", e)))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServiceError::PaymentProvider(format!("Stripe response invalid: {}", e)))?;

        if let Some(error) = body.get("error") {
            let message = error["message"].as_str().unwrap_or("Stripe error");
            return Err(ServiceError::PaymentProvider(message.to_string()));
        }

        let client_secret = body["client_secret"]
            .as_str()
            .ok_or_else(|| {
                ServiceError::PaymentProvider("Stripe response missing client_secret".to_string())
            })?
            .to_string();

        Ok(StripeIntent {
            client_secret,
            reference: reference.to_string(),
        })
    }

    pub async fn paystack_initialize(
        &self,
        email: &str,
        amount_kobo: i64,
        reference: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<PaystackInit, ServiceError> {
        let payload = serde_json::json!({
            "email": email,
            "amount": amount_kobo,
            "reference": reference,
            "currency": "NGN",
            "metadata": metadata.unwrap_or(serde_json::json!({})),
            "channels": ["card", "bank", "ussd", "qr", "mobile_money", "bank_transfer"]
        });

        let response = self
            .client
            .post("https://api.paystack.co/transaction/initialize")
            .header("Authorization", format!("Bearer {}", self.paystack_secret_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ServiceError::PaymentProvider(format!("Paystack request failed: {}", e)))?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ServiceError::PaymentProvider(format!("Paystack response invalid: {}", e))
        })?;

        if body["status"].as_bool().unwrap_or(false) {
            let data = &body["data"];
            Ok(PaystackInit {
                authorization_url: data["authorization_url"].as_str().unwrap_or("").to_string(),
                access_code: data["access_code"].as_str().unwrap_or("").to_string(),
                reference: data["reference"].as_str().unwrap_or(reference).to_string(),
            })
        } else {
            let message = body["message"]
                .as_str()
                .unwrap_or("Payment initialization failed");
            Err(ServiceError::PaymentProvider(message.to_string()))
        }
    }

    pub async fn paystack_verify(
        &self,
        reference: &str,
    ) -> Result<ProviderVerification, ServiceError> {
        let url = format!("https://api.paystack.co/transaction/verify/{}", reference);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.paystack_secret_key))
            .send()
            .await
            .map_err(|e| ServiceError::PaymentProvider(format!("Paystack request failed: {}", e)))?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ServiceError::PaymentProvider(format!("Paystack response invalid: {}", e))
        })?;

        if !body["status"].as_bool().unwrap_or(false) {
            let message = body["message"].as_str().unwrap_or("Verification failed");
            return Err(ServiceError::PaymentProvider(message.to_string()));
        }

        let data = &body["data"];
        Ok(ProviderVerification {
            successful: data["status"].as_str() == Some("success"),
            amount: data["amount"].as_i64().unwrap_or(0),
            gateway_reference: data["reference"].as_str().unwrap_or("").to_string(),
        })
    }

    pub async fn flutterwave_initialize(
        &self,
        email: &str,
        amount_kobo: i64,
        reference: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<FlutterwaveInit, ServiceError> {
        // Flutterwave takes the amount in whole naira.
        let payload = serde_json::json!({
            "tx_ref": reference,
            "amount": amount_kobo as f64 / 100.0,
            "currency": "NGN",
            "redirect_url": format!("{}/payments/callback", self.frontend_url),
            "payment_options": "card,banktransfer,ussd,account",
            "customer": {
                "email": email,
            },
            "customizations": {
                "title": "Anything Cars",
                "description": "Vehicle hire and marketplace payment",
            },
            "meta": metadata.unwrap_or(serde_json::json!({}))
        });

        let response = self
            .client
            .post("https://api.flutterwave.com/v3/payments")
            .header(
                "Authorization",
                format!("Bearer {}", self.flutterwave_secret_key),
            )
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                ServiceError::PaymentProvider(format!("Flutterwave request failed: {}", e))
            })?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ServiceError::PaymentProvider(format!("Flutterwave response invalid: {}", e))
        })?;

        if body["status"].as_str() == Some("success") {
            Ok(FlutterwaveInit {
                payment_link: body["data"]["link"].as_str().unwrap_or("").to_string(),
                reference: reference.to_string(),
            })
        } else {
            let message = body["message"]
                .as_str()
                .unwrap_or("Payment initialization failed");
            Err(ServiceError::PaymentProvider(message.to_string()))
        }
    }

    pub async fn flutterwave_verify(
        &self,
        reference: &str,
    ) -> Result<ProviderVerification, ServiceError> {
        let url = format!(
            "https://api.flutterwave.com/v3/transactions/verify_by_reference?tx_ref={}",
            reference
        );

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.flutterwave_secret_key),
            )
            .send()
            .await
            .map_err(|e| {
                ServiceError::PaymentProvider(format!("Flutterwave request failed: {}", e))
            })?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ServiceError::PaymentProvider(format!("Flutterwave response invalid: {}", e))
        })?;

        if body["status"].as_str() != Some("success") {
            let message = body["message"].as_str().unwrap_or("Verification failed");
            return Err(ServiceError::PaymentProvider(message.to_string()));
        }

        let data = &body["data"];
        Ok(ProviderVerification {
            successful: data["status"].as_str() == Some("successful"),
            amount: (data["amount"].as_f64().unwrap_or(0.0) * 100.0).round() as i64,
            gateway_reference: data["flw_ref"].as_str().unwrap_or("").to_string(),
        })
    }
}
