use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::paymentmodel::Payment;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct StripeIntentDto {
    #[validate(range(min = 1.0, message = "Amount must be greater than zero"))]
    pub amount: f64, // naira

    pub currency: Option<String>,
    pub booking_id: Option<Uuid>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct PaystackInitDto {
    #[validate(range(min = 1.0, message = "Amount must be greater than zero"))]
    pub amount: f64, // naira

    pub booking_id: Option<Uuid>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct FlutterwaveInitDto {
    #[validate(range(min = 1.0, message = "Amount must be greater than zero"))]
    pub amount: f64, // naira

    pub booking_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StripeIntentResponseDto {
    pub status: String,
    pub client_secret: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaystackInitResponseDto {
    pub status: String,
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlutterwaveInitResponseDto {
    pub status: String,
    pub payment_link: String,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentVerifyResponseDto {
    pub status: String,
    pub payment: Payment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentHistoryResponseDto {
    pub status: String,
    pub payments: Vec<Payment>,
    pub total: i64,
    pub page: usize,
    pub limit: usize,
}
