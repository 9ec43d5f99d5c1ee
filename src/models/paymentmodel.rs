use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_provider", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Stripe,
    Paystack,
    Flutterwave,
}

impl PaymentProvider {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentProvider::Stripe => "stripe",
            PaymentProvider::Paystack => "paystack",
            PaymentProvider::Flutterwave => "flutterwave",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn to_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub booking_id: Option<Uuid>,
    pub amount: i64, // kobo
    pub currency: String,
    pub provider: PaymentProvider,
    pub status: PaymentStatus,
    pub reference: String,
    pub metadata: Option<serde_json::Value>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
