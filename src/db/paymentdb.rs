use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::paymentmodel::{Payment, PaymentProvider, PaymentStatus};

const PAYMENT_COLUMNS: &str = r#"
    id, user_id, booking_id, amount, currency, provider, status, reference,
    metadata, created_at, updated_at
"#;

#[async_trait]
pub trait PaymentExt {
    async fn save_payment(
        &self,
        user_id: Uuid,
        booking_id: Option<Uuid>,
        amount: i64,
        currency: &str,
        provider: PaymentProvider,
        reference: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_payment_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Payment>, sqlx::Error>;

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, sqlx::Error>;

    async fn get_user_payments(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Payment>, sqlx::Error>;

    async fn get_user_payment_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn save_payment(
        &self,
        user_id: Uuid,
        booking_id: Option<Uuid>,
        amount: i64,
        currency: &str,
        provider: PaymentProvider,
        reference: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (user_id, booking_id, amount, currency, provider, reference, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(booking_id)
        .bind(amount)
        .bind(currency)
        .bind(provider)
        .bind(reference)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_payment_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE reference = $1"
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET status = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user_payments(
        &self,
        user_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS} FROM payments
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_payment_count(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM payments WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
