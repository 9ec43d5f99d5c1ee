use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::bookingmodel::{
    Booking, BookingPaymentStatus, BookingStatus, EscortStatus, Review, SecurityEscort,
};
use crate::models::paymentmodel::PaymentProvider;

const BOOKING_COLUMNS: &str = r#"
    id, customer_id, vehicle_id, driver_id, escort_id, start_date, end_date,
    pickup_longitude, pickup_latitude, pickup_address,
    dropoff_longitude, dropoff_latitude, dropoff_address,
    status, total_amount, escort_amount, cancellation_fee,
    payment_status, payment_method, rating, review,
    created_at, updated_at
"#;

const ESCORT_COLUMNS: &str = r#"
    id, booking_id, guard_name, guard_license_number, guard_phone_number,
    start_date, end_date, status, daily_rate, total_amount, payment_status,
    created_at
"#;

pub struct NewBooking<'a> {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub pickup_address: Option<&'a str>,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    pub dropoff_address: Option<&'a str>,
    pub total_amount: i64,
    pub escort_amount: i64,
    pub payment_method: Option<PaymentProvider>,
}

#[async_trait]
pub trait BookingExt {
    async fn save_booking(&self, new_booking: NewBooking<'_>) -> Result<Booking, sqlx::Error>;

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error>;

    async fn get_user_bookings(
        &self,
        customer_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Booking>, sqlx::Error>;

    /// Guarded status write. The `WHERE status = $2` clause re-checks the
    /// source state inside the database, so a stale in-memory booking can
    /// never clobber a transition that already happened.
    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error>;

    async fn set_cancellation_fee(
        &self,
        booking_id: Uuid,
        fee: i64,
    ) -> Result<Booking, sqlx::Error>;

    async fn set_booking_payment_status(
        &self,
        booking_id: Uuid,
        payment_status: BookingPaymentStatus,
    ) -> Result<Booking, sqlx::Error>;

    async fn set_booking_review(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
        rating: i32,
        review: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error>;

    async fn save_escort(
        &self,
        booking_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        daily_rate: i64,
        total_amount: i64,
    ) -> Result<SecurityEscort, sqlx::Error>;

    async fn attach_escort(
        &self,
        booking_id: Uuid,
        escort_id: Uuid,
    ) -> Result<(), sqlx::Error>;

    async fn get_escort(&self, booking_id: Uuid) -> Result<Option<SecurityEscort>, sqlx::Error>;

    async fn update_escort_status(
        &self,
        escort_id: Uuid,
        from: EscortStatus,
        to: EscortStatus,
    ) -> Result<Option<SecurityEscort>, sqlx::Error>;

    async fn set_escort_payment_status(
        &self,
        escort_id: Uuid,
        payment_status: BookingPaymentStatus,
    ) -> Result<(), sqlx::Error>;

    async fn save_review(
        &self,
        reviewer_id: Uuid,
        provider_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, sqlx::Error>;
}

#[async_trait]
impl BookingExt for DBClient {
    async fn save_booking(&self, new_booking: NewBooking<'_>) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (
                customer_id, vehicle_id, driver_id, start_date, end_date,
                pickup_longitude, pickup_latitude, pickup_address,
                dropoff_longitude, dropoff_latitude, dropoff_address,
                total_amount, escort_amount, payment_method
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(new_booking.customer_id)
        .bind(new_booking.vehicle_id)
        .bind(new_booking.driver_id)
        .bind(new_booking.start_date)
        .bind(new_booking.end_date)
        .bind(new_booking.pickup_longitude)
        .bind(new_booking.pickup_latitude)
        .bind(new_booking.pickup_address)
        .bind(new_booking.dropoff_longitude)
        .bind(new_booking.dropoff_latitude)
        .bind(new_booking.dropoff_address)
        .bind(new_booking.total_amount)
        .bind(new_booking.escort_amount)
        .bind(new_booking.payment_method)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user_bookings(
        &self,
        customer_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE customer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(customer_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_booking_status(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = $3,
                updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_cancellation_fee(
        &self,
        booking_id: Uuid,
        fee: i64,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET cancellation_fee = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(fee)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_booking_payment_status(
        &self,
        booking_id: Uuid,
        payment_status: BookingPaymentStatus,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET payment_status = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(payment_status)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_booking_review(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
        rating: i32,
        review: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET rating = $3,
                review = $4,
                updated_at = NOW()
            WHERE id = $1 AND customer_id = $2 AND status = 'completed' AND rating IS NULL
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(customer_id)
        .bind(rating)
        .bind(review)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_escort(
        &self,
        booking_id: Uuid,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        daily_rate: i64,
        total_amount: i64,
    ) -> Result<SecurityEscort, sqlx::Error> {
        sqlx::query_as::<_, SecurityEscort>(&format!(
            r#"
            INSERT INTO security_escorts (
                booking_id, start_date, end_date, daily_rate, total_amount
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ESCORT_COLUMNS}
            "#
        ))
        .bind(booking_id)
        .bind(start_date)
        .bind(end_date)
        .bind(daily_rate)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await
    }

    async fn attach_escort(
        &self,
        booking_id: Uuid,
        escort_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE bookings SET escort_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(booking_id)
            .bind(escort_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn get_escort(&self, booking_id: Uuid) -> Result<Option<SecurityEscort>, sqlx::Error> {
        sqlx::query_as::<_, SecurityEscort>(&format!(
            "SELECT {ESCORT_COLUMNS} FROM security_escorts WHERE booking_id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_escort_status(
        &self,
        escort_id: Uuid,
        from: EscortStatus,
        to: EscortStatus,
    ) -> Result<Option<SecurityEscort>, sqlx::Error> {
        sqlx::query_as::<_, SecurityEscort>(&format!(
            r#"
            UPDATE security_escorts
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING {ESCORT_COLUMNS}
            "#
        ))
        .bind(escort_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
    }

    async fn set_escort_payment_status(
        &self,
        escort_id: Uuid,
        payment_status: BookingPaymentStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE security_escorts SET payment_status = $2 WHERE id = $1")
            .bind(escort_id)
            .bind(payment_status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn save_review(
        &self,
        reviewer_id: Uuid,
        provider_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: Option<&str>,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (reviewer_id, provider_id, booking_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, reviewer_id, provider_id, booking_id, rating, comment,
                      provider_response, created_at
            "#,
        )
        .bind(reviewer_id)
        .bind(provider_id)
        .bind(booking_id)
        .bind(rating)
        .bind(comment)
        .fetch_one(&self.pool)
        .await
    }
}
