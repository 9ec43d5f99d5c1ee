use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::paymentmodel::PaymentProvider;

/// Security escort add-on daily rate, fixed at ₦30,000 (stored in kobo).
pub const ESCORT_DAILY_RATE: i64 = 30_000 * 100;

/// Flat cancellation fee, 10% of the booking total.
pub const CANCELLATION_FEE_PERCENT: i64 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// The booking state machine. Every status write goes through this table;
    /// anything not listed here is rejected.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "escort_status", rename_all = "snake_case")]
pub enum EscortStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl EscortStatus {
    pub fn to_str(&self) -> &str {
        match self {
            EscortStatus::Pending => "pending",
            EscortStatus::Active => "active",
            EscortStatus::Completed => "completed",
            EscortStatus::Cancelled => "cancelled",
        }
    }

    pub fn can_transition_to(&self, next: EscortStatus) -> bool {
        use EscortStatus::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Cancelled) | (Active, Completed) | (Active, Cancelled)
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "booking_payment_status", rename_all = "snake_case")]
pub enum BookingPaymentStatus {
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub escort_id: Option<Uuid>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub pickup_longitude: f64,
    pub pickup_latitude: f64,
    pub pickup_address: Option<String>,
    pub dropoff_longitude: f64,
    pub dropoff_latitude: f64,
    pub dropoff_address: Option<String>,
    pub status: BookingStatus,
    pub total_amount: i64,  // kobo
    pub escort_amount: i64, // kobo, 0 when no escort
    pub cancellation_fee: i64,
    pub payment_status: BookingPaymentStatus,
    pub payment_method: Option<PaymentProvider>,
    pub rating: Option<i32>,
    pub review: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct SecurityEscort {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub guard_name: Option<String>,
    pub guard_license_number: Option<String>,
    pub guard_phone_number: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: EscortStatus,
    pub daily_rate: i64, // kobo
    pub total_amount: i64,
    pub payment_status: BookingPaymentStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Review {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub provider_id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub provider_response: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_booking_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(InProgress));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn test_every_other_booking_transition_rejected() {
        use BookingStatus::*;
        let all = [Pending, Confirmed, InProgress, Completed, Cancelled];
        let legal = [
            (Pending, Confirmed),
            (Pending, Cancelled),
            (Confirmed, InProgress),
            (Confirmed, Cancelled),
            (InProgress, Completed),
            (InProgress, Cancelled),
        ];

        for from in all {
            for to in all {
                let expected = legal.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::InProgress.is_terminal());
    }

    #[test]
    fn test_escort_transitions() {
        use EscortStatus::*;
        assert!(Pending.can_transition_to(Active));
        assert!(Active.can_transition_to(Completed));
        assert!(Active.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Active));
    }
}
