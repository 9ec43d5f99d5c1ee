use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Vehicle {0} not found")]
    VehicleNotFound(Uuid),

    #[error("Vehicle {0} is not available for the requested dates")]
    VehicleUnavailable(Uuid),

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Booking cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("User {0} is not authorized to perform this action on booking {1}")]
    UnauthorizedBookingAccess(Uuid, Uuid),

    #[error("Booking dates are invalid: end date must be after start date")]
    InvalidDateRange,

    #[error("No verification code has been issued for this account")]
    OtpNotIssued,

    #[error("Verification code is incorrect")]
    OtpMismatch,

    #[error("Verification code has expired, request a new one")]
    OtpExpired,

    #[error("Payment provider error: {0}")]
    PaymentProvider(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::VehicleNotFound(_) | ServiceError::BookingNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            ServiceError::VehicleUnavailable(_)
            | ServiceError::InvalidTransition { .. }
            | ServiceError::InvalidDateRange
            | ServiceError::OtpNotIssued
            | ServiceError::OtpMismatch
            | ServiceError::OtpExpired
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedBookingAccess(_, _) => StatusCode::UNAUTHORIZED,

            ServiceError::PaymentProvider(_)
            | ServiceError::Notification(_)
            | ServiceError::Database(_)
            | ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Handlers bubble service failures straight up with `?`.
impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        HttpError::new(error.to_string(), status)
    }
}
