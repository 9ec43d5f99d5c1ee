use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    bookingmodel::{Booking, SecurityEscort},
    paymentmodel::PaymentProvider,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationDto {
    pub longitude: f64,
    pub latitude: f64,
    pub address: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingDto {
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub pickup_location: LocationDto,
    pub dropoff_location: LocationDto,
    #[serde(default)]
    pub security_escort: bool,
    pub payment_method: Option<PaymentProvider>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ReviewBookingDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    pub review: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingData {
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_escort: Option<SecurityEscort>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponseDto {
    pub status: String,
    pub data: BookingData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingListResponseDto {
    pub status: String,
    pub bookings: Vec<Booking>,
    pub results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        let mut dto = ReviewBookingDto {
            rating: 5,
            review: None,
        };
        assert!(dto.validate().is_ok());

        dto.rating = 0;
        assert!(dto.validate().is_err());

        dto.rating = 6;
        assert!(dto.validate().is_err());
    }
}
