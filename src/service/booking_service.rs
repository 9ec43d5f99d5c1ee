use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    db::{
        bookingdb::{BookingExt, NewBooking},
        db::DBClient,
        userdb::UserExt,
        vehicledb::VehicleExt,
    },
    dtos::bookingdtos::{BookingData, CreateBookingDto, ReviewBookingDto},
    models::bookingmodel::{
        Booking, BookingStatus, EscortStatus, CANCELLATION_FEE_PERCENT, ESCORT_DAILY_RATE,
    },
    service::{error::ServiceError, notification_service::NotificationService},
    utils::currency::format_kobo_as_naira,
};

/// Price breakdown for a prospective booking, everything in kobo.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingQuote {
    pub days: i64,
    pub base_amount: i64,
    pub escort_amount: i64,
    pub total_amount: i64,
}

/// Chargeable days for a hire period. Any part of a day counts as a full
/// day, and the minimum hire is one day.
pub fn chargeable_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    ((seconds + 86_399) / 86_400).max(1)
}

pub fn booking_quote(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    price_per_day: i64,
    with_escort: bool,
) -> BookingQuote {
    let days = chargeable_days(start, end);
    let base_amount = days * price_per_day;
    let escort_amount = if with_escort {
        days * ESCORT_DAILY_RATE
    } else {
        0
    };

    BookingQuote {
        days,
        base_amount,
        escort_amount,
        total_amount: base_amount + escort_amount,
    }
}

pub fn cancellation_fee(total_amount: i64) -> i64 {
    total_amount * CANCELLATION_FEE_PERCENT / 100
}

#[derive(Clone)]
pub struct BookingService {
    db_client: Arc<DBClient>,
    notification_service: Arc<NotificationService>,
}

impl BookingService {
    pub fn new(db_client: Arc<DBClient>, notification_service: Arc<NotificationService>) -> Self {
        Self {
            db_client,
            notification_service,
        }
    }

    pub async fn create_booking(
        &self,
        customer_id: Uuid,
        dto: CreateBookingDto,
    ) -> Result<BookingData, ServiceError> {
        if dto.end_date <= dto.start_date {
            return Err(ServiceError::InvalidDateRange);
        }

        // Single-winner claim: the vehicle row flips to unavailable in the
        // same statement that reads it, so two concurrent requests for the
        // same vehicle cannot both get here with a row.
        let vehicle = self
            .db_client
            .claim_vehicle(dto.vehicle_id)
            .await?
            .ok_or(ServiceError::VehicleUnavailable(dto.vehicle_id))?;

        let quote = booking_quote(
            dto.start_date,
            dto.end_date,
            vehicle.price_per_day,
            dto.security_escort,
        );

        let new_booking = NewBooking {
            customer_id,
            vehicle_id: vehicle.id,
            driver_id: vehicle.driver_user_id,
            start_date: dto.start_date,
            end_date: dto.end_date,
            pickup_longitude: dto.pickup_location.longitude,
            pickup_latitude: dto.pickup_location.latitude,
            pickup_address: dto.pickup_location.address.as_deref(),
            dropoff_longitude: dto.dropoff_location.longitude,
            dropoff_latitude: dto.dropoff_location.latitude,
            dropoff_address: dto.dropoff_location.address.as_deref(),
            total_amount: quote.total_amount,
            escort_amount: quote.escort_amount,
            payment_method: dto.payment_method,
        };

        let booking = match self.db_client.save_booking(new_booking).await {
            Ok(booking) => booking,
            Err(err) => {
                // Give the vehicle back if we could not record the booking.
                if let Err(release_err) = self.db_client.release_vehicle(vehicle.id).await {
                    error!(
                        vehicle_id = %vehicle.id,
                        "failed to release vehicle after booking error: {}",
                        release_err
                    );
                }
                return Err(err.into());
            }
        };

        let security_escort = if dto.security_escort {
            let escort = self
                .db_client
                .save_escort(
                    booking.id,
                    booking.start_date,
                    booking.end_date,
                    ESCORT_DAILY_RATE,
                    quote.escort_amount,
                )
                .await?;
            self.db_client.attach_escort(booking.id, escort.id).await?;
            Some(escort)
        } else {
            None
        };

        info!(
            booking_id = %booking.id,
            customer_id = %customer_id,
            total = %format_kobo_as_naira(booking.total_amount),
            "booking created"
        );

        // Customer and driver are told independently; neither failure rolls
        // anything back.
        self.notify_user(
            customer_id,
            "Booking received",
            &format!(
                "Your booking for {} is awaiting confirmation. Total: {}.",
                vehicle.display_name(),
                format_kobo_as_naira(booking.total_amount)
            ),
        )
        .await;

        if let Some(driver_id) = vehicle.driver_user_id {
            self.notify_user(
                driver_id,
                "New trip assigned",
                &format!(
                    "You have a new trip with {} from {} to {}.",
                    vehicle.display_name(),
                    booking.start_date.format("%Y-%m-%d"),
                    booking.end_date.format("%Y-%m-%d")
                ),
            )
            .await;
        }

        Ok(BookingData {
            booking,
            security_escort,
        })
    }

    pub async fn confirm_booking(&self, booking_id: Uuid) -> Result<Booking, ServiceError> {
        let booking = self
            .transition(booking_id, BookingStatus::Pending, BookingStatus::Confirmed)
            .await?;

        self.notify_user(
            booking.customer_id,
            "Booking confirmed",
            "Your booking has been confirmed. Your vehicle will be ready at the pickup location.",
        )
        .await;

        Ok(booking)
    }

    pub async fn start_booking(&self, booking_id: Uuid) -> Result<Booking, ServiceError> {
        let booking = self
            .transition(
                booking_id,
                BookingStatus::Confirmed,
                BookingStatus::InProgress,
            )
            .await?;

        // The escort goes on duty when the trip actually starts.
        if let Some(escort_id) = booking.escort_id {
            self.db_client
                .update_escort_status(escort_id, EscortStatus::Pending, EscortStatus::Active)
                .await?;
        }

        Ok(booking)
    }

    pub async fn complete_booking(&self, booking_id: Uuid) -> Result<Booking, ServiceError> {
        let booking = self
            .transition(
                booking_id,
                BookingStatus::InProgress,
                BookingStatus::Completed,
            )
            .await?;

        if let Some(escort_id) = booking.escort_id {
            self.db_client
                .update_escort_status(escort_id, EscortStatus::Active, EscortStatus::Completed)
                .await?;
        }

        self.db_client.release_vehicle(booking.vehicle_id).await?;

        self.notify_user(
            booking.customer_id,
            "Trip completed",
            "Your trip is complete. We would love to hear how it went.",
        )
        .await;

        Ok(booking)
    }

    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if booking.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedBookingAccess(
                customer_id,
                booking_id,
            ));
        }

        let from = booking.status;
        if !from.can_transition_to(BookingStatus::Cancelled) {
            return Err(ServiceError::InvalidTransition {
                from: from.to_str().to_string(),
                to: BookingStatus::Cancelled.to_str().to_string(),
            });
        }

        let mut booking = self
            .db_client
            .update_booking_status(booking_id, from, BookingStatus::Cancelled)
            .await?
            .ok_or(ServiceError::InvalidTransition {
                from: from.to_str().to_string(),
                to: BookingStatus::Cancelled.to_str().to_string(),
            })?;

        // Cancelling before completion always costs 10% of the total, no
        // matter how far along the booking was.
        let fee = cancellation_fee(booking.total_amount);
        booking = self.db_client.set_cancellation_fee(booking_id, fee).await?;

        if let Some(escort_id) = booking.escort_id {
            let cancelled = self
                .db_client
                .update_escort_status(escort_id, EscortStatus::Pending, EscortStatus::Cancelled)
                .await?;
            if cancelled.is_none() {
                self.db_client
                    .update_escort_status(escort_id, EscortStatus::Active, EscortStatus::Cancelled)
                    .await?;
            }
        }

        self.db_client.release_vehicle(booking.vehicle_id).await?;

        self.notify_user(
            booking.customer_id,
            "Booking cancelled",
            &format!(
                "Your booking has been cancelled. Cancellation fee: {}.",
                format_kobo_as_naira(booking.cancellation_fee)
            ),
        )
        .await;

        Ok(booking)
    }

    pub async fn add_review(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
        dto: ReviewBookingDto,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .set_booking_review(booking_id, customer_id, dto.rating, dto.review.as_deref())
            .await?
            .ok_or_else(|| {
                ServiceError::Validation(
                    "Only completed bookings without an existing review can be reviewed"
                        .to_string(),
                )
            })?;

        let vehicle = self
            .db_client
            .get_vehicle(booking.vehicle_id)
            .await?
            .ok_or(ServiceError::VehicleNotFound(booking.vehicle_id))?;

        self.db_client
            .save_review(
                customer_id,
                vehicle.owner_id,
                booking_id,
                dto.rating,
                dto.review.as_deref(),
            )
            .await?;
        self.db_client.add_rating(vehicle.owner_id, dto.rating).await?;

        Ok(booking)
    }

    pub async fn get_booking_details(
        &self,
        booking_id: Uuid,
        customer_id: Uuid,
    ) -> Result<BookingData, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if booking.customer_id != customer_id {
            return Err(ServiceError::UnauthorizedBookingAccess(
                customer_id,
                booking_id,
            ));
        }

        let security_escort = self.db_client.get_escort(booking_id).await?;

        Ok(BookingData {
            booking,
            security_escort,
        })
    }

    pub async fn get_user_bookings(
        &self,
        customer_id: Uuid,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Booking>, ServiceError> {
        Ok(self
            .db_client
            .get_user_bookings(customer_id, page, limit)
            .await?)
    }

    async fn transition(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Booking, ServiceError> {
        let booking = self
            .db_client
            .get_booking(booking_id)
            .await?
            .ok_or(ServiceError::BookingNotFound(booking_id))?;

        if booking.status != from || !from.can_transition_to(to) {
            return Err(ServiceError::InvalidTransition {
                from: booking.status.to_str().to_string(),
                to: to.to_str().to_string(),
            });
        }

        self.db_client
            .update_booking_status(booking_id, from, to)
            .await?
            .ok_or(ServiceError::InvalidTransition {
                from: from.to_str().to_string(),
                to: to.to_str().to_string(),
            })
    }

    /// Notification failures never fail the booking operation itself.
    async fn notify_user(&self, user_id: Uuid, subject: &str, message: &str) {
        let user = match self.db_client.get_user(Some(user_id), None, None, None).await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(err) => {
                error!(user_id = %user_id, "failed to load user for notification: {}", err);
                return;
            }
        };

        if let Err(err) = self
            .notification_service
            .send_notification(&user, subject, message)
            .await
        {
            error!(user_id = %user_id, "failed to send booking notification: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(day: i64, hour: i64) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T00:00:00Z").unwrap().with_timezone(&Utc)
            + Duration::days(day)
            + Duration::hours(hour)
    }

    #[test]
    fn test_three_day_hire_with_escort() {
        // 3 days at N20,000/day plus 3 escort days at N30,000/day.
        let quote = booking_quote(at(0, 9), at(3, 9), 20_000 * 100, true);

        assert_eq!(quote.days, 3);
        assert_eq!(quote.base_amount, 6_000_000);
        assert_eq!(quote.escort_amount, 9_000_000);
        assert_eq!(quote.total_amount, 15_000_000);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let quote = booking_quote(at(0, 9), at(2, 15), 10_000 * 100, false);

        assert_eq!(quote.days, 3);
        assert_eq!(quote.total_amount, 3_000_000);
        assert_eq!(quote.escort_amount, 0);
    }

    #[test]
    fn test_minimum_one_day() {
        let quote = booking_quote(at(0, 9), at(0, 11), 10_000 * 100, false);

        assert_eq!(quote.days, 1);
        assert_eq!(quote.total_amount, 1_000_000);
    }

    #[test]
    fn test_escort_rate_is_flat_per_day() {
        let with = booking_quote(at(0, 0), at(5, 0), 15_000 * 100, true);
        let without = booking_quote(at(0, 0), at(5, 0), 15_000 * 100, false);

        assert_eq!(with.escort_amount, 5 * ESCORT_DAILY_RATE);
        assert_eq!(with.total_amount - without.total_amount, with.escort_amount);
    }

    #[test]
    fn test_cancellation_fee_is_ten_percent() {
        assert_eq!(cancellation_fee(15_000_000), 1_500_000);
        assert_eq!(cancellation_fee(0), 0);
        assert_eq!(cancellation_fee(99), 9);
    }

    #[test]
    fn test_fee_is_charged_even_before_confirmation() {
        // Cancelling is legal from any non-terminal status and the fee is
        // the same 10% whether or not the booking was ever confirmed: a
        // 3-day escorted hire at N150,000 total forfeits N15,000.
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
        ] {
            assert!(status.can_transition_to(BookingStatus::Cancelled));
        }

        let quote = booking_quote(at(0, 9), at(3, 9), 20_000 * 100, true);
        assert_eq!(cancellation_fee(quote.total_amount), 1_500_000);
    }
}
