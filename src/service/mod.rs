pub mod booking_service;
pub mod error;
pub mod google_oauth;
pub mod notification_service;
pub mod payment_provider;
pub mod sms;
pub mod upload_service;
