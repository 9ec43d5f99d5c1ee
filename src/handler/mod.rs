pub mod auth;
pub mod bookings;
pub mod google_oauth;
pub mod market;
pub mod payments;
pub mod upload;
pub mod users;
pub mod vehicles;
