pub mod bookingdb;
pub mod db;
pub mod marketdb;
pub mod paymentdb;
pub mod userdb;
pub mod vehicledb;
