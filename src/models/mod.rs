pub mod bookingmodel;
pub mod marketmodels;
pub mod paymentmodel;
pub mod usermodel;
pub mod vehiclemodel;
