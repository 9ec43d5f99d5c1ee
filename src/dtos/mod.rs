pub mod bookingdtos;
pub mod marketdtos;
pub mod paymentdtos;
pub mod userdtos;
pub mod vehicledtos;
