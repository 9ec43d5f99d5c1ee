use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehiclemodel::Vehicle;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateVehicleDto {
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,

    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,

    #[validate(range(min = 2007, message = "Vehicles older than 2007 cannot be listed"))]
    pub year: i32,

    #[validate(length(min = 1, message = "License plate is required"))]
    pub license_plate: String,

    pub longitude: f64,
    pub latitude: f64,

    #[validate(range(min = 1.0, message = "Daily price must be greater than zero"))]
    pub price_per_day: f64, // naira

    #[validate(range(min = 1.0, message = "Trip price must be greater than zero"))]
    pub price_per_trip: f64, // naira

    #[validate(length(min = 1, max = 5, message = "Between 1 and 5 images are required"))]
    pub images: Vec<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub driver_provided: bool,
    pub driver_name: Option<String>,
    pub driver_license_number: Option<String>,
    pub driver_phone_number: Option<String>,
    pub driver_user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleAvailabilityDto {
    pub is_available: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleData {
    pub vehicle: Vehicle,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleResponseDto {
    pub status: String,
    pub data: VehicleData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleListResponseDto {
    pub status: String,
    pub vehicles: Vec<Vehicle>,
    pub results: usize,
}
