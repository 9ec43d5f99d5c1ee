use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::marketmodels::*;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateCarListingDto {
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,

    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,

    #[validate(range(min = 1980, message = "Year is invalid"))]
    pub year: i32,

    #[validate(range(min = 1.0, message = "Price must be greater than zero"))]
    pub price: f64, // naira

    #[validate(range(min = 0, message = "Mileage cannot be negative"))]
    pub mileage: i32,

    pub condition: CarCondition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    pub features: Vec<String>,

    #[validate(length(min = 1, max = 5, message = "Between 1 and 5 images are required"))]
    pub images: Vec<String>,

    pub longitude: f64,
    pub latitude: f64,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[serde(default = "default_true")]
    pub negotiable: bool,

    #[serde(default = "default_true")]
    pub inspection_available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CarListingQueryDto {
    pub make: Option<String>,
    pub model: Option<String>,
    pub min_price: Option<f64>, // naira
    pub max_price: Option<f64>, // naira

    #[validate(range(min = 1))]
    pub page: Option<usize>,

    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListingStatusDto {
    pub status: ListingStatus,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateAutoPartDto {
    #[validate(length(min = 1, message = "Part name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Part number is required"))]
    pub part_number: String,

    pub category: PartCategory,
    pub condition: PartCondition,

    pub compatibility: Option<serde_json::Value>,

    #[validate(range(min = 1.0, message = "Price must be greater than zero"))]
    pub price: f64, // naira

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 5, message = "Between 1 and 5 images are required"))]
    pub images: Vec<String>,

    pub specifications: Option<serde_json::Value>,
    pub warranty: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AutoPartQueryDto {
    pub category: Option<PartCategory>,
    pub condition: Option<PartCondition>,

    #[validate(range(min = 1))]
    pub page: Option<usize>,

    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePartStatusDto {
    pub status: PartStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CarListingResponseDto {
    pub status: String,
    pub listing: CarListing,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CarListingListResponseDto {
    pub status: String,
    pub listings: Vec<CarListing>,
    pub results: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutoPartResponseDto {
    pub status: String,
    pub part: AutoPart,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutoPartListResponseDto {
    pub status: String,
    pub parts: Vec<AutoPart>,
    pub results: usize,
}
