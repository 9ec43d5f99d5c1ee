use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "car_condition", rename_all = "snake_case")]
pub enum CarCondition {
    New,
    ForeignUsed,
    NigerianUsedLikeNew,
    NigerianUsedGood,
    NigerianUsedFair,
}

impl CarCondition {
    pub fn to_str(&self) -> &str {
        match self {
            CarCondition::New => "new",
            CarCondition::ForeignUsed => "foreign_used",
            CarCondition::NigerianUsedLikeNew => "nigerian_used_like_new",
            CarCondition::NigerianUsedGood => "nigerian_used_good",
            CarCondition::NigerianUsedFair => "nigerian_used_fair",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "transmission_type", rename_all = "snake_case")]
pub enum Transmission {
    Automatic,
    Manual,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "fuel_type", rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "listing_status", rename_all = "snake_case")]
pub enum ListingStatus {
    Available,
    Sold,
    Reserved,
}

impl ListingStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ListingStatus::Available => "available",
            ListingStatus::Sold => "sold",
            ListingStatus::Reserved => "reserved",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct CarListing {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64, // kobo
    pub mileage: i32,
    pub condition: CarCondition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub address: String,
    pub state: String,
    pub city: String,
    pub status: ListingStatus,
    pub negotiable: bool,
    pub inspection_available: bool,
    pub views: i32,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "part_category", rename_all = "snake_case")]
pub enum PartCategory {
    EngineParts,
    Transmission,
    Brakes,
    Suspension,
    Electrical,
    BodyParts,
    Interior,
    WheelsTires,
    Other,
}

impl PartCategory {
    pub fn to_str(&self) -> &str {
        match self {
            PartCategory::EngineParts => "engine_parts",
            PartCategory::Transmission => "transmission",
            PartCategory::Brakes => "brakes",
            PartCategory::Suspension => "suspension",
            PartCategory::Electrical => "electrical",
            PartCategory::BodyParts => "body_parts",
            PartCategory::Interior => "interior",
            PartCategory::WheelsTires => "wheels_tires",
            PartCategory::Other => "other",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "part_condition", rename_all = "snake_case")]
pub enum PartCondition {
    New,
    UsedLikeNew,
    UsedGood,
    UsedFair,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "part_status", rename_all = "snake_case")]
pub enum PartStatus {
    Available,
    OutOfStock,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct AutoPart {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub part_number: String,
    pub category: PartCategory,
    pub condition: PartCondition,
    pub compatibility: Option<serde_json::Value>,
    pub price: i64, // kobo
    pub quantity: i32,
    pub description: String,
    pub images: Vec<String>,
    pub specifications: Option<serde_json::Value>,
    pub warranty: Option<String>,
    pub status: PartStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
