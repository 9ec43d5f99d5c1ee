use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub longitude: f64,
    pub latitude: f64,
    pub price_per_day: i64,  // kobo
    pub price_per_trip: i64, // kobo
    pub is_available: bool,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub driver_provided: bool,
    pub driver_name: Option<String>,
    pub driver_license_number: Option<String>,
    pub driver_phone_number: Option<String>,
    pub driver_user_id: Option<Uuid>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }
}
