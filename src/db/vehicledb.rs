use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::models::vehiclemodel::Vehicle;

const VEHICLE_COLUMNS: &str = r#"
    id, owner_id, make, model, year, license_plate, longitude, latitude,
    price_per_day, price_per_trip, is_available, images, features,
    driver_provided, driver_name, driver_license_number, driver_phone_number,
    driver_user_id, created_at, updated_at
"#;

pub struct NewVehicle<'a> {
    pub owner_id: Uuid,
    pub make: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub license_plate: &'a str,
    pub longitude: f64,
    pub latitude: f64,
    pub price_per_day: i64,
    pub price_per_trip: i64,
    pub images: &'a [String],
    pub features: &'a [String],
    pub driver_provided: bool,
    pub driver_name: Option<&'a str>,
    pub driver_license_number: Option<&'a str>,
    pub driver_phone_number: Option<&'a str>,
    pub driver_user_id: Option<Uuid>,
}

#[async_trait]
pub trait VehicleExt {
    async fn save_vehicle(&self, new_vehicle: NewVehicle<'_>) -> Result<Vehicle, sqlx::Error>;

    async fn get_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, sqlx::Error>;

    async fn get_available_vehicles(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Vehicle>, sqlx::Error>;

    async fn get_owner_vehicles(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, sqlx::Error>;

    /// Claims the vehicle for a booking. The conditional update means only
    /// one of any number of concurrent callers gets the row back; the rest
    /// see `None`.
    async fn claim_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, sqlx::Error>;

    async fn release_vehicle(&self, vehicle_id: Uuid) -> Result<(), sqlx::Error>;

    async fn set_vehicle_availability(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        is_available: bool,
    ) -> Result<Option<Vehicle>, sqlx::Error>;
}

#[async_trait]
impl VehicleExt for DBClient {
    async fn save_vehicle(&self, new_vehicle: NewVehicle<'_>) -> Result<Vehicle, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (
                owner_id, make, model, year, license_plate, longitude, latitude,
                price_per_day, price_per_trip, images, features,
                driver_provided, driver_name, driver_license_number,
                driver_phone_number, driver_user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(new_vehicle.owner_id)
        .bind(new_vehicle.make)
        .bind(new_vehicle.model)
        .bind(new_vehicle.year)
        .bind(new_vehicle.license_plate)
        .bind(new_vehicle.longitude)
        .bind(new_vehicle.latitude)
        .bind(new_vehicle.price_per_day)
        .bind(new_vehicle.price_per_trip)
        .bind(new_vehicle.images)
        .bind(new_vehicle.features)
        .bind(new_vehicle.driver_provided)
        .bind(new_vehicle.driver_name)
        .bind(new_vehicle.driver_license_number)
        .bind(new_vehicle.driver_phone_number)
        .bind(new_vehicle.driver_user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_available_vehicles(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Vehicle>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS} FROM vehicles
            WHERE is_available = TRUE
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_owner_vehicles(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn claim_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Vehicle>, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET is_available = FALSE,
                updated_at = NOW()
            WHERE id = $1 AND is_available = TRUE
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn release_vehicle(&self, vehicle_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE vehicles SET is_available = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn set_vehicle_availability(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        is_available: bool,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET is_available = $3,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(vehicle_id)
        .bind(owner_id)
        .bind(is_available)
        .fetch_optional(&self.pool)
        .await
    }
}
