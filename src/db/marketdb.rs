use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;

use crate::dtos::marketdtos::{AutoPartQueryDto, CarListingQueryDto};
use crate::models::marketmodels::{
    AutoPart, CarCondition, CarListing, FuelType, ListingStatus, PartCategory, PartCondition,
    PartStatus, Transmission,
};

const LISTING_COLUMNS: &str = r#"
    id, seller_id, make, model, year, price, mileage, condition, transmission,
    fuel_type, description, features, images, longitude, latitude,
    address, state, city, status, negotiable, inspection_available, views,
    created_at, updated_at
"#;

const PART_COLUMNS: &str = r#"
    id, seller_id, name, part_number, category, condition, compatibility,
    price, quantity, description, images, specifications, warranty, status,
    created_at, updated_at
"#;

pub struct NewCarListing<'a> {
    pub seller_id: Uuid,
    pub make: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub price: i64,
    pub mileage: i32,
    pub condition: CarCondition,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub description: &'a str,
    pub features: &'a [String],
    pub images: &'a [String],
    pub longitude: f64,
    pub latitude: f64,
    pub address: &'a str,
    pub state: &'a str,
    pub city: &'a str,
    pub negotiable: bool,
    pub inspection_available: bool,
}

pub struct NewAutoPart<'a> {
    pub seller_id: Uuid,
    pub name: &'a str,
    pub part_number: &'a str,
    pub category: PartCategory,
    pub condition: PartCondition,
    pub compatibility: Option<serde_json::Value>,
    pub price: i64,
    pub quantity: i32,
    pub description: &'a str,
    pub images: &'a [String],
    pub specifications: Option<serde_json::Value>,
    pub warranty: Option<&'a str>,
}

#[async_trait]
pub trait MarketExt {
    async fn save_car_listing(
        &self,
        new_listing: NewCarListing<'_>,
    ) -> Result<CarListing, sqlx::Error>;

    async fn get_car_listing(&self, listing_id: Uuid) -> Result<Option<CarListing>, sqlx::Error>;

    async fn get_car_listings(
        &self,
        query: &CarListingQueryDto,
        page: u32,
        limit: usize,
    ) -> Result<Vec<CarListing>, sqlx::Error>;

    async fn increment_listing_views(&self, listing_id: Uuid) -> Result<(), sqlx::Error>;

    async fn update_listing_status(
        &self,
        listing_id: Uuid,
        seller_id: Uuid,
        status: ListingStatus,
    ) -> Result<Option<CarListing>, sqlx::Error>;

    async fn save_auto_part(&self, new_part: NewAutoPart<'_>) -> Result<AutoPart, sqlx::Error>;

    async fn get_auto_part(&self, part_id: Uuid) -> Result<Option<AutoPart>, sqlx::Error>;

    async fn get_auto_parts(
        &self,
        query: &AutoPartQueryDto,
        page: u32,
        limit: usize,
    ) -> Result<Vec<AutoPart>, sqlx::Error>;

    async fn update_part_status(
        &self,
        part_id: Uuid,
        seller_id: Uuid,
        status: PartStatus,
    ) -> Result<Option<AutoPart>, sqlx::Error>;
}

#[async_trait]
impl MarketExt for DBClient {
    async fn save_car_listing(
        &self,
        new_listing: NewCarListing<'_>,
    ) -> Result<CarListing, sqlx::Error> {
        sqlx::query_as::<_, CarListing>(&format!(
            r#"
            INSERT INTO car_listings (
                seller_id, make, model, year, price, mileage, condition,
                transmission, fuel_type, description, features, images,
                longitude, latitude, address, state, city,
                negotiable, inspection_available
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19)
            RETURNING {LISTING_COLUMNS}
            "#
        ))
        .bind(new_listing.seller_id)
        .bind(new_listing.make)
        .bind(new_listing.model)
        .bind(new_listing.year)
        .bind(new_listing.price)
        .bind(new_listing.mileage)
        .bind(new_listing.condition)
        .bind(new_listing.transmission)
        .bind(new_listing.fuel_type)
        .bind(new_listing.description)
        .bind(new_listing.features)
        .bind(new_listing.images)
        .bind(new_listing.longitude)
        .bind(new_listing.latitude)
        .bind(new_listing.address)
        .bind(new_listing.state)
        .bind(new_listing.city)
        .bind(new_listing.negotiable)
        .bind(new_listing.inspection_available)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_car_listing(&self, listing_id: Uuid) -> Result<Option<CarListing>, sqlx::Error> {
        sqlx::query_as::<_, CarListing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM car_listings WHERE id = $1"
        ))
        .bind(listing_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_car_listings(
        &self,
        query: &CarListingQueryDto,
        page: u32,
        limit: usize,
    ) -> Result<Vec<CarListing>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        let make_pattern = query.make.as_ref().map(|m| format!("%{}%", m));
        let model_pattern = query.model.as_ref().map(|m| format!("%{}%", m));
        let min_price = query
            .min_price
            .map(crate::utils::currency::parse_amount_to_kobo);
        let max_price = query
            .max_price
            .map(crate::utils::currency::parse_amount_to_kobo);

        sqlx::query_as::<_, CarListing>(&format!(
            r#"
            SELECT {LISTING_COLUMNS} FROM car_listings
            WHERE status = 'available'
              AND ($1::text IS NULL OR make ILIKE $1)
              AND ($2::text IS NULL OR model ILIKE $2)
              AND ($3::bigint IS NULL OR price >= $3)
              AND ($4::bigint IS NULL OR price <= $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(make_pattern)
        .bind(model_pattern)
        .bind(min_price)
        .bind(max_price)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn increment_listing_views(&self, listing_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE car_listings SET views = views + 1 WHERE id = $1")
            .bind(listing_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_listing_status(
        &self,
        listing_id: Uuid,
        seller_id: Uuid,
        status: ListingStatus,
    ) -> Result<Option<CarListing>, sqlx::Error> {
        sqlx::query_as::<_, CarListing>(&format!(
            r#"
            UPDATE car_listings
            SET status = $3,
                updated_at = NOW()
            WHERE id = $1 AND seller_id = $2
            RETURNING {LISTING_COLUMNS}
            "#
        ))
        .bind(listing_id)
        .bind(seller_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_auto_part(&self, new_part: NewAutoPart<'_>) -> Result<AutoPart, sqlx::Error> {
        sqlx::query_as::<_, AutoPart>(&format!(
            r#"
            INSERT INTO auto_parts (
                seller_id, name, part_number, category, condition, compatibility,
                price, quantity, description, images, specifications, warranty
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(new_part.seller_id)
        .bind(new_part.name)
        .bind(new_part.part_number)
        .bind(new_part.category)
        .bind(new_part.condition)
        .bind(new_part.compatibility)
        .bind(new_part.price)
        .bind(new_part.quantity)
        .bind(new_part.description)
        .bind(new_part.images)
        .bind(new_part.specifications)
        .bind(new_part.warranty)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_auto_part(&self, part_id: Uuid) -> Result<Option<AutoPart>, sqlx::Error> {
        sqlx::query_as::<_, AutoPart>(&format!(
            "SELECT {PART_COLUMNS} FROM auto_parts WHERE id = $1"
        ))
        .bind(part_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_auto_parts(
        &self,
        query: &AutoPartQueryDto,
        page: u32,
        limit: usize,
    ) -> Result<Vec<AutoPart>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, AutoPart>(&format!(
            r#"
            SELECT {PART_COLUMNS} FROM auto_parts
            WHERE status = 'available'
              AND ($1::part_category IS NULL OR category = $1)
              AND ($2::part_condition IS NULL OR condition = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(query.category)
        .bind(query.condition)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_part_status(
        &self,
        part_id: Uuid,
        seller_id: Uuid,
        status: PartStatus,
    ) -> Result<Option<AutoPart>, sqlx::Error> {
        sqlx::query_as::<_, AutoPart>(&format!(
            r#"
            UPDATE auto_parts
            SET status = $3,
                updated_at = NOW()
            WHERE id = $1 AND seller_id = $2
            RETURNING {PART_COLUMNS}
            "#
        ))
        .bind(part_id)
        .bind(seller_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }
}
