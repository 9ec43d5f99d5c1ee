use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::marketdb::{MarketExt, NewAutoPart, NewCarListing},
    dtos::marketdtos::*,
    error::HttpError,
    middleware::main_middleware::{auth, role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    utils::currency::parse_amount_to_kobo,
    AppState,
};

pub fn market_handler() -> Router {
    let public = Router::new()
        .route("/cars", get(list_car_listings))
        .route("/cars/:listing_id", get(get_car_listing))
        .route("/parts", get(list_auto_parts))
        .route("/parts/:part_id", get(get_auto_part));

    let protected = Router::new()
        .route(
            "/cars",
            post(create_car_listing).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::CarDealer, UserRole::CarOwner, UserRole::Admin],
                )
            })),
        )
        .route("/cars/:listing_id/status", put(update_listing_status))
        .route(
            "/parts",
            post(create_auto_part).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::PartsDealer, UserRole::Admin],
                )
            })),
        )
        .route("/parts/:part_id/status", put(update_part_status))
        .layer(middleware::from_fn(auth));

    public.merge(protected)
}

pub async fn list_car_listings(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<CarListingQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(10);

    let listings = app_state
        .db_client
        .get_car_listings(&query, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(CarListingListResponseDto {
        status: "success".to_string(),
        results: listings.len(),
        listings,
    }))
}

pub async fn get_car_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = app_state
        .db_client
        .get_car_listing(listing_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Listing not found".to_string()))?;

    if let Err(err) = app_state.db_client.increment_listing_views(listing_id).await {
        tracing::error!(listing_id = %listing_id, "failed to bump view count: {}", err);
    }

    Ok(Json(CarListingResponseDto {
        status: "success".to_string(),
        listing,
    }))
}

pub async fn create_car_listing(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateCarListingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let listing = app_state
        .db_client
        .save_car_listing(NewCarListing {
            seller_id: user.user.id,
            make: &body.make,
            model: &body.model,
            year: body.year,
            price: parse_amount_to_kobo(body.price),
            mileage: body.mileage,
            condition: body.condition,
            transmission: body.transmission,
            fuel_type: body.fuel_type,
            description: &body.description,
            features: &body.features,
            images: &body.images,
            longitude: body.longitude,
            latitude: body.latitude,
            address: &body.address,
            state: &body.state,
            city: &body.city,
            negotiable: body.negotiable,
            inspection_available: body.inspection_available,
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(CarListingResponseDto {
            status: "success".to_string(),
            listing,
        }),
    ))
}

pub async fn update_listing_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<UpdateListingStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = app_state
        .db_client
        .update_listing_status(listing_id, user.user.id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found("Listing not found or not owned by you".to_string())
        })?;

    Ok(Json(CarListingResponseDto {
        status: "success".to_string(),
        listing,
    }))
}

pub async fn list_auto_parts(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<AutoPartQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(10);

    let parts = app_state
        .db_client
        .get_auto_parts(&query, page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(AutoPartListResponseDto {
        status: "success".to_string(),
        results: parts.len(),
        parts,
    }))
}

pub async fn get_auto_part(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(part_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let part = app_state
        .db_client
        .get_auto_part(part_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Part not found".to_string()))?;

    Ok(Json(AutoPartResponseDto {
        status: "success".to_string(),
        part,
    }))
}

pub async fn create_auto_part(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateAutoPartDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let part = app_state
        .db_client
        .save_auto_part(NewAutoPart {
            seller_id: user.user.id,
            name: &body.name,
            part_number: &body.part_number,
            category: body.category,
            condition: body.condition,
            compatibility: body.compatibility,
            price: parse_amount_to_kobo(body.price),
            quantity: body.quantity,
            description: &body.description,
            images: &body.images,
            specifications: body.specifications,
            warranty: body.warranty.as_deref(),
        })
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::bad_request("A part with this part number already exists".to_string())
            }
            _ => HttpError::server_error(e.to_string()),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(AutoPartResponseDto {
            status: "success".to_string(),
            part,
        }),
    ))
}

pub async fn update_part_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(part_id): Path<Uuid>,
    Json(body): Json<UpdatePartStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let part = app_state
        .db_client
        .update_part_status(part_id, user.user.id, body.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Part not found or not owned by you".to_string()))?;

    Ok(Json(AutoPartResponseDto {
        status: "success".to_string(),
        part,
    }))
}
