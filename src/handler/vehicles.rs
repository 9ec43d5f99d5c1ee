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
    db::vehicledb::{NewVehicle, VehicleExt},
    dtos::{userdtos::RequestQueryDto, vehicledtos::*},
    error::HttpError,
    middleware::main_middleware::{auth, role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    utils::currency::parse_amount_to_kobo,
    AppState,
};

pub fn vehicles_handler() -> Router {
    let public = Router::new()
        .route("/", get(list_available_vehicles))
        .route("/:vehicle_id", get(get_vehicle));

    let protected = Router::new()
        .route(
            "/",
            post(create_vehicle).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::CarOwner, UserRole::CarDealer, UserRole::Admin],
                )
            })),
        )
        .route("/mine", get(list_my_vehicles))
        .route("/:vehicle_id/availability", put(set_availability))
        .layer(middleware::from_fn(auth));

    public.merge(protected)
}

pub async fn list_available_vehicles(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(10);

    let vehicles = app_state
        .db_client
        .get_available_vehicles(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(VehicleListResponseDto {
        status: "success".to_string(),
        results: vehicles.len(),
        vehicles,
    }))
}

pub async fn get_vehicle(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let vehicle = app_state
        .db_client
        .get_vehicle(vehicle_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Vehicle not found".to_string()))?;

    Ok(Json(VehicleResponseDto {
        status: "success".to_string(),
        data: VehicleData { vehicle },
    }))
}

pub async fn list_my_vehicles(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let vehicles = app_state
        .db_client
        .get_owner_vehicles(user.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(VehicleListResponseDto {
        status: "success".to_string(),
        results: vehicles.len(),
        vehicles,
    }))
}

pub async fn create_vehicle(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateVehicleDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.driver_provided && body.driver_name.is_none() && body.driver_user_id.is_none() {
        return Err(HttpError::bad_request(
            "Driver details are required when a driver is provided".to_string(),
        ));
    }

    let vehicle = app_state
        .db_client
        .save_vehicle(NewVehicle {
            owner_id: user.user.id,
            make: &body.make,
            model: &body.model,
            year: body.year,
            license_plate: &body.license_plate,
            longitude: body.longitude,
            latitude: body.latitude,
            price_per_day: parse_amount_to_kobo(body.price_per_day),
            price_per_trip: parse_amount_to_kobo(body.price_per_trip),
            images: &body.images,
            features: &body.features,
            driver_provided: body.driver_provided,
            driver_name: body.driver_name.as_deref(),
            driver_license_number: body.driver_license_number.as_deref(),
            driver_phone_number: body.driver_phone_number.as_deref(),
            driver_user_id: body.driver_user_id,
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(VehicleResponseDto {
            status: "success".to_string(),
            data: VehicleData { vehicle },
        }),
    ))
}

pub async fn set_availability(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(vehicle_id): Path<Uuid>,
    Json(body): Json<VehicleAvailabilityDto>,
) -> Result<impl IntoResponse, HttpError> {
    let vehicle = app_state
        .db_client
        .set_vehicle_availability(vehicle_id, user.user.id, body.is_available)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found("Vehicle not found or not owned by you".to_string())
        })?;

    Ok(Json(VehicleResponseDto {
        status: "success".to_string(),
        data: VehicleData { vehicle },
    }))
}
