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
    dtos::{
        bookingdtos::*,
        userdtos::RequestQueryDto,
    },
    error::HttpError,
    middleware::main_middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn bookings_handler() -> Router {
    Router::new()
        .route("/", post(create_booking).get(list_my_bookings))
        .route("/:booking_id", get(get_booking))
        .route(
            "/:booking_id/confirm",
            put(confirm_booking).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::CarOwner, UserRole::CarDealer, UserRole::Admin],
                )
            })),
        )
        .route(
            "/:booking_id/start",
            put(start_booking).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::CarOwner, UserRole::CarDealer, UserRole::Admin],
                )
            })),
        )
        .route(
            "/:booking_id/complete",
            put(complete_booking).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::CarOwner, UserRole::CarDealer, UserRole::Admin],
                )
            })),
        )
        .route("/:booking_id/cancel", put(cancel_booking))
        .route("/:booking_id/review", post(review_booking))
}

pub async fn create_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let data = app_state
        .booking_service
        .create_booking(user.user.id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponseDto {
            status: "success".to_string(),
            data,
        }),
    ))
}

pub async fn list_my_bookings(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(10);

    let bookings = app_state
        .booking_service
        .get_user_bookings(user.user.id, page, limit)
        .await?;

    Ok(Json(BookingListResponseDto {
        status: "success".to_string(),
        results: bookings.len(),
        bookings,
    }))
}

pub async fn get_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let data = app_state
        .booking_service
        .get_booking_details(booking_id, user.user.id)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        data,
    }))
}

pub async fn confirm_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state.booking_service.confirm_booking(booking_id).await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        data: BookingData {
            booking,
            security_escort: None,
        },
    }))
}

pub async fn start_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state.booking_service.start_booking(booking_id).await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        data: BookingData {
            booking,
            security_escort: None,
        },
    }))
}

pub async fn complete_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .complete_booking(booking_id)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        data: BookingData {
            booking,
            security_escort: None,
        },
    }))
}

pub async fn cancel_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let booking = app_state
        .booking_service
        .cancel_booking(booking_id, user.user.id)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        data: BookingData {
            booking,
            security_escort: None,
        },
    }))
}

pub async fn review_booking(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<ReviewBookingDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let booking = app_state
        .booking_service
        .add_review(booking_id, user.user.id, body)
        .await?;

    Ok(Json(BookingResponseDto {
        status: "success".to_string(),
        data: BookingData {
            booking,
            security_escort: None,
        },
    }))
}
