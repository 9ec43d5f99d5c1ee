use std::sync::Arc;

use axum::{
    extract::Query,
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::*,
    error::HttpError,
    middleware::main_middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/business-profile", put(update_business_profile))
        .route(
            "/admin/users",
            get(get_users_admin).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user.user),
        },
    }))
}

pub async fn get_users_admin(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(10);

    let users = app_state
        .db_client
        .get_users(page, limit)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let count = app_state
        .db_client
        .get_user_count()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        users: FilterUserDto::filter_users(&users),
        results: count,
    }))
}

pub async fn update_business_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<BusinessProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .db_client
        .update_business_profile(
            user.user.id,
            &body.business_name,
            &body.business_address,
            &body.business_registration_number,
            body.business_type,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .notification_service
        .notify_admin(
            "Business profile updated",
            &format!(
                "{} ({}) submitted business details for {}",
                updated.username, updated.email, body.business_name
            ),
        )
        .await;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&updated),
        },
    }))
}
