use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use tracing::error;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::{NewUser, UserExt},
    dtos::userdtos::*,
    error::{ErrorMessage, HttpError},
    mail::mails,
    middleware::{
        main_middleware::{auth, JWTAuthMiddeware},
        rate_limit::{login_rate_limiter, rate_limit_middleware},
    },
    models::usermodel::{username_from_email, AccountType, NotificationPreference, UserRole},
    utils::{password, token},
    AppState,
};

const RESET_TOKEN_VALIDITY_MINUTES: i64 = 60;

pub fn auth_handler() -> Router {
    let login_limiter = Arc::new(login_rate_limiter());

    Router::new()
        .route(
            "/login",
            post(login).layer(middleware::from_fn_with_state(
                login_limiter,
                rate_limit_middleware,
            )),
        )
        .route("/register", post(register))
        .route("/verify-email", post(verify_email))
        .route("/verify-otp", post(verify_otp))
        .route("/resend-otp", post(resend_otp))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route(
            "/complete-profile",
            post(complete_profile).layer(middleware::from_fn(auth)),
        )
}

pub async fn register(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let existing = app_state
        .db_client
        .get_user(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if existing.is_some() {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let username = body
        .username
        .clone()
        .unwrap_or_else(|| username_from_email(&body.email));

    let new_user = NewUser {
        name: body.name.as_deref(),
        username: &username,
        email: &body.email,
        password: Some(&hashed_password),
        phone_number: Some(&body.phone_number),
        account_type: body.account_type.unwrap_or(AccountType::Customer),
        role: body.role.unwrap_or(UserRole::Customer),
        notification_preference: body
            .notification_preference
            .unwrap_or(NotificationPreference::Email),
        verified: false,
        google_id: None,
    };

    let user = app_state
        .db_client
        .save_user(new_user)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::bad_request(ErrorMessage::EmailExist.to_string())
            }
            _ => HttpError::server_error(e.to_string()),
        })?;

    // Verification delivery is best effort; the account can always use
    // resend-otp if the first dispatch fails.
    if let Err(err) = app_state.notification_service.send_otp(&user).await {
        error!(user_id = %user.id, "failed to send verification code: {}", err);
    }

    // The account is usable straight away; verification only flips the
    // is_verified flag on the profile.
    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(UserLoginResponseDto {
            status: "success".to_string(),
            token,
            data: UserData {
                user: FilterUserDto::filter_user(&user),
            },
        }),
    ))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    // OAuth-only accounts have no local password to check against.
    let stored_hash = user
        .password
        .as_deref()
        .ok_or_else(|| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    let password_matches = password::compare(&body.password, stored_hash)
        .map_err(|_| HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string()))?;

    if !password_matches {
        return Err(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ));
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Err(err) = app_state.db_client.record_login(user.id).await {
        error!(user_id = %user.id, "failed to record login: {}", err);
    }

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error("Failed to build cookie".to_string()))?,
    );

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    });

    Ok((headers, response))
}

/// Link-based fallback to the OTP flow: the verification email carries a
/// signed token pointing back here.
pub async fn verify_email(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<VerifyEmailDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user_id = token::decode_token(&body.token, app_state.env.jwt_secret.as_bytes())?;
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| HttpError::bad_request(ErrorMessage::InvalidToken.to_string()))?;

    let user = app_state
        .db_client
        .clear_otp_and_verify(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn verify_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<VerifyOtpDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .notification_service
        .verify_otp(body.user_id, &body.otp)
        .await?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn resend_otp(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ResendOtpDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Do not reveal whether the address exists.
    if let Some(user) = user {
        if !user.verified {
            app_state.notification_service.send_otp(&user).await?;
        }
    }

    Ok(Json(Response {
        status: "success",
        message: "If that account exists, a new verification code has been sent".to_string(),
    }))
}

pub async fn forgot_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ForgotPasswordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, Some(&body.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(user) = user {
        let reset_token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_VALIDITY_MINUTES);

        app_state
            .db_client
            .set_password_reset_token(user.id, &reset_token, expires_at)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if let Err(err) =
            mails::send_forgot_password_email(&app_state.env, &user.email, &user.username, &reset_token)
                .await
        {
            error!(user_id = %user.id, "failed to send reset email: {}", err);
        }
    }

    Ok(Json(Response {
        status: "success",
        message: "If that account exists, a password reset link has been sent".to_string(),
    }))
}

pub async fn reset_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(None, None, None, Some(&body.token))
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request("Invalid or expired reset token".to_string()))?;

    let expired = user
        .reset_token_expires_at
        .map(|expires_at| Utc::now() > expires_at)
        .unwrap_or(true);

    if expired {
        return Err(HttpError::bad_request(
            "Invalid or expired reset token".to_string(),
        ));
    }

    let hashed_password =
        password::hash(&body.new_password).map_err(|e| HttpError::server_error(e.to_string()))?;

    app_state
        .db_client
        .update_user_password(user.id, hashed_password)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(Response {
        status: "success",
        message: "Password has been reset, you can now log in".to_string(),
    }))
}

pub async fn complete_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CompleteProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .db_client
        .complete_profile(
            user.user.id,
            &body.phone_number,
            body.role.unwrap_or(user.user.role),
            body.notification_preference
                .unwrap_or(user.user.notification_preference),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&updated),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_response_carries_a_session_token() {
        // A fresh, still-unverified account gets a working day-long token
        // right away, alongside the filtered profile.
        let user = FilterUserDto {
            id: Uuid::new_v4().to_string(),
            name: Some("Ada Obi".to_string()),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "customer".to_string(),
            account_type: "customer".to_string(),
            phone_number: Some("+2348012345678".to_string()),
            notification_preference: "email".to_string(),
            is_verified: false,
            is_profile_complete: false,
            business_name: None,
            wallet_balance: 0,
            average_rating: None,
            rating_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let token = token::create_token(&user.id, b"test-secret", 24 * 60).unwrap();
        let decoded = token::decode_token(token.clone(), b"test-secret").unwrap();
        assert_eq!(decoded, user.id);

        let body = UserLoginResponseDto {
            status: "success".to_string(),
            token,
            data: UserData { user },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(json["data"]["user"]["is_verified"], false);
    }
}
