use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
    routing::get,
    Extension, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::error;

use crate::{
    db::userdb::{NewUser, UserExt},
    error::HttpError,
    models::usermodel::{username_from_email, AccountType, NotificationPreference, UserRole},
    utils::token,
    AppState,
};

const OAUTH_STATE_COOKIE: &str = "oauth_state";

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub fn oauth_handler() -> Router {
    Router::new()
        .route("/google", get(google_login))
        .route("/google/callback", get(google_callback))
}

pub async fn google_login(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let (auth_url, state) = app_state.google_auth.get_authorization_url();

    let cookie = Cookie::build((OAUTH_STATE_COOKIE, state))
        .path("/")
        .max_age(time::Duration::minutes(5))
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

    Ok((headers, Redirect::temporary(&auth_url)))
}

pub async fn google_callback(
    cookie_jar: CookieJar,
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> impl IntoResponse {
    let frontend = app_state.env.frontend_url.clone();
    let failure = || Redirect::temporary(&format!("{}/login?error=auth_failed", frontend));

    if query.error.is_some() {
        return failure();
    }

    let (code, state) = match (query.code, query.state) {
        (Some(code), Some(state)) => (code, state),
        _ => return failure(),
    };

    let stored_state = cookie_jar
        .get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());

    if stored_state.as_deref() != Some(state.as_str()) {
        error!("oauth state mismatch");
        return failure();
    }

    let access_token = match app_state.google_auth.exchange_code(&code).await {
        Ok(token) => token,
        Err(err) => {
            error!("google code exchange failed: {}", err);
            return failure();
        }
    };

    let user_info = match app_state.google_auth.get_user_info(&access_token).await {
        Ok(info) => info,
        Err(err) => {
            error!("google userinfo fetch failed: {}", err);
            return failure();
        }
    };

    let user = match find_or_create_google_user(&app_state, &user_info).await {
        Ok(user) => user,
        Err(err) => {
            error!("failed to upsert google user: {}", err);
            return failure();
        }
    };

    let jwt = match token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    ) {
        Ok(jwt) => jwt,
        Err(err) => {
            error!("failed to issue token: {}", err);
            return failure();
        }
    };

    if let Err(err) = app_state.db_client.record_login(user.id).await {
        error!(user_id = %user.id, "failed to record login: {}", err);
    }

    // Accounts created through OAuth have no phone number yet; send them to
    // finish their profile before the dashboard.
    let destination = if user.phone_number.is_none() {
        format!("{}/complete-profile?token={}", frontend, jwt)
    } else {
        format!("{}/dashboard?token={}", frontend, jwt)
    };

    Redirect::temporary(&destination)
}

async fn find_or_create_google_user(
    app_state: &AppState,
    user_info: &crate::service::google_oauth::GoogleUserInfo,
) -> Result<crate::models::usermodel::User, HttpError> {
    if let Some(user) = app_state
        .db_client
        .get_user(None, None, Some(&user_info.sub), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
    {
        return Ok(user);
    }

    // An existing local account with the same email gets linked rather than
    // duplicated.
    if let Some(user) = app_state
        .db_client
        .get_user(None, Some(&user_info.email), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
    {
        return Ok(user);
    }

    let username = username_from_email(&user_info.email);

    let user = app_state
        .db_client
        .save_user(NewUser {
            name: user_info.name.as_deref(),
            username: &username,
            email: &user_info.email,
            password: None,
            phone_number: None,
            account_type: AccountType::Customer,
            role: UserRole::Customer,
            notification_preference: NotificationPreference::Email,
            // Google has already verified the address.
            verified: user_info.email_verified,
            google_id: Some(&user_info.sub),
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(user)
}
