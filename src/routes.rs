use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        auth::auth_handler, bookings::bookings_handler, google_oauth::oauth_handler,
        market::market_handler, payments::payments_handler, upload::upload_handler,
        users::users_handler, vehicles::vehicles_handler,
    },
    middleware::{
        main_middleware::auth,
        rate_limit::{api_rate_limiter, rate_limit_middleware},
    },
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_limiter = Arc::new(api_rate_limiter());

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/oauth", oauth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/vehicles", vehicles_handler())
        .nest(
            "/bookings",
            bookings_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/payments",
            payments_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/market", market_handler())
        .nest("/upload", upload_handler().layer(middleware::from_fn(auth)))
        .layer(middleware::from_fn_with_state(
            api_limiter,
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
