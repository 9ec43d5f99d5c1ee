mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod mail;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;

use crate::config::Config;
use crate::db::db::DBClient;
use crate::routes::create_router;
use crate::service::{
    booking_service::BookingService, google_oauth::GoogleAuthService,
    notification_service::NotificationService, payment_provider::PaymentProviderService,
    upload_service::UploadService,
};

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub booking_service: Arc<BookingService>,
    pub notification_service: Arc<NotificationService>,
    pub payment_provider: Arc<PaymentProviderService>,
    pub google_auth: Arc<GoogleAuthService>,
    pub upload_service: Arc<UploadService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client_arc = Arc::new(db_client);

        let notification_service = Arc::new(NotificationService::new(
            db_client_arc.clone(),
            config.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            db_client_arc.clone(),
            notification_service.clone(),
        ));
        let payment_provider = Arc::new(PaymentProviderService::new(&config));
        let google_auth = Arc::new(GoogleAuthService::new(&config));
        let upload_service = Arc::new(UploadService::new(&config));

        Self {
            env: config,
            db_client: db_client_arc,
            booking_service,
            notification_service,
            payment_provider,
            google_auth,
            upload_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            info!("connection to the database is successful");
            pool
        }
        Err(err) => {
            error!("failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    let allowed_origins = vec![
        config.frontend_url.parse::<HeaderValue>().unwrap(),
        "http://localhost:5173".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    let app = create_router(app_state).layer(cors);

    info!("server is running on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
