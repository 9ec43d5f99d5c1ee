#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Payment providers
    pub stripe_secret_key: String,
    pub paystack_secret_key: String,
    pub flutterwave_secret_key: String,
    // Email (Resend HTTP API)
    pub resend_api_key: String,
    pub mail_from: String,
    // SMS (Twilio Messages API)
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_from_number: String,
    // Operational contacts
    pub admin_email: String,
    pub admin_phone: String,
    // Google OAuth
    pub google_client_id: String,
    pub google_client_secret: String,
    // Object storage for image uploads
    pub storage_base_url: String,
    pub storage_bucket: String,
    pub storage_api_key: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").unwrap_or_else(|_| "1440".to_string());
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");
        let frontend_url = std::env::var("FRONTEND_URL").expect("FRONTEND_URL must be set");
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .expect("PORT must be a number");

        // Payment provider configurations (with test defaults)
        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .unwrap_or_else(|_| "sk_test_secret_key".to_string());
        let paystack_secret_key = std::env::var("PAYSTACK_SECRET_KEY")
            .unwrap_or_else(|_| "test_secret_key".to_string());
        let flutterwave_secret_key = std::env::var("FLUTTERWAVE_SECRET_KEY")
            .unwrap_or_else(|_| "test_secret_key".to_string());

        // Messaging configurations
        let resend_api_key = std::env::var("RESEND_API_KEY").unwrap_or_else(|_| "".to_string());
        let mail_from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "Anything Cars <noreply@anythingcars.ng>".to_string());
        let twilio_account_sid = std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_else(|_| "".to_string());
        let twilio_auth_token = std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_else(|_| "".to_string());
        let twilio_from_number = std::env::var("TWILIO_FROM_NUMBER").unwrap_or_else(|_| "".to_string());

        let admin_email = std::env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "ops@anythingcars.ng".to_string());
        let admin_phone = std::env::var("ADMIN_PHONE").unwrap_or_else(|_| "".to_string());

        let google_client_id = std::env::var("GOOGLE_CLIENT_ID").unwrap_or_else(|_| "".to_string());
        let google_client_secret =
            std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_else(|_| "".to_string());

        let storage_base_url = std::env::var("STORAGE_BASE_URL")
            .unwrap_or_else(|_| "https://storage.anythingcars.ng".to_string());
        let storage_bucket = std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| "uploads".to_string());
        let storage_api_key = std::env::var("STORAGE_API_KEY").unwrap_or_else(|_| "".to_string());

        Config {
            database_url,
            app_url,
            frontend_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().expect("JWT_MAXAGE must be a number"),
            port,
            stripe_secret_key,
            paystack_secret_key,
            flutterwave_secret_key,
            resend_api_key,
            mail_from,
            twilio_account_sid,
            twilio_auth_token,
            twilio_from_number,
            admin_email,
            admin_phone,
            google_client_id,
            google_client_secret,
            storage_base_url,
            storage_bucket,
            storage_api_key,
        }
    }
}
