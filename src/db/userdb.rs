use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;

use crate::models::usermodel::{
    AccountType, BusinessType, NotificationPreference, User, UserRole,
};

const USER_COLUMNS: &str = r#"
    id, name, username, email, password, account_type, role, phone_number,
    notification_preference, verified, verification_otp, otp_expires_at,
    google_id, microsoft_id, facebook_id,
    business_name, business_address, business_registration_number, business_type,
    wallet_balance, rating_sum, rating_count,
    password_reset_token, reset_token_expires_at,
    is_profile_complete, last_login_at, status,
    created_at, updated_at
"#;

pub struct NewUser<'a> {
    pub name: Option<&'a str>,
    pub username: &'a str,
    pub email: &'a str,
    pub password: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub account_type: AccountType,
    pub role: UserRole,
    pub notification_preference: NotificationPreference,
    pub verified: bool,
    pub google_id: Option<&'a str>,
}

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        google_id: Option<&str>,
        reset_token: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error>;

    async fn get_user_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_user(&self, new_user: NewUser<'_>) -> Result<User, sqlx::Error>;

    async fn set_verification_otp(
        &self,
        user_id: Uuid,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error>;

    async fn clear_otp_and_verify(&self, user_id: Uuid) -> Result<User, sqlx::Error>;

    async fn set_password_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error>;

    async fn record_login(&self, user_id: Uuid) -> Result<(), sqlx::Error>;

    async fn complete_profile(
        &self,
        user_id: Uuid,
        phone_number: &str,
        role: UserRole,
        notification_preference: NotificationPreference,
    ) -> Result<User, sqlx::Error>;

    async fn update_business_profile(
        &self,
        user_id: Uuid,
        business_name: &str,
        business_address: &str,
        business_registration_number: &str,
        business_type: BusinessType,
    ) -> Result<User, sqlx::Error>;

    async fn add_rating(&self, user_id: Uuid, rating: i32) -> Result<User, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
        google_id: Option<&str>,
        reset_token: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        if let Some(user_id) = user_id {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
            ))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(email) = email {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE email = LOWER($1)"
            ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(google_id) = google_id {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE google_id = $1"
            ))
            .bind(google_id)
            .fetch_optional(&self.pool)
            .await
        } else if let Some(reset_token) = reset_token {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE password_reset_token = $1"
            ))
            .bind(reset_token)
            .fetch_optional(&self.pool)
            .await
        } else {
            Ok(None)
        }
    }

    async fn get_users(&self, page: u32, limit: usize) -> Result<Vec<User>, sqlx::Error> {
        let offset = (page - 1) as i64 * limit as i64;

        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_count(&self) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn save_user(&self, new_user: NewUser<'_>) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                name, username, email, password, phone_number,
                account_type, role, notification_preference, verified, google_id
            )
            VALUES ($1, $2, LOWER($3), $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(new_user.name)
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.password)
        .bind(new_user.phone_number)
        .bind(new_user.account_type)
        .bind(new_user.role)
        .bind(new_user.notification_preference)
        .bind(new_user.verified)
        .bind(new_user.google_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_verification_otp(
        &self,
        user_id: Uuid,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET verification_otp = $2,
                otp_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(otp)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn clear_otp_and_verify(&self, user_id: Uuid) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET verification_otp = NULL,
                otp_expires_at = NULL,
                verified = TRUE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_password_reset_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET password_reset_token = $2,
                reset_token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET password = $2,
                password_reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }

    async fn record_login(&self, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn complete_profile(
        &self,
        user_id: Uuid,
        phone_number: &str,
        role: UserRole,
        notification_preference: NotificationPreference,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET phone_number = $2,
                role = $3,
                notification_preference = $4,
                is_profile_complete = TRUE,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(phone_number)
        .bind(role)
        .bind(notification_preference)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_business_profile(
        &self,
        user_id: Uuid,
        business_name: &str,
        business_address: &str,
        business_registration_number: &str,
        business_type: BusinessType,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET business_name = $2,
                business_address = $3,
                business_registration_number = $4,
                business_type = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(business_name)
        .bind(business_address)
        .bind(business_registration_number)
        .bind(business_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn add_rating(&self, user_id: Uuid, rating: i32) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET rating_sum = rating_sum + $2,
                rating_count = rating_count + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(rating as i64)
        .fetch_one(&self.pool)
        .await
    }
}
