use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    CarOwner,
    CarDealer,
    PartsDealer,
    Customer,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::CarOwner => "car_owner",
            UserRole::CarDealer => "car_dealer",
            UserRole::PartsDealer => "parts_dealer",
            UserRole::Customer => "customer",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "account_type", rename_all = "snake_case")]
pub enum AccountType {
    BusinessOwner,
    Customer,
}

impl AccountType {
    pub fn to_str(&self) -> &str {
        match self {
            AccountType::BusinessOwner => "business_owner",
            AccountType::Customer => "customer",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_preference", rename_all = "snake_case")]
pub enum NotificationPreference {
    Email,
    Sms,
}

impl NotificationPreference {
    pub fn to_str(&self) -> &str {
        match self {
            NotificationPreference::Email => "email",
            NotificationPreference::Sms => "sms",
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "business_type", rename_all = "snake_case")]
pub enum BusinessType {
    #[default]
    CarDealership,
    AutoPartsStore,
    Both,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
}

/// Outcome of checking a submitted OTP against the stored one. The service
/// layer maps each arm to a distinct error so callers can tell a missing code
/// from a mismatch from an expired one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OtpCheck {
    NoneIssued,
    Mismatch,
    Expired,
    Valid,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub password: Option<String>, // None for OAuth-only accounts
    pub account_type: AccountType,
    pub role: UserRole,
    pub phone_number: Option<String>,
    pub notification_preference: NotificationPreference,
    pub verified: bool,

    #[serde(skip_serializing)]
    pub verification_otp: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,

    // OAuth identifiers
    pub google_id: Option<String>,
    pub microsoft_id: Option<String>,
    pub facebook_id: Option<String>,

    // Business profile (service providers)
    pub business_name: Option<String>,
    pub business_address: Option<String>,
    pub business_registration_number: Option<String>,
    pub business_type: Option<BusinessType>,

    pub wallet_balance: i64, // kobo
    pub rating_sum: i64,
    pub rating_count: i32,

    #[serde(skip_serializing)]
    pub password_reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    pub is_profile_complete: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub status: UserStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn average_rating(&self) -> Option<f64> {
        if self.rating_count == 0 {
            None
        } else {
            Some(self.rating_sum as f64 / self.rating_count as f64)
        }
    }

    pub fn check_otp(&self, submitted: &str, now: DateTime<Utc>) -> OtpCheck {
        let (stored, expires_at) = match (&self.verification_otp, self.otp_expires_at) {
            (Some(stored), Some(expires_at)) => (stored, expires_at),
            _ => return OtpCheck::NoneIssued,
        };

        if stored != submitted {
            return OtpCheck::Mismatch;
        }

        if now >= expires_at {
            return OtpCheck::Expired;
        }

        OtpCheck::Valid
    }
}

/// Derive a username from the email local part when the client did not supply
/// one, the way the original registration flow did.
pub fn username_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or(email)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_with_otp(otp: Option<&str>, expires_at: Option<DateTime<Utc>>) -> User {
        User {
            id: uuid::Uuid::new_v4(),
            name: None,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: Some("hash".to_string()),
            account_type: AccountType::Customer,
            role: UserRole::Customer,
            phone_number: Some("+2348012345678".to_string()),
            notification_preference: NotificationPreference::Email,
            verified: false,
            verification_otp: otp.map(|s| s.to_string()),
            otp_expires_at: expires_at,
            google_id: None,
            microsoft_id: None,
            facebook_id: None,
            business_name: None,
            business_address: None,
            business_registration_number: None,
            business_type: None,
            wallet_balance: 0,
            rating_sum: 0,
            rating_count: 0,
            password_reset_token: None,
            reset_token_expires_at: None,
            is_profile_complete: true,
            last_login_at: None,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_otp_none_issued() {
        let user = user_with_otp(None, None);
        assert_eq!(user.check_otp("123456", Utc::now()), OtpCheck::NoneIssued);
    }

    #[test]
    fn test_otp_mismatch() {
        let now = Utc::now();
        let user = user_with_otp(Some("123456"), Some(now + Duration::minutes(10)));
        assert_eq!(user.check_otp("654321", now), OtpCheck::Mismatch);
    }

    #[test]
    fn test_otp_expired() {
        let now = Utc::now();
        let user = user_with_otp(Some("123456"), Some(now - Duration::seconds(1)));
        assert_eq!(user.check_otp("123456", now), OtpCheck::Expired);
    }

    #[test]
    fn test_otp_expiry_boundary() {
        let now = Utc::now();
        // exactly at expiry the code is no longer valid
        let user = user_with_otp(Some("123456"), Some(now));
        assert_eq!(user.check_otp("123456", now), OtpCheck::Expired);
    }

    #[test]
    fn test_otp_valid() {
        let now = Utc::now();
        let user = user_with_otp(Some("123456"), Some(now + Duration::minutes(10)));
        assert_eq!(user.check_otp("123456", now), OtpCheck::Valid);
    }

    #[test]
    fn test_average_rating() {
        let mut user = user_with_otp(None, None);
        assert_eq!(user.average_rating(), None);
        user.rating_sum = 9;
        user.rating_count = 2;
        assert_eq!(user.average_rating(), Some(4.5));
    }

    #[test]
    fn test_username_from_email() {
        assert_eq!(username_from_email("Ada.Obi@example.com"), "ada.obi");
        assert_eq!(username_from_email("no-at-sign"), "no-at-sign");
    }
}
