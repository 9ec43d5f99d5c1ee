use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::usermodel::*;

// Supports international formats like +2348012345678 or 080-1234-5678
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone_regex = regex::Regex::new(r"^\+?[0-9][0-9\- ]{8,18}$")
        .map_err(|_| ValidationError::new("invalid_phone_regex"))?;

    if !phone_regex.is_match(phone) {
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(Cow::from(
            "Phone number must be in a valid format (e.g. +2348012345678)",
        ));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    pub name: Option<String>,

    // Derived from the email local part when absent
    pub username: Option<String>,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 8, message = "Password must be at least 8 characters")
    )]
    pub password: String,

    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom = "validate_phone"
    )]
    pub phone_number: String,

    pub account_type: Option<AccountType>,
    pub role: Option<UserRole>,
    pub notification_preference: Option<NotificationPreference>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailDto {
    #[validate(length(min = 1, message = "Token is required."))]
    pub token: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpDto {
    pub user_id: Uuid,

    #[validate(length(equal = 6, message = "OTP must be 6 digits"))]
    pub otp: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ResendOtpDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordDto {
    #[validate(length(min = 1, message = "Token is required."))]
    pub token: String,

    #[validate(
        length(min = 1, message = "New password is required."),
        length(min = 8, message = "New password must be at least 8 characters")
    )]
    pub new_password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CompleteProfileDto {
    #[validate(
        length(min = 1, message = "Phone number is required"),
        custom = "validate_phone"
    )]
    pub phone_number: String,

    pub role: Option<UserRole>,
    pub notification_preference: Option<NotificationPreference>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct BusinessProfileDto {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub business_name: String,

    #[validate(length(min = 1, message = "Business address is required"))]
    pub business_address: String,

    #[validate(length(min = 1, message = "Registration number is required"))]
    pub business_registration_number: String,

    pub business_type: BusinessType,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RequestQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub role: String,
    pub account_type: String,
    pub phone_number: Option<String>,
    pub notification_preference: String,
    pub is_verified: bool,
    pub is_profile_complete: bool,
    pub business_name: Option<String>,
    pub wallet_balance: i64,
    pub average_rating: Option<f64>,
    pub rating_count: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.clone(),
            username: user.username.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            account_type: user.account_type.to_str().to_string(),
            phone_number: user.phone_number.clone(),
            notification_preference: user.notification_preference.to_str().to_string(),
            is_verified: user.verified,
            is_profile_complete: user.is_profile_complete,
            business_name: user.business_name.clone(),
            wallet_balance: user.wallet_balance,
            average_rating: user.average_rating(),
            rating_count: user.rating_count,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponseDto {
    pub status: String,
    pub users: Vec<FilterUserDto>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub data: UserData,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterUserDto {
        RegisterUserDto {
            name: Some("Ada Obi".to_string()),
            username: None,
            email: "ada@example.com".to_string(),
            password: "supersecret".to_string(),
            phone_number: "+2348012345678".to_string(),
            account_type: None,
            role: None,
            notification_preference: None,
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_missing_email_rejected() {
        let mut dto = valid_register();
        dto.email = "".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_missing_password_rejected() {
        let mut dto = valid_register();
        dto.password = "".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut dto = valid_register();
        dto.password = "short".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_missing_phone_rejected() {
        let mut dto = valid_register();
        dto.phone_number = "".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_phone_format() {
        assert!(validate_phone("+2348012345678").is_ok());
        assert!(validate_phone("080-1234-5678").is_ok());
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("12").is_err());
    }
}
