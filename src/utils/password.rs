use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ErrorMessage;

const MAX_PASSWORD_LENGTH: usize = 64;

pub fn hash(password: impl Into<String>) -> Result<String, ErrorMessage> {
    let password = password.into();

    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hashed_password = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| ErrorMessage::HashingError)?
        .to_string();

    Ok(hashed_password)
}

pub fn compare(password: &str, hashed_password: &str) -> Result<bool, ErrorMessage> {
    if password.is_empty() {
        return Err(ErrorMessage::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH));
    }

    let parsed_hash =
        PasswordHash::new(hashed_password).map_err(|_| ErrorMessage::InvalidHashFormat)?;

    let password_matched = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_or(false, |_| true);

    Ok(password_matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_compare_roundtrip() {
        let hashed = hash("correct horse battery").unwrap();
        assert_ne!(hashed, "correct horse battery");
        assert!(compare("correct horse battery", &hashed).unwrap());
        assert!(!compare("wrong password", &hashed).unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert_eq!(hash(""), Err(ErrorMessage::EmptyPassword));
    }

    #[test]
    fn test_overlong_password_rejected() {
        let long = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        assert_eq!(
            hash(long),
            Err(ErrorMessage::ExceededMaxPasswordLength(MAX_PASSWORD_LENGTH))
        );
    }

    #[test]
    fn test_garbage_hash_rejected() {
        assert_eq!(
            compare("secret", "not-a-phc-string"),
            Err(ErrorMessage::InvalidHashFormat)
        );
    }
}
