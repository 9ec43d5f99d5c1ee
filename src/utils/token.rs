use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn create_token(
    user_id: &str,
    secret: &[u8],
    expires_in_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if user_id.is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(expires_in_minutes)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token(
    token: impl Into<String>,
    secret: &[u8],
) -> Result<String, crate::error::HttpError> {
    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    );

    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(_) => Err(crate::error::HttpError::unauthorized(
            crate::error::ErrorMessage::InvalidToken.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_decode_token() {
        let user_id = uuid::Uuid::new_v4().to_string();
        let token = create_token(&user_id, b"my-secret", 60).unwrap();
        let decoded = decode_token(token, b"my-secret").unwrap();
        assert_eq!(decoded, user_id);
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let token = create_token("some-user", b"my-secret", 60).unwrap();
        assert!(decode_token(token, b"other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token("some-user", b"my-secret", -10).unwrap();
        assert!(decode_token(token, b"my-secret").is_err());
    }

    #[test]
    fn test_empty_user_id_rejected() {
        assert!(create_token("", b"my-secret", 60).is_err());
    }
}
