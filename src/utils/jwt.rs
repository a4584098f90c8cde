use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::user::UserRole;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,        // user id
    pub username: String,
    pub role: UserRole,
    pub exp: i64,         // expiration timestamp
    pub iat: i64,         // issued at timestamp
}

pub fn create_token(
    user_id: Uuid,
    username: &str,
    role: UserRole,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

/// Password reset tokens expire after 30 minutes.
const RESET_TOKEN_MINUTES: i64 = 30;
const RESET_PURPOSE: &str = "password-reset";

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String, // user email
    pub purpose: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_reset_token(email: &str, secret: &str) -> AppResult<String> {
    let now = Utc::now();
    let claims = ResetClaims {
        sub: email.to_string(),
        purpose: RESET_PURPOSE.to_string(),
        exp: (now + Duration::minutes(RESET_TOKEN_MINUTES)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create reset token: {}", e)))
}

/// Returns the email the token was issued for, or an error when the token
/// is expired, tampered with, or was issued for another purpose.
pub fn verify_reset_token(token: &str, secret: &str) -> AppResult<String> {
    let claims = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| {
        AppError::Unauthorized("The password reset link is invalid or has expired".to_string())
    })?;

    if claims.purpose != RESET_PURPOSE {
        return Err(AppError::Unauthorized(
            "The password reset link is invalid or has expired".to_string(),
        ));
    }

    Ok(claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_token_round_trip() {
        let token = create_reset_token("golfer@example.com", "test-secret").unwrap();
        let email = verify_reset_token(&token, "test-secret").unwrap();
        assert_eq!(email, "golfer@example.com");
    }

    #[test]
    fn reset_token_rejects_wrong_secret() {
        let token = create_reset_token("golfer@example.com", "test-secret").unwrap();
        assert!(verify_reset_token(&token, "other-secret").is_err());
    }

    #[test]
    fn access_token_is_not_a_reset_token() {
        let token = create_token(
            Uuid::new_v4(),
            "golfer",
            UserRole::User,
            "test-secret",
            24,
        )
        .unwrap();
        assert!(verify_reset_token(&token, "test-secret").is_err());
    }
}
