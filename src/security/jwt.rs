/// JWT token generation and validation using HS256.
/// The signing secret comes from configuration and is passed explicitly;
/// there is no process-global key state.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID; nil UUID for the configured administrator)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Role: "user" or "admin"
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Access token response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Generate an access token for the given subject.
pub fn generate_access_token(
    user_id: Uuid,
    email: &str,
    role: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiry = now + Duration::seconds(ttl_secs);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate and decode a token.
pub fn validate_token(
    token: &str,
    secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
}

/// Pure authorization predicate for the admin-only operations. Invoked by
/// the transport layer before dispatching, never by the leaderboard core.
pub fn is_admin(claims: &Claims) -> bool {
    claims.role == ROLE_ADMIN
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip_preserves_claims() {
        let id = Uuid::new_v4();
        let token =
            generate_access_token(id, "ava@example.com", ROLE_USER, SECRET, 3600).expect("encode");
        let data = validate_token(&token, SECRET).expect("decode");

        assert_eq!(data.claims.sub, id.to_string());
        assert_eq!(data.claims.email, "ava@example.com");
        assert_eq!(data.claims.role, ROLE_USER);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = generate_access_token(Uuid::new_v4(), "a@b.com", ROLE_USER, SECRET, 3600)
            .expect("encode");
        assert!(validate_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = generate_access_token(Uuid::new_v4(), "a@b.com", ROLE_USER, SECRET, -120)
            .expect("encode");
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn test_is_admin_checks_role_only() {
        let mut claims = Claims {
            sub: Uuid::nil().to_string(),
            email: "admin@example.com".to_string(),
            role: ROLE_ADMIN.to_string(),
            iat: 0,
            exp: i64::MAX,
        };
        assert!(is_admin(&claims));

        claims.role = ROLE_USER.to_string();
        assert!(!is_admin(&claims));
    }
}
