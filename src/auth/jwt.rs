use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::Claims;
use crate::error::{ApiError, ErrorCode, Result};

/// Signs and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn encode_token(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["marketplace-api"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    ApiError::with_code(ErrorCode::TokenExpired, "Token expired")
                }
                _ => ApiError::with_code(ErrorCode::TokenInvalid, "Invalid authentication token"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_encode_decode_round_trip() {
        let service = JwtService::new("test-secret-at-least-long-enough");
        let claims = Claims::new(Uuid::new_v4(), "alice".to_string(), "user".to_string());

        let token = service.encode_token(&claims).unwrap();
        let decoded = service.decode_token(&token).unwrap();

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.name, "alice");
        assert_eq!(decoded.role, "user");
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let service = JwtService::new("correct-secret");
        let other = JwtService::new("different-secret");
        let claims = Claims::new(Uuid::new_v4(), "bob".to_string(), "user".to_string());

        let token = service.encode_token(&claims).unwrap();
        assert!(other.decode_token(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let service = JwtService::new("correct-secret");
        assert!(service.decode_token("not-a-token").is_err());
    }
}
