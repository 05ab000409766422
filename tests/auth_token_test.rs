//! Token issuing and verification without a running server.

use chrono::Utc;
use marketplace_api::auth::jwt::JwtService;
use marketplace_api::auth::Claims;
use uuid::Uuid;

#[test]
fn issued_token_round_trips() {
    let service = JwtService::new("integration-test-secret");
    let user_id = Uuid::new_v4();
    let claims = Claims::new(user_id, "dana".to_string(), "admin".to_string());

    let token = service.encode_token(&claims).unwrap();
    let decoded = service.decode_token(&token).unwrap();

    assert_eq!(decoded.sub, user_id);
    assert_eq!(decoded.role, "admin");
    assert!(decoded.is_admin());
    assert!(decoded.exp > decoded.iat);
}

#[test]
fn expired_token_is_rejected() {
    let service = JwtService::new("integration-test-secret");
    let now = Utc::now().timestamp();

    let stale = Claims {
        sub: Uuid::new_v4(),
        name: "erin".to_string(),
        role: "user".to_string(),
        exp: now - 3600,
        iat: now - 7200,
        iss: "marketplace-api".to_string(),
    };

    let token = service.encode_token(&stale).unwrap();
    assert!(service.decode_token(&token).is_err());
}

#[test]
fn token_from_another_issuer_is_rejected() {
    let service = JwtService::new("integration-test-secret");
    let now = Utc::now().timestamp();

    let foreign = Claims {
        sub: Uuid::new_v4(),
        name: "frank".to_string(),
        role: "user".to_string(),
        exp: now + 3600,
        iat: now,
        iss: "someone-else".to_string(),
    };

    let token = service.encode_token(&foreign).unwrap();
    assert!(service.decode_token(&token).is_err());
}
