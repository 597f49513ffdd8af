/// Authentication service tests
/// Tests JWT generation, password hashing, token validation
use musicapp_core::UserId;
use musicapp_server::{services::AuthService, ServerError};

fn create_test_auth_service() -> AuthService {
    AuthService::new("test-secret-key".to_string(), 1, 1)
}

/// Test password hashing produces valid bcrypt hashes
#[test]
fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let password = "MySecurePassword123!";
    let hash = auth_service.hash_password(password).unwrap();

    assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$"));

    // Salt is random
    let hash2 = auth_service.hash_password(password).unwrap();
    assert_ne!(hash, hash2, "Hashes should differ due to random salt");
}

#[test]
fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password("password", "not-a-valid-hash");
    assert!(matches!(result, Err(ServerError::Bcrypt(_))));
}

#[test]
fn test_tokens_carry_the_user_id() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::generate();

    let pair = auth_service.issue_token_pair(&user_id).unwrap();
    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(
        auth_service.verify_access_token(&pair.access_token).unwrap(),
        user_id
    );
}

#[test]
fn test_tampered_token_is_rejected() {
    let auth_service = create_test_auth_service();
    let pair = auth_service
        .issue_token_pair(&UserId::new("user-abc"))
        .unwrap();

    let mut tampered = pair.access_token.clone();
    tampered.push('x');

    assert!(auth_service.verify_access_token(&tampered).is_err());
    assert!(auth_service.verify_access_token("").is_err());
}

#[test]
fn test_token_pair_serializes_camel_case() {
    let auth_service = create_test_auth_service();
    let pair = auth_service
        .issue_token_pair(&UserId::new("user-abc"))
        .unwrap();

    let json = serde_json::to_value(&pair).unwrap();
    assert!(json["accessToken"].is_string());
    assert!(json["refreshToken"].is_string());
}
