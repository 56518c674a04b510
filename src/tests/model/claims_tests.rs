use jsonwebtoken::{EncodingKey, Header, encode};

use super::*;

fn mint(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .unwrap()
}

#[test]
fn decodes_role_and_expiry_without_the_signing_key() {
    let token = mint(serde_json::json!({
        "sub": "jane@example.com",
        "role": "AUDITOR",
        "exp": 1_700_000_000,
    }));
    let claims = decode_claims(&token).unwrap();
    assert_eq!(claims.role, "AUDITOR");
    assert_eq!(claims.exp, 1_700_000_000);
    assert_eq!(claims.sub.as_deref(), Some("jane@example.com"));
    assert_eq!(claims.expires_at_ms(), 1_700_000_000_000);
}

#[test]
fn expired_tokens_still_decode() {
    let token = mint(serde_json::json!({ "role": "CUSTOMER", "exp": 1 }));
    let claims = decode_claims(&token).unwrap();
    assert!(claims.is_expired_at(1_000));
    assert!(!claims.is_expired_at(999));
}

#[test]
fn missing_role_decodes_as_empty() {
    let token = mint(serde_json::json!({ "exp": 4_000_000_000i64 }));
    assert_eq!(decode_claims(&token).unwrap().role, "");
}

#[test]
fn garbage_and_expiryless_tokens_are_malformed() {
    assert!(decode_claims("not-a-token").is_err());
    assert!(decode_claims("a.b.c").is_err());
    assert!(decode_claims("").is_err());

    let no_exp = mint(serde_json::json!({ "role": "CUSTOMER" }));
    assert!(decode_claims(&no_exp).is_err());
}
