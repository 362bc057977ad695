// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token lifecycle tests: issuance, validation, expiry and tampering

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Duration, TimeZone, Utc};
use customer_auth::auth::{AuthError, AuthService, TokenError};
use customer_auth::config::AuthConfig;

fn test_auth_service() -> AuthService {
    let config =
        AuthConfig::with_secret(STANDARD.encode(b"integration-test-signing-key-material"));
    AuthService::new(&config).expect("test signing key is valid")
}

#[test]
fn issued_token_validates_and_carries_the_subject() -> Result<()> {
    let auth = test_auth_service();

    for subject in ["42", "abc123", "user-with-a-longer-identifier"] {
        let token = auth.issue(subject)?;
        let claims = auth.validate(&token)?;
        assert_eq!(claims.sub, subject);
        assert!(!claims.jti.is_empty());
    }

    Ok(())
}

#[test]
fn issued_token_has_three_segments() -> Result<()> {
    let auth = test_auth_service();
    let token = auth.issue("abc123")?;
    assert_eq!(token.matches('.').count(), 2);
    Ok(())
}

#[test]
fn blank_subject_is_an_invalid_argument() {
    let auth = test_auth_service();
    assert!(matches!(auth.issue(""), Err(AuthError::InvalidArgument(_))));
    assert!(matches!(
        auth.issue("   "),
        Err(AuthError::InvalidArgument(_))
    ));
}

#[test]
fn token_expires_exactly_at_the_embedded_expiry() -> Result<()> {
    let auth = test_auth_service();
    let token = auth.issue("42")?;
    let exp = Utc
        .timestamp_opt(auth.validate(&token)?.exp, 0)
        .single()
        .expect("embedded expiry is a valid timestamp");

    // Strictly before the expiry the token is good
    assert!(auth.validate_at(&token, exp - Duration::seconds(1)).is_ok());

    // At and after the expiry it is uniformly unauthorized
    for instant in [exp, exp + Duration::seconds(1), exp + Duration::days(365)] {
        let err = auth.validate_at(&token, instant).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Unauthorized {
                reason: TokenError::Expired
            }
        ));
        assert_eq!(err.to_string(), "Token validation failed. ");
    }

    Ok(())
}

#[test]
fn tampered_signature_is_unauthorized() -> Result<()> {
    let auth = test_auth_service();
    let token = auth.issue("42")?;

    let (head, signature) = token.rsplit_once('.').expect("token has a signature segment");
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{}.{}{}", head, flipped, &signature[1..]);
    assert_ne!(token, tampered);

    let err = auth.validate(&tampered).unwrap_err();
    assert!(matches!(
        err,
        AuthError::Unauthorized {
            reason: TokenError::BadSignature
        }
    ));
    assert_eq!(err.to_string(), "Token validation failed. ");

    Ok(())
}

#[test]
fn tampered_body_is_unauthorized() -> Result<()> {
    let auth = test_auth_service();
    let token = auth.issue("42")?;

    // Swap the body for one claiming a different subject; the signature no
    // longer matches
    let parts: Vec<&str> = token.split('.').collect();
    let forged_body = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(
        r#"{"sub":"1","iat":0,"exp":9999999999,"jti":"x","iss":"Sascha","aud":"User"}"#,
    );
    let forged = format!("{}.{}.{}", parts[0], forged_body, parts[2]);

    assert!(matches!(
        auth.validate(&forged).unwrap_err(),
        AuthError::Unauthorized {
            reason: TokenError::BadSignature
        }
    ));

    Ok(())
}

#[test]
fn malformed_tokens_are_unauthorized_not_a_crash() {
    let auth = test_auth_service();

    for garbage in [
        "",
        "lmao idk what a token looks like",
        "only.two",
        "one.too.many.segments",
        "not.a.real_token_with_invalid_base64!",
        "...",
    ] {
        let err = auth.validate(garbage).unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized { .. }));
        assert_eq!(err.to_string(), "Token validation failed. ");
    }
}

#[test]
fn tokens_signed_with_another_key_are_unauthorized() -> Result<()> {
    let auth = test_auth_service();
    let other = AuthService::new(&AuthConfig::with_secret(
        STANDARD.encode(b"a-completely-different-signing-key"),
    ))
    .unwrap();

    let foreign_token = other.issue("42")?;
    assert!(matches!(
        auth.validate(&foreign_token).unwrap_err(),
        AuthError::Unauthorized {
            reason: TokenError::BadSignature
        }
    ));

    Ok(())
}

#[test]
fn issuer_and_audience_must_match_the_configuration() -> Result<()> {
    let auth = test_auth_service();

    let secret = STANDARD.encode(b"integration-test-signing-key-material");
    let mut other_config = AuthConfig::with_secret(secret);
    other_config.issuer = "SomebodyElse".to_string();
    let other = AuthService::new(&other_config).unwrap();

    // Same key, different issuer: rejected by claim checks, not signature
    let token = other.issue("42")?;
    assert!(matches!(
        auth.validate(&token).unwrap_err(),
        AuthError::Unauthorized {
            reason: TokenError::IssuerMismatch
        }
    ));

    Ok(())
}
