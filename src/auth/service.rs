// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Authentication façade
//!
//! [`AuthService`] is what the rest of the process talks to. It wraps the
//! token codec and translates its granular failure kinds into a single
//! caller-visible authorization decision: a validation either yields the
//! token's claims or it is `Unauthorized`, full stop. The granular reason is
//! kept on the error variant and logged, but its `Display` text is fixed so
//! that no caller-visible message reveals which check failed.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use log::warn;
use thiserror::Error;

use super::claims::JwtClaims;
use super::jwt::{JwtIssuer, JwtValidator, TokenError};
use crate::config::AuthConfig;

/// Errors surfaced by [`AuthService`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured signing key is absent, not base64, or empty.
    /// Fatal: raised at construction time, the service never starts with
    /// unusable key material.
    #[error("invalid signing key configuration: {reason}")]
    Configuration { reason: String },

    /// The caller passed an unusable argument (empty or whitespace-only
    /// subject)
    #[error("{0}")]
    InvalidArgument(String),

    /// Token validation failed. The message is identical for every
    /// underlying reason; `reason` carries the real one for diagnostics
    /// and is never part of the rendered text.
    #[error("Token validation failed. ")]
    Unauthorized { reason: TokenError },
}

/// Issues and validates identity tokens for customers.
///
/// Construction decodes the base64 signing key from the supplied
/// [`AuthConfig`] and fails fast if the key is unusable. After that the
/// service is immutable and can be shared freely across threads; every call
/// works only on its own inputs.
pub struct AuthService {
    issuer: JwtIssuer,
    validator: JwtValidator,
}

impl AuthService {
    /// Create the service from configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(&config.hmac_secret)
            .map_err(|e| AuthError::Configuration {
                reason: format!("signing key is not valid base64: {}", e),
            })?;
        if key.is_empty() {
            return Err(AuthError::Configuration {
                reason: "signing key is empty".to_string(),
            });
        }

        let validity = Duration::seconds(config.token_validity_secs as i64);
        Ok(AuthService {
            issuer: JwtIssuer::new(&key)
                .with_issuer(&config.issuer)
                .with_audience(&config.audience)
                .valid_for(validity),
            validator: JwtValidator::new(&key)
                .with_issuer(&config.issuer)
                .with_audience(&config.audience),
        })
    }

    /// Issue a signed token for the given subject.
    ///
    /// The token embeds the subject, a fresh unique token id, the configured
    /// issuer and audience, and an expiry of now plus the configured
    /// validity. Nothing is recorded server-side.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        if subject.trim().is_empty() {
            return Err(AuthError::InvalidArgument(
                "User ID cannot be empty.".to_string(),
            ));
        }

        let claims = self.issuer.claims_for(subject);
        self.issuer
            .encode(&claims)
            .map_err(|e| AuthError::Configuration {
                reason: format!("token signing failed: {}", e),
            })
    }

    /// Validate a token and return its claims.
    ///
    /// Every decode failure — malformed input, bad signature, expiry,
    /// issuer or audience mismatch — comes back as the same
    /// [`AuthError::Unauthorized`].
    pub fn validate(&self, token: &str) -> Result<JwtClaims, AuthError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as of a given instant (see
    /// [`JwtValidator::validate_at`]).
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        self.validator.validate_at(token, now).map_err(|reason| {
            warn!("Token rejected: {}", reason);
            AuthError::Unauthorized { reason }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn test_config() -> AuthConfig {
        AuthConfig::with_secret(STANDARD.encode(b"test-secret-key-for-jwt-token-testing-only"))
    }

    #[test]
    fn empty_key_is_a_constructor_failure() {
        let config = AuthConfig::with_secret("");
        assert!(matches!(
            AuthService::new(&config),
            Err(AuthError::Configuration { .. })
        ));
    }

    #[test]
    fn garbage_key_is_a_constructor_failure() {
        let config = AuthConfig::with_secret("%%% not base64 %%%");
        assert!(matches!(
            AuthService::new(&config),
            Err(AuthError::Configuration { .. })
        ));
    }

    #[test]
    fn blank_subjects_are_rejected() {
        let auth = AuthService::new(&test_config()).unwrap();
        assert!(matches!(auth.issue(""), Err(AuthError::InvalidArgument(_))));
        assert!(matches!(
            auth.issue("   "),
            Err(AuthError::InvalidArgument(_))
        ));
    }

    #[test]
    fn unauthorized_message_is_uniform() {
        let auth = AuthService::new(&test_config()).unwrap();

        let malformed = auth.validate("not.a.real.token").unwrap_err();
        assert_eq!(malformed.to_string(), "Token validation failed. ");

        let token = auth.issue("42").unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        let bad_signature = auth.validate(&tampered).unwrap_err();
        assert_eq!(bad_signature.to_string(), "Token validation failed. ");
    }

    #[test]
    fn granular_reason_is_retained_internally() {
        let auth = AuthService::new(&test_config()).unwrap();
        let err = auth.validate("definitely-not-a-jwt").unwrap_err();
        assert!(matches!(
            err,
            AuthError::Unauthorized {
                reason: TokenError::Malformed
            }
        ));
    }
}
