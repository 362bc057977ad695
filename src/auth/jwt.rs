// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token codec: HMAC-SHA256 signing and verification of [`JwtClaims`]
//!
//! The wire format is the standard compact JWT serialization: three
//! dot-separated base64url segments (header, body, signature), the signature
//! being HMAC-SHA256 over `header + "." + body` with the shared key.
//!
//! Decoding reports a granular [`TokenError`]; callers that face the outside
//! world are expected to collapse those into a single unauthorized outcome
//! (see [`crate::auth::AuthService`]) so that the failure kind never leaks.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::JwtClaims;

/// Why a token failed to decode.
///
/// The signature is verified before any claim content is looked at, and the
/// same [`TokenError::BadSignature`] is produced whether the signature bytes
/// were tampered with or the verification key is simply wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not three dot-separated segments, bad base64url, or a body that does
    /// not deserialize into the expected claims
    #[error("token is malformed")]
    Malformed,
    /// HMAC verification over header and body failed
    #[error("token signature verification failed")]
    BadSignature,
    /// The validation instant is at or past the embedded expiry
    #[error("token has expired")]
    Expired,
    /// The `iss` claim does not match the expected issuer
    #[error("token issuer mismatch")]
    IssuerMismatch,
    /// The `aud` claim does not match the expected audience
    #[error("token audience mismatch")]
    AudienceMismatch,
}

/// Signs claims into compact tokens.
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    validity: Duration,
}

impl JwtIssuer {
    /// Create a new issuer signing with the given secret.
    ///
    /// Defaults to a one hour validity and empty issuer/audience; use the
    /// builder methods to configure those.
    pub fn new(secret: &[u8]) -> Self {
        JwtIssuer {
            encoding_key: EncodingKey::from_secret(secret),
            issuer: String::new(),
            audience: String::new(),
            validity: Duration::hours(1),
        }
    }

    /// Set the issuer name stamped into every token
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the audience stamped into every token
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Set the validity duration of issued tokens
    pub fn valid_for(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Build the claims for a token issued now for `subject`.
    pub fn claims_for(&self, subject: &str) -> JwtClaims {
        JwtClaims::new(
            subject,
            self.issuer.clone(),
            self.audience.clone(),
            Utc::now(),
            self.validity,
        )
    }

    /// Encode and sign a claims set into a compact token.
    pub fn encode(&self, claims: &JwtClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
    }
}

/// Verifies compact tokens back into claims.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    expected_issuer: String,
    expected_audience: String,
}

impl JwtValidator {
    /// Create a new validator verifying with the given secret.
    pub fn new(secret: &[u8]) -> Self {
        JwtValidator {
            decoding_key: DecodingKey::from_secret(secret),
            expected_issuer: String::new(),
            expected_audience: String::new(),
        }
    }

    /// Set the expected issuer name
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = issuer.into();
        self
    }

    /// Set the expected audience
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.expected_audience = audience.into();
        self
    }

    /// Validate a token against the current clock.
    pub fn validate(&self, token: &str) -> Result<JwtClaims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as of a given instant.
    ///
    /// The instant only affects the expiry check; signature and structure
    /// checks are time-independent. Taking the clock as a parameter lets
    /// tests exercise expiry without sleeping.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        // The library verifies the signature before it ever deserializes the
        // body. Expiry and issuer/audience are checked manually below: the
        // library clock is not injectable and its default leeway is 60s,
        // while tokens here must fail exactly at the embedded expiry.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(map_decode_error)?;
        let claims = token_data.claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.iss != self.expected_issuer {
            return Err(TokenError::IssuerMismatch);
        }
        if claims.aud != self.expected_audience {
            return Err(TokenError::AudienceMismatch);
        }

        Ok(claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
        ErrorKind::InvalidAudience => TokenError::AudienceMismatch,
        // Segment count, base64, UTF-8, JSON and missing-claim failures all
        // count as a malformed token
        _ => TokenError::Malformed,
    }
}
