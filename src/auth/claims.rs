// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Typed JWT claims

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in an identity token.
///
/// This structure defines the claims included in JSON Web Tokens generated
/// by this service, following the standard claim names of RFC 7519. It is
/// serialized to JSON when creating tokens and deserialized when validating
/// them; a token whose body does not carry every field fails decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the identifier of the customer this token represents.
    pub sub: String,

    /// Issued at, as Unix time in seconds.
    pub iat: i64,

    /// Expiration, as Unix time in seconds. The token must not be accepted
    /// at or after this instant.
    pub exp: i64,

    /// JWT ID: a unique identifier generated for every issued token.
    pub jti: String,

    /// Issuer of the token.
    pub iss: String,

    /// Audience the token is intended for.
    pub aud: String,
}

impl JwtClaims {
    /// Build the claims for a freshly issued token.
    ///
    /// Stamps `iat` with the supplied issuance instant, `exp` with
    /// `issued_at + validity` and `jti` with a new UUIDv4.
    pub fn new(
        subject: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        JwtClaims {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + validity).timestamp(),
            jti: Uuid::new_v4().to_string(),
            iss: issuer.into(),
            aud: audience.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_claims_stamp_expiry_after_issuance() {
        let now = Utc::now();
        let claims = JwtClaims::new("42", "Sascha", "User", now, Duration::hours(1));
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.iat, now.timestamp());
    }

    #[test]
    fn each_token_gets_a_fresh_jti() {
        let now = Utc::now();
        let a = JwtClaims::new("42", "Sascha", "User", now, Duration::hours(1));
        let b = JwtClaims::new("42", "Sascha", "User", now, Duration::hours(1));
        assert_ne!(a.jti, b.jti);
    }
}
