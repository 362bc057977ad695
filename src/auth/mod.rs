// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT-based authentication
//!
//! This module implements the token side of the service:
//!
//! - [`JwtClaims`]: the typed claims structure embedded in every token
//! - [`JwtIssuer`] / [`JwtValidator`]: the codec that signs claims into a
//!   compact three-segment token and verifies one back into claims
//! - [`AuthService`]: the façade the rest of the process talks to, which
//!   collapses every decode failure into a single `Unauthorized` outcome
//!
//! Tokens are signed with HMAC-SHA256 and are stateless: nothing is recorded
//! server-side at issuance, and validation relies only on the token itself
//! and the shared signing key.

mod claims;
mod jwt;
mod service;

pub use claims::JwtClaims;
pub use jwt::{JwtIssuer, JwtValidator, TokenError};
pub use service::{AuthError, AuthService};
