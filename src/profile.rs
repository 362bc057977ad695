// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Profile retrieval gated by token validation
//!
//! [`ProfileService`] answers "who is this token's holder and what is their
//! profile": it validates the presented token, extracts the subject, and
//! looks the customer up through the narrow [`CustomerLookup`] interface.
//!
//! Expected business conditions (invalid token, no such profile) come back
//! as tagged errors, never as panics, and the two are kept strictly apart:
//! an attacker probing with bad tokens learns nothing about which customers
//! exist.

use std::fmt;
use std::sync::Arc;

use log::warn;
use thiserror::Error;

use crate::auth::AuthService;
use crate::customers::CustomerLookup;

/// Outcome of a failed profile retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// The token did not validate, or validated without a usable subject.
    /// One fixed message for every sub-cause.
    #[error("Token validation failed. ")]
    Unauthorized,

    /// The token validated but no profile record exists for its subject
    #[error("User profile not found.")]
    NotFound,
}

/// The profile fields returned to an authorized caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
}

impl fmt::Display for ProfileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User Profile: {}, {}", self.name, self.email)
    }
}

/// Composes token validation with customer lookup.
pub struct ProfileService {
    auth: Arc<AuthService>,
    customers: Arc<dyn CustomerLookup>,
}

impl ProfileService {
    pub fn new(auth: Arc<AuthService>, customers: Arc<dyn CustomerLookup>) -> Self {
        ProfileService { auth, customers }
    }

    /// Fetch the profile of the customer a token was issued to.
    ///
    /// Any validation failure is [`ProfileError::Unauthorized`]; a validated
    /// token whose subject has no record is [`ProfileError::NotFound`].
    pub fn get_profile(&self, token: &str) -> Result<ProfileSummary, ProfileError> {
        let claims = self.auth.validate(token).map_err(|_| {
            // The granular reason was already logged by the auth service
            ProfileError::Unauthorized
        })?;

        // A token body without `sub` never decodes, but an empty subject
        // can; treat it the same as a missing one.
        if claims.sub.is_empty() {
            warn!("Validated token carries an empty subject claim");
            return Err(ProfileError::Unauthorized);
        }

        let customer = self
            .customers
            .get_by_id(&claims.sub)
            .ok_or(ProfileError::NotFound)?;

        Ok(ProfileSummary {
            name: customer.name,
            email: customer.email,
        })
    }
}
