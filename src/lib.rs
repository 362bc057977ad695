// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Customer authentication library
//!
//! This library issues and validates signed JWT identity tokens for a
//! customer-facing service, and uses validated tokens to authorize retrieval
//! of a customer's profile.
//!
//! The main components are:
//! - [`auth`]: token encoding/decoding (HS256) and the [`auth::AuthService`]
//!   façade that turns codec failures into authorization decisions
//! - [`profile`]: composes token validation with customer lookup
//! - [`customers`]: customer records, validation and the in-memory store
//! - [`bank`]: bank account bookkeeping attached to customers
//! - [`config`]: YAML/environment configuration, including the signing key

pub mod auth;
pub mod bank;
pub mod config;
pub mod customers;
pub mod profile;
