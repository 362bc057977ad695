// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Configuration Management
//!
//! This module implements configuration handling for the authentication
//! service. It supports loading, validating and saving configuration from
//! YAML files.
//!
//! ## Configuration Structure
//!
//! The configuration is organized as a nested structure with sections:
//! - `auth`: Settings for token issuance and validation (signing key,
//!   issuer, audience, token validity)
//!
//! ## Security Features
//!
//! Token signing uses a symmetric HMAC secret which is stored base64-encoded
//! in the configuration. The secret is decoded and checked once when the
//! [`crate::auth::AuthService`] is constructed; a missing or malformed secret
//! is a startup failure, never a per-request one.
//!
//! ## Usage
//!
//! ```no_run
//! use customer_auth::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let config = Config::from_file(Path::new("config.yaml")).unwrap();
//! println!("Token issuer: {}", config.auth.issuer);
//! ```

use anyhow::{Context, Result};
use base64::Engine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

/// Environment variable consulted by [`AuthConfig::from_env`]
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Configuration for token issuance and validation.
///
/// # Fields
///
/// * `hmac_secret` - Base64-encoded symmetric signing key
/// * `issuer` - Value stamped into and checked against the `iss` claim
/// * `audience` - Value stamped into and checked against the `aud` claim
/// * `token_validity_secs` - Lifetime of issued tokens in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The base64-encoded HMAC secret used to sign and verify tokens.
    ///
    /// Must decode to a non-empty byte sequence. There is deliberately no
    /// default: key material has to be supplied explicitly.
    pub hmac_secret: String,

    /// Issuer name embedded in every token and required on validation.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Audience embedded in every token and required on validation.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// How long an issued token stays valid, in seconds. Default is one hour.
    #[serde(default = "default_token_validity_secs")]
    pub token_validity_secs: u64,
}

fn default_issuer() -> String {
    "Sascha".to_string()
}

fn default_audience() -> String {
    "User".to_string()
}

fn default_token_validity_secs() -> u64 {
    3600
}

impl AuthConfig {
    /// Build an [`AuthConfig`] with the given base64-encoded secret and
    /// default issuer, audience and validity.
    pub fn with_secret(hmac_secret: impl Into<String>) -> Self {
        AuthConfig {
            hmac_secret: hmac_secret.into(),
            issuer: default_issuer(),
            audience: default_audience(),
            token_validity_secs: default_token_validity_secs(),
        }
    }

    /// Read the signing key from the `JWT_SECRET` environment variable.
    ///
    /// The variable is read once, at the call site, and its absence is an
    /// error the caller is expected to treat as fatal.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(JWT_SECRET_ENV)
            .with_context(|| format!("{} is not set", JWT_SECRET_ENV))?;
        if secret.trim().is_empty() {
            anyhow::bail!("{} is set but empty", JWT_SECRET_ENV);
        }
        Ok(Self::with_secret(secret))
    }
}

/// Top-level configuration for the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Token issuance and validation settings
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// If the file does not exist, a default configuration (with a freshly
    /// generated random secret) is written there and returned, so a first
    /// run starts from a working state.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Config file {:?} not found, creating default", path);
            let config = Config::default();
            config.save_to_file(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as YAML.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yml::to_string(self).context("Failed to serialize configuration")?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create config file {:?}", path))?;
        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration values.
    ///
    /// Checks that the HMAC secret is valid base64 and decodes to a
    /// non-empty key.
    pub fn validate(&self) -> Result<()> {
        let key = base64::engine::general_purpose::STANDARD
            .decode(&self.auth.hmac_secret)
            .context("auth.hmac_secret is not valid base64")?;
        if key.is_empty() {
            anyhow::bail!("auth.hmac_secret decodes to an empty key");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            auth: AuthConfig::with_secret(generate_hmac_secret()),
        }
    }
}

/// Generate a random base64-encoded 256-bit secret.
fn generate_hmac_secret() -> String {
    use rand::Rng;
    let mut secret = [0u8; 32];
    rand::rng().fill(&mut secret);
    base64::engine::general_purpose::STANDARD.encode(secret)
}
