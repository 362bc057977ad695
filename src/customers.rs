// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Customer records and the in-memory store
//!
//! This module carries the profile side of the system: the [`Customer`]
//! entity, a keyed in-memory repository, and [`CustomerService`], which
//! validates incoming customer data before it reaches the store.
//!
//! [`CustomerLookup`] is the narrow interface the profile layer consumes; it
//! only ever needs "give me the customer with this id, or nothing".

use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bank::BankAccount;

/// Errors raised when creating a customer.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// The supplied payload is not valid JSON for a customer
    #[error("Customer JSON could not be parsed: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Name or e-mail address failed validation
    #[error("Customer name or e-mail address is invalid. ")]
    InvalidCustomer,
}

/// A customer of the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identifier; 0 until the customer has been persisted
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    accounts: Vec<BankAccount>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Customer {
            id: 0,
            name: name.into(),
            email: email.into(),
            password: password.into(),
            accounts: Vec::new(),
        }
    }

    /// Attach a bank account to this customer. A customer may hold any
    /// number of accounts.
    pub fn add_account(&mut self, account: BankAccount) {
        self.accounts.push(account);
    }

    pub fn accounts(&self) -> &[BankAccount] {
        &self.accounts
    }

    pub fn accounts_mut(&mut self) -> &mut [BankAccount] {
        &mut self.accounts
    }
}

/// In-memory keyed customer store.
///
/// Assigns sequential ids on creation and hands out clones on lookup. The
/// interior mutex makes the repository shareable across threads; no lock is
/// held across any call boundary.
#[derive(Default)]
pub struct CustomerRepository {
    inner: Mutex<RepositoryInner>,
}

#[derive(Default)]
struct RepositoryInner {
    customers: HashMap<String, Customer>,
    next_id: u32,
}

impl CustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a customer, assigning it the next free id, and return the
    /// stored record.
    pub fn create(&self, mut customer: Customer) -> Customer {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        customer.id = inner.next_id;
        inner
            .customers
            .insert(customer.id.to_string(), customer.clone());
        customer
    }

    /// Look up a customer by id, or `None` if absent.
    pub fn get_by_id(&self, user_id: &str) -> Option<Customer> {
        self.inner.lock().unwrap().customers.get(user_id).cloned()
    }
}

/// The lookup interface the profile layer depends on.
#[cfg_attr(test, mockall::automock)]
pub trait CustomerLookup: Send + Sync {
    /// Return the customer with the given id, or `None` if no record exists.
    fn get_by_id(&self, user_id: &str) -> Option<Customer>;
}

/// Validates customer data and passes it on to the repository.
pub struct CustomerService {
    repository: CustomerRepository,
    name_pattern: Regex,
    email_pattern: Regex,
}

impl CustomerService {
    pub fn new(repository: CustomerRepository) -> Self {
        CustomerService {
            repository,
            // Words of letters (incl. æøåäöë), apostrophes and hyphens,
            // separated by single spaces
            name_pattern: Regex::new(r"^[A-Za-zæøåäöë'-]+(?: [A-Za-zæøåäöë'-]+)*$")
                .expect("name pattern is valid"),
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
                .expect("email pattern is valid"),
        }
    }

    /// Create a customer from a JSON payload.
    ///
    /// The payload is deserialized, its name and e-mail address validated,
    /// and only then handed to the repository, which assigns the id.
    pub fn create(&self, json: &str) -> Result<Customer, CustomerError> {
        let customer: Customer = serde_json::from_str(json)?;

        if !self.validate_name(&customer.name) || !self.validate_email(&customer.email) {
            debug!("Rejecting customer with invalid name or e-mail");
            return Err(CustomerError::InvalidCustomer);
        }

        Ok(self.repository.create(customer))
    }

    /// Check a customer name.
    ///
    /// Accepts words of letters, apostrophes and hyphens separated by single
    /// spaces, and rejects any character repeated three times in a row.
    pub fn validate_name(&self, name: &str) -> bool {
        self.name_pattern.is_match(name) && !has_triple_repeat(name)
    }

    /// Check an e-mail address: one `@`, no whitespace, a dot in the domain.
    pub fn validate_email(&self, email: &str) -> bool {
        self.email_pattern.is_match(email)
    }
}

impl CustomerLookup for CustomerService {
    fn get_by_id(&self, user_id: &str) -> Option<Customer> {
        if user_id.is_empty() {
            return None;
        }
        self.repository.get_by_id(user_id)
    }
}

/// True if any character occurs three times consecutively.
fn has_triple_repeat(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}
