// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Bank account bookkeeping
//!
//! Plain balance arithmetic on a customer's accounts. No currency handling,
//! no persistence: amounts are integer units and the ledger lives on the
//! [`crate::customers::Customer`] that owns the account.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opening balance of every new account, in integer units.
pub const OPENING_BALANCE: i64 = 10_000;

/// Errors raised by balance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("Cannot withdraw nothing or a negative amount. ")]
    NonPositiveAmount,
    #[error("Insufficient funds. ")]
    InsufficientFunds,
}

/// A customer's bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    balance: i64,
    account_number: u32,
}

impl BankAccount {
    /// Open a new account with the standard opening balance and a random
    /// five-digit account number.
    pub fn new() -> Self {
        BankAccount {
            balance: OPENING_BALANCE,
            account_number: rand::rng().random_range(10_000..100_000),
        }
    }

    /// Current balance.
    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// The account number assigned at opening.
    pub fn account_number(&self) -> u32 {
        self.account_number
    }

    /// Deposit an amount and return the new balance.
    pub fn deposit(&mut self, amount: i64) -> i64 {
        self.balance += amount;
        self.balance
    }

    /// Withdraw an amount and return the new balance.
    ///
    /// Fails for non-positive amounts and for overdraws; a failed withdrawal
    /// leaves the balance untouched.
    pub fn withdraw(&mut self, amount: i64) -> Result<i64, BankError> {
        if amount <= 0 {
            return Err(BankError::NonPositiveAmount);
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}

impl Default for BankAccount {
    fn default() -> Self {
        Self::new()
    }
}
