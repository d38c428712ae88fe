//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Kind of account - determines how the account is presented, not how
/// balances are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
    Other,
}

impl AccountType {
    /// Canonical string form, matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
            AccountType::Credit => "CREDIT",
            AccountType::Cash => "CASH",
            AccountType::Investment => "INVESTMENT",
            AccountType::Other => "OTHER",
        }
    }
}

impl From<&str> for AccountType {
    fn from(s: &str) -> Self {
        match s {
            "CHECKING" => AccountType::Checking,
            "SAVINGS" => AccountType::Savings,
            "CREDIT" => AccountType::Credit,
            "CASH" => AccountType::Cash,
            "INVESTMENT" => AccountType::Investment,
            _ => AccountType::Other,
        }
    }
}

/// Domain model representing an account in the system.
///
/// The current balance is never stored; it is derived as the opening
/// balance plus the sum of all transaction amounts for the account.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub opening_balance: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An account together with its derived balance.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWithBalance {
    #[serde(flatten)]
    pub account: Account,
    pub balance: Decimal,
}

/// Aggregate counts and totals across all accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub total_balance: Decimal,
    pub active_accounts: usize,
    pub total_accounts: usize,
}

fn default_true() -> bool {
    true
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub account_type: AccountType,
    pub currency: String,
    #[serde(default)]
    pub opening_balance: Decimal,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        validate_currency(&self.currency)?;
        Ok(())
    }
}

/// Input model for updating an existing account.
///
/// The currency is fixed at creation time and cannot be changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub opening_balance: Decimal,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl AccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account ID is required for updates".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Account name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

fn validate_currency(currency: &str) -> Result<()> {
    if currency.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Currency cannot be empty".to_string(),
        )));
    }
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Currency must be a 3-letter uppercase code, got '{}'",
            currency
        ))));
    }
    Ok(())
}
