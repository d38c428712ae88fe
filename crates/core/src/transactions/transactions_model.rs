//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::Period;
use crate::{errors::ValidationError, Error, Result};

/// Domain model representing a ledger transaction.
///
/// The amount is signed and authoritative: negative amounts are outflows,
/// positive amounts are inflows. No downstream computation reinterprets
/// the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub reference: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        validate_amount(self.amount)?;
        Ok(())
    }
}

/// Input model for updating an existing transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: Option<String>,
    pub account_id: String,
    pub category_id: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub reference: Option<String>,
}

impl TransactionUpdate {
    /// Validates the transaction update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Transaction ID is required for updates".to_string(),
            )));
        }
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        validate_amount(self.amount)?;
        Ok(())
    }
}

/// Filters for listing transactions.
///
/// The date range is half-open: `start_date` is inclusive, `end_date`
/// is exclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub account_id: Option<String>,
    pub category_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Signed totals over a set of transactions.
///
/// `total_expenses` keeps its negative sign; `net_balance` is simply
/// the sum of the two totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub transaction_count: usize,
}

/// Per-category totals over a set of transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category_id: Option<String>,
    /// Category display name, or "Uncategorized" for transactions
    /// without a category.
    pub category: String,
    pub total_amount: Decimal,
    pub transaction_count: usize,
}

/// Signed totals for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    pub period: Period,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub transaction_count: usize,
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount.is_zero() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Transaction amount cannot be zero".to_string(),
        )));
    }
    Ok(())
}
