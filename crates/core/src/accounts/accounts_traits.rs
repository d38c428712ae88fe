//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountSummary, AccountUpdate, AccountWithBalance, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Implementations of this trait handle the persistence of account data.
/// The trait is database-agnostic - storage-specific details are handled
/// by concrete implementations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account.
    ///
    /// The implementation handles transaction management internally.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an existing account.
    async fn update(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes an account by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, account_id: &str) -> Result<usize>;

    /// Retrieves an account by its ID.
    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists accounts, optionally filtered by active status.
    fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Account>>;
}

/// Trait defining the contract for Account service operations.
///
/// The service layer derives balances from transaction history and
/// coordinates between repositories.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<AccountWithBalance>;

    /// Updates an existing account with business validation.
    async fn update_account(&self, account_update: AccountUpdate) -> Result<AccountWithBalance>;

    /// Deletes an account and all of its transactions.
    async fn delete_account(&self, account_id: &str) -> Result<()>;

    /// Retrieves an account by ID together with its derived balance.
    fn get_account(&self, account_id: &str) -> Result<AccountWithBalance>;

    /// Lists accounts with derived balances, optionally filtered by active status.
    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<AccountWithBalance>>;

    /// Aggregates balance and account counts across all accounts.
    fn get_summary(&self) -> Result<AccountSummary>;
}
