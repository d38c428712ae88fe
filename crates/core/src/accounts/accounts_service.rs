//! Account service implementation.

use log::debug;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountSummary, AccountUpdate, AccountWithBalance, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::transactions::TransactionRepositoryTrait;

/// Service for managing accounts and deriving their balances.
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl AccountService {
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        AccountService {
            repository,
            transaction_repository,
        }
    }

    fn with_balance(account: Account, transaction_total: Decimal) -> AccountWithBalance {
        let balance = account.opening_balance + transaction_total;
        AccountWithBalance { account, balance }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<AccountWithBalance> {
        new_account.validate()?;
        debug!("Creating account: {}", new_account.name);
        let account = self.repository.create(new_account).await?;
        // A freshly created account has no transactions yet.
        let balance = account.opening_balance;
        Ok(AccountWithBalance { account, balance })
    }

    async fn update_account(&self, account_update: AccountUpdate) -> Result<AccountWithBalance> {
        account_update.validate()?;
        let account = self.repository.update(account_update).await?;
        let total = self.transaction_repository.sum_for_account(&account.id)?;
        Ok(Self::with_balance(account, total))
    }

    async fn delete_account(&self, account_id: &str) -> Result<()> {
        debug!("Deleting account: {}", account_id);
        let deleted = self.repository.delete(account_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Account '{}' not found",
                account_id
            ))));
        }
        Ok(())
    }

    fn get_account(&self, account_id: &str) -> Result<AccountWithBalance> {
        let account = self.repository.get_by_id(account_id)?;
        let total = self.transaction_repository.sum_for_account(account_id)?;
        Ok(Self::with_balance(account, total))
    }

    fn list_accounts(&self, is_active_filter: Option<bool>) -> Result<Vec<AccountWithBalance>> {
        let accounts = self.repository.list(is_active_filter)?;
        let mut totals = self.transaction_repository.sum_by_account()?;
        Ok(accounts
            .into_iter()
            .map(|account| {
                let total = totals.remove(&account.id).unwrap_or(Decimal::ZERO);
                Self::with_balance(account, total)
            })
            .collect())
    }

    fn get_summary(&self) -> Result<AccountSummary> {
        let accounts = self.list_accounts(None)?;
        let total_balance = accounts.iter().map(|a| a.balance).sum();
        let active_accounts = accounts.iter().filter(|a| a.account.is_active).count();
        Ok(AccountSummary {
            total_balance,
            active_accounts,
            total_accounts: accounts.len(),
        })
    }
}
