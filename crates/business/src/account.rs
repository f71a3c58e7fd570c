//! Account operations - lifecycle, debits/credits, balance, cash account

use crate::administration::{BankAdministration, BankResult};
use anyhow::Context;
use bankadmin_core::{Account, Customer, Id, Transaction};
use bankadmin_persistence::{AccountMapper, Mapper, TransactionMapper};
use rust_decimal::Decimal;

impl BankAdministration {
    pub async fn get_all_accounts(&self) -> BankResult<Vec<Account>> {
        tracing::debug!("Listing accounts");
        Ok(self.accounts.find_all().await?)
    }

    pub async fn get_account_by_id(&self, id: Id) -> BankResult<Option<Account>> {
        tracing::debug!(account_id = id, "Looking up account");
        Ok(self.accounts.find_by_key(id).await?)
    }

    /// Accounts owned by `customer`.
    ///
    /// `customer` is not checked: the lookup goes by `customer.id` alone, so a
    /// customer that was never inserted (still carrying the provisional id)
    /// gets whatever accounts happen to be owned by that id. Callers must
    /// pass a persisted customer.
    pub async fn get_accounts_of_customer(&self, customer: &Customer) -> BankResult<Vec<Account>> {
        tracing::debug!(owner = customer.id, "Looking up accounts of customer");
        Ok(self.accounts.find_by_owner_id(customer.id).await?)
    }

    /// Open a new account for `customer`; `None` (and no insert) without one.
    pub async fn create_account_for_customer(
        &self,
        customer: Option<&Customer>,
    ) -> BankResult<Option<Account>> {
        let Some(customer) = customer else {
            tracing::warn!("No customer given, account not created");
            return Ok(None);
        };

        let account = self
            .accounts
            .insert(Account::for_customer(customer))
            .await
            .with_context(|| format!("Failed to insert account for customer {}", customer.id))?;

        tracing::info!(account_id = account.id, owner = account.owner, "Account created");
        Ok(Some(account))
    }

    pub async fn save_account(&self, account: &Account) -> BankResult<()> {
        self.accounts
            .update(account)
            .await
            .with_context(|| format!("Failed to save account {}", account.id))?;
        tracing::info!(account_id = account.id, "Account saved");
        Ok(())
    }

    /// Delete `account` after deleting every transaction that touches it.
    ///
    /// Order: debits, then credits, then the account row. Each delete commits
    /// on its own.
    pub async fn delete_account(&self, account: &Account) -> BankResult<()> {
        let debits = self.get_debits_of_account(Some(account)).await?;
        let credits = self.get_credits_of_account(Some(account)).await?;

        for transaction in debits.iter().chain(credits.iter()) {
            self.transactions.delete(transaction).await.with_context(|| {
                format!(
                    "Failed to delete transaction {} of account {}",
                    transaction.id, account.id
                )
            })?;
        }

        self.accounts
            .delete(account)
            .await
            .with_context(|| format!("Failed to delete account {}", account.id))?;

        tracing::info!(
            account_id = account.id,
            debits = debits.len(),
            credits = credits.len(),
            "Account deleted"
        );
        Ok(())
    }

    /// Balance = sum of credits - sum of debits, recomputed on every call.
    ///
    /// Amounts are not validated on booking, so the sums can leave the
    /// `Decimal` range; that is reported as an error.
    pub async fn get_balance_of_account(&self, account: &Account) -> BankResult<Decimal> {
        let debits = self.get_debits_of_account(Some(account)).await?;
        let credits = self.get_credits_of_account(Some(account)).await?;

        let overflow = || format!("Balance of account {} overflowed", account.id);
        let debit_amount =
            checked_sum(debits.iter().filter(|t| t.is_debit_of(account.id))).with_context(overflow)?;
        let credit_amount =
            checked_sum(credits.iter().filter(|t| t.is_credit_of(account.id))).with_context(overflow)?;

        let balance = credit_amount
            .checked_sub(debit_amount)
            .with_context(overflow)?;
        tracing::debug!(account_id = account.id, %balance, "Balance computed");
        Ok(balance)
    }

    /// Transactions with `account` as source. Empty for `None`.
    pub async fn get_debits_of_account(&self, account: Option<&Account>) -> BankResult<Vec<Transaction>> {
        match account {
            Some(account) => Ok(self
                .transactions
                .find_by_source_account_id(account.id)
                .await
                .with_context(|| format!("Failed to read debits of account {}", account.id))?),
            None => Ok(Vec::new()),
        }
    }

    /// Transactions with `account` as target. Empty for `None`.
    pub async fn get_credits_of_account(&self, account: Option<&Account>) -> BankResult<Vec<Transaction>> {
        match account {
            Some(account) => Ok(self
                .transactions
                .find_by_target_account_id(account.id)
                .await
                .with_context(|| format!("Failed to read credits of account {}", account.id))?),
            None => Ok(Vec::new()),
        }
    }

    /// The bank's own cash account, `None` if its row was never seeded
    pub async fn get_cash_account(&self) -> BankResult<Option<Account>> {
        self.get_account_by_id(self.cash_account_id()).await
    }
}

fn checked_sum<'a>(mut transactions: impl Iterator<Item = &'a Transaction>) -> Option<Decimal> {
    transactions.try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.amount))
}
