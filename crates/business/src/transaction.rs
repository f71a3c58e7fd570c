//! Transaction operations - bookings, deposits, withdrawals
//!
//! Nothing is validated: amounts may be zero or negative, source and target
//! may be the same account and no balance check is made.

use crate::administration::{BankAdministration, BankResult};
use anyhow::Context;
use bankadmin_core::{Account, Id, Transaction};
use bankadmin_persistence::Mapper;
use rust_decimal::Decimal;

impl BankAdministration {
    /// Book `amount` from `source` to `target`
    pub async fn create_transaction_for(
        &self,
        source: &Account,
        target: &Account,
        amount: Decimal,
    ) -> BankResult<Transaction> {
        let transaction = self
            .transactions
            .insert(Transaction::new(source.id, target.id, amount))
            .await
            .with_context(|| {
                format!(
                    "Failed to insert transaction from {} to {}",
                    source.id, target.id
                )
            })?;

        tracing::info!(
            transaction_id = transaction.id,
            source = transaction.source_account,
            target = transaction.target_account,
            amount = %transaction.amount,
            "Transaction created"
        );
        Ok(transaction)
    }

    pub async fn save_transaction(&self, transaction: &Transaction) -> BankResult<()> {
        self.transactions
            .update(transaction)
            .await
            .with_context(|| format!("Failed to save transaction {}", transaction.id))?;
        tracing::info!(transaction_id = transaction.id, "Transaction saved");
        Ok(())
    }

    /// Remove a booking outright. No reversal entry is created.
    pub async fn delete_transaction(&self, transaction: &Transaction) -> BankResult<()> {
        self.transactions
            .delete(transaction)
            .await
            .with_context(|| format!("Failed to delete transaction {}", transaction.id))?;
        tracing::info!(transaction_id = transaction.id, "Transaction deleted");
        Ok(())
    }

    pub async fn get_transaction_by_id(&self, id: Id) -> BankResult<Option<Transaction>> {
        tracing::debug!(transaction_id = id, "Looking up transaction");
        Ok(self.transactions.find_by_key(id).await?)
    }

    /// Cash withdrawal: customer account -> cash account.
    ///
    /// `None` without side effects if the cash account does not exist.
    pub async fn create_withdrawal(
        &self,
        customer_account: &Account,
        amount: Decimal,
    ) -> BankResult<Option<Transaction>> {
        let Some(cash_account) = self.get_cash_account().await? else {
            tracing::warn!(
                cash_account_id = self.cash_account_id(),
                "Cash account missing, withdrawal not booked"
            );
            return Ok(None);
        };

        let transaction = self
            .create_transaction_for(customer_account, &cash_account, amount)
            .await?;
        Ok(Some(transaction))
    }

    /// Cash deposit: cash account -> customer account.
    ///
    /// `None` without side effects if the cash account does not exist.
    pub async fn create_deposit(
        &self,
        customer_account: &Account,
        amount: Decimal,
    ) -> BankResult<Option<Transaction>> {
        let Some(cash_account) = self.get_cash_account().await? else {
            tracing::warn!(
                cash_account_id = self.cash_account_id(),
                "Cash account missing, deposit not booked"
            );
            return Ok(None);
        };

        let transaction = self
            .create_transaction_for(&cash_account, customer_account, amount)
            .await?;
        Ok(Some(transaction))
    }
}
