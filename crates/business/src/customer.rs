//! Customer operations
//!
//! `delete_customer` is the one cascading operation: it removes every account
//! of the customer (and through `delete_account` every transaction touching
//! those accounts) before removing the customer row.

use crate::administration::{BankAdministration, BankResult};
use anyhow::Context;
use bankadmin_core::{Customer, Id};
use bankadmin_persistence::{CustomerMapper, Mapper};

impl BankAdministration {
    pub async fn create_customer(&self, first_name: &str, last_name: &str) -> BankResult<Customer> {
        let customer = self
            .customers
            .insert(Customer::new(first_name, last_name))
            .await
            .context("Failed to insert customer")?;

        tracing::info!(customer_id = customer.id, name = %customer.full_name(), "Customer created");
        Ok(customer)
    }

    /// All customers whose last name matches `last_name`
    pub async fn get_customer_by_name(&self, last_name: &str) -> BankResult<Vec<Customer>> {
        tracing::debug!(last_name, "Looking up customers by last name");
        Ok(self.customers.find_by_last_name(last_name).await?)
    }

    pub async fn get_customer_by_id(&self, id: Id) -> BankResult<Option<Customer>> {
        tracing::debug!(customer_id = id, "Looking up customer");
        Ok(self.customers.find_by_key(id).await?)
    }

    pub async fn get_all_customers(&self) -> BankResult<Vec<Customer>> {
        tracing::debug!("Listing customers");
        Ok(self.customers.find_all().await?)
    }

    pub async fn save_customer(&self, customer: &Customer) -> BankResult<()> {
        self.customers
            .update(customer)
            .await
            .with_context(|| format!("Failed to save customer {}", customer.id))?;
        tracing::info!(customer_id = customer.id, "Customer saved");
        Ok(())
    }

    /// Delete `customer` together with its accounts and their transactions.
    ///
    /// Not atomic: if deleting one account fails, the accounts deleted before
    /// it stay deleted and the customer row is left in place.
    pub async fn delete_customer(&self, customer: &Customer) -> BankResult<()> {
        let accounts = self.get_accounts_of_customer(customer).await?;

        for account in &accounts {
            self.delete_account(account).await.with_context(|| {
                format!(
                    "Failed to delete account {} of customer {}",
                    account.id, customer.id
                )
            })?;
        }

        self.customers
            .delete(customer)
            .await
            .with_context(|| format!("Failed to delete customer {}", customer.id))?;

        tracing::info!(
            customer_id = customer.id,
            accounts = accounts.len(),
            "Customer deleted"
        );
        Ok(())
    }
}
