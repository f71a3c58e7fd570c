//! Integration tests for the SQLite mappers

use bankadmin_core::{Account, Customer, Transaction, User};
use bankadmin_persistence::{
    create_pool, AccountMapper, CustomerMapper, Database, Mapper, PersistenceError,
    TransactionMapper, UserMapper,
};
use rust_decimal_macros::dec;
use tempfile::tempdir;

async fn db() -> Database {
    Database::in_memory().await.unwrap()
}

#[tokio::test]
async fn test_insert_assigns_sequential_ids_from_one() {
    let db = db().await;
    let mapper = db.customer_mapper();

    let mut ids = Vec::new();
    for last_name in ["Ant", "Bee", "Cat", "Dog"] {
        let customer = mapper.insert(Customer::new("X", last_name)).await.unwrap();
        ids.push(customer.id);
    }

    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_insert_ignores_incoming_id() {
    let db = db().await;
    let mapper = db.account_mapper();

    mapper.insert(Account::new(1)).await.unwrap();
    let second = mapper.insert(Account::new(1).with_id(500)).await.unwrap();

    assert_eq!(second.id, 2);
    assert!(mapper.find_by_key(500).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_continues_after_max_id() {
    let db = db().await;
    db.seed_cash_account(10000).await.unwrap();

    let account = db.account_mapper().insert(Account::new(1)).await.unwrap();
    assert_eq!(account.id, 10001);
}

#[tokio::test]
async fn test_insert_fails_when_key_space_is_used_up() {
    let db = db().await;
    db.seed_cash_account(i64::MAX).await.unwrap();

    let err = db.account_mapper().insert(Account::new(1)).await.unwrap_err();
    assert!(matches!(
        err,
        PersistenceError::KeySpaceExhausted { ref table } if table == "accounts"
    ));
    // nothing was written, and the connection went back to the pool
    assert_eq!(db.account_mapper().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_by_key_missing_is_none() {
    let db = db().await;

    assert!(db.user_mapper().find_by_key(42).await.unwrap().is_none());
    assert!(db.customer_mapper().find_by_key(42).await.unwrap().is_none());
    assert!(db.account_mapper().find_by_key(42).await.unwrap().is_none());
    assert!(db.transaction_mapper().find_by_key(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_round_trip() {
    let db = db().await;

    let users = db.user_mapper();
    let mut user = users
        .insert(User::new("Alice", "alice@bank.test", "g-1"))
        .await
        .unwrap();
    user.name = "Alice B.".to_string();
    user.email = "ab@bank.test".to_string();
    user.user_id = "g-2".to_string();
    users.update(&user).await.unwrap();
    assert_eq!(users.find_by_key(user.id).await.unwrap(), Some(user));

    let customers = db.customer_mapper();
    let mut customer = customers.insert(Customer::new("Ada", "Byron")).await.unwrap();
    customer.last_name = "Lovelace".to_string();
    customers.update(&customer).await.unwrap();
    assert_eq!(customers.find_by_key(customer.id).await.unwrap(), Some(customer));

    let accounts = db.account_mapper();
    let mut account = accounts.insert(Account::new(1)).await.unwrap();
    account.owner = 9;
    accounts.update(&account).await.unwrap();
    assert_eq!(accounts.find_by_key(account.id).await.unwrap(), Some(account));

    let transactions = db.transaction_mapper();
    let mut tx = transactions
        .insert(Transaction::new(1, 2, dec!(10)))
        .await
        .unwrap();
    tx.amount = dec!(-3.75);
    tx.target_account = 3;
    transactions.update(&tx).await.unwrap();
    assert_eq!(transactions.find_by_key(tx.id).await.unwrap(), Some(tx));
}

#[tokio::test]
async fn test_update_missing_row_is_noop() {
    let db = db().await;
    let mapper = db.customer_mapper();

    mapper
        .update(&Customer::new("Ghost", "Row").with_id(77))
        .await
        .unwrap();
    assert!(mapper.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_and_delete_again() {
    let db = db().await;
    let mapper = db.transaction_mapper();

    let tx = mapper.insert(Transaction::new(1, 2, dec!(5))).await.unwrap();
    mapper.delete(&tx).await.unwrap();
    assert!(mapper.find_by_key(tx.id).await.unwrap().is_none());

    // already absent
    mapper.delete(&tx).await.unwrap();
}

#[tokio::test]
async fn test_find_by_owner_id() {
    let db = db().await;
    let mapper = db.account_mapper();

    let a1 = mapper.insert(Account::new(1)).await.unwrap();
    mapper.insert(Account::new(2)).await.unwrap();
    let a3 = mapper.insert(Account::new(1)).await.unwrap();

    assert_eq!(mapper.find_by_owner_id(1).await.unwrap(), vec![a1, a3]);
    assert!(mapper.find_by_owner_id(99).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_debits_and_credits_finders() {
    let db = db().await;
    let mapper = db.transaction_mapper();

    let t1 = mapper.insert(Transaction::new(1, 2, dec!(10))).await.unwrap();
    let t2 = mapper.insert(Transaction::new(2, 1, dec!(4))).await.unwrap();
    let t3 = mapper.insert(Transaction::new(1, 3, dec!(1))).await.unwrap();

    assert_eq!(
        mapper.find_by_source_account_id(1).await.unwrap(),
        vec![t1.clone(), t3]
    );
    assert_eq!(mapper.find_by_target_account_id(1).await.unwrap(), vec![t2]);
    assert_eq!(mapper.find_by_target_account_id(2).await.unwrap(), vec![t1]);
    assert!(mapper.find_by_source_account_id(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_finders() {
    let db = db().await;
    let mapper = db.user_mapper();

    let alice = mapper
        .insert(User::new("Alice", "alice@bank.test", "g-1"))
        .await
        .unwrap();
    let albert = mapper
        .insert(User::new("Albert", "albert@bank.test", "g-2"))
        .await
        .unwrap();
    mapper
        .insert(User::new("Bob", "bob@bank.test", "g-3"))
        .await
        .unwrap();

    assert_eq!(mapper.find_by_name("Alice").await.unwrap(), vec![alice.clone()]);
    assert_eq!(
        mapper.find_by_name("Al%").await.unwrap(),
        vec![albert.clone(), alice.clone()]
    );
    assert_eq!(
        mapper.find_by_email("albert@bank.test").await.unwrap(),
        Some(albert)
    );
    assert_eq!(mapper.find_by_google_user_id("g-1").await.unwrap(), Some(alice));
    assert!(mapper.find_by_email("nobody@bank.test").await.unwrap().is_none());
    assert!(mapper.find_by_google_user_id("g-404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_customer_find_by_last_name() {
    let db = db().await;
    let mapper = db.customer_mapper();

    let ada = mapper.insert(Customer::new("Ada", "Lovelace")).await.unwrap();
    mapper.insert(Customer::new("Alan", "Turing")).await.unwrap();

    assert_eq!(mapper.find_by_last_name("Lovelace").await.unwrap(), vec![ada]);
    assert!(mapper.find_by_last_name("Hopper").await.unwrap().is_empty());
}

/// Values must be bound as parameters: hostile input is stored and matched
/// verbatim and never changes the statement.
#[tokio::test]
async fn test_values_are_bound_not_interpolated() {
    let db = db().await;
    let users = db.user_mapper();

    let hostile = "x'; DROP TABLE users; --";
    let stored = users
        .insert(User::new(hostile, "o'brien@bank.test", "' OR '1'='1"))
        .await
        .unwrap();
    users
        .insert(User::new("Bob", "bob@bank.test", "g-3"))
        .await
        .unwrap();

    assert_eq!(users.find_all().await.unwrap().len(), 2);
    assert_eq!(users.find_by_name(hostile).await.unwrap(), vec![stored.clone()]);
    assert_eq!(
        users.find_by_email("o'brien@bank.test").await.unwrap(),
        Some(stored.clone())
    );
    assert_eq!(
        users.find_by_google_user_id("' OR '1'='1").await.unwrap(),
        Some(stored)
    );

    let customers = db.customer_mapper();
    customers
        .insert(Customer::new("Robert'); DROP TABLE customers;--", "Tables"))
        .await
        .unwrap();
    assert!(customers
        .find_by_last_name("' OR 1=1 --")
        .await
        .unwrap()
        .is_empty());
    assert_eq!(customers.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_seed_cash_account_is_idempotent() {
    let db = db().await;

    let first = db.seed_cash_account(10000).await.unwrap();
    let second = db.seed_cash_account(10000).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.id, 10000);
    assert_eq!(db.account_mapper().find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_stored_amount_is_reported() {
    let db = db().await;
    sqlx::query(
        "INSERT INTO transactions (id, sourceAccount, targetAccount, amount) VALUES (1, 1, 2, 'abc')",
    )
    .execute(db.pool())
    .await
    .unwrap();

    let err = db.transaction_mapper().find_all().await.unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidDecimal { .. }));

    // the single in-memory connection must be back in the pool
    let err = db.transaction_mapper().find_by_key(1).await.unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidDecimal { .. }));
    assert!(db.transaction_mapper().find_by_key(2).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_database_survives_reconnect() {
    let dir = tempdir().unwrap();
    let url = format!("sqlite:{}?mode=rwc", dir.path().join("bank.db").display());

    {
        let db = Database::connect(&url).await.unwrap();
        db.customer_mapper()
            .insert(Customer::new("Ada", "Lovelace"))
            .await
            .unwrap();
        db.close().await;
    }

    let db = Database::from_pool(create_pool(&url).await.unwrap());
    let customers = db.customer_mapper().find_all().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0], Customer::new("Ada", "Lovelace").with_id(1));
}
