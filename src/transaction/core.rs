//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::{CategoryId, TransactionId},
    db::get_decimal,
    endpoints::{self, resource_url},
    user::UserID,
};

// ============================================================================
// MODELS
// ============================================================================

/// A single movement of money recorded against a category.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,

    /// The amount of money spent or earned in this transaction.
    pub amount: Decimal,

    /// A text description of what the transaction was for.
    pub description: String,

    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,

    /// The category the transaction is recorded against.
    pub category_id: CategoryId,

    /// The user that recorded the transaction.
    ///
    /// Only this user may change or delete the transaction, even if the wallet
    /// belongs to someone else.
    pub maker_id: UserID,
}

impl Transaction {
    /// Create a new transaction with a zero amount and no description.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(category_id: CategoryId, maker_id: UserID) -> TransactionBuilder {
        TransactionBuilder {
            amount: Decimal::ZERO,
            description: String::new(),
            category_id,
            maker_id,
        }
    }

    /// Build the JSON representation of the transaction.
    pub fn to_json(&self, base_url: &str) -> TransactionJson {
        TransactionJson {
            url: resource_url(base_url, endpoints::TRANSACTION, self.id),
            id: self.id,
            amount: self.amount,
            description: self.description.clone(),
            created_at: self.created_at,
            category: resource_url(base_url, endpoints::CATEGORY, self.category_id),
            maker: resource_url(base_url, endpoints::USER, self.maker_id.as_i64()),
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// # Examples
///
/// ```ignore
/// use rust_decimal::Decimal;
///
/// let transaction = Transaction::build(category.id, user.id)
///     .amount(Decimal::new(-4599, 2))
///     .description("Groceries");
/// let transaction = create_transaction(transaction, &connection)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    ///
    /// Positive values represent income, negative values represent expenses.
    pub amount: Decimal,

    /// A human-readable description of the transaction, may be empty.
    pub description: String,

    /// The category to record the transaction against.
    pub category_id: CategoryId,

    /// The user recording the transaction.
    pub maker_id: UserID,
}

impl TransactionBuilder {
    /// Set the amount for the transaction.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }
}

/// The JSON representation of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionJson {
    pub url: String,
    pub id: TransactionId,
    #[serde(serialize_with = "crate::money::serialize_as_number")]
    pub amount: Decimal,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub category: String,
    pub maker: String,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                amount TEXT NOT NULL DEFAULT '0',
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                category_id INTEGER NOT NULL,
                maker_id INTEGER NOT NULL,
                FOREIGN KEY(category_id) REFERENCES category(id),
                FOREIGN KEY(maker_id) REFERENCES user(id)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_category ON \"transaction\"(category_id)",
        (),
    )?;
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_maker ON \"transaction\"(maker_id)",
        (),
    )?;

    Ok(())
}

const SELECT_TRANSACTION: &str =
    "SELECT id, amount, description, created_at, category_id, maker_id FROM \"transaction\"";

/// Map a row from [SELECT_TRANSACTION] to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: get_decimal(row, 1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        category_id: row.get(4)?,
        maker_id: UserID::new(row.get(5)?),
    })
}

/// Create a new transaction in the database, stamped with the current time.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the category or maker does not exist.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (amount, description, created_at, category_id, maker_id)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            builder.amount.to_string(),
            builder.description,
            OffsetDateTime::now_utc(),
            builder.category_id,
            builder.maker_id.as_i64(),
        ],
    )?;

    get_transaction_by_id(connection.last_insert_rowid(), connection)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction_by_id(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!("{SELECT_TRANSACTION} WHERE id = :id"))?
        .query_row(&[(":id", &id)], map_transaction_row)
        .map_err(|error| error.into())
}

pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!("{SELECT_TRANSACTION} ORDER BY id"))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Get the IDs of the transactions recorded against `category_id`.
pub fn select_transaction_ids_by_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<TransactionId>, Error> {
    connection
        .prepare("SELECT id FROM \"transaction\" WHERE category_id = ?1 ORDER BY id")?
        .query_map([category_id], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(Error::from))
        .collect()
}

/// Get the IDs of the transactions recorded by `maker_id`.
pub fn select_transaction_ids_by_maker(
    maker_id: UserID,
    connection: &Connection,
) -> Result<Vec<TransactionId>, Error> {
    connection
        .prepare("SELECT id FROM \"transaction\" WHERE maker_id = ?1 ORDER BY id")?
        .query_map([maker_id.as_i64()], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(Error::from))
        .collect()
}

/// Save the mutable fields of `transaction`, including its category.
///
/// # Errors
///
/// Returns [Error::NotFound] if the transaction no longer exists.
pub fn update_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\" SET amount = ?1, description = ?2, category_id = ?3 WHERE id = ?4",
        params![
            transaction.amount.to_string(),
            transaction.description,
            transaction.category_id,
            transaction.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the transaction with `id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such transaction.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete every transaction recorded by `maker_id`, wherever it was recorded.
pub fn delete_transactions_by_maker(maker_id: UserID, connection: &Connection) -> Result<(), Error> {
    for id in select_transaction_ids_by_maker(maker_id, connection)? {
        delete_transaction(id, connection)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;

    use crate::{
        Error,
        db::initialize,
        test_utils::{
            must_create_category, must_create_parent_category, must_create_test_user,
            must_create_wallet,
        },
        transaction::{
            Transaction, create_transaction, delete_transaction, delete_transactions_by_maker,
            get_all_transactions, get_transaction_by_id, select_transaction_ids_by_category,
            select_transaction_ids_by_maker, update_transaction,
        },
        user::{User, UserID},
    };

    fn get_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn create_category_for(user: &User, connection: &Connection) -> i64 {
        let wallet = must_create_wallet(user.id, connection);
        let parent_category = must_create_parent_category(wallet.id, connection);
        must_create_category(parent_category.id, connection).id
    }

    #[test]
    fn create_transaction_succeeds() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let category_id = create_category_for(&alice, &connection);

        let transaction = create_transaction(
            Transaction::build(category_id, alice.id)
                .amount(Decimal::new(-4599, 2))
                .description("Groceries"),
            &connection,
        )
        .unwrap();

        assert_eq!(transaction.amount, Decimal::new(-4599, 2));
        assert_eq!(transaction.description, "Groceries");
        assert_eq!(transaction.category_id, category_id);
        assert_eq!(transaction.maker_id, alice.id);
        assert_eq!(get_all_transactions(&connection), Ok(vec![transaction]));
    }

    #[test]
    fn create_transaction_defaults() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let category_id = create_category_for(&alice, &connection);

        let transaction =
            create_transaction(Transaction::build(category_id, alice.id), &connection).unwrap();

        assert_eq!(transaction.amount, Decimal::ZERO);
        assert_eq!(transaction.description, "");
    }

    #[test]
    fn create_transaction_fails_for_missing_category() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);

        let result = create_transaction(Transaction::build(42, alice.id), &connection);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn create_transaction_fails_for_missing_maker() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let category_id = create_category_for(&alice, &connection);

        let result = create_transaction(Transaction::build(category_id, UserID::new(42)), &connection);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn selects_transactions_by_category_and_maker() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let bob = must_create_test_user("bob", &connection);
        let category_id = create_category_for(&alice, &connection);
        let other_category_id = create_category_for(&alice, &connection);
        let first = create_transaction(Transaction::build(category_id, alice.id), &connection).unwrap();
        let second = create_transaction(Transaction::build(category_id, bob.id), &connection).unwrap();
        let third =
            create_transaction(Transaction::build(other_category_id, bob.id), &connection).unwrap();

        assert_eq!(
            select_transaction_ids_by_category(category_id, &connection),
            Ok(vec![first.id, second.id])
        );
        assert_eq!(
            select_transaction_ids_by_maker(bob.id, &connection),
            Ok(vec![second.id, third.id])
        );
    }

    #[test]
    fn update_transaction_saves_fields() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let category_id = create_category_for(&alice, &connection);
        let other_category_id = create_category_for(&alice, &connection);
        let transaction =
            create_transaction(Transaction::build(category_id, alice.id), &connection).unwrap();
        let changed = Transaction {
            amount: Decimal::new(10, 0),
            description: "Refund".to_owned(),
            category_id: other_category_id,
            ..transaction
        };

        update_transaction(&changed, &connection).unwrap();

        assert_eq!(get_transaction_by_id(changed.id, &connection), Ok(changed));
    }

    #[test]
    fn delete_transaction_succeeds() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let category_id = create_category_for(&alice, &connection);
        let transaction =
            create_transaction(Transaction::build(category_id, alice.id), &connection).unwrap();

        assert_eq!(delete_transaction(transaction.id, &connection), Ok(()));
        assert_eq!(
            get_transaction_by_id(transaction.id, &connection),
            Err(Error::NotFound)
        );
        assert_eq!(
            delete_transaction(transaction.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_transactions_by_maker_leaves_others() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let bob = must_create_test_user("bob", &connection);
        let category_id = create_category_for(&alice, &connection);
        let alices = create_transaction(Transaction::build(category_id, alice.id), &connection).unwrap();
        create_transaction(Transaction::build(category_id, bob.id), &connection).unwrap();

        delete_transactions_by_maker(bob.id, &connection).unwrap();

        assert_eq!(get_all_transactions(&connection), Ok(vec![alices]));
    }
}
