//! Database initialisation and helpers shared by the table modules.

use std::str::FromStr;

use rusqlite::{Connection, Row, Transaction, TransactionBehavior, types::Type};
use rust_decimal::Decimal;

use crate::{
    category::create_category_table, parent_category::create_parent_category_table,
    transaction::create_transaction_table, user::create_user_table, wallet::create_wallet_table,
};

/// Create the application tables if they do not exist and enable foreign key
/// enforcement for `connection`.
///
/// The tables are created parents first so that the foreign keys resolve.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_wallet_table(&transaction)?;
    create_parent_category_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()
}

/// Read a decimal stored as text at column `index`.
///
/// Decimals are stored as text since SQLite has no exact decimal type.
pub fn get_decimal(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let raw: String = row.get(index)?;

    Decimal::from_str(&raw)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error)))
}
