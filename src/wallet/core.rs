//! Code for creating the wallet table and fetching wallets from the database.

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::WalletId,
    db::get_decimal,
    endpoints::{self, resource_url},
    parent_category::{delete_parent_category, select_parent_category_ids_by_wallet},
    user::UserID,
};

/// A container of budget categories belonging to a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    /// The ID of the wallet.
    pub id: WalletId,
    /// The display name of the wallet.
    pub title: String,
    /// When the wallet was created.
    pub created_at: OffsetDateTime,
    /// The currency code the wallet is kept in, e.g. "usd".
    pub currency: String,
    /// The balance of the wallet before any transactions.
    pub initial_balance: Decimal,
    /// The user that owns the wallet.
    pub owner_id: UserID,
}

/// The fields needed to create a wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWallet {
    pub title: String,
    pub currency: String,
    pub initial_balance: Decimal,
    pub owner_id: UserID,
}

/// The JSON representation of a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletJson {
    pub url: String,
    pub id: WalletId,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub currency: String,
    #[serde(serialize_with = "crate::money::serialize_as_number")]
    pub initial_balance: Decimal,
    /// Link to the owning user.
    pub owner: String,
    /// Links to the wallet's parent categories.
    pub parent_categories: Vec<String>,
}

impl Wallet {
    /// Build the JSON representation of the wallet.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if the parent categories could not be queried.
    pub fn to_json(&self, base_url: &str, connection: &Connection) -> Result<WalletJson, Error> {
        let parent_categories = select_parent_category_ids_by_wallet(self.id, connection)?
            .into_iter()
            .map(|id| resource_url(base_url, endpoints::PARENT_CATEGORY, id))
            .collect();

        Ok(WalletJson {
            url: resource_url(base_url, endpoints::WALLET, self.id),
            id: self.id,
            title: self.title.clone(),
            created_at: self.created_at,
            currency: self.currency.clone(),
            initial_balance: self.initial_balance,
            owner: resource_url(base_url, endpoints::USER, self.owner_id.as_i64()),
            parent_categories,
        })
    }
}

/// Create the wallet table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_wallet_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS wallet (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                created_at TEXT NOT NULL,
                currency TEXT NOT NULL,
                initial_balance TEXT NOT NULL DEFAULT '0',
                owner_id INTEGER NOT NULL,
                FOREIGN KEY(owner_id) REFERENCES user(id)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_wallet_owner ON wallet(owner_id)",
        (),
    )?;

    Ok(())
}

const SELECT_WALLET: &str =
    "SELECT id, title, created_at, currency, initial_balance, owner_id FROM wallet";

fn map_row_to_wallet(row: &Row) -> Result<Wallet, rusqlite::Error> {
    Ok(Wallet {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        currency: row.get(3)?,
        initial_balance: get_decimal(row, 4)?,
        owner_id: UserID::new(row.get(5)?),
    })
}

/// Create a wallet, stamped with the current time.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the owner does not exist or the insert failed.
pub fn create_wallet(new_wallet: NewWallet, connection: &Connection) -> Result<Wallet, Error> {
    connection.execute(
        "INSERT INTO wallet (title, created_at, currency, initial_balance, owner_id)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new_wallet.title,
            OffsetDateTime::now_utc(),
            new_wallet.currency,
            new_wallet.initial_balance.to_string(),
            new_wallet.owner_id.as_i64(),
        ],
    )?;

    get_wallet_by_id(connection.last_insert_rowid(), connection)
}

/// Get the wallet with `wallet_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such wallet.
pub fn get_wallet_by_id(wallet_id: WalletId, connection: &Connection) -> Result<Wallet, Error> {
    connection
        .prepare(&format!("{SELECT_WALLET} WHERE id = :id"))?
        .query_row(&[(":id", &wallet_id)], map_row_to_wallet)
        .map_err(|error| error.into())
}

/// Get every wallet ordered by ID.
pub fn get_all_wallets(connection: &Connection) -> Result<Vec<Wallet>, Error> {
    connection
        .prepare(&format!("{SELECT_WALLET} ORDER BY id"))?
        .query_map([], map_row_to_wallet)?
        .map(|maybe_wallet| maybe_wallet.map_err(Error::from))
        .collect()
}

/// Get the IDs of the wallets owned by `owner_id`.
pub fn select_wallet_ids_by_owner(
    owner_id: UserID,
    connection: &Connection,
) -> Result<Vec<WalletId>, Error> {
    connection
        .prepare("SELECT id FROM wallet WHERE owner_id = ?1 ORDER BY id")?
        .query_map([owner_id.as_i64()], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(Error::from))
        .collect()
}

/// Save the mutable fields of `wallet`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the wallet no longer exists.
pub fn update_wallet(wallet: &Wallet, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE wallet SET title = ?1, currency = ?2, initial_balance = ?3 WHERE id = ?4",
        params![
            wallet.title,
            wallet.currency,
            wallet.initial_balance.to_string(),
            wallet.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the wallet with `wallet_id` after deleting its parent categories.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such wallet.
pub fn delete_wallet(wallet_id: WalletId, connection: &Connection) -> Result<(), Error> {
    for parent_category_id in select_parent_category_ids_by_wallet(wallet_id, connection)? {
        delete_parent_category(parent_category_id, connection)?;
    }

    let rows_affected = connection.execute("DELETE FROM wallet WHERE id = ?1", [wallet_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
