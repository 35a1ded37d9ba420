//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, PasswordHash,
    endpoints::{self, resource_url},
    transaction::select_transaction_ids_by_maker,
    wallet::select_wallet_ids_by_owner,
};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user logs in with, unique across users.
    pub username: String,
    /// The user's email address, unique across users.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// Whether the user has confirmed their email address.
    pub confirmed: bool,
    /// The user's first name.
    pub first_name: Option<String>,
    /// The user's last name.
    pub last_name: Option<String>,
    /// When the user registered.
    pub date_joined: OffsetDateTime,
}

/// The fields needed to create a user.
///
/// The caller is responsible for validating the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The name the user logs in with.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// Whether the user has confirmed their email address.
    pub confirmed: bool,
    /// The user's first name.
    pub first_name: Option<String>,
    /// The user's last name.
    pub last_name: Option<String>,
}

/// The JSON representation of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserJson {
    /// The absolute URL of the user.
    pub url: String,
    /// The user's ID.
    pub id: UserID,
    /// The name the user logs in with.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// Whether the user has confirmed their email address.
    pub confirmed: bool,
    /// The user's first name.
    pub first_name: Option<String>,
    /// The user's last name.
    pub last_name: Option<String>,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub date_joined: OffsetDateTime,
    /// Links to the wallets the user owns.
    pub wallets: Vec<String>,
    /// Links to the transactions the user made.
    pub transactions: Vec<String>,
}

impl User {
    /// Build the JSON representation of the user with links to its wallets
    /// and transactions.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if the linked resources could not be queried.
    pub fn to_json(&self, base_url: &str, connection: &Connection) -> Result<UserJson, Error> {
        let wallets = select_wallet_ids_by_owner(self.id, connection)?
            .into_iter()
            .map(|id| resource_url(base_url, endpoints::WALLET, id))
            .collect();
        let transactions = select_transaction_ids_by_maker(self.id, connection)?
            .into_iter()
            .map(|id| resource_url(base_url, endpoints::TRANSACTION, id))
            .collect();

        Ok(UserJson {
            url: resource_url(base_url, endpoints::USER, self.id.as_i64()),
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            confirmed: self.confirmed,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_joined: self.date_joined,
            wallets,
            transactions,
        })
    }
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                confirmed INTEGER NOT NULL DEFAULT 0,
                first_name TEXT,
                last_name TEXT,
                date_joined TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

const SELECT_USER: &str = "SELECT id, username, email, password, confirmed, first_name, last_name, date_joined FROM user";

/// Map a row from [SELECT_USER] to a [User].
pub fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_password_hash: String = row.get(3)?;

    Ok(User {
        id: UserID::new(row.get(0)?),
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        confirmed: row.get(4)?,
        first_name: row.get(5)?,
        last_name: row.get(6)?,
        date_joined: row.get(7)?,
    })
}

/// Create and insert a new user into the database.
///
/// The join date is set to the current time.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateUsername] if the username is taken,
/// - [Error::DuplicateEmail] if the email address is in use,
/// - [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (username, email, password, confirmed, first_name, last_name, date_joined)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new_user.username,
            new_user.email,
            new_user.password_hash.as_ref(),
            new_user.confirmed,
            new_user.first_name,
            new_user.last_name,
            OffsetDateTime::now_utc(),
        ],
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    get_user_by_id(id, connection)
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE id = :id"))?
        .query_row(&[(":id", &user_id.as_i64())], map_row_to_user)
        .map_err(|error| error.into())
}

/// Get the user from the database with the username `username`.
///
/// # Errors
///
/// This function will return an error if:
/// - `username` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_username(username: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(&format!("{SELECT_USER} WHERE username = :username"))?
        .query_row(&[(":username", &username)], map_row_to_user)
        .map_err(|error| error.into())
}

/// Get every user ordered by ID.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
pub fn get_all_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare(&format!("{SELECT_USER} ORDER BY id"))?
        .query_map([], map_row_to_user)?
        .map(|maybe_user| maybe_user.map_err(Error::from))
        .collect()
}
