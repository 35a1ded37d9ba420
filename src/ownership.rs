//! Resolves which user has authority over a resource.
//!
//! Wallets are owned directly. Parent categories and categories are owned by
//! whoever owns the wallet they sit in, found by walking up the chain of
//! parent IDs. Transactions are controlled by the user who made them, and a
//! user only has authority over themself.

use rusqlite::Connection;

use crate::{
    Error,
    category::Category,
    parent_category::{ParentCategory, get_parent_category_by_id},
    transaction::Transaction,
    user::{User, UserID},
    wallet::{Wallet, get_wallet_by_id},
};

/// A resource with a single user that may change or delete it.
pub trait Owned {
    /// The user with authority over the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource further up the chain could not be loaded.
    fn owner(&self, connection: &Connection) -> Result<UserID, Error>;

    /// Whether `user_id` has authority over the resource.
    fn is_owned_by(&self, user_id: UserID, connection: &Connection) -> Result<bool, Error> {
        Ok(self.owner(connection)? == user_id)
    }

    /// Check that `user_id` has authority over the resource.
    ///
    /// # Errors
    ///
    /// Returns [Error::Forbidden] with `message` if it does not.
    fn authorize(
        &self,
        user_id: UserID,
        connection: &Connection,
        message: &'static str,
    ) -> Result<(), Error> {
        if self.is_owned_by(user_id, connection)? {
            Ok(())
        } else {
            tracing::info!("user {user_id} was refused: {message}");
            Err(Error::Forbidden(message))
        }
    }
}

impl Owned for User {
    fn owner(&self, _connection: &Connection) -> Result<UserID, Error> {
        Ok(self.id)
    }
}

impl Owned for Wallet {
    fn owner(&self, _connection: &Connection) -> Result<UserID, Error> {
        Ok(self.owner_id)
    }
}

impl Owned for ParentCategory {
    fn owner(&self, connection: &Connection) -> Result<UserID, Error> {
        get_wallet_by_id(self.wallet_id, connection)?.owner(connection)
    }
}

impl Owned for Category {
    fn owner(&self, connection: &Connection) -> Result<UserID, Error> {
        get_parent_category_by_id(self.parent_category_id, connection)?.owner(connection)
    }
}

impl Owned for Transaction {
    fn owner(&self, _connection: &Connection) -> Result<UserID, Error> {
        Ok(self.maker_id)
    }
}
