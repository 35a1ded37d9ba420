//! Code for creating the parent category table and fetching parent categories.

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{delete_category, select_category_ids_by_parent_category},
    database_id::{ParentCategoryId, WalletId},
    db::get_decimal,
    endpoints::{self, resource_url},
};

/// A top level budget bucket within a wallet, e.g. "Bills".
#[derive(Debug, Clone, PartialEq)]
pub struct ParentCategory {
    pub id: ParentCategoryId,
    pub title: String,
    /// The amount planned for the bucket.
    pub budget: Decimal,
    /// Whether the bucket tracks income rather than expenses.
    pub is_income: bool,
    /// The wallet the parent category belongs to.
    pub wallet_id: WalletId,
}

/// The fields needed to create a parent category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewParentCategory {
    pub title: String,
    pub budget: Decimal,
    pub is_income: bool,
    pub wallet_id: WalletId,
}

/// The JSON representation of a parent category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentCategoryJson {
    pub url: String,
    pub id: ParentCategoryId,
    pub title: String,
    #[serde(serialize_with = "crate::money::serialize_as_number")]
    pub budget: Decimal,
    pub is_income: bool,
    /// Link to the wallet.
    pub wallet: String,
    /// Links to the categories in the parent category.
    pub categories: Vec<String>,
}

impl ParentCategory {
    /// Build the JSON representation of the parent category.
    pub fn to_json(
        &self,
        base_url: &str,
        connection: &Connection,
    ) -> Result<ParentCategoryJson, Error> {
        let categories = select_category_ids_by_parent_category(self.id, connection)?
            .into_iter()
            .map(|id| resource_url(base_url, endpoints::CATEGORY, id))
            .collect();

        Ok(ParentCategoryJson {
            url: resource_url(base_url, endpoints::PARENT_CATEGORY, self.id),
            id: self.id,
            title: self.title.clone(),
            budget: self.budget,
            is_income: self.is_income,
            wallet: resource_url(base_url, endpoints::WALLET, self.wallet_id),
            categories,
        })
    }
}

/// Create the parent category table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_parent_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS parent_category (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                budget TEXT NOT NULL DEFAULT '0',
                is_income INTEGER NOT NULL DEFAULT 0,
                wallet_id INTEGER NOT NULL,
                FOREIGN KEY(wallet_id) REFERENCES wallet(id)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_parent_category_wallet ON parent_category(wallet_id)",
        (),
    )?;

    Ok(())
}

const SELECT_PARENT_CATEGORY: &str =
    "SELECT id, title, budget, is_income, wallet_id FROM parent_category";

fn map_row_to_parent_category(row: &Row) -> Result<ParentCategory, rusqlite::Error> {
    Ok(ParentCategory {
        id: row.get(0)?,
        title: row.get(1)?,
        budget: get_decimal(row, 2)?,
        is_income: row.get(3)?,
        wallet_id: row.get(4)?,
    })
}

/// Create a parent category.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the wallet does not exist or the insert failed.
pub fn create_parent_category(
    new_parent_category: NewParentCategory,
    connection: &Connection,
) -> Result<ParentCategory, Error> {
    connection.execute(
        "INSERT INTO parent_category (title, budget, is_income, wallet_id)
        VALUES (?1, ?2, ?3, ?4)",
        params![
            new_parent_category.title,
            new_parent_category.budget.to_string(),
            new_parent_category.is_income,
            new_parent_category.wallet_id,
        ],
    )?;

    get_parent_category_by_id(connection.last_insert_rowid(), connection)
}

/// Get the parent category with `parent_category_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such parent category.
pub fn get_parent_category_by_id(
    parent_category_id: ParentCategoryId,
    connection: &Connection,
) -> Result<ParentCategory, Error> {
    connection
        .prepare(&format!("{SELECT_PARENT_CATEGORY} WHERE id = :id"))?
        .query_row(&[(":id", &parent_category_id)], map_row_to_parent_category)
        .map_err(|error| error.into())
}

pub fn get_all_parent_categories(connection: &Connection) -> Result<Vec<ParentCategory>, Error> {
    connection
        .prepare(&format!("{SELECT_PARENT_CATEGORY} ORDER BY id"))?
        .query_map([], map_row_to_parent_category)?
        .map(|maybe_parent_category| maybe_parent_category.map_err(Error::from))
        .collect()
}

/// Get the IDs of the parent categories in the wallet `wallet_id`.
pub fn select_parent_category_ids_by_wallet(
    wallet_id: WalletId,
    connection: &Connection,
) -> Result<Vec<ParentCategoryId>, Error> {
    connection
        .prepare("SELECT id FROM parent_category WHERE wallet_id = ?1 ORDER BY id")?
        .query_map([wallet_id], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(Error::from))
        .collect()
}

/// Save the mutable fields of `parent_category`.
///
/// # Errors
///
/// Returns [Error::NotFound] if the parent category no longer exists.
pub fn update_parent_category(
    parent_category: &ParentCategory,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE parent_category SET title = ?1, budget = ?2, is_income = ?3 WHERE id = ?4",
        params![
            parent_category.title,
            parent_category.budget.to_string(),
            parent_category.is_income,
            parent_category.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the parent category with `parent_category_id` after deleting its categories.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such parent category.
pub fn delete_parent_category(
    parent_category_id: ParentCategoryId,
    connection: &Connection,
) -> Result<(), Error> {
    for category_id in select_category_ids_by_parent_category(parent_category_id, connection)? {
        delete_category(category_id, connection)?;
    }

    let rows_affected = connection.execute(
        "DELETE FROM parent_category WHERE id = ?1",
        [parent_category_id],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
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
        parent_category::{
            NewParentCategory, ParentCategory, create_parent_category, delete_parent_category,
            get_all_parent_categories, get_parent_category_by_id,
            select_parent_category_ids_by_wallet, update_parent_category,
        },
        test_utils::{must_create_category, must_create_test_user, must_create_wallet},
    };

    fn get_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn new_parent_category(wallet_id: i64) -> NewParentCategory {
        NewParentCategory {
            title: "Bills".to_owned(),
            budget: Decimal::new(500, 0),
            is_income: false,
            wallet_id,
        }
    }

    #[test]
    fn create_parent_category_succeeds() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let wallet = must_create_wallet(alice.id, &connection);

        let parent_category =
            create_parent_category(new_parent_category(wallet.id), &connection).unwrap();

        assert_eq!(parent_category.title, "Bills");
        assert_eq!(parent_category.budget, Decimal::new(500, 0));
        assert!(!parent_category.is_income);
        assert_eq!(parent_category.wallet_id, wallet.id);
        assert_eq!(
            get_all_parent_categories(&connection),
            Ok(vec![parent_category])
        );
    }

    #[test]
    fn create_parent_category_fails_for_missing_wallet() {
        let connection = get_db_connection();

        let result = create_parent_category(new_parent_category(42), &connection);

        assert!(matches!(result, Err(Error::SqlError(_))));
    }

    #[test]
    fn selects_parent_categories_by_wallet() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let wallet = must_create_wallet(alice.id, &connection);
        let other_wallet = must_create_wallet(alice.id, &connection);
        let first = create_parent_category(new_parent_category(wallet.id), &connection).unwrap();
        create_parent_category(new_parent_category(other_wallet.id), &connection).unwrap();

        assert_eq!(
            select_parent_category_ids_by_wallet(wallet.id, &connection),
            Ok(vec![first.id])
        );
    }

    #[test]
    fn update_parent_category_saves_fields() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let wallet = must_create_wallet(alice.id, &connection);
        let parent_category =
            create_parent_category(new_parent_category(wallet.id), &connection).unwrap();
        let changed = ParentCategory {
            title: "Salary".to_owned(),
            is_income: true,
            ..parent_category
        };

        update_parent_category(&changed, &connection).unwrap();

        assert_eq!(get_parent_category_by_id(changed.id, &connection), Ok(changed));
    }

    #[test]
    fn delete_parent_category_removes_categories() {
        let connection = get_db_connection();
        let alice = must_create_test_user("alice", &connection);
        let wallet = must_create_wallet(alice.id, &connection);
        let parent_category =
            create_parent_category(new_parent_category(wallet.id), &connection).unwrap();
        must_create_category(parent_category.id, &connection);

        delete_parent_category(parent_category.id, &connection).unwrap();

        let remaining: i64 = connection
            .query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(
            get_parent_category_by_id(parent_category.id, &connection),
            Err(Error::NotFound)
        );
    }
}
