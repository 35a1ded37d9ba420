//! Code for creating the category table and fetching categories from the database.

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{CategoryId, ParentCategoryId},
    db::get_decimal,
    endpoints::{self, resource_url},
    transaction::{delete_transaction, select_transaction_ids_by_category},
};

/// A budget bucket within a parent category that transactions are recorded against.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub budget: Decimal,
    /// Whether the category is for recurring bills.
    pub has_bills: bool,
    pub parent_category_id: ParentCategoryId,
}

/// The fields needed to create a category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub title: String,
    pub budget: Decimal,
    pub has_bills: bool,
    pub parent_category_id: ParentCategoryId,
}

/// The JSON representation of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryJson {
    pub url: String,
    pub id: CategoryId,
    pub title: String,
    #[serde(serialize_with = "crate::money::serialize_as_number")]
    pub budget: Decimal,
    pub has_bills: bool,
    pub parent_category: String,
    pub transactions: Vec<String>,
}

impl Category {
    /// Build the JSON representation of the category.
    pub fn to_json(&self, base_url: &str, connection: &Connection) -> Result<CategoryJson, Error> {
        let transactions = select_transaction_ids_by_category(self.id, connection)?
            .into_iter()
            .map(|id| resource_url(base_url, endpoints::TRANSACTION, id))
            .collect();

        Ok(CategoryJson {
            url: resource_url(base_url, endpoints::CATEGORY, self.id),
            id: self.id,
            title: self.title.clone(),
            budget: self.budget,
            has_bills: self.has_bills,
            parent_category: resource_url(
                base_url,
                endpoints::PARENT_CATEGORY,
                self.parent_category_id,
            ),
            transactions,
        })
    }
}

/// Create the category table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                budget TEXT NOT NULL DEFAULT '0',
                has_bills INTEGER NOT NULL DEFAULT 0,
                parent_category_id INTEGER NOT NULL,
                FOREIGN KEY(parent_category_id) REFERENCES parent_category(id)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_category_parent ON category(parent_category_id)",
        (),
    )?;

    Ok(())
}

const SELECT_CATEGORY: &str =
    "SELECT id, title, budget, has_bills, parent_category_id FROM category";

fn map_row_to_category(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        title: row.get(1)?,
        budget: get_decimal(row, 2)?,
        has_bills: row.get(3)?,
        parent_category_id: row.get(4)?,
    })
}

/// Create a category.
///
/// # Errors
///
/// Returns an [Error::SqlError] if the parent category does not exist or the insert failed.
pub fn create_category(new_category: NewCategory, connection: &Connection) -> Result<Category, Error> {
    connection.execute(
        "INSERT INTO category (title, budget, has_bills, parent_category_id)
        VALUES (?1, ?2, ?3, ?4)",
        params![
            new_category.title,
            new_category.budget.to_string(),
            new_category.has_bills,
            new_category.parent_category_id,
        ],
    )?;

    get_category_by_id(connection.last_insert_rowid(), connection)
}

/// Get the category with `category_id`.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such category.
pub fn get_category_by_id(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare(&format!("{SELECT_CATEGORY} WHERE id = :id"))?
        .query_row(&[(":id", &category_id)], map_row_to_category)
        .map_err(|error| error.into())
}

pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare(&format!("{SELECT_CATEGORY} ORDER BY id"))?
        .query_map([], map_row_to_category)?
        .map(|maybe_category| maybe_category.map_err(Error::from))
        .collect()
}

/// Get the IDs of the categories in the parent category `parent_category_id`.
pub fn select_category_ids_by_parent_category(
    parent_category_id: ParentCategoryId,
    connection: &Connection,
) -> Result<Vec<CategoryId>, Error> {
    connection
        .prepare("SELECT id FROM category WHERE parent_category_id = ?1 ORDER BY id")?
        .query_map([parent_category_id], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(Error::from))
        .collect()
}

/// Save the mutable fields of `category`, including its parent category.
///
/// # Errors
///
/// Returns [Error::NotFound] if the category no longer exists.
pub fn update_category(category: &Category, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE category
        SET title = ?1, budget = ?2, has_bills = ?3, parent_category_id = ?4
        WHERE id = ?5",
        params![
            category.title,
            category.budget.to_string(),
            category.has_bills,
            category.parent_category_id,
            category.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Delete the category with `category_id` after deleting its transactions.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such category.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    for transaction_id in select_transaction_ids_by_category(category_id, connection)? {
        delete_transaction(transaction_id, connection)?;
    }

    let rows_affected = connection.execute("DELETE FROM category WHERE id = ?1", [category_id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
