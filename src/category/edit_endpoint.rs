//! Defines the endpoint for updating a category.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    category::{Category, CategoryJson, get_category_by_id, update_category},
    database_id::{CategoryId, ParentCategoryId},
    ownership::Owned,
    parent_category::get_parent_category_by_id,
    user::UserID,
    validation::{validate_optional_decimal, validate_text},
};

/// The fields of a category that may be changed. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditCategoryForm {
    pub title: Option<String>,
    pub budget: Option<Decimal>,
    pub has_bills: Option<bool>,
    /// Moves the category to another parent category.
    pub parent_category_id: Option<ParentCategoryId>,
}

impl EditCategoryForm {
    /// Apply the changes to `category`.
    ///
    /// Moving the category requires authority over the destination as well.
    fn apply(
        self,
        category: Category,
        user_id: UserID,
        connection: &Connection,
    ) -> Result<Category, Error> {
        let parent_category_id = match self.parent_category_id {
            Some(id) if id != category.parent_category_id => {
                get_parent_category_by_id(id, connection)?.authorize(
                    user_id,
                    connection,
                    "You can't move a category to a wallet you don't own!",
                )?;
                id
            }
            _ => category.parent_category_id,
        };

        Ok(Category {
            title: match self.title {
                Some(title) => validate_text("title", &title)?,
                None => category.title,
            },
            budget: validate_optional_decimal("budget", self.budget)?.unwrap_or(category.budget),
            has_bills: self.has_bills.unwrap_or(category.has_bills),
            parent_category_id,
            ..category
        })
    }
}

/// A route handler for updating a category, only the wallet owner may do this.
pub async fn edit_category_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(category_id), _): WithRejection<Path<CategoryId>, Error>,
    WithRejection(Json(form), _): WithRejection<Json<EditCategoryForm>, Error>,
) -> Result<Json<CategoryJson>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let category = get_category_by_id(category_id, &transaction)?;
    category.authorize(
        user_id,
        &transaction,
        "You can't edit a category in a wallet you don't own!",
    )?;

    let category = form.apply(category, user_id, &transaction)?;
    update_category(&category, &transaction)?;
    let json = category.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;

    Ok(Json(json))
}
