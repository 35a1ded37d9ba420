//! Defines the endpoint for updating a parent category.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    Error,
    app_state::ResourceState,
    database_id::ParentCategoryId,
    ownership::Owned,
    parent_category::{
        ParentCategory, ParentCategoryJson, get_parent_category_by_id, update_parent_category,
    },
    user::UserID,
    validation::{validate_optional_decimal, validate_text},
};

/// The fields of a parent category that may be changed.
///
/// A parent category cannot be moved to another wallet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditParentCategoryForm {
    pub title: Option<String>,
    pub budget: Option<Decimal>,
    pub is_income: Option<bool>,
}

impl EditParentCategoryForm {
    fn apply(self, parent_category: ParentCategory) -> Result<ParentCategory, Error> {
        Ok(ParentCategory {
            title: match self.title {
                Some(title) => validate_text("title", &title)?,
                None => parent_category.title,
            },
            budget: validate_optional_decimal("budget", self.budget)?
                .unwrap_or(parent_category.budget),
            is_income: self.is_income.unwrap_or(parent_category.is_income),
            ..parent_category
        })
    }
}

/// A route handler for updating a parent category, only the wallet owner may do this.
pub async fn edit_parent_category_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(parent_category_id), _): WithRejection<Path<ParentCategoryId>, Error>,
    WithRejection(Json(form), _): WithRejection<Json<EditParentCategoryForm>, Error>,
) -> Result<Json<ParentCategoryJson>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let parent_category = get_parent_category_by_id(parent_category_id, &transaction)?;
    parent_category.authorize(
        user_id,
        &transaction,
        "You can't edit a parent category in a wallet you don't own!",
    )?;

    let parent_category = form.apply(parent_category)?;
    update_parent_category(&parent_category, &transaction)?;
    let json = parent_category.to_json(&state.base_url, &transaction)?;

    transaction.commit()?;

    Ok(Json(json))
}
