//! Defines the endpoints for reading parent categories.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::ResourceState,
    database_id::ParentCategoryId,
    parent_category::{ParentCategoryJson, get_all_parent_categories, get_parent_category_by_id},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ParentCategoryList {
    pub parent_categories: Vec<ParentCategoryJson>,
}

/// A route handler that lists every parent category.
pub async fn get_parent_categories_endpoint(
    State(state): State<ResourceState>,
) -> Result<Json<ParentCategoryList>, Error> {
    let connection = state.connection()?;

    let parent_categories = get_all_parent_categories(&connection)?
        .iter()
        .map(|parent_category| parent_category.to_json(&state.base_url, &connection))
        .collect::<Result<_, _>>()?;

    Ok(Json(ParentCategoryList { parent_categories }))
}

/// A route handler for fetching a single parent category.
pub async fn get_parent_category_endpoint(
    State(state): State<ResourceState>,
    WithRejection(Path(parent_category_id), _): WithRejection<Path<ParentCategoryId>, Error>,
) -> Result<Json<ParentCategoryJson>, Error> {
    let connection = state.connection()?;

    let parent_category = get_parent_category_by_id(parent_category_id, &connection)?;

    Ok(Json(parent_category.to_json(&state.base_url, &connection)?))
}
