//! Defines the endpoints for reading categories.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::ResourceState,
    category::{CategoryJson, get_all_categories, get_category_by_id},
    database_id::CategoryId,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryList {
    pub categories: Vec<CategoryJson>,
}

pub async fn get_categories_endpoint(
    State(state): State<ResourceState>,
) -> Result<Json<CategoryList>, Error> {
    let connection = state.connection()?;

    let categories = get_all_categories(&connection)?
        .iter()
        .map(|category| category.to_json(&state.base_url, &connection))
        .collect::<Result<_, _>>()?;

    Ok(Json(CategoryList { categories }))
}

pub async fn get_category_endpoint(
    State(state): State<ResourceState>,
    WithRejection(Path(category_id), _): WithRejection<Path<CategoryId>, Error>,
) -> Result<Json<CategoryJson>, Error> {
    let connection = state.connection()?;

    let category = get_category_by_id(category_id, &connection)?;

    Ok(Json(category.to_json(&state.base_url, &connection)?))
}
