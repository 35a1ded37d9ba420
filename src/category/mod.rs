//! Categories, the budget buckets that transactions are recorded against.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;

pub use core::{
    Category, CategoryJson, NewCategory, create_category, create_category_table,
    delete_category, get_all_categories, get_category_by_id,
    select_category_ids_by_parent_category, update_category,
};
pub use create_endpoint::create_category_endpoint;
pub use delete_endpoint::delete_category_endpoint;
pub use edit_endpoint::edit_category_endpoint;
pub use get_endpoint::{get_categories_endpoint, get_category_endpoint};
