//! Parent categories, the top level budget buckets within a wallet.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;

pub use core::{
    NewParentCategory, ParentCategory, ParentCategoryJson, create_parent_category,
    create_parent_category_table, delete_parent_category, get_all_parent_categories,
    get_parent_category_by_id, select_parent_category_ids_by_wallet, update_parent_category,
};
pub use create_endpoint::create_parent_category_endpoint;
pub use delete_endpoint::delete_parent_category_endpoint;
pub use edit_endpoint::edit_parent_category_endpoint;
pub use get_endpoint::{get_parent_categories_endpoint, get_parent_category_endpoint};
