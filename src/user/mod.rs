//! Users, the accounts that own wallets and make transactions.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;

pub use core::{
    NewUser, User, UserID, UserJson, create_user, create_user_table, get_all_users,
    get_user_by_id, get_user_by_username,
};
pub use create_endpoint::{UserForm, create_user_endpoint};
pub use delete_endpoint::delete_user_endpoint;
pub use edit_endpoint::edit_user_endpoint;
pub use get_endpoint::{get_user_endpoint, get_users_endpoint};
