//! Wallets, the top level containers for a user's budget.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;

pub use core::{
    NewWallet, Wallet, WalletJson, create_wallet, create_wallet_table, delete_wallet,
    get_all_wallets, get_wallet_by_id, select_wallet_ids_by_owner, update_wallet,
};
pub use create_endpoint::create_wallet_endpoint;
pub use delete_endpoint::delete_wallet_endpoint;
pub use edit_endpoint::edit_wallet_endpoint;
pub use get_endpoint::{get_wallet_endpoint, get_wallets_endpoint};
