//! Transactions, the movements of money recorded against a category.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, querying, and deleting transactions
//! - Route handlers for the transaction collection

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;

pub use core::{
    Transaction, TransactionJson, create_transaction,
    create_transaction_table, delete_transaction, delete_transactions_by_maker,
    get_all_transactions, get_transaction_by_id,
    select_transaction_ids_by_category, select_transaction_ids_by_maker, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
