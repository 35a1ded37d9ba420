#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum_extra::extract::WithRejection;
use axum_test::TestServer;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    AppState, Error, PasswordHash, build_router,
    app_state::ResourceState,
    auth::create_token,
    category::{Category, NewCategory, create_category},
    db::initialize,
    parent_category::{NewParentCategory, ParentCategory, create_parent_category},
    transaction::{Transaction, create_transaction},
    user::{NewUser, User, UserID, create_user},
    wallet::{NewWallet, Wallet, create_wallet},
};

pub(crate) const TEST_PASSWORD: &str = "averysafeandsecurepassword";
pub(crate) const TEST_BASE_URL: &str = "http://localhost:3000";
pub(crate) const TEST_SECRET: &str = "nafstenoas";

/// The lowest cost bcrypt accepts, hashing at the default cost makes tests slow.
pub(crate) const TEST_PASSWORD_COST: u32 = 4;

pub(crate) fn must_create_test_user(username: &str, connection: &Connection) -> User {
    create_user(
        NewUser {
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: PasswordHash::from_raw_password(TEST_PASSWORD, TEST_PASSWORD_COST)
                .unwrap(),
            confirmed: false,
            first_name: None,
            last_name: None,
        },
        connection,
    )
    .unwrap()
}

pub(crate) fn must_create_wallet(owner_id: UserID, connection: &Connection) -> Wallet {
    create_wallet(
        NewWallet {
            title: "Main".to_owned(),
            currency: "usd".to_owned(),
            initial_balance: Decimal::ZERO,
            owner_id,
        },
        connection,
    )
    .unwrap()
}

pub(crate) fn must_create_parent_category(wallet_id: i64, connection: &Connection) -> ParentCategory {
    create_parent_category(
        NewParentCategory {
            title: "Bills".to_owned(),
            budget: Decimal::new(500, 0),
            is_income: false,
            wallet_id,
        },
        connection,
    )
    .unwrap()
}

pub(crate) fn must_create_category(parent_category_id: i64, connection: &Connection) -> Category {
    create_category(
        NewCategory {
            title: "Rent".to_owned(),
            budget: Decimal::new(400, 0),
            has_bills: true,
            parent_category_id,
        },
        connection,
    )
    .unwrap()
}

pub(crate) fn must_create_transaction(
    category_id: i64,
    maker_id: UserID,
    connection: &Connection,
) -> Transaction {
    create_transaction(
        Transaction::build(category_id, maker_id)
            .amount(Decimal::new(-2050, 2))
            .description("Power bill"),
        connection,
    )
    .unwrap()
}

pub(crate) fn must_create_resource_state() -> ResourceState {
    let connection = Connection::open_in_memory().unwrap();
    initialize(&connection).unwrap();

    ResourceState {
        db_connection: Arc::new(Mutex::new(connection)),
        base_url: TEST_BASE_URL.to_owned(),
        password_cost: TEST_PASSWORD_COST,
    }
}

pub(crate) fn must_create_app_state() -> AppState {
    let connection = Connection::open_in_memory().unwrap();
    let mut state = AppState::new(connection, TEST_SECRET, TEST_BASE_URL).unwrap();
    state.password_cost = TEST_PASSWORD_COST;

    state
}

pub(crate) fn must_create_test_server(state: &AppState) -> TestServer {
    TestServer::try_new(build_router(state.clone())).expect("Could not create test server.")
}

pub(crate) fn must_create_token(user_id: UserID, state: &AppState) -> String {
    create_token(user_id, state.token_duration, &state.token_keys).unwrap()
}

/// Wrap `id` the way the router extracts it from the URL.
pub(crate) fn with_path<T>(id: T) -> WithRejection<Path<T>, Error> {
    WithRejection(Path(id), Default::default())
}
