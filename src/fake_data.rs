//! Fills a database with made up records for manual testing.

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error, PasswordHash,
    category::{Category, NewCategory, create_category},
    ownership::Owned,
    parent_category::{NewParentCategory, ParentCategory, create_parent_category},
    transaction::{Transaction, create_transaction},
    user::{NewUser, User, create_user},
    wallet::{NewWallet, Wallet, create_wallet},
};

const FIRST_NAMES: [&str; 6] = ["Alice", "Bob", "Carol", "Dan", "Erin", "Frank"];
const LAST_NAMES: [&str; 5] = ["Smith", "Jones", "Nguyen", "Garcia", "Brown"];
const CURRENCIES: [&str; 4] = ["usd", "eur", "nzd", "gbp"];
const WALLET_TITLES: [&str; 4] = ["Everyday", "Savings", "Holiday", "Joint"];
const PARENT_CATEGORY_TITLES: [&str; 5] = ["Bills", "Food", "Transport", "Salary", "Fun"];
const CATEGORY_TITLES: [&str; 7] = [
    "Rent",
    "Power",
    "Groceries",
    "Takeaways",
    "Fuel",
    "Bus fares",
    "Movies",
];
const DESCRIPTIONS: [&str; 5] = [
    "Weekly shop",
    "Monthly payment",
    "Paid in cash",
    "Split with a friend",
    "",
];

/// How many records of each kind to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeDataCounts {
    /// The number of users.
    pub users: usize,
    /// The number of wallets, spread over the users.
    pub wallets: usize,
    /// The number of parent categories, spread over the wallets.
    pub parent_categories: usize,
    /// The number of categories, spread over the parent categories.
    pub categories: usize,
    /// The number of transactions, spread over the categories.
    pub transactions: usize,
}

impl Default for FakeDataCounts {
    fn default() -> Self {
        Self {
            users: 10,
            wallets: 5,
            parent_categories: 10,
            categories: 15,
            transactions: 30,
        }
    }
}

/// Create users, then wallets, parent categories, categories and transactions.
///
/// Each record is attached to an earlier record of its parent kind, cycling
/// through them in order, so a parent may be skipped when there are more
/// parents than children. Every user gets the password `password_hash`.
/// Transactions are made by the owner of the wallet they are recorded in.
/// A kind is only created if its parent kind has at least one record.
///
/// # Errors
///
/// Returns an error if any insert fails, e.g. when the usernames already exist.
pub fn populate_fake_data(
    counts: FakeDataCounts,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<FakeDataCounts, Error> {
    let users = (0..counts.users)
        .map(|i| {
            let first_name = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last_name = LAST_NAMES[i % LAST_NAMES.len()];
            let username = format!("{}{}", first_name.to_lowercase(), i + 1);

            create_user(
                NewUser {
                    email: format!("{username}@example.com"),
                    username,
                    password_hash: password_hash.clone(),
                    confirmed: true,
                    first_name: Some(first_name.to_owned()),
                    last_name: Some(last_name.to_owned()),
                },
                connection,
            )
        })
        .collect::<Result<Vec<User>, Error>>()?;

    let wallets = spread(counts.wallets, &users)
        .map(|(i, owner)| {
            create_wallet(
                NewWallet {
                    title: WALLET_TITLES[i % WALLET_TITLES.len()].to_owned(),
                    currency: CURRENCIES[i % CURRENCIES.len()].to_owned(),
                    initial_balance: Decimal::from(i as i64 * 250),
                    owner_id: owner.id,
                },
                connection,
            )
        })
        .collect::<Result<Vec<Wallet>, Error>>()?;

    let parent_categories = spread(counts.parent_categories, &wallets)
        .map(|(i, wallet)| {
            let title = PARENT_CATEGORY_TITLES[i % PARENT_CATEGORY_TITLES.len()];

            create_parent_category(
                NewParentCategory {
                    title: title.to_owned(),
                    budget: Decimal::from(100 + i as i64 * 50),
                    is_income: title == "Salary",
                    wallet_id: wallet.id,
                },
                connection,
            )
        })
        .collect::<Result<Vec<ParentCategory>, Error>>()?;

    let categories = spread(counts.categories, &parent_categories)
        .map(|(i, parent_category)| {
            create_category(
                NewCategory {
                    title: CATEGORY_TITLES[i % CATEGORY_TITLES.len()].to_owned(),
                    budget: Decimal::from(20 + i as i64 * 10),
                    has_bills: i % 3 == 0,
                    parent_category_id: parent_category.id,
                },
                connection,
            )
        })
        .collect::<Result<Vec<Category>, Error>>()?;

    let transactions = spread(counts.transactions, &categories)
        .map(|(i, category)| {
            create_transaction(
                Transaction::build(category.id, category.owner(connection)?)
                    // In cents, so amounts have two decimal places.
                    .amount(Decimal::new(-(1_000 + i as i64 * 137) % 100_000, 2))
                    .description(DESCRIPTIONS[i % DESCRIPTIONS.len()]),
                connection,
            )
        })
        .collect::<Result<Vec<Transaction>, Error>>()?;

    Ok(FakeDataCounts {
        users: users.len(),
        wallets: wallets.len(),
        parent_categories: parent_categories.len(),
        categories: categories.len(),
        transactions: transactions.len(),
    })
}

/// Pair `count` indices with `parents`, cycling through the parents.
fn spread<T>(count: usize, parents: &[T]) -> impl Iterator<Item = (usize, &T)> {
    let count = if parents.is_empty() { 0 } else { count };

    (0..count).map(move |i| (i, &parents[i % parents.len()]))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        category::{get_all_categories, get_category_by_id},
        db::initialize,
        ownership::Owned,
        test_utils::{TEST_PASSWORD, TEST_PASSWORD_COST},
        transaction::get_all_transactions,
        user::get_all_users,
        wallet::get_all_wallets,
    };

    use super::{FakeDataCounts, populate_fake_data};

    fn must_create_db() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
    }

    #[test]
    fn creates_requested_counts() {
        let connection = must_create_db();
        let password_hash =
            PasswordHash::from_raw_password(TEST_PASSWORD, TEST_PASSWORD_COST).unwrap();

        let created =
            populate_fake_data(FakeDataCounts::default(), &password_hash, &connection).unwrap();

        assert_eq!(created, FakeDataCounts::default());
        assert_eq!(get_all_users(&connection).unwrap().len(), 10);
        assert_eq!(get_all_wallets(&connection).unwrap().len(), 5);
        assert_eq!(get_all_categories(&connection).unwrap().len(), 15);
        assert_eq!(get_all_transactions(&connection).unwrap().len(), 30);
    }

    #[test]
    fn transactions_are_made_by_the_wallet_owner() {
        let connection = must_create_db();
        let password_hash =
            PasswordHash::from_raw_password(TEST_PASSWORD, TEST_PASSWORD_COST).unwrap();

        populate_fake_data(FakeDataCounts::default(), &password_hash, &connection).unwrap();

        for transaction in get_all_transactions(&connection).unwrap() {
            let category = get_category_by_id(transaction.category_id, &connection).unwrap();
            assert_eq!(
                category.owner(&connection).unwrap(),
                transaction.maker_id,
                "transaction {} was made by someone other than the wallet owner",
                transaction.id
            );
        }
    }

    #[test]
    fn skips_children_without_parents() {
        let connection = must_create_db();
        let password_hash =
            PasswordHash::from_raw_password(TEST_PASSWORD, TEST_PASSWORD_COST).unwrap();
        let counts = FakeDataCounts {
            wallets: 0,
            ..FakeDataCounts::default()
        };

        let created = populate_fake_data(counts, &password_hash, &connection).unwrap();

        assert_eq!(
            created,
            FakeDataCounts {
                users: 10,
                wallets: 0,
                parent_categories: 0,
                categories: 0,
                transactions: 0,
            }
        );
    }
}
