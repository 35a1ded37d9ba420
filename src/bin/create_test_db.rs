use std::{error::Error, path::PathBuf, process::exit};

use clap::Parser;
use rusqlite::Connection;

use wallets_api::{FakeDataCounts, PasswordHash, ValidatedPassword, initialize_db, populate_fake_data};

/// A utility for creating a database filled with made up users, wallets,
/// categories and transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: PathBuf,

    /// The number of users to create.
    #[arg(long, default_value_t = FakeDataCounts::default().users)]
    users: usize,

    /// The number of wallets to create.
    #[arg(long, default_value_t = FakeDataCounts::default().wallets)]
    wallets: usize,

    /// The number of parent categories to create.
    #[arg(long, default_value_t = FakeDataCounts::default().parent_categories)]
    parent_categories: usize,

    /// The number of categories to create.
    #[arg(long, default_value_t = FakeDataCounts::default().categories)]
    categories: usize,

    /// The number of transactions to create.
    #[arg(long, default_value_t = FakeDataCounts::default().transactions)]
    transactions: usize,
}

/// Every made up user logs in with this password.
const TEST_PASSWORD: &str = "test";

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let output_path = args.output_path;

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut connection = Connection::open(&output_path)?;

    initialize_db(&connection)?;

    println!("Creating test data...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(TEST_PASSWORD),
        PasswordHash::DEFAULT_COST,
    )?;
    let counts = FakeDataCounts {
        users: args.users,
        wallets: args.wallets,
        parent_categories: args.parent_categories,
        categories: args.categories,
        transactions: args.transactions,
    };

    let transaction = connection.transaction()?;
    let created = populate_fake_data(counts, &password_hash, &transaction)?;
    transaction.commit()?;

    println!("Created {created:#?}");
    println!("Every user's password is \"{TEST_PASSWORD}\".");

    Ok(())
}
