use std::{io, path::PathBuf, process::exit};

use clap::Parser;
use rusqlite::Connection;

use wallets_api::{PasswordHash, Profile, UserForm, ValidatedPassword, create_user, initialize_db};

/// A utility for registering a user, e.g. the first user of a new database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The name the new user logs in with.
    username: String,

    /// The new user's email address.
    email: String,

    /// File path to the application SQLite database, overrides the profile's database.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// The configuration profile used to find the database.
    #[arg(long, value_enum, default_value_t = Profile::Development)]
    profile: Profile,

    /// The directory that holds the profile's SQLite database.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

fn main() {
    let args = Args::parse();
    let db_path = args
        .db_path
        .unwrap_or_else(|| args.data_dir.join(args.profile.database_file_name()));

    let Some(password) = prompt_new_password() else {
        exit(1);
    };

    let form = UserForm {
        username: args.username,
        email: args.email,
        password,
        confirmed: true,
        first_name: None,
        last_name: None,
    };
    let new_user = match form.into_new_user(PasswordHash::DEFAULT_COST) {
        Ok(new_user) => new_user,
        Err(error) => {
            print_error(error);
            exit(1);
        }
    };

    println!("Creating user {} in {db_path:#?}", new_user.username);

    let connection = match Connection::open(&db_path) {
        Ok(connection) => connection,
        Err(error) => {
            print_error(format!("Could not open the database at {db_path:#?}: {error}"));
            exit(1);
        }
    };

    if let Err(error) = initialize_db(&connection) {
        print_error(format!("Could not initialize the database: {error}"));
        exit(1);
    }

    match create_user(new_user, &connection) {
        Ok(user) => println!("Created user with ID {}", user.id),
        Err(error) => {
            print_error(format!("Could not create the user: {error}"));
            exit(1);
        }
    }
}

fn prompt_new_password() -> Option<String> {
    loop {
        println!();

        let first_password = match rpassword::prompt_password("Enter a password: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if let Err(error) = ValidatedPassword::new(&first_password) {
            print_error(error);
            continue;
        }

        let second_password = match rpassword::prompt_password("Enter the same password again: ") {
            Ok(string) => string,
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                return None;
            }
            Err(error) => {
                print_error(format!("Could not read password from stdin: {error}"));
                return None;
            }
        };

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        return Some(first_password);
    }
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string())
}
