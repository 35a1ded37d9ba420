//! Server configuration read from the process environment.

use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
};

use clap::ValueEnum;

/// The environment variable holding the secret used to sign access tokens.
pub const SECRET_KEY_VAR: &str = "WALLETS_SECRET_KEY";
/// The environment variable naming the configuration profile.
pub const PROFILE_VAR: &str = "WALLETS_CONFIG";
/// The environment variable holding the prefix for hyperlinks in responses.
pub const BASE_URL_VAR: &str = "WALLETS_BASE_URL";

/// A named configuration profile which selects the database file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Profile {
    /// Local development.
    #[default]
    Development,
    /// Automated tests run against a file database.
    Testing,
    /// The deployed server.
    Production,
}

impl Profile {
    /// The SQLite file name used by the profile.
    pub fn database_file_name(&self) -> &'static str {
        match self {
            Profile::Development => "data-dev.sqlite",
            Profile::Testing => "data-test.sqlite",
            Profile::Production => "data.sqlite",
        }
    }

    /// Parse a profile name, e.g. "production".
    ///
    /// Returns `None` if `name` is not a known profile.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::from_str(name, true).ok()
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Profile::Development => "development",
            Profile::Testing => "testing",
            Profile::Production => "production",
        };

        f.write_str(name)
    }
}

/// Errors from reading the configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("the environment variable '{0}' must be set")]
    MissingVariable(&'static str),

    /// The profile name is not one of development, testing or production.
    #[error("unknown configuration profile \"{0}\"")]
    UnknownProfile(String),
}

/// The settings needed to run the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The profile the settings were derived from.
    pub profile: Profile,
    /// The secret for signing and verifying access tokens.
    pub secret: String,
    /// The path of the SQLite database file.
    pub database_path: PathBuf,
    /// The prefix for the absolute links in responses, e.g. "http://localhost:3000".
    pub base_url: String,
}

impl Config {
    /// Build the config for `profile`, placing the database file in `data_dir`.
    pub fn new(profile: Profile, secret: &str, data_dir: &Path, base_url: &str) -> Self {
        Self {
            profile,
            secret: secret.to_owned(),
            database_path: data_dir.join(profile.database_file_name()),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Read the config from the environment.
    ///
    /// `profile` overrides [PROFILE_VAR] when given. The base URL falls back
    /// to `http://localhost:{port}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is not set or the profile name is not recognised.
    pub fn from_env(profile: Option<Profile>, data_dir: &Path, port: u16) -> Result<Self, ConfigError> {
        let secret =
            env::var(SECRET_KEY_VAR).map_err(|_| ConfigError::MissingVariable(SECRET_KEY_VAR))?;

        let profile = match profile {
            Some(profile) => profile,
            None => match env::var(PROFILE_VAR) {
                Ok(name) => Profile::from_name(&name).ok_or(ConfigError::UnknownProfile(name))?,
                Err(_) => Profile::default(),
            },
        };

        let base_url =
            env::var(BASE_URL_VAR).unwrap_or_else(|_| format!("http://localhost:{port}"));

        Ok(Self::new(profile, &secret, data_dir, &base_url))
    }
}
