//! Access tokens, log-in and the middleware that guards the API.

mod log_in;
mod middleware;
mod token;

pub use log_in::post_log_in;
pub use middleware::{AuthState, TOKEN_HEADER, auth_guard};
pub use token::{DEFAULT_TOKEN_DURATION, TokenKeys, create_token};
