//! User module providing registration and lookups.
//!
//! Registration is gated by blacklist screening (see [`crate::screening`]):
//! a signup proceeds only when the provider returns an all-clear report for
//! the email.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{UserError, UserResult};
pub use manager::UserManager;
pub use models::{CreateUserRequest, User};
