//! Email screening against an external blacklist provider.
//!
//! Signup consults a [`Screener`] before creating a user. The contract is
//! fail-closed: registration proceeds only on a definitive all-clear report
//! (`reason == None`); a flagged report or a failed lookup both refuse the
//! signup.

use async_trait::async_trait;

pub mod adjutor;
pub mod errors;
pub mod models;

pub use adjutor::AdjutorClient;
pub use errors::{ScreeningError, ScreeningResult};
pub use models::KarmaReport;

/// Blacklist lookup seam.
///
/// Implemented by [`AdjutorClient`] in production and by in-memory stubs in
/// tests.
#[async_trait]
pub trait Screener: Send + Sync {
    /// Look up an email on the blacklist.
    ///
    /// # Arguments
    ///
    /// * `email` - Email address to screen
    ///
    /// # Returns
    ///
    /// * `ScreeningResult<KarmaReport>` - The provider's verdict, or an error
    ///   when no verdict could be obtained
    async fn check_email(&self, email: &str) -> ScreeningResult<KarmaReport>;
}
