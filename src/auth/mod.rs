//! Credential verification and login sessions.
//!
//! Authentication sits outside the payroll core: the calculator never sees
//! passwords, and handlers receive the acting employee through an explicit
//! per-request context instead of ambient session state.

mod credentials;
mod session;

pub use credentials::{CredentialStore, CredentialsConfig, hash_password};
pub use session::{DEFAULT_SESSION_TTL_MINUTES, SessionStore};

use crate::error::PayrollResult;

/// Checks a username/password pair.
pub trait CredentialVerifier: Send + Sync {
    /// Returns `Ok(true)` when the password matches the stored credential.
    /// Unknown usernames yield `Ok(false)`.
    fn verify(&self, username: &str, password: &str) -> PayrollResult<bool>;
}
