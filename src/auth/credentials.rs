//! Argon2 password hashes per username.

use std::collections::HashMap;
use std::path::Path;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Deserialize;
use tracing::info;

use crate::config::ConfigLoader;
use crate::error::{PayrollError, PayrollResult};

use super::CredentialVerifier;

/// Credentials file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    /// PHC-format argon2 hash per username.
    #[serde(default)]
    pub credentials: HashMap<String, String>,
}

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> PayrollResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PayrollError::CredentialError {
            message: format!("password hashing failed: {}", e),
        })
}

/// Verifies passwords against stored argon2 hashes.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    hashes: HashMap<String, String>,
}

impl CredentialStore {
    /// Creates a store from username → PHC hash pairs.
    pub fn new(hashes: HashMap<String, String>) -> Self {
        Self { hashes }
    }

    /// Loads `credentials.yaml`.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let config = ConfigLoader::load_yaml::<CredentialsConfig>(path.as_ref())?;
        info!(
            path = %path.as_ref().display(),
            users = config.credentials.len(),
            "Loaded credentials"
        );
        Ok(Self::new(config.credentials))
    }

    /// Stores a hash for `username`, replacing any previous one.
    pub fn set_password(&mut self, username: &str, password: &str) -> PayrollResult<()> {
        let hash = hash_password(password)?;
        self.hashes.insert(username.to_string(), hash);
        Ok(())
    }

    /// Number of users with a credential.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// True when no credentials are loaded.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl CredentialVerifier for CredentialStore {
    fn verify(&self, username: &str, password: &str) -> PayrollResult<bool> {
        let Some(stored) = self.hashes.get(username) else {
            return Ok(false);
        };
        let parsed = PasswordHash::new(stored).map_err(|e| PayrollError::CredentialError {
            message: format!("invalid password hash for '{}': {}", username, e),
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
