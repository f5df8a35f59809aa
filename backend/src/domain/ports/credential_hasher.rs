//! Driven port for password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures while hashing or verifying a password.
    pub enum CredentialHashError {
        /// The hasher rejected its input or parameters.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing with per-hash salts.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` into a self-describing string.
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;

    /// Check `password` against a hash produced by [`CredentialHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialHashError>;
}
