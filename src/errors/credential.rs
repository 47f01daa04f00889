use thiserror::Error;

/// Failures inside the credential codec.
///
/// Only derivation can fail; verification absorbs every parse or comparison
/// failure into a boolean result so callers cannot distinguish a wrong
/// password from corrupt stored data.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Credential derivation failed: {0}")]
    Derivation(String),
}
