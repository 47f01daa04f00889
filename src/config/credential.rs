use std::env;

use crate::services::{CredentialCodec, DEFAULT_ITERATIONS};

/// Configuration for credential derivation
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    pub iterations: u32,
}

impl CredentialConfig {
    /// Load credential configuration from environment variables
    ///
    /// `CREDENTIAL_ITERATIONS` overrides the iteration count; anything
    /// unset or unparseable falls back to the compatibility default.
    pub fn from_env() -> Self {
        let iterations = env::var("CREDENTIAL_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ITERATIONS);

        Self { iterations }
    }

    pub fn codec(&self) -> CredentialCodec {
        CredentialCodec::new(self.iterations)
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}
