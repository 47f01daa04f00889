use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};
use rand_core::OsRng;

use crate::errors::CredentialError;

/// Legacy iteration count, kept as the default so previously minted
/// credentials keep verifying.
pub const DEFAULT_ITERATIONS: u32 = 0xBAD;

const OUTPUT_LENGTH: usize = 32;

/// Derives and verifies password credentials as PBKDF2-SHA256 PHC strings.
///
/// The output of `derive` embeds the salt and iteration count, so `verify`
/// needs nothing beyond the stored string itself.
#[derive(Clone, Debug)]
pub struct CredentialCodec {
    iterations: u32,
}

impl CredentialCodec {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a stored credential from `plaintext` with a fresh random salt.
    ///
    /// Calling this twice with the same input yields two different strings;
    /// the salt is never reused.
    pub fn derive(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params {
            rounds: self.iterations,
            output_length: OUTPUT_LENGTH,
        };

        Pbkdf2
            .hash_password_customized(plaintext.as_bytes(), None, None, params, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Derivation(e.to_string()))
    }

    /// Check `attempt` against a stored credential string.
    ///
    /// Re-derives with the salt and iteration count embedded in `stored` and
    /// compares in constant time. A malformed `stored` value is reported as
    /// a plain mismatch, indistinguishable from a wrong password.
    pub fn verify(attempt: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };

        Pbkdf2.verify_password(attempt.as_bytes(), &parsed).is_ok()
    }
}

impl Default for CredentialCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}
