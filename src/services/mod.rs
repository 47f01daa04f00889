// Services layer - credential derivation and verification

pub mod credential_codec;

pub use credential_codec::{CredentialCodec, DEFAULT_ITERATIONS};
