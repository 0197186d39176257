//! Codec configuration and construction-time validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default output alphabet: lowercase, uppercase, digits.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Smallest alphabet the codec accepts.
pub const MIN_ALPHABET_LENGTH: usize = 16;

/// Largest minimum-length padding the codec accepts.
pub const MAX_MIN_LENGTH: usize = 255;

/// Configuration for [`crate::OpaqueIdCodec`].
///
/// Encode and decode only agree when salt, minimum length, and alphabet are
/// all identical. Changing the salt invalidates every previously issued
/// opaque string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpaqueIdConfig {
    /// Secret shuffle input. Must be non-empty.
    pub salt: String,
    /// Minimum output length; shorter encodings are padded deterministically.
    pub min_length: usize,
    /// Characters usable in output. Must contain at least
    /// [`MIN_ALPHABET_LENGTH`] unique, non-whitespace characters.
    pub alphabet: String,
}

impl OpaqueIdConfig {
    /// Configuration with the default alphabet.
    pub fn new(salt: impl Into<String>, min_length: usize) -> Self {
        Self {
            salt: salt.into(),
            min_length,
            alphabet: DEFAULT_ALPHABET.to_string(),
        }
    }

    /// Configuration with a custom alphabet.
    pub fn with_alphabet(
        salt: impl Into<String>,
        min_length: usize,
        alphabet: impl Into<String>,
    ) -> Self {
        Self {
            salt: salt.into(),
            min_length,
            alphabet: alphabet.into(),
        }
    }
}

/// Construction-time configuration errors.
///
/// These surface when the codec is built, during application startup, never
/// on a per-request encode or decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("salt must not be empty")]
    EmptySalt,

    #[error("alphabet must contain at least {MIN_ALPHABET_LENGTH} unique characters, got {0}")]
    AlphabetTooSmall(usize),

    #[error("alphabet contains duplicate character {0:?}")]
    DuplicateAlphabetChar(char),

    #[error("alphabet must not contain whitespace")]
    WhitespaceInAlphabet,

    #[error("minimum length {0} exceeds the supported maximum of {MAX_MIN_LENGTH}")]
    MinLengthTooLarge(usize),
}
