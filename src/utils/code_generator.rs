//! Short code generation and validation utilities.
//!
//! Codes are 6 to 8 characters drawn from `A-Z a-z 0-9`. The same format is
//! enforced for custom codes, path parameters and the database `CHECK`
//! constraint.

use rand::{CryptoRng, Rng};
use regex::Regex;
use std::sync::LazyLock;

/// The 62-character code alphabet.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Shortest accepted code, and the first length tried by allocation.
pub const MIN_CODE_LEN: usize = 6;

/// Longest accepted code, and the last length tried by allocation.
pub const MAX_CODE_LEN: usize = 8;

/// Random draws per length before allocation moves to the next length.
pub const ATTEMPTS_PER_LENGTH: usize = 6;

/// Codes that are well-formed but shadowed by fixed routes.
pub const RESERVED_CODES: &[&str] = &["healthz"];

/// Compiled code format, shared with request validation.
pub static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code regex is valid"));

/// Generates a random code of `length` characters from the thread-local CSPRNG.
///
/// Every character is drawn uniformly from [`ALPHABET`].
pub fn generate_code(length: usize) -> String {
    generate_code_with(&mut rand::rng(), length)
}

/// Generates a random code from the given generator.
///
/// The [`CryptoRng`] bound keeps predictable generators out: a guessable
/// sequence would let a client enumerate codes before they are handed out.
pub fn generate_code_with<R: Rng + CryptoRng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` matches `[A-Za-z0-9]{6,8}`.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
