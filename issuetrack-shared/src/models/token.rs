//! One-shot tokens.
//!
//! The plaintext is shown to the caller exactly once; only its SHA-256
//! digest is ever persisted. Redemption matches hash AND scope AND expiry.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::validate::Validator;

/// Bytes of entropy behind each token.
const TOKEN_ENTROPY_BYTES: usize = 16;

/// Length of the client-visible plaintext: 16 random bytes, base32-encoded
/// without padding.
pub const TOKEN_PLAINTEXT_LENGTH: usize = 26;

const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// What a token may be redeemed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// Account activation.
    Activation,
}

impl TokenScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenScope::Activation => "activation",
        }
    }

    /// Default time-to-live for freshly issued tokens of this scope.
    pub fn default_ttl(&self) -> Duration {
        match self {
            TokenScope::Activation => Duration::days(3),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Client-visible exactly once; never persisted.
    pub plaintext: String,
    /// SHA-256 digest of the plaintext; this is what the store keeps.
    #[serde(skip_serializing, default)]
    pub hash: Vec<u8>,
    pub user_id: Uuid,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

impl Token {
    /// Generates a fresh token for `user_id` expiring `ttl` from now.
    ///
    /// # Example
    ///
    /// ```
    /// use issuetrack_shared::models::token::{Token, TokenScope, TOKEN_PLAINTEXT_LENGTH};
    /// use uuid::Uuid;
    ///
    /// let scope = TokenScope::Activation;
    /// let token = Token::generate(Uuid::new_v4(), scope.default_ttl(), scope);
    /// assert_eq!(token.plaintext.len(), TOKEN_PLAINTEXT_LENGTH);
    /// assert_ne!(token.hash, token.plaintext.as_bytes());
    /// ```
    pub fn generate(user_id: Uuid, ttl: Duration, scope: TokenScope) -> Self {
        let mut entropy = [0u8; TOKEN_ENTROPY_BYTES];
        rand::thread_rng().fill_bytes(&mut entropy);
        let plaintext = base32_nopad(&entropy);
        let hash = Self::hash_plaintext(&plaintext);
        Token {
            plaintext,
            hash,
            user_id,
            expiry: Utc::now() + ttl,
            scope,
        }
    }

    /// SHA-256 digest of a token plaintext, as persisted by the store.
    pub fn hash_plaintext(plaintext: &str) -> Vec<u8> {
        Sha256::digest(plaintext.as_bytes()).to_vec()
    }
}

/// RFC 4648 base32 without padding. 16 input bytes yield 26 characters.
fn base32_nopad(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len() * 8 / 5 + 1);
    let mut buffer: u64 = 0;
    let mut bits: u32 = 0;
    for &byte in input {
        buffer = (buffer << 8) | u64::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(BASE32_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

pub fn validate_token_plaintext(v: &mut Validator, plaintext: &str) {
    v.check(!plaintext.is_empty(), "token", "must be provided");
    v.check(
        plaintext.len() == TOKEN_PLAINTEXT_LENGTH,
        "token",
        "must be 26 bytes long",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_plaintext_is_26_base32_chars() {
        let scope = TokenScope::Activation;
        let token = Token::generate(Uuid::new_v4(), scope.default_ttl(), scope);
        assert_eq!(token.plaintext.len(), TOKEN_PLAINTEXT_LENGTH);
        assert!(token
            .plaintext
            .bytes()
            .all(|b| BASE32_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_hash_never_equals_plaintext() {
        let scope = TokenScope::Activation;
        let token = Token::generate(Uuid::new_v4(), scope.default_ttl(), scope);
        assert_eq!(token.hash.len(), 32);
        assert_ne!(token.hash, token.plaintext.as_bytes());
        assert_eq!(token.hash, Token::hash_plaintext(&token.plaintext));
    }

    #[test]
    fn test_generate_tokens_are_unique() {
        let scope = TokenScope::Activation;
        let a = Token::generate(Uuid::new_v4(), scope.default_ttl(), scope);
        let b = Token::generate(Uuid::new_v4(), scope.default_ttl(), scope);
        assert_ne!(a.plaintext, b.plaintext);
    }

    #[test]
    fn test_default_ttl_is_three_days() {
        assert_eq!(TokenScope::Activation.default_ttl(), Duration::days(3));
    }

    #[test]
    fn test_base32_known_vectors() {
        // RFC 4648 test vectors, padding stripped.
        assert_eq!(base32_nopad(b""), "");
        assert_eq!(base32_nopad(b"f"), "MY");
        assert_eq!(base32_nopad(b"fo"), "MZXQ");
        assert_eq!(base32_nopad(b"foo"), "MZXW6");
        assert_eq!(base32_nopad(b"foob"), "MZXW6YQ");
        assert_eq!(base32_nopad(b"fooba"), "MZXW6YTB");
        assert_eq!(base32_nopad(b"foobar"), "MZXW6YTBOI");
    }

    #[test]
    fn test_validate_token_plaintext() {
        let mut v = Validator::new();
        validate_token_plaintext(&mut v, "");
        assert_eq!(v.into_errors().get("token"), Some("must be provided"));

        let mut v = Validator::new();
        validate_token_plaintext(&mut v, "TOOSHORT");
        assert_eq!(v.into_errors().get("token"), Some("must be 26 bytes long"));

        let mut v = Validator::new();
        validate_token_plaintext(&mut v, &"A".repeat(26));
        assert!(v.valid());
    }
}
