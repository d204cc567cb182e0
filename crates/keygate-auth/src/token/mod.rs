//! Opaque refresh token generation and token pair issuance.

pub mod issuer;

pub use issuer::{TokenIssuer, TokenPair};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Number of random bytes behind each refresh token (256 bits).
const REFRESH_TOKEN_BYTES: usize = 32;

/// Generates a new opaque refresh token.
///
/// 32 bytes from the thread-local CSPRNG, base64url-encoded without padding
/// (43 characters). Collisions are probabilistically impossible, which is
/// what lets the store skip a uniqueness constraint.
pub fn generate_refresh_token() -> String {
    let bytes: [u8; REFRESH_TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_refresh_token();
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_refresh_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
