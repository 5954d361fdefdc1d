use base64::{engine::general_purpose::STANDARD, Engine};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use std::fmt;

use super::errors::KeyError;

/// Asymmetric key pair used to sign and verify bearer tokens.
///
/// Parsed once at startup and shared read-only (behind an `Arc`) by
/// [`TokenIssuer`](super::TokenIssuer) and [`TokenVerifier`](super::TokenVerifier).
#[derive(Clone)]
pub struct TokenKeys {
    algorithm: Algorithm,
    signing: EncodingKey,
    verification: DecodingKey,
}

impl TokenKeys {
    /// Build an RS256 key pair from PEM-encoded private and public keys.
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyError> {
        let signing =
            EncodingKey::from_rsa_pem(private_pem).map_err(|e| KeyError::Pem("private", e))?;
        let verification =
            DecodingKey::from_rsa_pem(public_pem).map_err(|e| KeyError::Pem("public", e))?;

        Ok(Self {
            algorithm: Algorithm::RS256,
            signing,
            verification,
        })
    }

    /// Build an RS256 key pair from base64-encoded PEM strings (the env var format).
    pub fn from_base64_pem(private_b64: &str, public_b64: &str) -> Result<Self, KeyError> {
        let private_pem = STANDARD
            .decode(private_b64.trim())
            .map_err(|e| KeyError::Encoding("private", e))?;
        let public_pem = STANDARD
            .decode(public_b64.trim())
            .map_err(|e| KeyError::Encoding("public", e))?;

        Self::from_rsa_pem(&private_pem, &public_pem)
    }

    /// The only algorithm tokens may be signed with.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(super) fn signing_key(&self) -> &EncodingKey {
        &self.signing
    }

    pub(super) fn verification_key(&self) -> &DecodingKey {
        &self.verification
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_PEM: &str = include_str!("../../../tests/fixtures/token_private.pem");
    const PUBLIC_PEM: &str = include_str!("../../../tests/fixtures/token_public.pem");

    #[test]
    fn test_from_base64_pem() {
        let keys = TokenKeys::from_base64_pem(
            &STANDARD.encode(PRIVATE_PEM),
            &STANDARD.encode(PUBLIC_PEM),
        )
        .unwrap();
        assert_eq!(keys.algorithm(), Algorithm::RS256);
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let result = TokenKeys::from_base64_pem("not base64!", &STANDARD.encode(PUBLIC_PEM));
        assert!(matches!(result, Err(KeyError::Encoding("private", _))));
    }

    #[test]
    fn test_invalid_pem_is_rejected() {
        let result = TokenKeys::from_rsa_pem(PRIVATE_PEM.as_bytes(), b"garbage");
        assert!(matches!(result, Err(KeyError::Pem("public", _))));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let keys = TokenKeys::from_rsa_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap();
        let debug = format!("{:?}", keys);
        assert!(debug.contains("RS256"));
        assert!(!debug.contains("PRIVATE"));
    }
}
