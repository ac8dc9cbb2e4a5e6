use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Signs and decodes purpose-tagged tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a shared secret. The secret should be
/// at least 32 bytes and sourced from process configuration, never from code.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a token string.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token (signature and expiry).
    ///
    /// This is the authoritative decode used by the HTTP guard for access
    /// tokens.
    ///
    /// # Errors
    /// * `TokenExpired` - The exp claim is in the past
    /// * `DecodingFailed` - Signature is invalid or token is malformed
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let validation = Validation::new(self.algorithm);

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    _ => TokenError::DecodingFailed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Decode a token without verifying signature or expiry.
    ///
    /// Used only to read the purpose claim cheaply before the authoritative
    /// lookup in the refresh-token store. Never trust claims from this method
    /// for authorization decisions.
    ///
    /// # Errors
    /// * `DecodingFailed` - Token format is invalid
    pub fn decode_unverified(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::DecodingFailed(e.to_string()))?;

        Ok(token_data.claims)
    }
}
