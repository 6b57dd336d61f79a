//! Stateless codec between claim sets and signed compact tokens.

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::domain::entities::token::{Claims, JWT_ISSUER};
use crate::errors::TokenError;

/// Encodes and decodes access tokens signed with the process secret.
///
/// The codec is pure computation: it verifies structure, signature and
/// issuer, and deliberately does not look at a clock. Expiry is
/// layered on by the validation pipeline so introspection, issuance
/// and revocation can all share the same raw decode.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Builds a codec from the symmetric signing secret.
    ///
    /// Verification is pinned to HS256: a token whose header names any
    /// other algorithm is rejected outright, the algorithm field of an
    /// inbound token is never trusted to select the verification key.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        // Time checks belong to the pipeline, not the codec
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Serializes and signs a claim set into the compact form.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key).map_err(|_| TokenError::GenerationFailed)
    }

    /// Verifies and parses a compact token back into its claims.
    ///
    /// Does not check expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName => {
                    TokenError::SignatureInvalid
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::InvalidClaims
                }
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::domain::entities::Principal;

    fn claims() -> Claims {
        let principal = Principal::new(7, "alice", vec!["USER".to_string()]);
        Claims::new_access_token(&principal, Utc::now(), Duration::seconds(900))
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = TokenCodec::new("test-secret");
        let claims = claims();

        let token = codec.encode(&claims).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = TokenCodec::new("secret-a").encode(&claims()).unwrap();

        let result = TokenCodec::new("secret-b").decode(&token);
        assert_eq!(result, Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_decode_rejects_tampered_signature() {
        let codec = TokenCodec::new("test-secret");
        let token = codec.encode(&claims()).unwrap();

        // Swap one signature character for a different base64url one
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(codec.decode(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = TokenCodec::new("test-secret");

        assert_eq!(codec.decode("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec.decode(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let codec = TokenCodec::new("test-secret");
        let principal = Principal::new(7, "alice", vec![]);
        let expired = Claims::new_access_token(
            &principal,
            Utc::now() - Duration::hours(2),
            Duration::seconds(900),
        );

        let token = codec.encode(&expired).unwrap();

        // Signature still verifies; the pipeline owns the time check
        assert_eq!(codec.decode(&token).unwrap(), expired);
    }

    #[test]
    fn test_decode_rejects_foreign_issuer() {
        let codec = TokenCodec::new("test-secret");
        let mut foreign = claims();
        foreign.iss = "someone-else".to_string();

        let token = codec.encode(&foreign).unwrap();

        assert_eq!(codec.decode(&token), Err(TokenError::InvalidClaims));
    }
}
