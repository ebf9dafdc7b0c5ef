// Bearer token codec
// Decision: HS256 with a single shared secret, no key rotation.
// Expiry is computed from the issuance instant on every call, so tokens
// issued late in the process lifetime live just as long as tokens issued
// at boot.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use plantmarket_contracts::Role;

/// Decoded token payload.
///
/// Wire format: `{"user_id": "<uuid>", "user_type": "buyer"|"nursery",
/// "exp": <unix>, "iat": <unix>}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject id, scoped to the table named by `user_type`.
    pub user_id: Uuid,
    /// Which of the two account tables the subject lives in.
    pub user_type: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Every way a token can fail verification, each its own reportable kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token audience is invalid")]
    InvalidAudience,
    #[error("token signing key is invalid")]
    InvalidKey,
    #[error("token failed verification")]
    Other,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Malformed,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidAudience => TokenError::InvalidAudience,
            ErrorKind::InvalidKeyFormat => TokenError::InvalidKey,
            _ => TokenError::Other,
        }
    }
}

/// Encodes and verifies signed identity claims.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a token for a subject. `exp` is `now + ttl`, per call.
    pub fn encode(&self, user_id: Uuid, user_type: Role) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            user_type,
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry and return the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-key-for-testing", Duration::days(30))
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let codec = codec();
        let user_id = Uuid::new_v4();

        let token = codec.encode(user_id, Role::Buyer).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.user_type, Role::Buyer);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_roundtrip_preserves_nursery_role() {
        let codec = codec();
        let user_id = Uuid::new_v4();

        let token = codec.encode(user_id, Role::Nursery).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.user_type, Role::Nursery);
    }

    #[test]
    fn test_expiry_tracks_issuance_time() {
        let codec = codec();
        let before = Utc::now().timestamp();
        let token = codec.encode(Uuid::new_v4(), Role::Buyer).unwrap();
        let after = Utc::now().timestamp();

        let claims = codec.decode(&token).unwrap();
        let ttl = Duration::days(30).num_seconds();
        assert!(claims.exp >= before + ttl);
        assert!(claims.exp <= after + ttl);
    }

    #[test]
    fn test_expired_token_is_expired_kind() {
        // Negative ttl puts exp well past the default validation leeway
        let stale = TokenCodec::new("test-secret-key-for-testing", Duration::days(-1));
        let token = stale.encode(Uuid::new_v4(), Role::Buyer).unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_bad_signature_not_malformed() {
        let other = TokenCodec::new("a-different-secret", Duration::days(30));
        let token = other.encode(Uuid::new_v4(), Role::Buyer).unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert_eq!(codec().decode("not-a-token"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_unknown_role_tag_is_malformed() {
        // A structurally valid token whose user_type is neither role must
        // not decode into either
        use serde_json::json;

        let claims = json!({
            "user_id": Uuid::new_v4(),
            "user_type": "admin",
            "exp": (Utc::now() + Duration::days(1)).timestamp(),
            "iat": Utc::now().timestamp(),
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-for-testing"),
        )
        .unwrap();

        assert_eq!(codec().decode(&token), Err(TokenError::Malformed));
    }
}
