// Authentication gate and role checks
//
// The gate extracts a "Bearer <token>" credential, decodes it, and resolves
// the subject strictly in the table named by the claim's role tag. A buyer
// claim is never looked up in the nurseries table or vice versa.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use plantmarket_contracts::{Envelope, Role};
use plantmarket_storage::{BuyerRow, Database, NurseryRow};

use super::token::{TokenCodec, TokenError};

/// Everything the gate and the role checks can reject a request with.
/// Each kind keeps its own wire message; clients match on the `error`
/// tokens, so those strings are part of the API surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    // Header credential errors
    #[error("authorization header missing")]
    MissingHeader,
    #[error("authorization scheme is not bearer")]
    MalformedHeader,
    #[error("no credentials after scheme word")]
    EmptyCredential,
    #[error("credential contains extra parts")]
    TooManyParts,
    #[error("literal null token")]
    NullToken,

    // Token decode errors, one per codec failure kind
    #[error("token is invalid")]
    InvalidToken,
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    TokenExpired,
    #[error("token audience invalid")]
    InvalidAudience,
    #[error("token key invalid")]
    InvalidKey,
    #[error("token verification failed")]
    InvalidTokenGeneric,

    // Resolution and authorization errors
    #[error("subject not found in role table")]
    SubjectNotFound,
    #[error("authenticated role is not permitted here")]
    WrongRole,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed => AuthError::InvalidToken,
            TokenError::BadSignature => AuthError::InvalidSignature,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::InvalidAudience => AuthError::InvalidAudience,
            TokenError::InvalidKey => AuthError::InvalidKey,
            TokenError::Other => AuthError::InvalidTokenGeneric,
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Authorization failure: the caller is authenticated, just not
            // allowed here. Always a fixed-shape 403, never a 500.
            AuthError::WrongRole => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Envelope message for this failure. Decode and resolution failures
    /// use `{"error": <kind>}` objects; header failures are plain strings.
    pub fn message(&self) -> Value {
        match self {
            // A missing header and a non-bearer scheme share one message
            AuthError::MissingHeader | AuthError::MalformedHeader => {
                Value::String("Invalid token header.".into())
            }
            AuthError::EmptyCredential => {
                Value::String("Invalid token header. No credentials provided.".into())
            }
            AuthError::TooManyParts => Value::String("Invalid token header".into()),
            AuthError::NullToken => Value::String("Null token not allowed".into()),
            AuthError::InvalidToken => error_kind("Invalid_Token"),
            AuthError::InvalidSignature => error_kind("Invalid_Signature"),
            AuthError::TokenExpired => error_kind("Token_Expired"),
            AuthError::InvalidAudience => error_kind("Invalid_Token_Audience"),
            AuthError::InvalidKey => error_kind("Invalid_Token_Key"),
            AuthError::InvalidTokenGeneric => error_kind("Invalid_Token_Error"),
            AuthError::SubjectNotFound => error_kind("invalid_User_Token"),
            AuthError::WrongRole => {
                Value::String("You do not have permission to perform this action.".into())
            }
        }
    }
}

fn error_kind(kind: &str) -> Value {
    serde_json::json!({ "error": kind })
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Envelope::failure(self.message());
        (self.status_code(), Json(body)).into_response()
    }
}

/// Resolved identity attached to the request after the gate succeeds.
#[derive(Debug, Clone)]
pub enum AuthIdentity {
    Buyer(BuyerRow),
    Nursery(NurseryRow),
}

impl AuthIdentity {
    pub fn id(&self) -> uuid::Uuid {
        match self {
            AuthIdentity::Buyer(row) => row.id,
            AuthIdentity::Nursery(row) => row.id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            AuthIdentity::Buyer(_) => Role::Buyer,
            AuthIdentity::Nursery(_) => Role::Nursery,
        }
    }
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub codec: TokenCodec,
    pub db: Arc<Database>,
}

/// Pull the bearer token out of an `Authorization` header value.
///
/// The scheme word is matched case-insensitively; exactly two
/// whitespace-separated parts are accepted. The literal token `null` is
/// rejected because some clients serialize an absent token that way.
pub fn parse_bearer(header: Option<&header::HeaderValue>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?;
    let raw = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    let parts: Vec<&str> = raw.split_whitespace().collect();
    let (&scheme, rest) = parts.split_first().ok_or(AuthError::MissingHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    match rest {
        [] => Err(AuthError::EmptyCredential),
        [token] if *token == "null" => Err(AuthError::NullToken),
        [token] => Ok(*token),
        _ => Err(AuthError::TooManyParts),
    }
}

async fn authenticate(parts: &Parts, state: &AuthState) -> Result<AuthIdentity, AuthError> {
    let token = parse_bearer(parts.headers.get(header::AUTHORIZATION))?;

    let claims = state.codec.decode(token).map_err(|e| {
        tracing::debug!("token decode failed: {}", e);
        AuthError::from(e)
    })?;

    // Resolution is keyed strictly by the claim's declared role. A subject
    // id missing from that table is a failure even if the other table
    // happens to contain the same id.
    match claims.user_type {
        Role::Buyer => {
            let row = state
                .db
                .get_buyer(claims.user_id)
                .await
                .map_err(|e| {
                    tracing::error!("buyer lookup failed during auth: {}", e);
                    AuthError::InvalidTokenGeneric
                })?
                .ok_or(AuthError::SubjectNotFound)?;
            Ok(AuthIdentity::Buyer(row))
        }
        Role::Nursery => {
            let row = state
                .db
                .get_nursery(claims.user_id)
                .await
                .map_err(|e| {
                    tracing::error!("nursery lookup failed during auth: {}", e);
                    AuthError::InvalidTokenGeneric
                })?
                .ok_or(AuthError::SubjectNotFound)?;
            Ok(AuthIdentity::Nursery(row))
        }
    }
}

/// Extractor for any authenticated identity, buyer or nursery.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let identity = authenticate(parts, &auth_state).await?;
        Ok(AuthUser(identity))
    }
}

/// Extractor for buyer-only endpoints. The roles are peers: a nursery token
/// is rejected here exactly as a buyer token is rejected by [`NurseryUser`].
#[derive(Debug, Clone)]
pub struct BuyerUser(pub BuyerRow);

#[async_trait]
impl<S> FromRequestParts<S> for BuyerUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        match identity {
            AuthIdentity::Buyer(row) => Ok(BuyerUser(row)),
            AuthIdentity::Nursery(_) => Err(AuthError::WrongRole),
        }
    }
}

/// Extractor for nursery-only endpoints.
#[derive(Debug, Clone)]
pub struct NurseryUser(pub NurseryRow);

#[async_trait]
impl<S> FromRequestParts<S> for NurseryUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        match identity {
            AuthIdentity::Nursery(row) => Ok(NurseryUser(row)),
            AuthIdentity::Buyer(_) => Err(AuthError::WrongRole),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn header(s: &str) -> HeaderValue {
        HeaderValue::from_str(s).unwrap()
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(parse_bearer(None), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_empty_header_value() {
        let value = header("");
        assert_eq!(parse_bearer(Some(&value)), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_basic_scheme_rejected_regardless_of_token() {
        let value = header("Basic abc123");
        assert_eq!(parse_bearer(Some(&value)), Err(AuthError::MalformedHeader));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for raw in ["bearer tok", "Bearer tok", "BEARER tok", "bEaReR tok"] {
            let value = header(raw);
            assert_eq!(parse_bearer(Some(&value)), Ok("tok"));
        }
    }

    #[test]
    fn test_bearer_without_token_is_empty_credential() {
        let value = header("Bearer");
        assert_eq!(parse_bearer(Some(&value)), Err(AuthError::EmptyCredential));
    }

    #[test]
    fn test_three_parts_is_too_many() {
        let value = header("Bearer one two");
        assert_eq!(parse_bearer(Some(&value)), Err(AuthError::TooManyParts));
    }

    #[test]
    fn test_null_token_rejected() {
        let value = header("Bearer null");
        assert_eq!(parse_bearer(Some(&value)), Err(AuthError::NullToken));
    }

    #[test]
    fn test_decode_failures_map_one_to_one() {
        let cases = [
            (TokenError::Malformed, AuthError::InvalidToken),
            (TokenError::BadSignature, AuthError::InvalidSignature),
            (TokenError::Expired, AuthError::TokenExpired),
            (TokenError::InvalidAudience, AuthError::InvalidAudience),
            (TokenError::InvalidKey, AuthError::InvalidKey),
            (TokenError::Other, AuthError::InvalidTokenGeneric),
        ];
        for (token_err, auth_err) in cases {
            assert_eq!(AuthError::from(token_err), auth_err);
        }
    }

    #[test]
    fn test_wrong_role_is_forbidden_everything_else_unauthorized() {
        assert_eq!(AuthError::WrongRole.status_code(), StatusCode::FORBIDDEN);
        for err in [
            AuthError::MissingHeader,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
            AuthError::SubjectNotFound,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_header_failure_messages() {
        use serde_json::json;
        assert_eq!(AuthError::MissingHeader.message(), json!("Invalid token header."));
        assert_eq!(
            AuthError::MalformedHeader.message(),
            json!("Invalid token header.")
        );
        assert_eq!(
            AuthError::EmptyCredential.message(),
            json!("Invalid token header. No credentials provided.")
        );
        assert_eq!(AuthError::TooManyParts.message(), json!("Invalid token header"));
        assert_eq!(AuthError::NullToken.message(), json!("Null token not allowed"));
    }

    #[test]
    fn test_wire_error_tokens() {
        use serde_json::json;
        assert_eq!(
            AuthError::SubjectNotFound.message(),
            json!({"error": "invalid_User_Token"})
        );
        assert_eq!(
            AuthError::TokenExpired.message(),
            json!({"error": "Token_Expired"})
        );
        assert_eq!(
            AuthError::InvalidSignature.message(),
            json!({"error": "Invalid_Signature"})
        );
    }
}
