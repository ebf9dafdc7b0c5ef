// Authentication module
// Decision: Stateless bearer tokens only, no refresh tokens or revocation.
// A token is live until its expiry; logout is a client-side concern.

pub mod config;
pub mod middleware;
pub mod token;

pub use config::AuthConfig;
pub use middleware::{AuthError, AuthIdentity, AuthState, AuthUser, BuyerUser, NurseryUser};
pub use token::{Claims, TokenCodec, TokenError};
