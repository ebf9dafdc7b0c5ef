// Authentication configuration loaded from environment variables.
// Decision: The signing secret is required configuration with no default;
// the process refuses to start without it rather than signing with a
// well-known value.

use anyhow::{Context, Result};
use chrono::Duration;

const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Token signing configuration, injected into the codec at construction.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HS256 signing secret.
    pub secret: String,
    /// Token lifetime, applied per issuance.
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// - `JWT_SECRET` (required)
    /// - `TOKEN_TTL_DAYS` (default: 30)
    pub fn from_env() -> Result<Self> {
        let secret =
            std::env::var("JWT_SECRET").context("JWT_SECRET environment variable required")?;
        if secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let ttl_days = match std::env::var("TOKEN_TTL_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|d| *d > 0)
                .with_context(|| format!("invalid TOKEN_TTL_DAYS: {raw}"))?,
            Err(_) => DEFAULT_TOKEN_TTL_DAYS,
        };

        Ok(Self {
            secret,
            token_ttl: Duration::days(ttl_days),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_thirty_days() {
        let config = AuthConfig {
            secret: "test".to_string(),
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
        };
        assert_eq!(config.token_ttl, Duration::days(30));
    }
}
