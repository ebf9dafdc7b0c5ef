// User DTOs: buyers and nurseries are two disjoint account populations.
//
// The two roles share no identity space; a buyer id and a nursery id can
// collide in value without ever referring to the same account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role carried inside the bearer token.
///
/// Buyer and nursery are peers: neither implies the other's permissions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Nursery,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Buyer => write!(f, "buyer"),
            Role::Nursery => write!(f, "nursery"),
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    // Strict: an unrecognized role tag in a claim must be an error, never a
    // silent default to either role.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "nursery" => Ok(Role::Nursery),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl std::fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// Nursery rating bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::One => write!(f, "ONE"),
            Rating::Two => write!(f, "TWO"),
            Rating::Three => write!(f, "THREE"),
            Rating::Four => write!(f, "FOUR"),
            Rating::Five => write!(f, "FIVE"),
        }
    }
}

impl From<&str> for Rating {
    fn from(s: &str) -> Self {
        match s {
            "TWO" => Rating::Two,
            "THREE" => Rating::Three,
            "FOUR" => Rating::Four,
            "FIVE" => Rating::Five,
            _ => Rating::One,
        }
    }
}

/// Buyer profile as returned to the authenticated owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Buyer {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Nursery profile as returned to the authenticated owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Nursery {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub about: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

/// Request to register a buyer account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterBuyerRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Request to register a nursery account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterNurseryRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// Login request, shared by both roles.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginData {
    pub user_id: Uuid,
    pub jwt_token: String,
}

/// Partial buyer profile update. Email and password are immutable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBuyerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Partial nursery profile update. Email, password, name and rating are
/// immutable here; name changes require out-of-band verification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNurseryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!("buyer".parse::<Role>().unwrap(), Role::Buyer);
        assert_eq!("nursery".parse::<Role>().unwrap(), Role::Nursery);
        assert_eq!(Role::Buyer.to_string(), "buyer");
        assert_eq!(Role::Nursery.to_string(), "nursery");
    }

    #[test]
    fn test_unknown_role_is_error() {
        assert!("admin".parse::<Role>().is_err());
        assert!("Buyer".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Nursery).unwrap(), "\"nursery\"");
        let role: Role = serde_json::from_str("\"buyer\"").unwrap();
        assert_eq!(role, Role::Buyer);
    }

    #[test]
    fn test_rating_from_str_defaults_to_one() {
        assert_eq!(Rating::from("FIVE"), Rating::Five);
        assert_eq!(Rating::from("bogus"), Rating::One);
    }
}
