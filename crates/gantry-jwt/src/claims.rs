//! Token claims and the recognized role set.

use serde::{Deserialize, Serialize};

/// Claims carried by a gateway bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated employee identifier.
    pub sub: String,

    /// Role claim; authorization only honors values in [`Role`].
    pub role: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,
}

/// The closed set of roles the gateway recognizes.
///
/// A token whose role claim is not one of these values authenticates
/// nobody, regardless of its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Worker,
    Manager,
}

impl Role {
    /// Parse a role claim. Matching is exact; unknown values yield `None`.
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "ADMIN" => Some(Self::Admin),
            "WORKER" => Some(Self::Worker),
            "MANAGER" => Some(Self::Manager),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Worker => "WORKER",
            Self::Manager => "MANAGER",
        }
    }

    /// The authority string installed for this role, e.g. `ROLE_ADMIN`.
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.as_str())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
