use std::{fmt, str::FromStr};

use crate::types::Scope;

/// The `token_type` of an access token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AccessTokenType {
    /// `Bearer`
    #[default]
    Bearer,
    /// `DPoP`
    DPoP,
    /// Any other token type
    Other(String),
}

impl FromStr for AccessTokenType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // token types are case insensitive (RFC 6749 §7.1)
        Ok(if s.eq_ignore_ascii_case("bearer") {
            Self::Bearer
        } else if s.eq_ignore_ascii_case("dpop") {
            Self::DPoP
        } else {
            Self::Other(s.to_string())
        })
    }
}

impl fmt::Display for AccessTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessTokenType::Bearer => f.write_str("Bearer"),
            AccessTokenType::DPoP => f.write_str("DPoP"),
            AccessTokenType::Other(t) => f.write_str(t),
        }
    }
}

/// # AccessToken
/// An access token issued directly from the authorization endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    /// `access_token`
    pub value: String,
    /// `token_type`
    pub token_type: AccessTokenType,
    /// `expires_in`, in seconds
    pub expires_in: Option<u64>,
    /// `scope`, when it differs from the requested scope
    pub scope: Option<Scope>,
}

impl AccessToken {
    /// A bearer token without lifetime or scope
    pub fn bearer(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            token_type: AccessTokenType::Bearer,
            expires_in: None,
            scope: None,
        }
    }

    /// Sets `expires_in`
    pub fn with_expires_in(mut self, expires_in: u64) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Sets `scope`
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }
}
