use std::{fmt, str::FromStr};

use crate::helpers::is_nqchar_token;

/// The `openid` scope value
pub const OPENID: &str = "openid";

/// Returned when a scope value contains illegal characters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scope token: {0:?}")]
pub struct InvalidScope(pub String);

/// # Scope
/// An ordered set of [scope tokens](https://www.rfc-editor.org/rfc/rfc6749#section-3.3).
/// Repeated tokens are collapsed, the first occurrence keeps its position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Scope(Vec<String>);

impl Scope {
    /// Creates an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `token` if it is not already present
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.0.push(token);
        true
    }

    /// Whether `token` is part of this scope
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// Iterates over the tokens in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no tokens
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Scope {
    type Err = InvalidScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scope = Scope::new();

        for token in s.split(' ').filter(|t| !t.is_empty()) {
            if !is_nqchar_token(token) {
                return Err(InvalidScope(token.to_string()));
            }
            scope.insert(token);
        }

        Ok(scope)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl<T: Into<String>> FromIterator<T> for Scope {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for token in iter {
            scope.insert(token);
        }
        scope
    }
}
