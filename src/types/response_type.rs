//! [Response types](https://openid.net/specs/openid-connect-core-1_0.html#Authentication)
//! requested at the authorization endpoint.

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::helpers::is_nqchar_token;

/// An error encountered when trying to parse an invalid [ResponseType].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid response type")]
pub struct InvalidResponseType;

/// A single token of a [ResponseType].
///
/// Tokens that are not defined by OAuth 2.0 or OpenID Connect are kept as
/// [ResponseTypeToken::Unknown] so that extension response types pass through.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResponseTypeToken {
    /// `code`
    Code,
    /// `id_token`
    IdToken,
    /// `token`
    Token,
    /// Any other token
    Unknown(String),
}

impl fmt::Display for ResponseTypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseTypeToken::Code => f.write_str("code"),
            ResponseTypeToken::IdToken => f.write_str("id_token"),
            ResponseTypeToken::Token => f.write_str("token"),
            ResponseTypeToken::Unknown(s) => f.write_str(s),
        }
    }
}

impl FromStr for ResponseTypeToken {
    type Err = InvalidResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "id_token" => Ok(Self::IdToken),
            "token" => Ok(Self::Token),
            s if is_nqchar_token(s) => Ok(Self::Unknown(s.to_string())),
            _ => Err(InvalidResponseType),
        }
    }
}

/// An [OAuth 2.0 `response_type`](https://www.rfc-editor.org/rfc/rfc6749#section-3.1.1)
/// value: an unordered set of [ResponseTypeToken]s.
///
/// Parsing an empty value fails; a response type is never empty once it is
/// part of a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseType(BTreeSet<ResponseTypeToken>);

impl std::ops::Deref for ResponseType {
    type Target = BTreeSet<ResponseTypeToken>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ResponseType {
    /// `code`
    pub fn code() -> Self {
        [ResponseTypeToken::Code].into_iter().collect()
    }

    /// `id_token`
    pub fn id_token() -> Self {
        [ResponseTypeToken::IdToken].into_iter().collect()
    }

    /// `token`
    pub fn token() -> Self {
        [ResponseTypeToken::Token].into_iter().collect()
    }

    /// Whether this response type requests a code.
    pub fn has_code(&self) -> bool {
        self.0.contains(&ResponseTypeToken::Code)
    }

    /// Whether this response type requests an ID token.
    pub fn has_id_token(&self) -> bool {
        self.0.contains(&ResponseTypeToken::IdToken)
    }

    /// Whether this response type requests an access token.
    pub fn has_token(&self) -> bool {
        self.0.contains(&ResponseTypeToken::Token)
    }
}

impl FromStr for ResponseType {
    type Err = InvalidResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split_ascii_whitespace()
            .map(ResponseTypeToken::from_str)
            .collect::<Result<BTreeSet<_>, _>>()?;

        if tokens.is_empty() {
            return Err(InvalidResponseType);
        }

        Ok(Self(tokens))
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter();

        // First item shouldn't have a leading space
        if let Some(first) = iter.next() {
            first.fmt(f)?;
        }

        for item in iter {
            write!(f, " {item}")?;
        }

        Ok(())
    }
}

impl FromIterator<ResponseTypeToken> for ResponseType {
    fn from_iter<T: IntoIterator<Item = ResponseTypeToken>>(iter: T) -> Self {
        Self(BTreeSet::from_iter(iter))
    }
}
