use std::{convert::Infallible, fmt, str::FromStr};

/// The mechanism to be used for returning Authorization Response parameters
/// from the Authorization Endpoint.
///
/// Defined in [OAuth 2.0 Multiple Response Type Encoding Practices](https://openid.net/specs/oauth-v2-multiple-response-types-1_0.html#ResponseModes).
/// Extension modes (for example `query.jwt`) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseMode {
    /// Parameters are encoded in the query string added to the `redirect_uri`.
    Query,

    /// Parameters are encoded in the fragment added to the `redirect_uri`.
    Fragment,

    /// Parameters are encoded as HTML form values that are auto-submitted in
    /// the User Agent.
    ///
    /// Defined in [OAuth 2.0 Form Post Response Mode](https://openid.net/specs/oauth-v2-form-post-response-mode-1_0.html).
    FormPost,

    /// Any other response mode
    Other(String),
}

impl ResponseMode {
    /// The value as it appears in the `response_mode` parameter
    pub fn as_str(&self) -> &str {
        match self {
            ResponseMode::Query => "query",
            ResponseMode::Fragment => "fragment",
            ResponseMode::FormPost => "form_post",
            ResponseMode::Other(s) => s,
        }
    }
}

impl From<&str> for ResponseMode {
    fn from(s: &str) -> Self {
        match s {
            "query" => Self::Query,
            "fragment" => Self::Fragment,
            "form_post" => Self::FormPost,
            s => Self::Other(s.to_string()),
        }
    }
}

impl FromStr for ResponseMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
