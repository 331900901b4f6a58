//! # Flow & Response Mode
//! Which protocol flow a [ResponseType] implies and how its response is
//! delivered when no `response_mode` is requested.

use std::fmt;

use crate::types::{ResponseMode, ResponseType};

/// The protocol flow implied by a response type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    /// `code` alone: everything is returned from the token endpoint
    Code,
    /// No `code`: tokens are returned directly from the authorization endpoint
    Implicit,
    /// `code` together with `token` and/or `id_token`
    Hybrid,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::Code => f.write_str("code"),
            Flow::Implicit => f.write_str("implicit"),
            Flow::Hybrid => f.write_str("hybrid"),
        }
    }
}

/// The flow implied by `response_type`
pub fn implied_flow(response_type: &ResponseType) -> Flow {
    if !response_type.has_code() {
        Flow::Implicit
    } else if response_type.has_token() || response_type.has_id_token() {
        Flow::Hybrid
    } else {
        Flow::Code
    }
}

/// The response mode to use. An explicit mode always wins, otherwise the
/// [default for the response type](https://openid.net/specs/oauth-v2-multiple-response-types-1_0.html#ResponseModes):
/// `query` for the code flow, `fragment` for everything else.
pub fn implied_response_mode(
    explicit: Option<&ResponseMode>,
    response_type: &ResponseType,
) -> ResponseMode {
    if let Some(mode) = explicit {
        return mode.clone();
    }

    match implied_flow(response_type) {
        Flow::Code => ResponseMode::Query,
        Flow::Implicit | Flow::Hybrid => ResponseMode::Fragment,
    }
}
