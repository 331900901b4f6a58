use url::Url;

use crate::{
    codec::Parameters,
    flow::implied_response_mode,
    types::{ErrorObject, ResponseMode, ResponseType, ResponseTypeToken},
};

use super::AccessToken;

/// # AuthorizationSuccessResponse
/// The artifacts issued by the authorization endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationSuccessResponse {
    /// Where the response is delivered
    pub redirect_uri: Url,
    /// `state` echoed from the request
    pub state: Option<String>,
    /// `code`
    pub code: Option<String>,
    /// `access_token`, `token_type`, `expires_in` and `scope`
    pub access_token: Option<AccessToken>,
    /// `id_token`
    pub id_token: Option<String>,
    /// `session_state` of [OpenID Connect Session Management](https://openid.net/specs/openid-connect-session-1_0.html)
    pub session_state: Option<String>,
    /// `iss` of [RFC 9207](https://www.rfc-editor.org/rfc/rfc9207)
    pub iss: Option<Url>,
    /// Explicit response mode, see [AuthorizationResponse::implied_response_mode]
    pub response_mode: Option<ResponseMode>,
    /// Extension parameters
    pub custom_params: Parameters,
}

impl AuthorizationSuccessResponse {
    /// An empty success response to `redirect_uri`
    pub fn new(redirect_uri: Url, state: Option<String>) -> Self {
        Self {
            redirect_uri,
            state,
            code: None,
            access_token: None,
            id_token: None,
            session_state: None,
            iss: None,
            response_mode: None,
            custom_params: Parameters::new(),
        }
    }

    /// The response type these artifacts answer, [None] if no artifact is present
    pub fn implied_response_type(&self) -> Option<ResponseType> {
        let mut tokens = vec![];

        if self.code.is_some() {
            tokens.push(ResponseTypeToken::Code);
        }
        if self.access_token.is_some() {
            tokens.push(ResponseTypeToken::Token);
        }
        if self.id_token.is_some() {
            tokens.push(ResponseTypeToken::IdToken);
        }

        (!tokens.is_empty()).then(|| tokens.into_iter().collect())
    }
}

/// # AuthorizationErrorResponse
/// An error returned to the client's redirect URI
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationErrorResponse {
    /// Where the response is delivered
    pub redirect_uri: Url,
    /// `state` echoed from the request
    pub state: Option<String>,
    /// `error`, `error_description` and `error_uri`
    pub error: ErrorObject,
    /// `response_type` of the failed request, used to pick the default response mode
    pub response_type: Option<ResponseType>,
    /// Explicit response mode of the failed request
    pub response_mode: Option<ResponseMode>,
    /// `iss` of [RFC 9207](https://www.rfc-editor.org/rfc/rfc9207)
    pub iss: Option<Url>,
}

impl AuthorizationErrorResponse {
    /// An error response to `redirect_uri`
    pub fn new(redirect_uri: Url, error: ErrorObject, state: Option<String>) -> Self {
        Self {
            redirect_uri,
            state,
            error,
            response_type: None,
            response_mode: None,
            iss: None,
        }
    }
}

/// # AuthorizationResponse
/// A response of the authorization endpoint: success or error
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorizationResponse {
    /// See [AuthorizationSuccessResponse]
    Success(AuthorizationSuccessResponse),
    /// See [AuthorizationErrorResponse]
    Error(AuthorizationErrorResponse),
}

impl From<AuthorizationSuccessResponse> for AuthorizationResponse {
    fn from(response: AuthorizationSuccessResponse) -> Self {
        Self::Success(response)
    }
}

impl From<AuthorizationErrorResponse> for AuthorizationResponse {
    fn from(response: AuthorizationErrorResponse) -> Self {
        Self::Error(response)
    }
}

impl AuthorizationResponse {
    /// Whether this is a success response
    pub fn indicates_success(&self) -> bool {
        matches!(self, AuthorizationResponse::Success(_))
    }

    /// The success response, if it is one
    pub fn as_success(&self) -> Option<&AuthorizationSuccessResponse> {
        match self {
            AuthorizationResponse::Success(s) => Some(s),
            AuthorizationResponse::Error(_) => None,
        }
    }

    /// The error response, if it is one
    pub fn as_error(&self) -> Option<&AuthorizationErrorResponse> {
        match self {
            AuthorizationResponse::Success(_) => None,
            AuthorizationResponse::Error(e) => Some(e),
        }
    }

    /// Where the response is delivered
    pub fn redirect_uri(&self) -> &Url {
        match self {
            AuthorizationResponse::Success(s) => &s.redirect_uri,
            AuthorizationResponse::Error(e) => &e.redirect_uri,
        }
    }

    /// `state` echoed from the request
    pub fn state(&self) -> Option<&str> {
        match self {
            AuthorizationResponse::Success(s) => s.state.as_deref(),
            AuthorizationResponse::Error(e) => e.state.as_deref(),
        }
    }

    /// `iss` of the response
    pub fn iss(&self) -> Option<&Url> {
        match self {
            AuthorizationResponse::Success(s) => s.iss.as_ref(),
            AuthorizationResponse::Error(e) => e.iss.as_ref(),
        }
    }

    /// Explicit response mode
    pub fn response_mode(&self) -> Option<&ResponseMode> {
        match self {
            AuthorizationResponse::Success(s) => s.response_mode.as_ref(),
            AuthorizationResponse::Error(e) => e.response_mode.as_ref(),
        }
    }

    /// The response mode the response is delivered with.
    ///
    /// An explicit mode wins. Otherwise a success uses the default of the
    /// response type implied by its artifacts and an error the default of the
    /// response type of the failed request. `query` when neither is known.
    pub fn implied_response_mode(&self) -> ResponseMode {
        let response_type = match self {
            AuthorizationResponse::Success(s) => s.implied_response_type(),
            AuthorizationResponse::Error(e) => e.response_type.clone(),
        };

        match response_type {
            Some(rt) => implied_response_mode(self.response_mode(), &rt),
            None => self.response_mode().cloned().unwrap_or(ResponseMode::Query),
        }
    }
}
