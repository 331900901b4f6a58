use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

use url::Url;

use crate::codec::Parameters;

/// # ErrorObject
/// An OAuth 2.0 error as returned to the client: the `error` code, an optional
/// `error_description`, an optional `error_uri` and the HTTP status it maps to.
///
/// Two error objects are equal when their codes are equal, regardless of the
/// description, uri or status.
#[derive(Debug, Clone)]
pub struct ErrorObject {
    code: Cow<'static, str>,
    description: Option<Cow<'static, str>>,
    http_status: Option<u16>,
    uri: Option<Url>,
}

impl ErrorObject {
    /// Creates a new [ErrorObject] from a code
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Cow::Owned(code.into()),
            description: None,
            http_status: None,
            uri: None,
        }
    }

    const fn well_known(code: &'static str, description: &'static str, http_status: u16) -> Self {
        Self {
            code: Cow::Borrowed(code),
            description: Some(Cow::Borrowed(description)),
            http_status: Some(http_status),
            uri: None,
        }
    }

    /// `invalid_request`
    pub const INVALID_REQUEST: ErrorObject =
        ErrorObject::well_known("invalid_request", "Invalid request", 400);

    /// `unauthorized_client`
    pub const UNAUTHORIZED_CLIENT: ErrorObject =
        ErrorObject::well_known("unauthorized_client", "Unauthorized client", 400);

    /// `access_denied`
    pub const ACCESS_DENIED: ErrorObject = ErrorObject::well_known(
        "access_denied",
        "Access denied by resource owner or authorization server",
        403,
    );

    /// `unsupported_response_type`
    pub const UNSUPPORTED_RESPONSE_TYPE: ErrorObject = ErrorObject::well_known(
        "unsupported_response_type",
        "Unsupported authorization response type",
        400,
    );

    /// `invalid_scope`
    pub const INVALID_SCOPE: ErrorObject =
        ErrorObject::well_known("invalid_scope", "Invalid, unknown or malformed scope", 400);

    /// `server_error`
    pub const SERVER_ERROR: ErrorObject =
        ErrorObject::well_known("server_error", "Unexpected server error", 500);

    /// `temporarily_unavailable`
    pub const TEMPORARILY_UNAVAILABLE: ErrorObject = ErrorObject::well_known(
        "temporarily_unavailable",
        "The authorization server is temporarily unavailable",
        503,
    );

    /// `invalid_target` ([RFC 8707](https://www.rfc-editor.org/rfc/rfc8707#section-2))
    pub const INVALID_TARGET: ErrorObject =
        ErrorObject::well_known("invalid_target", "Invalid or unaccepted resource", 400);

    /// `interaction_required`
    pub const INTERACTION_REQUIRED: ErrorObject =
        ErrorObject::well_known("interaction_required", "User interaction required", 302);

    /// `login_required`
    pub const LOGIN_REQUIRED: ErrorObject =
        ErrorObject::well_known("login_required", "Login required", 302);

    /// `account_selection_required`
    pub const ACCOUNT_SELECTION_REQUIRED: ErrorObject = ErrorObject::well_known(
        "account_selection_required",
        "Session selection required",
        302,
    );

    /// `consent_required`
    pub const CONSENT_REQUIRED: ErrorObject =
        ErrorObject::well_known("consent_required", "Consent required", 302);

    /// `invalid_request_uri`
    pub const INVALID_REQUEST_URI: ErrorObject =
        ErrorObject::well_known("invalid_request_uri", "Invalid request URI", 302);

    /// `invalid_request_object`
    pub const INVALID_REQUEST_OBJECT: ErrorObject =
        ErrorObject::well_known("invalid_request_object", "Invalid request JWT", 302);

    /// `request_not_supported`
    pub const REQUEST_NOT_SUPPORTED: ErrorObject = ErrorObject::well_known(
        "request_not_supported",
        "Use of the request parameter is not supported",
        302,
    );

    /// `request_uri_not_supported`
    pub const REQUEST_URI_NOT_SUPPORTED: ErrorObject = ErrorObject::well_known(
        "request_uri_not_supported",
        "Use of the request_uri parameter is not supported",
        302,
    );

    /// `registration_not_supported`
    pub const REGISTRATION_NOT_SUPPORTED: ErrorObject = ErrorObject::well_known(
        "registration_not_supported",
        "Use of the registration parameter is not supported",
        302,
    );

    /// The error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The human readable description of the error
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// HTTP status code this error maps to
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    /// Uri to a web page with more information about the error
    pub fn uri(&self) -> Option<&Url> {
        self.uri.as_ref()
    }

    /// Returns a copy of this error with the given description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Cow::Owned(description.into()));
        self
    }

    /// Returns a copy of this error with the description suffixed by `suffix`
    #[must_use]
    pub fn append_description(self, suffix: &str) -> Self {
        let description = format!("{}{suffix}", self.description().unwrap_or_default());
        self.with_description(description)
    }

    /// Returns a copy of this error with the given HTTP status
    #[must_use]
    pub fn with_http_status(mut self, http_status: u16) -> Self {
        self.http_status = Some(http_status);
        self
    }

    /// Returns a copy of this error with the given error uri
    #[must_use]
    pub fn with_uri(mut self, uri: Url) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Appends `error`, `error_description` and `error_uri` to `params`
    pub fn to_parameters(&self, params: &mut Parameters) {
        params.insert("error".to_string(), self.code.to_string());

        if let Some(description) = &self.description {
            params.insert("error_description".to_string(), description.to_string());
        }

        if let Some(uri) = &self.uri {
            params.insert("error_uri".to_string(), uri.to_string());
        }
    }

    /// Reads an error from `error`, `error_description` and `error_uri`.
    /// Returns [None] if there is no `error` parameter.
    ///
    /// An unparseable `error_uri` is dropped rather than failing the response.
    pub fn from_parameters(params: &Parameters) -> Option<Self> {
        let code = params.get("error").filter(|c| !c.is_empty())?;

        let mut error = Self::new(code.as_str());

        if let Some(description) = params.get("error_description") {
            error = error.with_description(description.as_str());
        }

        if let Some(uri) = params.get("error_uri").and_then(|u| Url::parse(u).ok()) {
            error = error.with_uri(uri);
        }

        Some(error)
    }
}

impl PartialEq for ErrorObject {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for ErrorObject {}

impl Hash for ErrorObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {description}", self.code),
            None => f.write_str(&self.code),
        }
    }
}
