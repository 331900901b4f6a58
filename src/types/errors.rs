use std::fmt;

use url::Url;

use crate::response::AuthorizationErrorResponse;

use super::{ErrorObject, ResponseMode, ResponseType};

/// # ErrorContext
/// What was known about a request when it failed: enough to address an
/// error response to the client, when the redirect URI is known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// `client_id` of the failed request
    pub client_id: Option<String>,
    /// `redirect_uri` of the failed request
    pub redirect_uri: Option<Url>,
    /// `state` of the failed request
    pub state: Option<String>,
    /// `response_type` of the failed request
    pub response_type: Option<ResponseType>,
    /// Explicit `response_mode` of the failed request
    pub response_mode: Option<ResponseMode>,
}

/// # ParseError
/// Malformed or non compliant authorization message.
///
/// Carries the matching [ErrorObject] and the request context that had been
/// parsed before the failing parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    message: String,
    error_object: Option<ErrorObject>,
    context: ErrorContext,
}

impl ParseError {
    /// Creates a new [ParseError] without an error object or context
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_object: None,
            context: ErrorContext::default(),
        }
    }

    /// Creates a new [ParseError] whose error object description is the message
    pub(crate) fn with_error(
        message: impl Into<String>,
        error_object: ErrorObject,
        context: &ErrorContext,
    ) -> Self {
        let message = message.into();
        Self {
            error_object: Some(error_object.with_description(message.as_str())),
            message,
            context: context.clone(),
        }
    }

    /// Human readable reason
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error to report to the client
    pub fn error_object(&self) -> Option<&ErrorObject> {
        self.error_object.as_ref()
    }

    /// Everything known about the failed request
    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// `client_id` of the failed request, if it had been parsed
    pub fn client_id(&self) -> Option<&str> {
        self.context.client_id.as_deref()
    }

    /// `redirect_uri` of the failed request, if it had been parsed
    pub fn redirect_uri(&self) -> Option<&Url> {
        self.context.redirect_uri.as_ref()
    }

    /// `state` of the failed request, if it had been parsed
    pub fn state(&self) -> Option<&str> {
        self.context.state.as_deref()
    }

    /// `response_mode` of the failed request, if it had been parsed
    pub fn response_mode(&self) -> Option<&ResponseMode> {
        self.context.response_mode.as_ref()
    }

    /// An error response addressed to the client's redirect URI.
    ///
    /// Returns [None] when the redirect URI is not known; the caller must then
    /// answer the user agent directly instead of redirecting.
    pub fn error_response(&self) -> Option<AuthorizationErrorResponse> {
        let redirect_uri = self.context.redirect_uri.clone()?;
        let error = self
            .error_object
            .clone()
            .unwrap_or(ErrorObject::INVALID_REQUEST);

        let mut response =
            AuthorizationErrorResponse::new(redirect_uri, error, self.context.state.clone());
        response.response_type = self.context.response_type.clone();
        response.response_mode = self.context.response_mode.clone();

        Some(response)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}

/// Why a request object could not be resolved
#[derive(Debug)]
pub enum ResolveErrorKind {
    /// A `request_uri` was sent but no resource retriever is configured
    RequestUriNotSupported,
    /// The request object could not be fetched from its `request_uri`
    Fetch,
    /// The request object failed decryption or signature validation
    InvalidRequestObject,
    /// The request produced by merging the request object claims is invalid
    InvalidMergedRequest(ParseError),
}

/// # ResolveError
/// A request object could not be fetched, validated or merged.
///
/// The [ResolveErrorKind] keeps the three causes apart: fetch and crypto
/// failures are server side conditions that are not redirected to the
/// client, only [ResolveErrorKind::InvalidMergedRequest] is.
#[derive(Debug)]
pub struct ResolveError {
    kind: ResolveErrorKind,
    message: String,
    error_object: ErrorObject,
    context: ErrorContext,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ResolveError {
    pub(crate) fn new(
        kind: ResolveErrorKind,
        message: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        let message = message.into();
        let error_object = match &kind {
            ResolveErrorKind::RequestUriNotSupported => ErrorObject::REQUEST_URI_NOT_SUPPORTED,
            ResolveErrorKind::Fetch => ErrorObject::INVALID_REQUEST_URI,
            ResolveErrorKind::InvalidRequestObject => ErrorObject::INVALID_REQUEST_OBJECT,
            ResolveErrorKind::InvalidMergedRequest(e) => e
                .error_object()
                .cloned()
                .unwrap_or(ErrorObject::INVALID_REQUEST),
        }
        .with_description(message.as_str());

        Self {
            kind,
            message,
            error_object,
            context,
            source: None,
        }
    }

    pub(crate) fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The failure kind
    pub fn kind(&self) -> &ResolveErrorKind {
        &self.kind
    }

    /// Human readable reason
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error to report
    pub fn error_object(&self) -> &ErrorObject {
        &self.error_object
    }

    /// Context of the request being resolved. For a merged request failure
    /// this is the context of the merged request.
    pub fn context(&self) -> &ErrorContext {
        match &self.kind {
            ResolveErrorKind::InvalidMergedRequest(e) => e.context(),
            _ => &self.context,
        }
    }

    /// `client_id` of the request being resolved
    pub fn client_id(&self) -> Option<&str> {
        self.context().client_id.as_deref()
    }

    /// `redirect_uri` of the request being resolved
    pub fn redirect_uri(&self) -> Option<&Url> {
        self.context().redirect_uri.as_ref()
    }

    /// `state` of the request being resolved
    pub fn state(&self) -> Option<&str> {
        self.context().state.as_deref()
    }

    /// Whether this failure was caused by the request object retrieval
    pub fn is_fetch_error(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::Fetch)
    }

    /// Whether this failure was caused by the request object validation
    pub fn is_invalid_request_object(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::InvalidRequestObject)
    }

    /// Whether the merged request failed to validate
    pub fn is_invalid_merged_request(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::InvalidMergedRequest(_))
    }

    /// Whether `request_uri` is unsupported by this resolver
    pub fn is_request_uri_not_supported(&self) -> bool {
        matches!(self.kind, ResolveErrorKind::RequestUriNotSupported)
    }

    /// Whether it is safe to answer with a redirect to the client.
    ///
    /// Only merged request failures qualify: their redirect URI was asserted
    /// by a validated request object.
    pub fn is_redirectable(&self) -> bool {
        self.is_invalid_merged_request() && self.redirect_uri().is_some()
    }

    /// An error response addressed to the client, when [ResolveError::is_redirectable]
    pub fn error_response(&self) -> Option<AuthorizationErrorResponse> {
        match &self.kind {
            ResolveErrorKind::InvalidMergedRequest(e) => e.error_response(),
            _ => None,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ResolveErrorKind::InvalidMergedRequest(e) => Some(e),
            _ => self
                .source
                .as_deref()
                .map(|e| e as &(dyn std::error::Error + 'static)),
        }
    }
}

/// # SerializeError
/// An authorization message that cannot be rendered, for example a request
/// without endpoint or a response in an unsupported response mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SerializeError {
    message: String,
}

impl SerializeError {
    /// Creates a new [SerializeError]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Human readable reason
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// # AuthzError
/// Any error of this crate
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// See [ParseError]
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// See [ResolveError]
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// See [SerializeError]
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl AuthzError {
    /// Returns if the error is a [ParseError]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, AuthzError::Parse(_))
    }

    /// Returns if the error is a [ResolveError]
    pub fn is_resolve_error(&self) -> bool {
        matches!(self, AuthzError::Resolve(_))
    }

    /// Returns if the error is a [SerializeError]
    pub fn is_serialize_error(&self) -> bool {
        matches!(self, AuthzError::Serialize(_))
    }

    /// The error to report, if any
    pub fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            AuthzError::Parse(e) => e.error_object(),
            AuthzError::Resolve(e) => Some(e.error_object()),
            AuthzError::Serialize(_) => None,
        }
    }

    /// An error response addressed to the client, when it is safe to redirect
    pub fn error_response(&self) -> Option<AuthorizationErrorResponse> {
        match self {
            AuthzError::Parse(e) => e.error_response(),
            AuthzError::Resolve(e) => e.error_response(),
            AuthzError::Serialize(_) => None,
        }
    }
}

/// Result alias used across the crate
pub type AuthzResult<T> = Result<T, AuthzError>;
