use url::Url;

use crate::{
    codec::Parameters,
    flow::{implied_flow, implied_response_mode, Flow},
    types::{
        ClaimsRequest, CodeChallenge, Display, LangTag, Prompt, RequestObjectRef, ResponseMode,
        ResponseType, Scope,
    },
};

/// The rules an authorization request is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestProfile {
    /// [OAuth 2.0](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1) authorization request
    #[default]
    OAuth2,
    /// [OpenID Connect](https://openid.net/specs/openid-connect-core-1_0.html#AuthRequest)
    /// authentication request: `openid` scope required, `nonce` required outside of
    /// the code flow.
    OpenId,
}

/// # AuthorizationRequest
/// An immutable, validated authorization request.
///
/// Obtained by parsing the parameters received at the authorization endpoint
/// ([AuthorizationRequest::parse], [AuthorizationRequest::parse_openid]) or
/// with an [`crate::request::AuthorizationRequestBuilder`].
/// Resolving a request object produces a new instance, see
/// [`crate::resolver::RequestObjectResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationRequest {
    pub(crate) endpoint: Option<Url>,
    pub(crate) profile: RequestProfile,
    pub(crate) response_type: ResponseType,
    pub(crate) client_id: String,
    pub(crate) redirect_uri: Option<Url>,
    pub(crate) scope: Option<Scope>,
    pub(crate) state: Option<String>,
    pub(crate) response_mode: Option<ResponseMode>,
    pub(crate) code_challenge: Option<CodeChallenge>,
    pub(crate) resources: Vec<Url>,
    pub(crate) nonce: Option<String>,
    pub(crate) display: Option<Display>,
    pub(crate) prompt: Option<Prompt>,
    pub(crate) max_age: Option<u64>,
    pub(crate) ui_locales: Vec<LangTag>,
    pub(crate) claims_locales: Vec<LangTag>,
    pub(crate) id_token_hint: Option<String>,
    pub(crate) login_hint: Option<String>,
    pub(crate) acr_values: Vec<String>,
    pub(crate) claims: Option<ClaimsRequest>,
    pub(crate) request_object: RequestObjectRef,
    pub(crate) custom_params: Parameters,
}

impl AuthorizationRequest {
    pub(crate) fn new(
        profile: RequestProfile,
        response_type: ResponseType,
        client_id: String,
    ) -> Self {
        Self {
            endpoint: None,
            profile,
            response_type,
            client_id,
            redirect_uri: None,
            scope: None,
            state: None,
            response_mode: None,
            code_challenge: None,
            resources: vec![],
            nonce: None,
            display: None,
            prompt: None,
            max_age: None,
            ui_locales: vec![],
            claims_locales: vec![],
            id_token_hint: None,
            login_hint: None,
            acr_values: vec![],
            claims: None,
            request_object: RequestObjectRef::None,
            custom_params: Parameters::new(),
        }
    }

    /// The flow implied by the response type
    pub fn flow(&self) -> Flow {
        implied_flow(&self.response_type)
    }

    /// The response mode the response must be delivered with: the explicit
    /// `response_mode`, or the default of the response type.
    pub fn implied_response_mode(&self) -> ResponseMode {
        implied_response_mode(self.response_mode.as_ref(), &self.response_type)
    }

    /// Whether this request still carries a request object to resolve
    pub fn has_request_object(&self) -> bool {
        self.request_object.is_some()
    }
}

/// Getters
impl AuthorizationRequest {
    /// The authorization endpoint the request is addressed to
    pub fn endpoint(&self) -> Option<&Url> {
        self.endpoint.as_ref()
    }

    /// Rules the request was checked against
    pub fn profile(&self) -> RequestProfile {
        self.profile
    }

    /// `response_type`
    pub fn response_type(&self) -> &ResponseType {
        &self.response_type
    }

    /// `client_id`
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `redirect_uri`. Only [None] while a `request_uri` is pending resolution.
    pub fn redirect_uri(&self) -> Option<&Url> {
        self.redirect_uri.as_ref()
    }

    /// `scope`
    pub fn scope(&self) -> Option<&Scope> {
        self.scope.as_ref()
    }

    /// `state`
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Explicit `response_mode`. See [AuthorizationRequest::implied_response_mode].
    pub fn response_mode(&self) -> Option<&ResponseMode> {
        self.response_mode.as_ref()
    }

    /// PKCE `code_challenge` and `code_challenge_method`
    pub fn code_challenge(&self) -> Option<&CodeChallenge> {
        self.code_challenge.as_ref()
    }

    /// `resource` indicators
    pub fn resources(&self) -> &[Url] {
        &self.resources
    }

    /// `nonce`
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    /// `display`
    pub fn display(&self) -> Option<Display> {
        self.display
    }

    /// `prompt`
    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// `max_age`, in seconds
    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    /// `ui_locales`, in order of preference
    pub fn ui_locales(&self) -> &[LangTag] {
        &self.ui_locales
    }

    /// `claims_locales`, in order of preference
    pub fn claims_locales(&self) -> &[LangTag] {
        &self.claims_locales
    }

    /// `id_token_hint`
    pub fn id_token_hint(&self) -> Option<&str> {
        self.id_token_hint.as_deref()
    }

    /// `login_hint`
    pub fn login_hint(&self) -> Option<&str> {
        self.login_hint.as_deref()
    }

    /// `acr_values`, in order of preference
    pub fn acr_values(&self) -> &[String] {
        &self.acr_values
    }

    /// `claims`
    pub fn claims(&self) -> Option<&ClaimsRequest> {
        self.claims.as_ref()
    }

    /// `request` or `request_uri`
    pub fn request_object(&self) -> &RequestObjectRef {
        &self.request_object
    }

    /// Extension parameters, in arrival order
    pub fn custom_params(&self) -> &Parameters {
        &self.custom_params
    }

    /// A single extension parameter
    pub fn custom_param(&self, name: &str) -> Option<&str> {
        self.custom_params.get(name).map(String::as_str)
    }
}
