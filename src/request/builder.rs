use url::Url;

use crate::{
    codec::Parameters,
    types::{
        ClaimsRequest, CodeChallenge, Display, LangTag, ParseError, Prompt, RequestObjectRef,
        ResponseMode, ResponseType, Scope,
    },
};

use super::{validator, AuthorizationRequest, RequestProfile};

/// # AuthorizationRequestBuilder
/// Builds an [AuthorizationRequest] field by field.
/// [AuthorizationRequestBuilder::build] runs the same checks as the parser.
///
/// ```rust
/// # use openid_authz::request::AuthorizationRequestBuilder;
/// # use openid_authz::types::ResponseType;
/// # use url::Url;
/// let request = AuthorizationRequestBuilder::openid(
///     ResponseType::code(),
///     "client",
///     "openid email".parse().unwrap(),
///     Url::parse("https://rp.example.com/cb").unwrap(),
/// )
/// .state("af0ifjsldkj")
/// .build()
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AuthorizationRequestBuilder {
    request: AuthorizationRequest,
}

impl AuthorizationRequestBuilder {
    /// Starts an OAuth 2.0 authorization request
    pub fn new(response_type: ResponseType, client_id: impl Into<String>) -> Self {
        Self {
            request: AuthorizationRequest::new(
                RequestProfile::OAuth2,
                response_type,
                client_id.into(),
            ),
        }
    }

    /// Starts an OpenID Connect authentication request
    pub fn openid(
        response_type: ResponseType,
        client_id: impl Into<String>,
        scope: Scope,
        redirect_uri: Url,
    ) -> Self {
        let mut request =
            AuthorizationRequest::new(RequestProfile::OpenId, response_type, client_id.into());
        request.scope = Some(scope);
        request.redirect_uri = Some(redirect_uri);

        Self { request }
    }

    /// Authorization endpoint the request is sent to
    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.request.endpoint = Some(endpoint);
        self
    }

    /// Sets the `redirect_uri`
    pub fn redirect_uri(mut self, redirect_uri: Url) -> Self {
        self.request.redirect_uri = Some(redirect_uri);
        self
    }

    /// Sets the `scope`
    pub fn scope(mut self, scope: Scope) -> Self {
        self.request.scope = Some(scope);
        self
    }

    /// Sets the `state`
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.request.state = Some(state.into());
        self
    }

    /// Sets an explicit `response_mode`
    pub fn response_mode(mut self, response_mode: ResponseMode) -> Self {
        self.request.response_mode = Some(response_mode);
        self
    }

    /// Sets the PKCE `code_challenge` and `code_challenge_method`
    pub fn code_challenge(mut self, code_challenge: CodeChallenge) -> Self {
        self.request.code_challenge = Some(code_challenge);
        self
    }

    /// Adds a `resource` indicator
    pub fn resource(mut self, resource: Url) -> Self {
        self.request.resources.push(resource);
        self
    }

    /// Sets the `nonce`
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.request.nonce = Some(nonce.into());
        self
    }

    /// Sets the `display`
    pub fn display(mut self, display: Display) -> Self {
        self.request.display = Some(display);
        self
    }

    /// Sets the `prompt`
    pub fn prompt(mut self, prompt: Prompt) -> Self {
        self.request.prompt = Some(prompt);
        self
    }

    /// Sets `max_age`, in seconds
    pub fn max_age(mut self, max_age: u64) -> Self {
        self.request.max_age = Some(max_age);
        self
    }

    /// Sets `ui_locales`
    pub fn ui_locales(mut self, ui_locales: Vec<LangTag>) -> Self {
        self.request.ui_locales = ui_locales;
        self
    }

    /// Sets `claims_locales`
    pub fn claims_locales(mut self, claims_locales: Vec<LangTag>) -> Self {
        self.request.claims_locales = claims_locales;
        self
    }

    /// Sets the `id_token_hint`
    pub fn id_token_hint(mut self, id_token_hint: impl Into<String>) -> Self {
        self.request.id_token_hint = Some(id_token_hint.into());
        self
    }

    /// Sets the `login_hint`
    pub fn login_hint(mut self, login_hint: impl Into<String>) -> Self {
        self.request.login_hint = Some(login_hint.into());
        self
    }

    /// Sets `acr_values`
    pub fn acr_values(mut self, acr_values: Vec<String>) -> Self {
        self.request.acr_values = acr_values;
        self
    }

    /// Sets the `claims` request. An empty request leaves `claims` unset.
    pub fn claims(mut self, claims: ClaimsRequest) -> Self {
        self.request.claims = Some(claims).filter(|claims| !claims.is_empty());
        self
    }

    /// Passes a request object by value in `request`
    pub fn request_object(mut self, jwt: impl Into<String>) -> Self {
        self.request.request_object = RequestObjectRef::ByValue(jwt.into());
        self
    }

    /// Passes a request object by reference in `request_uri`
    pub fn request_uri(mut self, request_uri: Url) -> Self {
        self.request.request_object = RequestObjectRef::ByReference(request_uri);
        self
    }

    /// Adds an extension parameter. Registered parameter names are ignored,
    /// use their dedicated setters.
    pub fn custom_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if !super::request_codec::is_registered_param(&name) {
            self.request.custom_params.insert(name, value.into());
        }
        self
    }

    /// Adds several extension parameters, see [AuthorizationRequestBuilder::custom_param]
    pub fn custom_params(mut self, params: Parameters) -> Self {
        for (name, value) in params {
            self = self.custom_param(name, value);
        }
        self
    }

    /// Checks the request and returns it
    pub fn build(self) -> Result<AuthorizationRequest, ParseError> {
        validator::validate(&self.request)?;
        Ok(self.request)
    }
}

impl AuthorizationRequest {
    /// A builder initialized with the fields of this request
    pub fn to_builder(&self) -> AuthorizationRequestBuilder {
        AuthorizationRequestBuilder {
            request: self.clone(),
        }
    }
}
