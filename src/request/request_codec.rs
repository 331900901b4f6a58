//! Mapping between [AuthorizationRequest] and its parameters, and rendering
//! for the user agent.

use std::str::FromStr;

use url::{form_urlencoded::byte_serialize, Url};

use crate::{
    codec::{self, Parameters},
    helpers::{is_compact_jwt, join_space_delimited, parse_absolute_url, split_space_delimited},
    types::{
        ClaimsRequest, CodeChallenge, CodeChallengeMethod, Display, ErrorContext, ErrorObject,
        HttpMethod, HttpRequest, LangTag, ParseError, Prompt, RequestObjectRef, ResponseMode,
        ResponseType, Scope, SerializeError,
    },
};

use super::{validator, AuthorizationRequest, RequestProfile};

const REGISTERED_PARAMS: [&str; 21] = [
    "response_type",
    "client_id",
    "redirect_uri",
    "scope",
    "state",
    "response_mode",
    "code_challenge",
    "code_challenge_method",
    "resource",
    "nonce",
    "display",
    "prompt",
    "max_age",
    "ui_locales",
    "claims_locales",
    "id_token_hint",
    "login_hint",
    "acr_values",
    "claims",
    "request",
    "request_uri",
];

/// Whether `name` is a parameter with a typed field on [AuthorizationRequest]
pub(crate) fn is_registered_param(name: &str) -> bool {
    REGISTERED_PARAMS.contains(&name)
}

/// Non empty parameter value
fn get<'a>(params: &'a Parameters, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn invalid_request(message: String, ctx: &ErrorContext) -> ParseError {
    ParseError::with_error(message, ErrorObject::INVALID_REQUEST, ctx)
}

fn parse_lang_tags(
    name: &str,
    value: Option<&str>,
    ctx: &ErrorContext,
) -> Result<Vec<LangTag>, ParseError> {
    value
        .map(split_space_delimited)
        .unwrap_or_default()
        .into_iter()
        .map(|tag| {
            LangTag::from_str(tag)
                .map_err(|e| invalid_request(format!("Invalid {name} parameter: {e}"), ctx))
        })
        .collect()
}

pub(crate) fn parse_with_profile(
    params: &Parameters,
    endpoint: Option<Url>,
    profile: RequestProfile,
) -> Result<AuthorizationRequest, ParseError> {
    let mut ctx = ErrorContext::default();

    let client_id = get(params, "client_id").unwrap_or_default();
    validator::check_client_id(client_id, &ctx)?;
    ctx.client_id = Some(client_id.to_string());

    let by_value = get(params, "request");
    let by_reference = get(params, "request_uri");

    let redirect_uri = get(params, "redirect_uri")
        .map(|v| {
            parse_absolute_url(v)
                .map_err(|e| invalid_request(format!("Invalid redirect_uri parameter: {e}"), &ctx))
        })
        .transpose()?;
    validator::check_redirect_uri(redirect_uri.as_ref(), by_reference.is_some(), &ctx)?;
    ctx.redirect_uri = redirect_uri.clone();

    let state = get(params, "state").map(String::from);
    ctx.state = state.clone();

    let response_mode = get(params, "response_mode").map(ResponseMode::from);
    ctx.response_mode = response_mode.clone();

    let response_type = match get(params, "response_type") {
        Some(v) => ResponseType::from_str(v).map_err(|_| {
            ParseError::with_error(
                format!("Unsupported response_type parameter: {v}"),
                ErrorObject::UNSUPPORTED_RESPONSE_TYPE,
                &ctx,
            )
        })?,
        None if params.contains_key("response_type") => {
            return Err(ParseError::with_error(
                "Unsupported response_type parameter: Must not be empty",
                ErrorObject::UNSUPPORTED_RESPONSE_TYPE,
                &ctx,
            ))
        }
        None => {
            return Err(invalid_request(
                "Missing response_type parameter".to_string(),
                &ctx,
            ))
        }
    };
    ctx.response_type = Some(response_type.clone());

    validator::check_response_mode(&response_type, response_mode.as_ref(), &ctx)?;

    let pending = by_value.is_some() || by_reference.is_some();

    let scope = get(params, "scope")
        .map(|v| {
            Scope::from_str(v).map_err(|e| {
                ParseError::with_error(
                    format!("Invalid scope parameter: {e}"),
                    ErrorObject::INVALID_SCOPE,
                    &ctx,
                )
            })
        })
        .transpose()?;
    validator::check_openid_scope(profile, scope.as_ref(), pending, &ctx)?;

    let nonce = get(params, "nonce").map(String::from);
    validator::check_nonce(profile, &response_type, nonce.as_deref(), pending, &ctx)?;

    let display = get(params, "display")
        .map(|v| {
            Display::from_str(v)
                .map_err(|e| invalid_request(format!("Invalid display parameter: {e}"), &ctx))
        })
        .transpose()?;

    let prompt = get(params, "prompt")
        .map(|v| {
            Prompt::from_str(v)
                .map_err(|e| invalid_request(format!("Invalid prompt parameter: {e}"), &ctx))
        })
        .transpose()?;

    let max_age = get(params, "max_age")
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                invalid_request(
                    format!("Invalid max_age parameter: {v} is not a non-negative integer"),
                    &ctx,
                )
            })
        })
        .transpose()?;

    let ui_locales = parse_lang_tags("ui_locales", get(params, "ui_locales"), &ctx)?;
    let claims_locales = parse_lang_tags("claims_locales", get(params, "claims_locales"), &ctx)?;

    let id_token_hint = match get(params, "id_token_hint") {
        Some(v) if !is_compact_jwt(v) => {
            return Err(invalid_request(
                "Invalid id_token_hint parameter: Not a JWT".to_string(),
                &ctx,
            ))
        }
        v => v.map(String::from),
    };

    let login_hint = get(params, "login_hint").map(String::from);

    let acr_values = get(params, "acr_values")
        .map(split_space_delimited)
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect();

    let claims = get(params, "claims")
        .map(|v| {
            ClaimsRequest::from_str(v)
                .map_err(|e| invalid_request(format!("Invalid claims parameter: {e}"), &ctx))
        })
        .transpose()?
        .filter(|claims| !claims.is_empty());

    let code_challenge_method = get(params, "code_challenge_method")
        .map(|v| {
            CodeChallengeMethod::from_str(v).map_err(|e| {
                invalid_request(format!("Invalid code_challenge_method parameter: {e}"), &ctx)
            })
        })
        .transpose()?;

    let code_challenge = match (get(params, "code_challenge"), code_challenge_method) {
        (Some(value), method) => Some(CodeChallenge {
            value: value.to_string(),
            method,
        }),
        (None, Some(_)) => {
            return Err(invalid_request(
                "Missing code_challenge parameter: Required with code_challenge_method"
                    .to_string(),
                &ctx,
            ))
        }
        (None, None) => None,
    };

    let mut resources = vec![];
    for v in get(params, "resource")
        .map(split_space_delimited)
        .unwrap_or_default()
    {
        let resource = parse_absolute_url(v).map_err(|e| {
            ParseError::with_error(
                format!("Invalid resource parameter: {e}"),
                ErrorObject::INVALID_TARGET,
                &ctx,
            )
        })?;
        validator::check_resource(&resource, &ctx)?;
        resources.push(resource);
    }

    let request_object = match (by_value, by_reference) {
        (Some(_), Some(_)) => {
            return Err(invalid_request(
                "Invalid request: The request and request_uri parameters must not be used together"
                    .to_string(),
                &ctx,
            ))
        }
        (Some(jwt), None) => RequestObjectRef::ByValue(jwt.to_string()),
        (None, Some(uri)) => RequestObjectRef::ByReference(parse_absolute_url(uri).map_err(
            |e| {
                ParseError::with_error(
                    format!("Invalid request_uri parameter: {e}"),
                    ErrorObject::INVALID_REQUEST_URI,
                    &ctx,
                )
            },
        )?),
        (None, None) => RequestObjectRef::None,
    };

    let custom_params = params
        .iter()
        .filter(|(k, _)| !is_registered_param(k))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Ok(AuthorizationRequest {
        endpoint,
        profile,
        response_type,
        client_id: client_id.to_string(),
        redirect_uri,
        scope,
        state,
        response_mode,
        code_challenge,
        resources,
        nonce,
        display,
        prompt,
        max_age,
        ui_locales,
        claims_locales,
        id_token_hint,
        login_hint,
        acr_values,
        claims,
        request_object,
        custom_params,
    })
}

/// The endpoint part of a request URI: no query, no fragment
fn endpoint_of(uri: &Url) -> Url {
    let mut endpoint = uri.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
}

impl AuthorizationRequest {
    /// Parses an OAuth 2.0 authorization request from its parameters.
    ///
    /// - `params` - The query or form parameters received at the endpoint
    /// - `endpoint` - The authorization endpoint, kept for rendering
    pub fn parse(params: &Parameters, endpoint: Option<Url>) -> Result<Self, ParseError> {
        parse_with_profile(params, endpoint, RequestProfile::OAuth2)
    }

    /// Parses an OpenID Connect authentication request from its parameters.
    /// See [AuthorizationRequest::parse].
    pub fn parse_openid(params: &Parameters, endpoint: Option<Url>) -> Result<Self, ParseError> {
        parse_with_profile(params, endpoint, RequestProfile::OpenId)
    }

    /// Parses an OAuth 2.0 authorization request URI. The endpoint is the URI
    /// without its query.
    pub fn parse_uri(uri: &Url) -> Result<Self, ParseError> {
        Self::parse(&codec::from_url_query(uri), Some(endpoint_of(uri)))
    }

    /// Parses an OpenID Connect authentication request URI.
    /// See [AuthorizationRequest::parse_uri].
    pub fn parse_openid_uri(uri: &Url) -> Result<Self, ParseError> {
        Self::parse_openid(&codec::from_url_query(uri), Some(endpoint_of(uri)))
    }

    /// The request parameters. Multi valued fields are space delimited,
    /// extension parameters come last in their original order.
    pub fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();

        params.insert("response_type".to_string(), self.response_type.to_string());
        params.insert("client_id".to_string(), self.client_id.clone());

        if let Some(redirect_uri) = &self.redirect_uri {
            params.insert("redirect_uri".to_string(), redirect_uri.to_string());
        }

        if let Some(scope) = &self.scope {
            params.insert("scope".to_string(), scope.to_string());
        }

        if let Some(state) = &self.state {
            params.insert("state".to_string(), state.clone());
        }

        if let Some(response_mode) = &self.response_mode {
            params.insert("response_mode".to_string(), response_mode.to_string());
        }

        if let Some(code_challenge) = &self.code_challenge {
            params.insert("code_challenge".to_string(), code_challenge.value.clone());
            if let Some(method) = code_challenge.method {
                params.insert("code_challenge_method".to_string(), method.to_string());
            }
        }

        if !self.resources.is_empty() {
            params.insert(
                "resource".to_string(),
                join_space_delimited(self.resources.iter().map(Url::as_str)),
            );
        }

        if let Some(nonce) = &self.nonce {
            params.insert("nonce".to_string(), nonce.clone());
        }

        if let Some(display) = &self.display {
            params.insert("display".to_string(), display.to_string());
        }

        if let Some(prompt) = &self.prompt {
            params.insert("prompt".to_string(), prompt.to_string());
        }

        if let Some(max_age) = self.max_age {
            params.insert("max_age".to_string(), max_age.to_string());
        }

        if !self.ui_locales.is_empty() {
            params.insert(
                "ui_locales".to_string(),
                join_space_delimited(self.ui_locales.iter().map(LangTag::as_str)),
            );
        }

        if !self.claims_locales.is_empty() {
            params.insert(
                "claims_locales".to_string(),
                join_space_delimited(self.claims_locales.iter().map(LangTag::as_str)),
            );
        }

        if let Some(id_token_hint) = &self.id_token_hint {
            params.insert("id_token_hint".to_string(), id_token_hint.clone());
        }

        if let Some(login_hint) = &self.login_hint {
            params.insert("login_hint".to_string(), login_hint.clone());
        }

        if !self.acr_values.is_empty() {
            params.insert(
                "acr_values".to_string(),
                join_space_delimited(&self.acr_values),
            );
        }

        if let Some(claims) = self.claims.as_ref().filter(|c| !c.is_empty()) {
            params.insert("claims".to_string(), claims.to_string());
        }

        match &self.request_object {
            RequestObjectRef::ByValue(jwt) => {
                params.insert("request".to_string(), jwt.clone());
            }
            RequestObjectRef::ByReference(uri) => {
                params.insert("request_uri".to_string(), uri.to_string());
            }
            RequestObjectRef::None => {}
        }

        for (k, v) in &self.custom_params {
            params.entry(k.clone()).or_insert_with(|| v.clone());
        }

        params
    }

    /// The request as a URI: the parameters are appended to the query of the
    /// endpoint.
    pub fn to_uri(&self) -> Result<Url, SerializeError> {
        let mut uri = self.endpoint.clone().ok_or_else(|| {
            SerializeError::new("The authorization endpoint of the request is not set")
        })?;

        let mut query = uri.query().map(String::from).unwrap_or_default();

        for (k, v) in &self.to_parameters() {
            if !query.is_empty() {
                query.push('&');
            }

            query.extend(byte_serialize(k.as_bytes()));
            query.push('=');

            // scope values are separated by %20 rather than +
            if k == "scope" {
                query.push_str(&urlencoding::encode(v));
            } else {
                query.extend(byte_serialize(v.as_bytes()));
            }
        }

        uri.set_query(Some(&query));

        Ok(uri)
    }

    /// The request as sent by the user agent: a `GET` to [AuthorizationRequest::to_uri],
    /// or a `POST` of the form encoded parameters to the endpoint.
    pub fn to_http_request(&self, method: HttpMethod) -> Result<HttpRequest, SerializeError> {
        match method {
            HttpMethod::GET => Ok(HttpRequest {
                url: self.to_uri()?,
                method,
                content_type: None,
                body: None,
            }),
            HttpMethod::POST => {
                let url = self.endpoint.clone().ok_or_else(|| {
                    SerializeError::new("The authorization endpoint of the request is not set")
                })?;

                Ok(HttpRequest {
                    url,
                    method,
                    content_type: Some("application/x-www-form-urlencoded".to_string()),
                    body: Some(codec::to_form_urlencoded(&self.to_parameters())),
                })
            }
        }
    }
}
