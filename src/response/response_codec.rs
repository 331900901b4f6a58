//! Mapping between [AuthorizationResponse] and its parameters

use std::str::FromStr;

use url::Url;

use crate::{
    codec::{self, Parameters},
    types::{ErrorContext, ErrorObject, ParseError, ResponseMode, Scope},
};

use super::{
    AccessToken, AccessTokenType, AuthorizationErrorResponse, AuthorizationResponse,
    AuthorizationSuccessResponse,
};

const SUCCESS_PARAMS: [&str; 9] = [
    "code",
    "access_token",
    "token_type",
    "expires_in",
    "scope",
    "id_token",
    "state",
    "session_state",
    "iss",
];

fn get<'a>(params: &'a Parameters, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn invalid_response(message: String, ctx: &ErrorContext) -> ParseError {
    ParseError::with_error(message, ErrorObject::INVALID_REQUEST, ctx)
}

fn parse_access_token(
    params: &Parameters,
    ctx: &ErrorContext,
) -> Result<Option<AccessToken>, ParseError> {
    let Some(value) = get(params, "access_token") else {
        return Ok(None);
    };

    let token_type = get(params, "token_type")
        .map(|t| AccessTokenType::from_str(t).unwrap_or_default())
        .ok_or_else(|| {
            invalid_response(
                "Missing token_type parameter: Required with access_token".to_string(),
                ctx,
            )
        })?;

    let expires_in = get(params, "expires_in")
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                invalid_response(
                    format!("Invalid expires_in parameter: {v} is not a non-negative integer"),
                    ctx,
                )
            })
        })
        .transpose()?;

    let scope = get(params, "scope")
        .map(|v| {
            Scope::from_str(v)
                .map_err(|e| invalid_response(format!("Invalid scope parameter: {e}"), ctx))
        })
        .transpose()?;

    Ok(Some(AccessToken {
        value: value.to_string(),
        token_type,
        expires_in,
        scope,
    }))
}

impl AuthorizationResponse {
    /// Parses the parameters delivered to `redirect_uri`. An `error` parameter
    /// makes it an error response.
    pub fn parse(redirect_uri: Url, params: &Parameters) -> Result<Self, ParseError> {
        let ctx = ErrorContext {
            redirect_uri: Some(redirect_uri.clone()),
            state: get(params, "state").map(String::from),
            ..Default::default()
        };

        let iss = get(params, "iss")
            .map(|v| {
                Url::parse(v).map_err(|_| {
                    invalid_response(format!("Invalid iss parameter: {v} is not a URL"), &ctx)
                })
            })
            .transpose()?;

        if params.contains_key("error") {
            let error = ErrorObject::from_parameters(params).ok_or_else(|| {
                invalid_response("Invalid error parameter: Must not be empty".to_string(), &ctx)
            })?;

            let mut response = AuthorizationErrorResponse::new(redirect_uri, error, ctx.state);
            response.iss = iss;

            return Ok(Self::Error(response));
        }

        let mut response = AuthorizationSuccessResponse::new(redirect_uri, ctx.state.clone());
        response.code = get(params, "code").map(String::from);
        response.access_token = parse_access_token(params, &ctx)?;
        response.id_token = get(params, "id_token").map(String::from);
        response.session_state = get(params, "session_state").map(String::from);
        response.iss = iss;
        response.custom_params = params
            .iter()
            .filter(|(k, _)| !SUCCESS_PARAMS.contains(&k.as_str()))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Ok(Self::Success(response))
    }

    /// Parses a redirect URI as received by the client. Parameters in the
    /// fragment win over the query, the redirect URI is the URI without them.
    pub fn parse_uri(uri: &Url) -> Result<Self, ParseError> {
        let fragment_params = codec::from_url_fragment(uri);

        let (params, mode) = if fragment_params.is_empty() {
            (codec::from_url_query(uri), ResponseMode::Query)
        } else {
            (fragment_params, ResponseMode::Fragment)
        };

        let mut redirect_uri = uri.clone();
        redirect_uri.set_fragment(None);
        if mode == ResponseMode::Query {
            redirect_uri.set_query(None);
        }

        let mut response = Self::parse(redirect_uri, &params)?;
        response.set_response_mode(mode);

        Ok(response)
    }

    /// Parses an `application/x-www-form-urlencoded` body posted to `redirect_uri`
    pub fn parse_form(redirect_uri: Url, body: &str) -> Result<Self, ParseError> {
        let mut response = Self::parse(redirect_uri, &codec::parse_query(body))?;
        response.set_response_mode(ResponseMode::FormPost);

        Ok(response)
    }

    fn set_response_mode(&mut self, mode: ResponseMode) {
        match self {
            AuthorizationResponse::Success(s) => s.response_mode = Some(mode),
            AuthorizationResponse::Error(e) => e.response_mode = Some(mode),
        }
    }

    /// The response parameters
    pub fn to_parameters(&self) -> Parameters {
        let mut params = Parameters::new();

        match self {
            AuthorizationResponse::Success(s) => {
                if let Some(code) = &s.code {
                    params.insert("code".to_string(), code.clone());
                }

                if let Some(token) = &s.access_token {
                    params.insert("access_token".to_string(), token.value.clone());
                    params.insert("token_type".to_string(), token.token_type.to_string());

                    if let Some(expires_in) = token.expires_in {
                        params.insert("expires_in".to_string(), expires_in.to_string());
                    }

                    if let Some(scope) = &token.scope {
                        params.insert("scope".to_string(), scope.to_string());
                    }
                }

                if let Some(id_token) = &s.id_token {
                    params.insert("id_token".to_string(), id_token.clone());
                }

                if let Some(state) = &s.state {
                    params.insert("state".to_string(), state.clone());
                }

                if let Some(session_state) = &s.session_state {
                    params.insert("session_state".to_string(), session_state.clone());
                }

                if let Some(iss) = &s.iss {
                    params.insert("iss".to_string(), iss.to_string());
                }

                for (k, v) in &s.custom_params {
                    params.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
            AuthorizationResponse::Error(e) => {
                e.error.to_parameters(&mut params);

                if let Some(state) = &e.state {
                    params.insert("state".to_string(), state.clone());
                }

                if let Some(iss) = &e.iss {
                    params.insert("iss".to_string(), iss.to_string());
                }
            }
        }

        params
    }
}
