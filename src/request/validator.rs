//! Invariants every [AuthorizationRequest] satisfies, shared by the parser and
//! the builder.

use url::Url;

use crate::{
    flow::{implied_flow, Flow},
    types::{
        scope::OPENID, ErrorContext, ErrorObject, ParseError, RequestObjectRef, ResponseMode,
        ResponseType, Scope,
    },
};

use super::{AuthorizationRequest, RequestProfile};

/// `client_id` must be present and non empty
pub(crate) fn check_client_id(client_id: &str, ctx: &ErrorContext) -> Result<(), ParseError> {
    if client_id.is_empty() {
        return Err(ParseError::with_error(
            "Missing client_id parameter",
            ErrorObject::INVALID_REQUEST,
            ctx,
        ));
    }
    Ok(())
}

/// `redirect_uri` must not contain a fragment, and can only be left out when
/// the request is passed by reference (`deferred`).
pub(crate) fn check_redirect_uri(
    redirect_uri: Option<&Url>,
    deferred: bool,
    ctx: &ErrorContext,
) -> Result<(), ParseError> {
    match redirect_uri {
        Some(uri) if uri.fragment().is_some() => Err(ParseError::with_error(
            "Invalid redirect_uri parameter: The URI must not contain a fragment",
            ErrorObject::INVALID_REQUEST,
            ctx,
        )),
        Some(_) => Ok(()),
        None if deferred => Ok(()),
        None => Err(ParseError::with_error(
            "Missing redirect_uri parameter",
            ErrorObject::INVALID_REQUEST,
            ctx,
        )),
    }
}

/// Tokens and id tokens must never be returned in the query
/// ([Multiple Response Type Encoding Practices §5](https://openid.net/specs/oauth-v2-multiple-response-types-1_0.html#Security)).
///
/// The rejected mode is left out of the error context, the error is delivered
/// with the default mode of the response type.
pub(crate) fn check_response_mode(
    response_type: &ResponseType,
    response_mode: Option<&ResponseMode>,
    ctx: &ErrorContext,
) -> Result<(), ParseError> {
    if response_mode == Some(&ResponseMode::Query)
        && (response_type.has_token() || response_type.has_id_token())
    {
        let ctx = ErrorContext {
            response_mode: None,
            ..ctx.clone()
        };

        return Err(ParseError::with_error(
            format!(
                "Invalid response_mode parameter: The query response mode must not be used with response_type={response_type}"
            ),
            ErrorObject::INVALID_REQUEST,
            &ctx,
        ));
    }
    Ok(())
}

/// OpenID requests must include the `openid` scope value.
///
/// Skipped while a request object is pending (`deferred`): the object may carry
/// the scope, and the merged request is checked again.
pub(crate) fn check_openid_scope(
    profile: RequestProfile,
    scope: Option<&Scope>,
    deferred: bool,
    ctx: &ErrorContext,
) -> Result<(), ParseError> {
    if profile != RequestProfile::OpenId || deferred {
        return Ok(());
    }

    match scope {
        Some(scope) if scope.contains(OPENID) => Ok(()),
        Some(_) => Err(ParseError::with_error(
            "The scope must include an \"openid\" value",
            ErrorObject::INVALID_REQUEST,
            ctx,
        )),
        None => Err(ParseError::with_error(
            "Missing scope parameter: The scope must include an \"openid\" value",
            ErrorObject::INVALID_REQUEST,
            ctx,
        )),
    }
}

/// OpenID requests in the implicit and hybrid flows must include a `nonce`.
/// Skipped while a request object is pending.
pub(crate) fn check_nonce(
    profile: RequestProfile,
    response_type: &ResponseType,
    nonce: Option<&str>,
    deferred: bool,
    ctx: &ErrorContext,
) -> Result<(), ParseError> {
    if profile != RequestProfile::OpenId
        || deferred
        || implied_flow(response_type) == Flow::Code
    {
        return Ok(());
    }

    if nonce.map_or(true, str::is_empty) {
        return Err(ParseError::with_error(
            "Missing nonce parameter: Required for the implicit and hybrid flows",
            ErrorObject::INVALID_REQUEST,
            ctx,
        ));
    }
    Ok(())
}

/// `resource` must be an absolute URI without fragment
/// ([RFC 8707 §2](https://www.rfc-editor.org/rfc/rfc8707#section-2)).
pub(crate) fn check_resource(resource: &Url, ctx: &ErrorContext) -> Result<(), ParseError> {
    if resource.fragment().is_some() {
        return Err(ParseError::with_error(
            format!("Invalid resource parameter: {resource} must not contain a fragment"),
            ErrorObject::INVALID_TARGET,
            ctx,
        ));
    }
    Ok(())
}

/// Checks a typed request. Used for requests that were not parsed from
/// parameters.
pub(crate) fn validate(request: &AuthorizationRequest) -> Result<(), ParseError> {
    let mut ctx = ErrorContext::default();

    check_client_id(&request.client_id, &ctx)?;
    ctx.client_id = Some(request.client_id.clone());

    let by_reference = matches!(request.request_object, RequestObjectRef::ByReference(_));
    check_redirect_uri(request.redirect_uri.as_ref(), by_reference, &ctx)?;
    ctx.redirect_uri = request.redirect_uri.clone();
    ctx.state = request.state.clone();
    ctx.response_type = Some(request.response_type.clone());
    ctx.response_mode = request.response_mode.clone();

    check_response_mode(&request.response_type, request.response_mode.as_ref(), &ctx)?;

    let pending = request.request_object.is_some();
    check_openid_scope(request.profile, request.scope.as_ref(), pending, &ctx)?;
    check_nonce(
        request.profile,
        &request.response_type,
        request.nonce.as_deref(),
        pending,
        &ctx,
    )?;

    if request
        .code_challenge
        .as_ref()
        .is_some_and(|c| c.value.is_empty())
    {
        return Err(ParseError::with_error(
            "Invalid code_challenge parameter: Must not be empty",
            ErrorObject::INVALID_REQUEST,
            &ctx,
        ));
    }

    for resource in &request.resources {
        check_resource(resource, &ctx)?;
    }

    Ok(())
}

#[cfg(test)]
mod validator_tests {
    use super::*;

    fn rt(s: &str) -> ResponseType {
        s.parse().unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn redirect_uri_can_be_deferred() {
        let ctx = ErrorContext::default();

        assert!(check_redirect_uri(None, true, &ctx).is_ok());
        assert!(check_redirect_uri(None, false, &ctx).is_err());
    }

    #[test]
    fn redirect_uri_must_not_have_a_fragment() {
        let err = check_redirect_uri(
            Some(&url("https://rp.example.com/cb#frag")),
            false,
            &ErrorContext::default(),
        )
        .unwrap_err();

        assert_eq!("invalid_request", err.error_object().unwrap().code());
    }

    #[test]
    fn query_mode_is_rejected_for_tokens() {
        let ctx = ErrorContext::default();
        let query = ResponseMode::Query;

        assert!(check_response_mode(&rt("code"), Some(&query), &ctx).is_ok());
        assert!(check_response_mode(&rt("code id_token"), Some(&query), &ctx).is_err());
        assert!(check_response_mode(&rt("token"), Some(&query), &ctx).is_err());
        assert!(check_response_mode(&rt("token"), None, &ctx).is_ok());
        assert!(check_response_mode(&rt("token"), Some(&ResponseMode::FormPost), &ctx).is_ok());
    }

    #[test]
    fn rejected_query_mode_is_dropped_from_the_context() {
        let ctx = ErrorContext {
            state: Some("s".to_string()),
            response_mode: Some(ResponseMode::Query),
            ..Default::default()
        };

        let err = check_response_mode(&rt("id_token"), Some(&ResponseMode::Query), &ctx).unwrap_err();

        assert_eq!(None, err.response_mode());
        assert_eq!(Some("s"), err.state());
    }

    #[test]
    fn openid_checks_are_deferred_while_a_request_object_is_pending() {
        let ctx = ErrorContext::default();

        assert!(check_openid_scope(RequestProfile::OpenId, None, true, &ctx).is_ok());
        assert!(check_openid_scope(RequestProfile::OpenId, None, false, &ctx).is_err());
        assert!(check_nonce(RequestProfile::OpenId, &rt("id_token"), None, true, &ctx).is_ok());
    }

    #[test]
    fn nonce_is_only_required_outside_the_code_flow() {
        let ctx = ErrorContext::default();

        assert!(check_nonce(RequestProfile::OpenId, &rt("code"), None, false, &ctx).is_ok());
        assert!(check_nonce(RequestProfile::OAuth2, &rt("token"), None, false, &ctx).is_ok());

        let err = check_nonce(RequestProfile::OpenId, &rt("code id_token"), None, false, &ctx)
            .unwrap_err();
        assert!(err.message().contains("nonce"));
    }
}
