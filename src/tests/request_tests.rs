use url::Url;

use crate::{
    codec::{self, Parameters},
    flow::Flow,
    request::{AuthorizationRequest, RequestProfile},
    types::{
        CodeChallengeMethod, Display, ErrorObject, HttpMethod, PromptType, RequestObjectRef,
        ResponseMode, ResponseType,
    },
};

fn params(query: &str) -> Parameters {
    codec::parse_query(query)
}

fn endpoint() -> Url {
    Url::parse("https://op.example.com/authorize").unwrap()
}

const CODE_REQUEST: &str =
    "response_type=code&client_id=s6BhdRkqt3&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=openid%20profile&state=af0ifjsldkj";

#[test]
fn parses_a_code_request() {
    let request = AuthorizationRequest::parse_openid(&params(CODE_REQUEST), None).unwrap();

    assert_eq!(RequestProfile::OpenId, request.profile());
    assert_eq!(&ResponseType::code(), request.response_type());
    assert_eq!("s6BhdRkqt3", request.client_id());
    assert_eq!(
        "https://client.example.org/cb",
        request.redirect_uri().unwrap().as_str()
    );
    assert_eq!("openid profile", request.scope().unwrap().to_string());
    assert_eq!(Some("af0ifjsldkj"), request.state());
    assert_eq!(Flow::Code, request.flow());
    assert_eq!(ResponseMode::Query, request.implied_response_mode());
    assert!(!request.has_request_object());
}

#[test]
fn round_trips_through_parameters() {
    let query = format!(
        "{CODE_REQUEST}&response_mode=form_post&nonce=n-0S6_WzA2Mj&display=popup&prompt=login%20consent\
         &max_age=3600&ui_locales=fr-CA%20en&claims_locales=de&login_hint=jdoe&acr_values=urn%3Aacr%3A1%20urn%3Aacr%3A2\
         &code_challenge=E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM&code_challenge_method=S256\
         &resource=https%3A%2F%2Fapi.example.com%2F&claims=%7B%22userinfo%22%3A%7B%22email%22%3A%7B%22essential%22%3Atrue%7D%7D%7D\
         &ext1=a&ext2=b"
    );

    let request = AuthorizationRequest::parse_openid(&params(&query), Some(endpoint())).unwrap();

    let reparsed =
        AuthorizationRequest::parse_openid(&request.to_parameters(), Some(endpoint())).unwrap();

    assert_eq!(request, reparsed);
    assert_eq!(Some(Display::Popup), request.display());
    assert!(request.prompt().unwrap().contains(PromptType::Login));
    assert_eq!(Some(3600), request.max_age());
    assert_eq!("fr-CA", request.ui_locales()[0].as_str());
    assert_eq!(vec!["urn:acr:1", "urn:acr:2"], request.acr_values());
    assert_eq!(
        Some(CodeChallengeMethod::S256),
        request.code_challenge().unwrap().method
    );
    assert_eq!(vec!["email"], request.claims().unwrap().essential_claim_names());
    assert_eq!(ResponseMode::FormPost, request.implied_response_mode());
}

#[test]
fn unknown_parameters_pass_through_in_order() {
    let query = format!("{CODE_REQUEST}&zz=1&aa=2&mm=3");

    let request = AuthorizationRequest::parse_openid(&params(&query), None).unwrap();

    let custom: Vec<(&str, &str)> = request
        .custom_params()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(vec![("zz", "1"), ("aa", "2"), ("mm", "3")], custom);

    let encoded: Vec<String> = request.to_parameters().keys().cloned().collect();
    assert_eq!(vec!["zz", "aa", "mm"], encoded[encoded.len() - 3..].to_vec());
}

#[test]
fn requires_a_nonce_outside_the_code_flow() {
    let query = "response_type=id_token%20token&scope=openid%20profile&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&client_id=s6BhdRkqt3&state=af0ifjsldkj";

    let err = AuthorizationRequest::parse_openid(&params(query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());
    assert!(err.message().contains("nonce"));

    let request =
        AuthorizationRequest::parse_openid(&params(&format!("{query}&nonce=abc")), None).unwrap();

    assert_eq!(Some("abc"), request.nonce());
    assert_eq!(Flow::Implicit, request.flow());
    assert_eq!(ResponseMode::Fragment, request.implied_response_mode());
}

#[test]
fn plain_oauth_does_not_require_a_nonce() {
    let query = "response_type=token&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb";

    assert!(AuthorizationRequest::parse(&params(query), None).is_ok());
}

#[test]
fn rejects_the_query_response_mode_for_tokens() {
    let query = "response_type=code%20id_token&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=openid&nonce=n&state=s&response_mode=query";

    let err = AuthorizationRequest::parse_openid(&params(query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());
    assert_eq!(Some("s"), err.state());
    assert_eq!(None, err.response_mode());

    let response = crate::response::AuthorizationResponse::from(err.error_response().unwrap());
    let uri = response.to_redirect_uri().unwrap();

    assert_eq!(None, uri.query());
    assert!(uri.fragment().unwrap().starts_with("error=invalid_request"));
}

#[test]
fn explicit_response_mode_is_kept_for_response_type_errors() {
    let query = "client_id=c&redirect_uri=https%3A%2F%2Frp.example.com%2Fcb&state=s&response_mode=form_post&response_type=";

    let err = AuthorizationRequest::parse(&params(query), None).unwrap_err();

    assert_eq!(
        &ErrorObject::UNSUPPORTED_RESPONSE_TYPE,
        err.error_object().unwrap()
    );
    assert_eq!(Some(&ResponseMode::FormPost), err.response_mode());

    let http = crate::response::AuthorizationResponse::from(err.error_response().unwrap())
        .to_http_response()
        .unwrap();

    assert_eq!(200, http.status_code);
    assert!(http.location.is_none());

    let body = http.body.unwrap();
    assert!(body.contains("action=\"https://rp.example.com/cb\""));
    assert!(body.contains("<input type=\"hidden\" name=\"error\" value=\"unsupported_response_type\"/>"));
    assert!(body.contains("<input type=\"hidden\" name=\"state\" value=\"s\"/>"));
}

#[test]
fn explicit_fragment_mode_is_kept_for_missing_response_type() {
    let query = "client_id=c&redirect_uri=https%3A%2F%2Frp.example.com%2Fcb&response_mode=fragment";

    let err = AuthorizationRequest::parse(&params(query), None).unwrap_err();
    let uri = crate::response::AuthorizationResponse::from(err.error_response().unwrap())
        .to_redirect_uri()
        .unwrap();

    assert_eq!(None, uri.query());
    assert!(uri.fragment().unwrap().starts_with("error=invalid_request"));
}

#[test]
fn keeps_the_context_parsed_before_the_failure() {
    let query = format!("{CODE_REQUEST}&display=cinema");

    let err = AuthorizationRequest::parse_openid(&params(&query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());
    assert_eq!(Some("s6BhdRkqt3"), err.client_id());
    assert_eq!(
        Some("https://client.example.org/cb"),
        err.redirect_uri().map(Url::as_str)
    );
    assert_eq!(Some("af0ifjsldkj"), err.state());

    let response = err.error_response().unwrap();
    assert_eq!(
        "https://client.example.org/cb?error=invalid_request&error_description=Invalid+display+parameter%3A+unknown+display+value%3A+cinema&state=af0ifjsldkj",
        crate::response::AuthorizationResponse::from(response)
            .to_redirect_uri()
            .unwrap()
            .as_str()
    );
}

#[test]
fn error_responses_follow_the_response_type() {
    let query = "response_type=id_token&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=openid&state=s";

    let err = AuthorizationRequest::parse_openid(&params(query), None).unwrap_err();
    let response = crate::response::AuthorizationResponse::from(err.error_response().unwrap());

    assert_eq!(ResponseMode::Fragment, response.implied_response_mode());
}

#[test]
fn missing_client_id_has_no_redirect_context() {
    let query = "response_type=code&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&state=s";

    let err = AuthorizationRequest::parse(&params(query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());
    assert!(err.client_id().is_none());
    assert!(err.redirect_uri().is_none());
    assert!(err.error_response().is_none());
}

#[test]
fn invalid_redirect_uri_is_never_redirected_to() {
    let query = "response_type=code&client_id=c&redirect_uri=%2Fcb&state=s";

    let err = AuthorizationRequest::parse(&params(query), None).unwrap_err();

    assert_eq!(Some("c"), err.client_id());
    assert!(err.redirect_uri().is_none());
    assert!(err.error_response().is_none());
}

#[test]
fn redirect_uri_is_required_without_request_uri() {
    let missing = "response_type=code&client_id=c";
    let deferred = "response_type=code&client_id=c&request_uri=https%3A%2F%2Fclient.example.org%2Freq%2F1";

    assert!(AuthorizationRequest::parse(&params(missing), None).is_err());

    let request = AuthorizationRequest::parse(&params(deferred), None).unwrap();
    assert!(request.redirect_uri().is_none());
    assert_eq!(
        "https://client.example.org/req/1",
        request.request_object().uri().unwrap().as_str()
    );
}

#[test]
fn response_type_errors() {
    let missing = "client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb";
    let empty = format!("{missing}&response_type=");
    let illformed = format!("{missing}&response_type=code%20%22x%22");

    let err = AuthorizationRequest::parse(&params(missing), None).unwrap_err();
    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());

    for query in [empty, illformed] {
        let err = AuthorizationRequest::parse(&params(&query), None).unwrap_err();
        assert_eq!(
            &ErrorObject::UNSUPPORTED_RESPONSE_TYPE,
            err.error_object().unwrap()
        );
        assert_eq!(Some("c"), err.client_id());
    }
}

#[test]
fn unknown_response_type_tokens_are_kept() {
    let query = "response_type=code%20vp_token&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb";

    let request = AuthorizationRequest::parse(&params(query), None).unwrap();

    assert_eq!("code vp_token", request.response_type().to_string());
    assert_eq!(Flow::Code, request.flow());
}

#[test]
fn openid_scope_is_required() {
    let query = "response_type=code&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=profile";

    let err = AuthorizationRequest::parse_openid(&params(query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());
    assert!(err.message().contains("openid"));

    assert!(AuthorizationRequest::parse(&params(query), None).is_ok());
}

#[test]
fn illformed_scope_is_invalid_scope() {
    let query = "response_type=code&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=openid%20a%5Cb";

    let err = AuthorizationRequest::parse_openid(&params(query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_SCOPE, err.error_object().unwrap());
}

#[test]
fn malformed_openid_parameters_are_invalid_requests() {
    for extra in [
        "prompt=none%20login",
        "prompt=sometimes",
        "max_age=-1",
        "max_age=soon",
        "ui_locales=en_US",
        "claims_locales=%3F%3F",
        "id_token_hint=not-a-jwt",
        "claims=%5B%5D",
        "claims=%7Bnot-json",
        "code_challenge_method=S256",
        "code_challenge=abc&code_challenge_method=S512",
    ] {
        let query = format!("{CODE_REQUEST}&{extra}");

        let err = AuthorizationRequest::parse_openid(&params(&query), None).unwrap_err();

        assert_eq!(
            &ErrorObject::INVALID_REQUEST,
            err.error_object().unwrap(),
            "{extra}"
        );
        assert_eq!(Some("af0ifjsldkj"), err.state(), "{extra}");
    }
}

#[test]
fn plain_is_the_default_challenge_method() {
    let query = format!("{CODE_REQUEST}&code_challenge=abc");

    let request = AuthorizationRequest::parse_openid(&params(&query), None).unwrap();
    let challenge = request.code_challenge().unwrap();

    assert_eq!(None, challenge.method);
    assert_eq!(CodeChallengeMethod::Plain, challenge.effective_method());
    assert!(challenge.verify("abc"));
}

#[test]
fn resources_must_be_absolute_without_fragment() {
    for resource in ["%2Fapi", "https%3A%2F%2Fapi.example.com%2F%23frag"] {
        let query = format!("{CODE_REQUEST}&resource={resource}");

        let err = AuthorizationRequest::parse_openid(&params(&query), None).unwrap_err();

        assert_eq!(&ErrorObject::INVALID_TARGET, err.error_object().unwrap());
    }

    let query = format!("{CODE_REQUEST}&resource=https%3A%2F%2Fapi.example.com%2F");
    let request = AuthorizationRequest::parse_openid(&params(&query), None).unwrap();
    assert_eq!("https://api.example.com/", request.resources()[0].as_str());
}

#[test]
fn request_and_request_uri_are_exclusive() {
    let query = format!(
        "{CODE_REQUEST}&request=a.b.c&request_uri=https%3A%2F%2Fclient.example.org%2Freq"
    );

    let err = AuthorizationRequest::parse_openid(&params(&query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());
}

#[test]
fn illformed_request_uri_is_invalid_request_uri() {
    let query = format!("{CODE_REQUEST}&request_uri=not%20a%20uri");

    let err = AuthorizationRequest::parse_openid(&params(&query), None).unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST_URI, err.error_object().unwrap());
}

#[test]
fn openid_checks_wait_for_the_request_object() {
    let query = "response_type=id_token&client_id=c&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&request=a.b.c";

    let request = AuthorizationRequest::parse_openid(&params(query), None).unwrap();

    assert_eq!(
        &RequestObjectRef::ByValue("a.b.c".to_string()),
        request.request_object()
    );
    assert!(request.scope().is_none());
}

#[test]
fn parses_request_uris() {
    let uri = Url::parse(&format!("https://op.example.com/authorize?{CODE_REQUEST}")).unwrap();

    let request = AuthorizationRequest::parse_openid_uri(&uri).unwrap();

    assert_eq!(Some(&endpoint()), request.endpoint());
    assert_eq!("s6BhdRkqt3", request.client_id());
}

#[test]
fn renders_to_the_endpoint_keeping_its_query() {
    let endpoint = Url::parse("https://op.example.com/authorize?foo=bar").unwrap();
    let request =
        AuthorizationRequest::parse_openid(&params(CODE_REQUEST), Some(endpoint)).unwrap();

    let uri = request.to_uri().unwrap();

    assert_eq!(
        "https://op.example.com/authorize?foo=bar&response_type=code&client_id=s6BhdRkqt3&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=openid%20profile&state=af0ifjsldkj",
        uri.as_str()
    );

    let reparsed = AuthorizationRequest::parse_openid_uri(&uri).unwrap();
    assert_eq!(Some("bar"), reparsed.custom_param("foo"));
}

#[test]
fn renders_http_requests() {
    let request =
        AuthorizationRequest::parse_openid(&params(CODE_REQUEST), Some(endpoint())).unwrap();

    let get = request.to_http_request(HttpMethod::GET).unwrap();
    assert_eq!(HttpMethod::GET, get.method);
    assert!(get.url.query().unwrap().contains("client_id=s6BhdRkqt3"));
    assert!(get.body.is_none());

    let post = request.to_http_request(HttpMethod::POST).unwrap();
    assert_eq!(endpoint(), post.url);
    assert_eq!(
        Some("application/x-www-form-urlencoded"),
        post.content_type.as_deref()
    );
    assert_eq!(
        "response_type=code&client_id=s6BhdRkqt3&redirect_uri=https%3A%2F%2Fclient.example.org%2Fcb&scope=openid+profile&state=af0ifjsldkj",
        post.body.unwrap()
    );
}

#[test]
fn rendering_requires_an_endpoint() {
    let request = AuthorizationRequest::parse_openid(&params(CODE_REQUEST), None).unwrap();

    assert!(request.to_uri().is_err());
    assert!(request.to_http_request(HttpMethod::POST).is_err());
}
