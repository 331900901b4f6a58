use url::Url;

use crate::{
    request::{AuthorizationRequest, AuthorizationRequestBuilder, RequestProfile},
    types::{
        ClaimsRequest, ClaimsRequestEntry, CodeChallenge, CodeChallengeMethod, ErrorObject,
        HttpMethod, ResponseMode, ResponseType,
    },
};

fn redirect_uri() -> Url {
    Url::parse("https://rp.example.com/cb").unwrap()
}

#[test]
fn builds_an_openid_request() {
    let mut claims = ClaimsRequest::new();
    claims.add_id_token_claim(ClaimsRequestEntry::new("auth_time").essential());

    let request = AuthorizationRequestBuilder::openid(
        "code id_token".parse().unwrap(),
        "client",
        "openid email".parse().unwrap(),
        redirect_uri(),
    )
    .endpoint(Url::parse("https://op.example.com/authorize").unwrap())
    .state("s")
    .nonce("n")
    .code_challenge(CodeChallenge::from_verifier(
        "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk",
        CodeChallengeMethod::S256,
    ))
    .claims(claims)
    .custom_param("ext", "1")
    .build()
    .unwrap();

    assert_eq!(RequestProfile::OpenId, request.profile());
    assert_eq!(ResponseMode::Fragment, request.implied_response_mode());

    let uri = request.to_uri().unwrap();
    let reparsed = AuthorizationRequest::parse_openid_uri(&uri).unwrap();

    assert_eq!(request, reparsed);
    assert_eq!(
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
        reparsed.code_challenge().unwrap().value
    );
}

#[test]
fn build_runs_the_parser_checks() {
    let err = AuthorizationRequestBuilder::openid(
        "id_token".parse().unwrap(),
        "client",
        "openid".parse().unwrap(),
        redirect_uri(),
    )
    .build()
    .unwrap_err();

    assert!(err.message().contains("nonce"));

    let err = AuthorizationRequestBuilder::new(ResponseType::token(), "client")
        .redirect_uri(redirect_uri())
        .response_mode(ResponseMode::Query)
        .build()
        .unwrap_err();

    assert_eq!(&ErrorObject::INVALID_REQUEST, err.error_object().unwrap());

    let err = AuthorizationRequestBuilder::new(ResponseType::code(), "client")
        .build()
        .unwrap_err();

    assert!(err.message().contains("redirect_uri"));

    let err = AuthorizationRequestBuilder::new(ResponseType::code(), "")
        .redirect_uri(redirect_uri())
        .build()
        .unwrap_err();

    assert!(err.message().contains("client_id"));
}

#[test]
fn registered_names_are_not_custom_params() {
    let request = AuthorizationRequestBuilder::new(ResponseType::code(), "client")
        .redirect_uri(redirect_uri())
        .custom_param("state", "sneaky")
        .custom_param("ext", "1")
        .build()
        .unwrap();

    assert_eq!(None, request.state());
    assert_eq!(1, request.custom_params().len());
}

#[test]
fn to_builder_copies_every_field() {
    let request = AuthorizationRequestBuilder::new(ResponseType::code(), "client")
        .redirect_uri(redirect_uri())
        .state("s")
        .build()
        .unwrap();

    let modified = request
        .to_builder()
        .state("t")
        .endpoint(Url::parse("https://op.example.com/authorize").unwrap())
        .build()
        .unwrap();

    assert_eq!(Some("t"), modified.state());
    assert_eq!(request.redirect_uri(), modified.redirect_uri());

    let post = modified.to_http_request(HttpMethod::POST).unwrap();
    assert_eq!(
        "response_type=code&client_id=client&redirect_uri=https%3A%2F%2Frp.example.com%2Fcb&state=t",
        post.body.unwrap()
    );
}

#[test]
fn empty_claims_requests_are_left_out() {
    let request = AuthorizationRequestBuilder::new(ResponseType::code(), "client")
        .redirect_uri(redirect_uri())
        .claims(ClaimsRequest::new())
        .build()
        .unwrap();

    assert!(request.claims().is_none());

    let reparsed = AuthorizationRequest::parse(&request.to_parameters(), None).unwrap();
    assert_eq!(request, reparsed);
}

#[test]
fn voluntary_claims_survive_the_round_trip() {
    let query = "response_type=code&client_id=c&redirect_uri=https%3A%2F%2Frp.example.com%2Fcb\
                 &claims=%7B%22userinfo%22%3A%7B%22email%22%3A%7B%22essential%22%3Afalse%7D%7D%7D";

    let request = AuthorizationRequest::parse(&crate::codec::parse_query(query), None).unwrap();
    let reparsed = AuthorizationRequest::parse(&request.to_parameters(), None).unwrap();

    assert_eq!(request, reparsed);
    assert!(request.claims().unwrap().essential_claim_names().is_empty());

    let empty = "response_type=code&client_id=c&redirect_uri=https%3A%2F%2Frp.example.com%2Fcb&claims=%7B%7D";
    let request = AuthorizationRequest::parse(&crate::codec::parse_query(empty), None).unwrap();

    assert!(request.claims().is_none());
}
