use url::Url;

use crate::{
    response::{
        AccessToken, AuthorizationErrorResponse, AuthorizationResponse,
        AuthorizationSuccessResponse,
    },
    types::{ErrorObject, ResponseMode},
};

fn redirect_uri() -> Url {
    Url::parse("https://client.example.org/cb?app=1").unwrap()
}

fn hybrid_response() -> AuthorizationSuccessResponse {
    let mut success = AuthorizationSuccessResponse::new(redirect_uri(), Some("af0ifjsldkj".into()));
    success.code = Some("SplxlOBeZQQYbYS6WxSbIA".to_string());
    success.access_token = Some(
        AccessToken::bearer("2YotnFZFEjr1zCsicMWpAA")
            .with_expires_in(3600)
            .with_scope("openid profile".parse().unwrap()),
    );
    success.id_token = Some("eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiIxIn0.c2ln".to_string());
    success.session_state = Some("ss".to_string());
    success.iss = Some(Url::parse("https://op.example.com").unwrap());
    success
}

#[test]
fn success_responses_survive_the_redirect() {
    let response = AuthorizationResponse::from(hybrid_response());

    assert_eq!(ResponseMode::Fragment, response.implied_response_mode());

    let uri = response.to_redirect_uri().unwrap();
    assert_eq!(Some("app=1"), uri.query());

    let parsed = AuthorizationResponse::parse_uri(&uri).unwrap();
    let mut expected = hybrid_response();
    expected.response_mode = Some(ResponseMode::Fragment);

    assert_eq!(AuthorizationResponse::from(expected), parsed);
}

#[test]
fn error_responses_survive_the_redirect() {
    let error = AuthorizationErrorResponse::new(
        redirect_uri(),
        ErrorObject::LOGIN_REQUIRED.with_description("Login required"),
        Some("s".to_string()),
    );

    let uri = AuthorizationResponse::from(error).to_redirect_uri().unwrap();

    assert_eq!(
        "https://client.example.org/cb?app=1&error=login_required&error_description=Login+required&state=s",
        uri.as_str()
    );

    let parsed = AuthorizationResponse::parse_uri(&uri).unwrap();
    let error = parsed.as_error().unwrap();

    assert_eq!(ErrorObject::LOGIN_REQUIRED, error.error);
    assert_eq!(Some("Login required"), error.error.description());
    assert_eq!(Some("s"), parsed.state());
    assert!(!parsed.indicates_success());
}

#[test]
fn form_post_responses_are_html() {
    let mut success = hybrid_response();
    success.response_mode = Some(ResponseMode::FormPost);

    let response = AuthorizationResponse::from(success);
    let http = response.to_http_response().unwrap();

    assert_eq!(200, http.status_code);
    assert_eq!(Some("text/html;charset=UTF-8"), http.content_type.as_deref());
    assert!(http.location.is_none());

    let body = http.body.unwrap();
    assert!(body.contains("action=\"https://client.example.org/cb?app=1\""));
    assert!(body.contains("<input type=\"hidden\" name=\"code\" value=\"SplxlOBeZQQYbYS6WxSbIA\"/>"));
    assert!(body.contains("<input type=\"hidden\" name=\"expires_in\" value=\"3600\"/>"));
    assert!(body.contains("document.forms[0].submit()"));
}

#[test]
fn errors_without_response_type_use_the_query() {
    let error = AuthorizationErrorResponse::new(
        Url::parse("https://client.example.org/cb").unwrap(),
        ErrorObject::SERVER_ERROR,
        None,
    );

    let http = AuthorizationResponse::from(error).to_http_response().unwrap();

    assert_eq!(302, http.status_code);
    assert_eq!(
        Some("error=server_error&error_description=Unexpected+server+error"),
        http.location.as_ref().and_then(Url::query)
    );
}

#[test]
fn fragment_errors_keep_the_existing_query() {
    let mut error = AuthorizationErrorResponse::new(
        Url::parse("https://client.example.org/cb?existing=1").unwrap(),
        ErrorObject::ACCESS_DENIED,
        Some("xyz".to_string()),
    );
    error.response_type = Some("id_token".parse().unwrap());

    let response = AuthorizationResponse::from(error);
    assert_eq!(ResponseMode::Fragment, response.implied_response_mode());

    let uri = response.to_redirect_uri().unwrap();

    assert_eq!(Some("existing=1"), uri.query());
    assert!(uri.fragment().unwrap().starts_with("error=access_denied"));
    assert!(uri.fragment().unwrap().ends_with("state=xyz"));
    assert!(uri
        .as_str()
        .starts_with("https://client.example.org/cb?existing=1#error=access_denied"));
}
