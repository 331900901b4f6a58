//! # Http types and the Resource Retriever interface

use std::future::Future;

use url::Url;

/// The Http methods an authorization request can be sent with
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Parameters in the query string
    #[default]
    GET,
    /// Parameters in an `application/x-www-form-urlencoded` body
    POST,
}

/// # HttpRequest
/// An authorization request rendered for the user agent
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Url of the request, including the query for [HttpMethod::GET]
    pub url: Url,
    /// Http method of the request
    pub method: HttpMethod,
    /// The content type header, set for [HttpMethod::POST]
    pub content_type: Option<String>,
    /// The form body, set for [HttpMethod::POST]
    pub body: Option<String>,
}

/// # HttpResponse
/// An authorization response rendered for the user agent
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code of the response, 302 for redirects or 200 for form posts
    pub status_code: u16,
    /// The location header of a redirect
    pub location: Option<Url>,
    /// The content type header
    pub content_type: Option<String>,
    /// The cache control header
    pub cache_control: Option<String>,
    /// The body, for form posts
    pub body: Option<String>,
}

impl HttpResponse {
    pub(crate) fn redirect(location: Url) -> Self {
        Self {
            status_code: 302,
            location: Some(location),
            content_type: None,
            cache_control: Some("no-store".to_string()),
            body: None,
        }
    }

    pub(crate) fn html(body: String) -> Self {
        Self {
            status_code: 200,
            location: None,
            content_type: Some("text/html;charset=UTF-8".to_string()),
            cache_control: Some("no-store".to_string()),
            body: Some(body),
        }
    }
}

/// A request object fetched from a `request_uri`
#[derive(Debug, Clone)]
pub struct RetrievedResource {
    /// The content type header, if any
    pub content_type: Option<String>,
    /// The response body
    pub content: String,
}

/// This trait defines how request objects passed by reference are fetched.
/// Users who need custom HTTP clients (or a pushed request store) implement this trait.
///
/// Timeouts and cancellation are the implementor's responsibility; failures are
/// reported as is, without any retry.
pub trait ResourceRetriever {
    /// Fetches the resource at `uri`.
    ///
    ///  * On success, the result is `Ok(RetrievedResource)` with the body of the response.
    ///  * On error, the result is `Err(String)` with an error message describing the failure.
    fn retrieve(
        &self,
        uri: &Url,
    ) -> impl Future<Output = Result<RetrievedResource, String>> + Send;
}

/// A [ResourceRetriever] that can never exist. It is the retriever type of a
/// [`crate::resolver::RequestObjectResolver`] that does not support `request_uri`.
#[derive(Debug, Clone, Copy)]
pub enum NoRetriever {}

impl ResourceRetriever for NoRetriever {
    async fn retrieve(&self, _uri: &Url) -> Result<RetrievedResource, String> {
        match *self {}
    }
}
