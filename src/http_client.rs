//! Default Resource Retriever

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, ClientBuilder, StatusCode,
};
use url::Url;

use crate::types::{ResolverOptions, ResourceRetriever, RetrievedResource};

/// The default [ResourceRetriever]: a plain `GET` of the `request_uri` with reqwest.
///
/// Connect and overall timeouts are taken from [ResolverOptions]. Only `200`
/// responses are accepted, nothing is retried.
#[derive(Debug, Clone)]
pub struct DefaultResourceRetriever {
    client: Client,
}

impl DefaultResourceRetriever {
    /// Creates a retriever with the timeouts of `options`
    pub fn new(options: &ResolverOptions) -> Result<Self, String> {
        let client = ClientBuilder::new()
            .connect_timeout(options.connect_timeout())
            .timeout(options.fetch_timeout())
            .build()
            .map_err(|e| format!("{e}"))?;

        Ok(Self { client })
    }
}

impl ResourceRetriever for DefaultResourceRetriever {
    async fn retrieve(&self, uri: &Url) -> Result<RetrievedResource, String> {
        let response = self
            .client
            .get(uri.clone())
            .header(ACCEPT, "application/oauth-authz-req+jwt, application/jwt")
            .header(
                "User-Agent",
                concat!("openid-authz/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await
            .map_err(|e| format!("{e}"))?;

        if response.status() != StatusCode::OK {
            return Err(format!(
                "expected 200 OK, got: {}",
                response.status().as_u16()
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.to_string());

        let content = response.text().await.map_err(|e| format!("{e}"))?;

        Ok(RetrievedResource {
            content_type,
            content,
        })
    }
}

#[cfg(test)]
mod http_client_tests {
    use crate::resolver::{JosekitJwtProcessor, RequestObjectResolver};

    use super::*;

    #[test]
    fn builds_with_configured_timeouts() {
        let options = ResolverOptions::from_json(r#"{"fetch_timeout_secs": 2}"#).unwrap();
        let retriever = DefaultResourceRetriever::new(&options).unwrap();

        let resolver =
            RequestObjectResolver::with_retriever(JosekitJwtProcessor::default(), retriever)
                .with_options(options);

        assert_eq!(2, resolver.options().fetch_timeout_secs);
    }
}
