use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    helpers::claim_value_to_parameter,
    request::AuthorizationRequest,
    types::{
        ErrorContext, JwtProcessor, NoRetriever, RequestObjectRef, ResolveError, ResolveErrorKind,
        ResolverOptions, ResourceRetriever,
    },
};

/// # RequestObjectResolver
/// Resolves the request object of an [AuthorizationRequest] into a new,
/// complete request.
///
/// The request object is obtained (inline `request`, or fetched from
/// `request_uri` with the [ResourceRetriever]), decrypted and validated by the
/// [JwtProcessor], and its claims are laid over the parameters of the
/// original request. The merged parameters are parsed again with the profile
/// and endpoint of the original request.
///
/// Nothing is cached and nothing is retried: every call fetches and validates
/// again. The resolver holds no mutable state, [RequestObjectResolver::resolve]
/// can be called concurrently when the processor and retriever allow it.
#[derive(Debug, Clone)]
pub struct RequestObjectResolver<P, R = NoRetriever> {
    processor: P,
    retriever: Option<R>,
    options: ResolverOptions,
}

impl<P: JwtProcessor> RequestObjectResolver<P, NoRetriever> {
    /// A resolver for request objects passed by value only. Requests with a
    /// `request_uri` are rejected with [ResolveErrorKind::RequestUriNotSupported].
    pub fn new(processor: P) -> Self {
        Self {
            processor,
            retriever: None,
            options: ResolverOptions::default(),
        }
    }
}

impl<P: JwtProcessor, R: ResourceRetriever> RequestObjectResolver<P, R> {
    /// A resolver for request objects passed by value or by reference
    pub fn with_retriever(processor: P, retriever: R) -> Self {
        Self {
            processor,
            retriever: Some(retriever),
            options: ResolverOptions::default(),
        }
    }

    /// Replaces the [ResolverOptions]
    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in use
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolves the request object of `request`.
    ///
    /// - `request` - A parsed request. Returned as is when it carries no request object.
    /// - `context` - What the [JwtProcessor] needs to validate this client's request objects
    ///
    /// Fetch, validation and merge failures are reported as distinct
    /// [ResolveErrorKind]s. Only a merge failure is safe to redirect to the client.
    #[instrument(skip_all, level = "debug", fields(client_id = %request.client_id()))]
    pub async fn resolve(
        &self,
        request: &AuthorizationRequest,
        context: &P::Context,
    ) -> Result<AuthorizationRequest, ResolveError> {
        let ctx = error_context(request);

        let jwt = match request.request_object() {
            RequestObjectRef::None => return Ok(request.clone()),
            RequestObjectRef::ByValue(jwt) => jwt.clone(),
            RequestObjectRef::ByReference(uri) => self.fetch(uri, &ctx).await?,
        };

        let claims = self.processor.process(&jwt, context).map_err(|e| {
            warn!("rejected request object: {e}");
            ResolveError::new(
                ResolveErrorKind::InvalidRequestObject,
                format!("Invalid request object: {e}"),
                ctx.clone(),
            )
            .with_source(e)
        })?;

        let mut params = request.to_parameters();

        for (name, value) in &claims {
            if let Some(value) = claim_value_to_parameter(value) {
                params.insert(name.to_string(), value);
            }
        }

        params.shift_remove("request");
        params.shift_remove("request_uri");

        debug!("merged {} request object claims", claims.len());

        crate::request::parse_with_profile(&params, request.endpoint().cloned(), request.profile())
            .map_err(|e| {
                let message = format!("Invalid merged request: {}", e.message());
                ResolveError::new(ResolveErrorKind::InvalidMergedRequest(e), message, ctx)
            })
    }

    async fn fetch(&self, uri: &Url, ctx: &ErrorContext) -> Result<String, ResolveError> {
        let Some(retriever) = &self.retriever else {
            return Err(ResolveError::new(
                ResolveErrorKind::RequestUriNotSupported,
                "The request_uri parameter is not supported",
                ctx.clone(),
            ));
        };

        if self.options.require_https_request_uri && uri.scheme() != "https" {
            return Err(ResolveError::new(
                ResolveErrorKind::Fetch,
                format!("Invalid request_uri {uri}: The https scheme is required"),
                ctx.clone(),
            ));
        }

        debug!(%uri, "fetching request object");

        let resource = retriever.retrieve(uri).await.map_err(|e| {
            warn!(%uri, "request object retrieval failed: {e}");
            ResolveError::new(
                ResolveErrorKind::Fetch,
                format!("Couldn't retrieve request object from {uri}: {e}"),
                ctx.clone(),
            )
        })?;

        if resource.content.len() > self.options.max_request_object_size {
            return Err(ResolveError::new(
                ResolveErrorKind::Fetch,
                format!(
                    "The request object at {uri} exceeds {} bytes",
                    self.options.max_request_object_size
                ),
                ctx.clone(),
            ));
        }

        Ok(resource.content.trim().to_string())
    }
}

fn error_context(request: &AuthorizationRequest) -> ErrorContext {
    ErrorContext {
        client_id: Some(request.client_id().to_string()),
        redirect_uri: request.redirect_uri().cloned(),
        state: request.state().map(String::from),
        response_type: Some(request.response_type().clone()),
        response_mode: request.response_mode().cloned(),
    }
}
