//! # Types Module
//! Value types of authorization messages, errors and collaborator interfaces

mod claims_request;
mod code_challenge;
mod display;
mod error_object;
mod errors;
pub mod http_client;
pub mod jwt_processor;
mod lang_tag;
mod prompt;
mod request_object;
mod resolver_options;
mod response_mode;
mod response_type;
pub mod scope;

pub use claims_request::{
    ClaimRequirement, ClaimsRequest, ClaimsRequestEntry, InvalidClaimsRequest,
};
pub use code_challenge::{CodeChallenge, CodeChallengeMethod, InvalidCodeChallengeMethod};
pub use display::{Display, InvalidDisplay};
pub use error_object::ErrorObject;
pub use errors::{
    AuthzError, AuthzResult, ErrorContext, ParseError, ResolveError, ResolveErrorKind,
    SerializeError,
};
pub use http_client::{
    HttpMethod, HttpRequest, HttpResponse, NoRetriever, ResourceRetriever, RetrievedResource,
};
pub use jwt_processor::{JwtProcessingError, JwtProcessor};
pub use lang_tag::{InvalidLangTag, LangTag};
pub use prompt::{InvalidPrompt, Prompt, PromptType};
pub use request_object::RequestObjectRef;
pub use resolver_options::{JosekitProcessorOptions, ResolverOptions};
pub use response_mode::ResponseMode;
pub use response_type::{InvalidResponseType, ResponseType, ResponseTypeToken};
pub use scope::{InvalidScope, Scope};
