#![warn(missing_docs)]
//! # OpenID Authz
//!
//! OAuth 2.0 and OpenID Connect authorization messages for authorization
//! servers and clients: parsing, validation, request object resolution and
//! rendering of authorization requests and responses.
//!
//! ## Request API
//!
//! ### Parsing & Validation
//! - [request::AuthorizationRequest::parse]
//! - [request::AuthorizationRequest::parse_openid]
//! - [request::AuthorizationRequest::parse_uri]
//! - [request::AuthorizationRequest::parse_openid_uri]
//!
//! ### Building
//! - [request::AuthorizationRequestBuilder::new]
//! - [request::AuthorizationRequestBuilder::openid]
//! - [request::AuthorizationRequestBuilder::build]
//!
//! ### Rendering
//! - [request::AuthorizationRequest::to_parameters]
//! - [request::AuthorizationRequest::to_uri]
//! - [request::AuthorizationRequest::to_http_request]
//!
//! ### Flow & Response Mode
//! - [flow::implied_flow]
//! - [flow::implied_response_mode]
//! - [request::AuthorizationRequest::implied_response_mode]
//!
//! ## Request Objects
//! - [resolver::RequestObjectResolver::resolve]
//! - [resolver::JosekitJwtProcessor]
//! - [types::ResourceRetriever]
//!
//! ## Response API
//! - [response::AuthorizationResponse::parse]
//! - [response::AuthorizationResponse::parse_uri]
//! - [response::AuthorizationResponse::parse_form]
//! - [response::AuthorizationResponse::to_parameters]
//! - [response::AuthorizationResponse::to_redirect_uri]
//! - [response::AuthorizationResponse::to_http_response]
//!
//! ## Errors
//! - [types::ParseError]
//! - [types::ResolveError]
//! - [types::SerializeError]
//! - [types::AuthzError]

pub mod codec;
pub mod flow;
mod helpers;
#[cfg(feature = "http_client")]
mod http_client;
pub mod jwks;
pub mod request;
pub mod resolver;
pub mod response;
#[cfg(test)]
mod tests;
pub mod types;

pub use helpers::{
    code_challenge, generate_code_verifier, generate_nonce, generate_random, generate_state,
};
#[cfg(feature = "http_client")]
pub use http_client::DefaultResourceRetriever;

/// Re exports from the crate
pub mod re_exports {
    pub use indexmap;
    pub use josekit::{self};
    pub use serde_json::{self, json, Value};
    pub use url;
}
