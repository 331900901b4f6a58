//! # Authorization Request module
//! The typed authorization request, its parameter codec and the checks it
//! must pass before it can be used.

mod authorization_request;

mod builder;

mod request_codec;

pub(crate) mod validator;

pub use authorization_request::{AuthorizationRequest, RequestProfile};
pub use builder::AuthorizationRequestBuilder;

pub(crate) use request_codec::parse_with_profile;
