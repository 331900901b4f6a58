//! # Authorization Response module
//! Success and error responses of the authorization endpoint, their parameter
//! codec and their rendering as redirects or auto-submitting forms.

mod access_token;
mod authorization_response;
mod response_codec;
mod serializer;

pub use access_token::{AccessToken, AccessTokenType};
pub use authorization_response::{
    AuthorizationErrorResponse, AuthorizationResponse, AuthorizationSuccessResponse,
};
