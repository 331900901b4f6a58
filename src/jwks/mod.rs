//! # Jwks module
//! Key sets used to verify and decrypt request objects

#[allow(clippy::module_inception)]
mod jwks;

pub use jwks::Jwks;
pub(crate) use jwks::RequestObjectKey;
