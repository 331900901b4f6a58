//! # JWT Processor interface

use serde_json::{Map, Value};

/// Why a request object was rejected by a [JwtProcessor]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtProcessingError {
    /// Not a compact JWS or JWE, or a header or payload that is not JSON
    #[error("malformed request object: {0}")]
    Malformed(String),
    /// The `alg` or `enc` of the JOSE header is not accepted
    #[error("request object algorithm not accepted: {0}")]
    UnacceptedAlgorithm(String),
    /// No key could decrypt the request object
    #[error("request object decryption failed: {0}")]
    Decryption(String),
    /// No key could verify the signature of the request object
    #[error("request object signature verification failed: {0}")]
    Signature(String),
    /// `exp` or `nbf` rejected the request object
    #[error("request object is not valid at this time: {0}")]
    Expired(String),
}

/// This trait defines how a request object is decrypted and validated before
/// its claims are merged into the request.
///
/// `Context` carries what the check needs about the client, usually its keys.
pub trait JwtProcessor {
    /// Per call context, usually the keys of the client that sent the request
    type Context;

    /// Decrypts and validates `jwt`, returning its claims.
    fn process(
        &self,
        jwt: &str,
        context: &Self::Context,
    ) -> Result<Map<String, Value>, JwtProcessingError>;
}
