use std::time::Duration;

use serde::Deserialize;

/// # ResolverOptions
/// Configuration of a [`crate::resolver::RequestObjectResolver`].
///
/// All fields have defaults, a partial JSON document can be used:
///
/// ```json
/// { "max_request_object_size": 20000, "fetch_timeout_secs": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Largest request object accepted from a `request_uri`, in bytes
    pub max_request_object_size: usize,
    /// Only fetch `request_uri` values with the `https` scheme
    pub require_https_request_uri: bool,
    /// Connect timeout used by the default retriever, in seconds
    pub connect_timeout_secs: u64,
    /// Overall timeout used by the default retriever, in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_request_object_size: 100_000,
            require_https_request_uri: true,
            connect_timeout_secs: 10,
            fetch_timeout_secs: 10,
        }
    }
}

impl ResolverOptions {
    /// Reads options from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// [ResolverOptions::connect_timeout_secs] as a [Duration]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// [ResolverOptions::fetch_timeout_secs] as a [Duration]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// # JosekitProcessorOptions
/// Algorithms accepted by a [`crate::resolver::JosekitJwtProcessor`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JosekitProcessorOptions {
    /// Accepted JWS `alg` values
    pub accepted_jws_algorithms: Vec<String>,
    /// Accepted JWE `alg` values
    pub accepted_jwe_algorithms: Vec<String>,
    /// Accepted JWE `enc` values
    pub accepted_jwe_encryption_methods: Vec<String>,
    /// Accept request objects with `"alg": "none"`
    pub allow_unsigned: bool,
    /// Allowed clock skew when checking `exp` and `nbf`, in seconds
    pub clock_skew_secs: u64,
}

impl Default for JosekitProcessorOptions {
    fn default() -> Self {
        Self {
            accepted_jws_algorithms: ["RS256", "PS256", "ES256", "EdDSA"]
                .map(String::from)
                .to_vec(),
            accepted_jwe_algorithms: ["RSA-OAEP-256", "ECDH-ES", "ECDH-ES+A256KW"]
                .map(String::from)
                .to_vec(),
            accepted_jwe_encryption_methods: ["A256GCM", "A128CBC-HS256"]
                .map(String::from)
                .to_vec(),
            allow_unsigned: false,
            clock_skew_secs: 0,
        }
    }
}

impl JosekitProcessorOptions {
    /// Reads options from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
