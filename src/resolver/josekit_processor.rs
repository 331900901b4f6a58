use std::time::{SystemTime, UNIX_EPOCH};

use josekit::jwt::decode_with_verifier;
use serde_json::{Map, Value};

use crate::{
    helpers::decode_jwt_header,
    jwks::{Jwks, RequestObjectKey},
    types::{JosekitProcessorOptions, JwtProcessingError, JwtProcessor},
};

/// # JosekitJwtProcessor
/// The default [JwtProcessor], built on josekit.
///
/// Encrypted request objects are decrypted with the server's keys, signed
/// request objects are verified with the keys of the client passed as
/// context. `exp` and `nbf` are checked when present.
#[derive(Debug, Clone, Default)]
pub struct JosekitJwtProcessor {
    options: JosekitProcessorOptions,
    decryption_keys: Jwks,
}

impl JosekitJwtProcessor {
    /// Creates a processor that does not accept encrypted request objects
    pub fn new(options: JosekitProcessorOptions) -> Self {
        Self {
            options,
            decryption_keys: Jwks::default(),
        }
    }

    /// Sets the private keys encrypted request objects are decrypted with
    pub fn with_decryption_keys(mut self, decryption_keys: Jwks) -> Self {
        self.decryption_keys = decryption_keys;
        self
    }

    fn header_param(header: &Map<String, Value>, name: &str) -> Option<String> {
        header
            .get(name)
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(String::from)
    }

    fn decrypt(&self, jwe: &str) -> Result<String, JwtProcessingError> {
        let header = decode_jwt_header(jwe).map_err(JwtProcessingError::Malformed)?;

        let alg = Self::header_param(&header, "alg")
            .ok_or_else(|| JwtProcessingError::Malformed("JWE header has no alg".to_string()))?;
        let enc = Self::header_param(&header, "enc")
            .ok_or_else(|| JwtProcessingError::Malformed("JWE header has no enc".to_string()))?;

        if !self.options.accepted_jwe_algorithms.contains(&alg) {
            return Err(JwtProcessingError::UnacceptedAlgorithm(alg));
        }

        if !self.options.accepted_jwe_encryption_methods.contains(&enc) {
            return Err(JwtProcessingError::UnacceptedAlgorithm(enc));
        }

        let kid = Self::header_param(&header, "kid");

        for key in self.decryption_keys.get(&alg, "enc", kid.as_deref()) {
            let Ok(decrypter) = key.to_jwe_decrypter(&alg) else {
                continue;
            };

            if let Ok((bytes, _)) = josekit::jwe::deserialize_compact(jwe, &*decrypter) {
                return String::from_utf8(bytes).map_err(|_| {
                    JwtProcessingError::Malformed("JWE plaintext is not UTF-8".to_string())
                });
            }
        }

        Err(JwtProcessingError::Decryption(format!(
            "no key could decrypt the {alg} request object"
        )))
    }

    fn verify(
        &self,
        jws: &str,
        client_jwks: &Jwks,
    ) -> Result<Map<String, Value>, JwtProcessingError> {
        let header = decode_jwt_header(jws).map_err(JwtProcessingError::Malformed)?;

        let alg = Self::header_param(&header, "alg")
            .ok_or_else(|| JwtProcessingError::Malformed("JWS header has no alg".to_string()))?;

        if alg == "none" {
            if !self.options.allow_unsigned {
                return Err(JwtProcessingError::UnacceptedAlgorithm(alg));
            }

            return decode_unsecured_payload(jws);
        }

        if !self.options.accepted_jws_algorithms.contains(&alg) {
            return Err(JwtProcessingError::UnacceptedAlgorithm(alg));
        }

        let kid = Self::header_param(&header, "kid");

        for key in client_jwks.get(&alg, "sig", kid.as_deref()) {
            let Ok(verifier) = key.to_verifier(&alg) else {
                continue;
            };

            if let Ok((payload, _)) = decode_with_verifier(jws, &*verifier) {
                return Ok(payload.claims_set().clone());
            }
        }

        Err(JwtProcessingError::Signature(format!(
            "no client key verified the {alg} signature"
        )))
    }

    fn check_time(&self, claims: &Map<String, Value>) -> Result<(), JwtProcessingError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let skew = self.options.clock_skew_secs;

        let numeric_claim = |name: &str| -> Result<Option<u64>, JwtProcessingError> {
            match claims.get(name) {
                None | Some(Value::Null) => Ok(None),
                Some(v) => v.as_f64().map(|n| Some(n.max(0.0) as u64)).ok_or_else(|| {
                    JwtProcessingError::Malformed(format!("{name} must be a number"))
                }),
            }
        };

        if let Some(exp) = numeric_claim("exp")? {
            if now > exp.saturating_add(skew) {
                return Err(JwtProcessingError::Expired(format!(
                    "expired at {exp}, now {now}"
                )));
            }
        }

        if let Some(nbf) = numeric_claim("nbf")? {
            if now.saturating_add(skew) < nbf {
                return Err(JwtProcessingError::Expired(format!(
                    "not valid before {nbf}, now {now}"
                )));
            }
        }

        Ok(())
    }
}

/// Payload of an `"alg": "none"` JWS. The signature part must be empty.
fn decode_unsecured_payload(jws: &str) -> Result<Map<String, Value>, JwtProcessingError> {
    let parts: Vec<&str> = jws.split('.').collect();

    if parts.len() != 3 || !parts[2].is_empty() {
        return Err(JwtProcessingError::Malformed(
            "unsecured JWT must have an empty signature".to_string(),
        ));
    }

    decode_json_object(
        &base64_url::decode(parts[1])
            .map_err(|_| JwtProcessingError::Malformed("JWT payload is malformed".to_string()))?,
    )
}

fn decode_json_object(bytes: &[u8]) -> Result<Map<String, Value>, JwtProcessingError> {
    serde_json::from_slice::<Map<String, Value>>(bytes).map_err(|_| {
        JwtProcessingError::Malformed("JWT payload is not a JSON object".to_string())
    })
}

impl JwtProcessor for JosekitJwtProcessor {
    type Context = Jwks;

    fn process(
        &self,
        jwt: &str,
        client_jwks: &Self::Context,
    ) -> Result<Map<String, Value>, JwtProcessingError> {
        let claims = match jwt.split('.').count() {
            3 => self.verify(jwt, client_jwks)?,
            5 => {
                let plaintext = self.decrypt(jwt)?;

                if plaintext.split('.').count() == 3 {
                    self.verify(&plaintext, client_jwks)?
                } else if self.options.allow_unsigned {
                    decode_json_object(plaintext.as_bytes())?
                } else {
                    return Err(JwtProcessingError::UnacceptedAlgorithm(
                        "encrypted request object is not signed".to_string(),
                    ));
                }
            }
            _ => {
                return Err(JwtProcessingError::Malformed(
                    "not a compact JWS or JWE".to_string(),
                ))
            }
        };

        self.check_time(&claims)?;

        Ok(claims)
    }
}
