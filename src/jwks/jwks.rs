use std::collections::HashSet;

use josekit::{
    jwe::{self, JweDecrypter},
    jwk::Jwk,
    jws::{
        alg::{
            ecdsa::EcdsaJwsAlgorithm, eddsa::EddsaJwsAlgorithm, hmac::HmacJwsAlgorithm,
            rsassa::RsassaJwsAlgorithm, rsassa_pss::RsassaPssJwsAlgorithm,
        },
        JwsVerifier,
    },
    JoseError,
};
use serde::{Deserialize, Serialize};

/// Conversions of a [Jwk] into the josekit verifiers and decrypters used
/// on request objects
pub(crate) trait RequestObjectKey {
    fn algorithms(&self) -> HashSet<String>;

    fn to_verifier(&self, alg: &str) -> Result<Box<dyn JwsVerifier>, String>;

    fn to_jwe_decrypter(&self, alg: &str) -> Result<Box<dyn JweDecrypter>, String>;
}

fn key_error(alg: &str) -> impl Fn(JoseError) -> String + '_ {
    move |e| format!("key can not be used with {alg}: {e}")
}

impl RequestObjectKey for Jwk {
    fn algorithms(&self) -> HashSet<String> {
        let mut algs: HashSet<String> = HashSet::new();

        if let Some(alg) = self.algorithm() {
            algs.insert(alg.to_string());
            return algs;
        }

        let key_use = self.key_use();
        let enc = key_use == Some("enc") || key_use.is_none();
        let sig = key_use == Some("sig") || key_use.is_none();

        match self.key_type() {
            "EC" => {
                if enc {
                    algs.extend(
                        ["ECDH-ES", "ECDH-ES+A128KW", "ECDH-ES+A192KW", "ECDH-ES+A256KW"]
                            .map(String::from),
                    );
                }

                if sig {
                    match self.curve() {
                        Some("P-256") => algs.insert("ES256".to_string()),
                        Some("P-384") => algs.insert("ES384".to_string()),
                        Some("P-521") => algs.insert("ES512".to_string()),
                        Some("secp256k1") => algs.insert("ES256K".to_string()),
                        _ => false,
                    };
                }
            }
            "RSA" => {
                if enc {
                    algs.extend(
                        ["RSA-OAEP", "RSA-OAEP-256", "RSA-OAEP-384", "RSA-OAEP-512"]
                            .map(String::from),
                    );
                }

                if sig {
                    algs.extend(
                        ["PS256", "PS384", "PS512", "RS256", "RS384", "RS512"].map(String::from),
                    );
                }
            }
            "OKP" => {
                if enc && self.curve().is_some_and(|c| c.starts_with('X')) {
                    algs.extend(
                        ["ECDH-ES", "ECDH-ES+A128KW", "ECDH-ES+A192KW", "ECDH-ES+A256KW"]
                            .map(String::from),
                    );
                }

                if sig && self.curve().is_some_and(|c| c.starts_with("Ed")) {
                    algs.insert("EdDSA".to_string());
                }
            }
            "oct" => {
                if sig {
                    algs.extend(["HS256", "HS384", "HS512"].map(String::from));
                }

                if enc {
                    algs.extend(
                        ["A128KW", "A192KW", "A256KW", "A128GCMKW", "A192GCMKW", "A256GCMKW", "dir"]
                            .map(String::from),
                    );
                }
            }
            _ => {}
        }

        algs
    }

    fn to_verifier(&self, alg: &str) -> Result<Box<dyn JwsVerifier>, String> {
        let error = key_error(alg);

        let verifier: Box<dyn JwsVerifier> = match alg {
            "HS256" => Box::new(HmacJwsAlgorithm::Hs256.verifier_from_jwk(self).map_err(error)?),
            "HS384" => Box::new(HmacJwsAlgorithm::Hs384.verifier_from_jwk(self).map_err(error)?),
            "HS512" => Box::new(HmacJwsAlgorithm::Hs512.verifier_from_jwk(self).map_err(error)?),
            "RS256" => Box::new(RsassaJwsAlgorithm::Rs256.verifier_from_jwk(self).map_err(error)?),
            "RS384" => Box::new(RsassaJwsAlgorithm::Rs384.verifier_from_jwk(self).map_err(error)?),
            "RS512" => Box::new(RsassaJwsAlgorithm::Rs512.verifier_from_jwk(self).map_err(error)?),
            "PS256" => {
                Box::new(RsassaPssJwsAlgorithm::Ps256.verifier_from_jwk(self).map_err(error)?)
            }
            "PS384" => {
                Box::new(RsassaPssJwsAlgorithm::Ps384.verifier_from_jwk(self).map_err(error)?)
            }
            "PS512" => {
                Box::new(RsassaPssJwsAlgorithm::Ps512.verifier_from_jwk(self).map_err(error)?)
            }
            "ES256" => Box::new(EcdsaJwsAlgorithm::Es256.verifier_from_jwk(self).map_err(error)?),
            "ES384" => Box::new(EcdsaJwsAlgorithm::Es384.verifier_from_jwk(self).map_err(error)?),
            "ES512" => Box::new(EcdsaJwsAlgorithm::Es512.verifier_from_jwk(self).map_err(error)?),
            "ES256K" => {
                Box::new(EcdsaJwsAlgorithm::Es256k.verifier_from_jwk(self).map_err(error)?)
            }
            "EdDSA" => Box::new(EddsaJwsAlgorithm::Eddsa.verifier_from_jwk(self).map_err(error)?),
            _ => return Err(format!("unsupported JWS algorithm {alg}")),
        };

        Ok(verifier)
    }

    fn to_jwe_decrypter(&self, alg: &str) -> Result<Box<dyn JweDecrypter>, String> {
        let error = key_error(alg);

        let decrypter: Box<dyn JweDecrypter> = match alg {
            "RSA-OAEP" => Box::new(jwe::RSA_OAEP.decrypter_from_jwk(self).map_err(error)?),
            "RSA-OAEP-256" => Box::new(jwe::RSA_OAEP_256.decrypter_from_jwk(self).map_err(error)?),
            "RSA-OAEP-384" => Box::new(jwe::RSA_OAEP_384.decrypter_from_jwk(self).map_err(error)?),
            "RSA-OAEP-512" => Box::new(jwe::RSA_OAEP_512.decrypter_from_jwk(self).map_err(error)?),
            "ECDH-ES" => Box::new(jwe::ECDH_ES.decrypter_from_jwk(self).map_err(error)?),
            "ECDH-ES+A128KW" => {
                Box::new(jwe::ECDH_ES_A128KW.decrypter_from_jwk(self).map_err(error)?)
            }
            "ECDH-ES+A192KW" => {
                Box::new(jwe::ECDH_ES_A192KW.decrypter_from_jwk(self).map_err(error)?)
            }
            "ECDH-ES+A256KW" => {
                Box::new(jwe::ECDH_ES_A256KW.decrypter_from_jwk(self).map_err(error)?)
            }
            "A128KW" => Box::new(jwe::A128KW.decrypter_from_jwk(self).map_err(error)?),
            "A192KW" => Box::new(jwe::A192KW.decrypter_from_jwk(self).map_err(error)?),
            "A256KW" => Box::new(jwe::A256KW.decrypter_from_jwk(self).map_err(error)?),
            "A128GCMKW" => Box::new(jwe::A128GCMKW.decrypter_from_jwk(self).map_err(error)?),
            "A192GCMKW" => Box::new(jwe::A192GCMKW.decrypter_from_jwk(self).map_err(error)?),
            "A256GCMKW" => Box::new(jwe::A256GCMKW.decrypter_from_jwk(self).map_err(error)?),
            "dir" => Box::new(jwe::Dir.decrypter_from_jwk(self).map_err(error)?),
            _ => return Err(format!("unsupported JWE algorithm {alg}")),
        };

        Ok(decrypter)
    }
}

/// Jwks that wraps [josekit::jwk::JwkSet]
///
/// The keys of a client, used to verify the signature of its request objects,
/// or the keys of the server, used to decrypt them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Jwks {
    keys: Vec<Jwk>,
}

impl From<Vec<Jwk>> for Jwks {
    fn from(value: Vec<Jwk>) -> Self {
        Self { keys: value }
    }
}

impl Jwks {
    /// Reads a JWK Set document: `{"keys": [...]}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of keys present in [Jwks]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns if [Jwks] is empty or not
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys that can be used with `alg` for `key_use` (`sig` or `enc`),
    /// restricted to `kid` when the JOSE header names one. Keys that declare
    /// `alg` and `use` come first.
    pub(crate) fn get(&self, alg: &str, key_use: &str, kid: Option<&str>) -> Vec<&Jwk> {
        let kty = get_kty_from_alg(alg);

        let mut keys: Vec<&Jwk> = self
            .keys
            .iter()
            .filter(|key| kty.map_or(true, |kty| kty == key.key_type()))
            .filter(|key| kid.is_none() || key.key_id() == kid)
            .filter(|key| key.key_use().map_or(true, |u| u == key_use))
            .filter(|key| key.algorithms().contains(alg))
            .collect();

        keys.sort_by_key(|key| std::cmp::Reverse(keyscore(key)));

        keys
    }
}

fn get_kty_from_alg(alg: &str) -> Option<&'static str> {
    if alg.starts_with("ECDH") {
        return None;
    }

    match alg.get(0..2) {
        Some("RS") | Some("PS") => Some("RSA"),
        Some("ES") => Some("EC"),
        Some("Ed") => Some("OKP"),
        Some("HS") => Some("oct"),
        _ => None,
    }
}

fn keyscore(key: &Jwk) -> u8 {
    u8::from(key.algorithm().is_some()) + u8::from(key.key_use().is_some())
}
