use rand::Rng;
use sha2::{Digest, Sha256};

/// Generates a random string using [rand::thread_rng]. You can pass in the bytes to generates
pub fn generate_random(bytes_to_generate: Option<u32>) -> String {
    let mut random_bytes = vec![];

    for _ in 0..bytes_to_generate.unwrap_or(32) {
        random_bytes.push(rand::thread_rng().gen());
    }

    base64_url::encode(&random_bytes)
}

/// Generates a random string as the state. Uses [generate_random] under the hood.
pub fn generate_state(bytes: Option<u32>) -> String {
    generate_random(bytes)
}

/// Generates a random string as the nonce. Uses [generate_random] under the hood.
pub fn generate_nonce(bytes: Option<u32>) -> String {
    generate_random(bytes)
}

/// Generates a random string as the code_verifier. Uses [generate_random] under the hood.
pub fn generate_code_verifier(bytes: Option<u32>) -> String {
    generate_random(bytes)
}

/// Generates the S256 PKCE code challenge for `verifier`, base64url encoded.
pub fn code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(verifier);

    base64_url::encode(&hasher.finalize())
}
