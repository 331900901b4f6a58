use std::{fmt, str::FromStr};

use crate::helpers::code_challenge;

/// Returned for an unknown `code_challenge_method`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported code challenge method: {0}")]
pub struct InvalidCodeChallengeMethod(pub String);

/// [PKCE](https://datatracker.ietf.org/doc/html/rfc7636) code challenge method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeChallengeMethod {
    /// `plain`. The default when no method is sent.
    #[default]
    Plain,
    /// `S256`
    S256,
}

impl CodeChallengeMethod {
    /// The value as it appears in the `code_challenge_method` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeChallengeMethod::Plain => "plain",
            CodeChallengeMethod::S256 => "S256",
        }
    }

    /// Computes the challenge for `verifier` with this method
    pub fn compute(&self, verifier: &str) -> String {
        match self {
            CodeChallengeMethod::Plain => verifier.to_string(),
            CodeChallengeMethod::S256 => code_challenge(verifier),
        }
    }
}

impl FromStr for CodeChallengeMethod {
    type Err = InvalidCodeChallengeMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "S256" => Ok(Self::S256),
            _ => Err(InvalidCodeChallengeMethod(s.to_string())),
        }
    }
}

impl fmt::Display for CodeChallengeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # CodeChallenge
/// The `code_challenge` sent with an authorization request and the method
/// used to derive it. `method` is [None] when the parameter was omitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeChallenge {
    /// The challenge value
    pub value: String,
    /// The explicit `code_challenge_method`
    pub method: Option<CodeChallengeMethod>,
}

impl CodeChallenge {
    /// Derives a challenge from a code `verifier`
    pub fn from_verifier(verifier: &str, method: CodeChallengeMethod) -> Self {
        Self {
            value: method.compute(verifier),
            method: Some(method),
        }
    }

    /// The method in effect. `plain` if none was sent.
    pub fn effective_method(&self) -> CodeChallengeMethod {
        self.method.unwrap_or_default()
    }

    /// Whether `verifier` matches this challenge
    pub fn verify(&self, verifier: &str) -> bool {
        self.effective_method().compute(verifier) == self.value
    }
}

#[cfg(test)]
mod code_challenge_tests {
    use super::*;
    use crate::helpers::generate_code_verifier;

    #[test]
    fn verifies_s256() {
        let verifier = generate_code_verifier(None);
        let challenge = CodeChallenge::from_verifier(&verifier, CodeChallengeMethod::S256);

        assert!(challenge.verify(&verifier));
        assert!(!challenge.verify("something else"));
    }

    #[test]
    fn defaults_to_plain() {
        let challenge = CodeChallenge {
            value: "abc".to_string(),
            method: None,
        };

        assert_eq!(CodeChallengeMethod::Plain, challenge.effective_method());
        assert!(challenge.verify("abc"));
    }
}
