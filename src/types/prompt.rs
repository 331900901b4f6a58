use std::{fmt, str::FromStr};

use crate::helpers::{join_space_delimited, split_space_delimited};

/// Returned for an unknown or contradictory `prompt` value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPrompt {
    /// A value that is not a known prompt type
    #[error("unknown prompt value: {0}")]
    Unknown(String),
    /// `none` used together with other values
    #[error("the prompt value none must not be combined with other values")]
    NoneNotAlone,
}

/// A single prompt type.
///
/// Defined in [OpenID Connect Core 1.0](https://openid.net/specs/openid-connect-core-1_0.html#AuthRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PromptType {
    /// Must not display any authentication or consent user interface pages
    None,
    /// Prompt the End-User for reauthentication
    Login,
    /// Prompt the End-User for consent
    Consent,
    /// Prompt the End-User to select a user account
    SelectAccount,
    /// Prompt the End-User to create a user account.
    ///
    /// Defined in [Initiating User Registration via OpenID Connect](https://openid.net/specs/openid-connect-prompt-create-1_0.html).
    Create,
}

impl PromptType {
    /// The value as it appears in the `prompt` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::None => "none",
            PromptType::Login => "login",
            PromptType::Consent => "consent",
            PromptType::SelectAccount => "select_account",
            PromptType::Create => "create",
        }
    }
}

impl FromStr for PromptType {
    type Err = InvalidPrompt;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "login" => Ok(Self::Login),
            "consent" => Ok(Self::Consent),
            "select_account" => Ok(Self::SelectAccount),
            "create" => Ok(Self::Create),
            _ => Err(InvalidPrompt::Unknown(s.to_string())),
        }
    }
}

/// # Prompt
/// The ordered list of [PromptType]s of the `prompt` parameter. If
/// [PromptType::None] is present it is the only value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt(Vec<PromptType>);

impl Prompt {
    /// Builds a prompt from `types`, rejecting a `none` mixed with other values
    pub fn new(types: impl IntoIterator<Item = PromptType>) -> Result<Self, InvalidPrompt> {
        let mut collected: Vec<PromptType> = vec![];
        for t in types {
            if !collected.contains(&t) {
                collected.push(t);
            }
        }

        if collected.len() > 1 && collected.contains(&PromptType::None) {
            return Err(InvalidPrompt::NoneNotAlone);
        }

        Ok(Self(collected))
    }

    /// Whether `prompt_type` was requested
    pub fn contains(&self, prompt_type: PromptType) -> bool {
        self.0.contains(&prompt_type)
    }

    /// The requested prompt types
    pub fn types(&self) -> &[PromptType] {
        &self.0
    }
}

impl FromStr for Prompt {
    type Err = InvalidPrompt;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let types = split_space_delimited(s)
            .into_iter()
            .map(PromptType::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(types)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_space_delimited(self.0.iter().map(PromptType::as_str)))
    }
}
