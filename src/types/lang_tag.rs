use std::{fmt, str::FromStr};

use language_tags::LanguageTag;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A [BCP47](https://www.rfc-editor.org/rfc/rfc5646) language tag such as `en`,
/// `de-CH` or `ja-Kana-JP`.
///
/// Tags must be well formed; subtags are not looked up in the IANA registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangTag(LanguageTag);

/// Returned when a string is not a well formed language tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid language tag: {0}")]
pub struct InvalidLangTag(pub String);

impl LangTag {
    /// The tag as written
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The primary language subtag, e.g. `ja` for `ja-Kana-JP`
    pub fn primary_language(&self) -> &str {
        self.0.primary_language()
    }
}

impl FromStr for LangTag {
    type Err = InvalidLangTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageTag::parse(s)
            .map(Self)
            .map_err(|_| InvalidLangTag(s.to_string()))
    }
}

impl fmt::Display for LangTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LangTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LangTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
