use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::codec::{join_lang_tag, split_lang_tag};

use super::LangTag;

/// Returned when the `claims` parameter is not a valid claims request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid claims request: {0}")]
pub struct InvalidClaimsRequest(pub String);

/// Whether a requested claim is essential or voluntary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimRequirement {
    /// `"essential": true`
    Essential,
    /// The default
    #[default]
    Voluntary,
}

/// # ClaimsRequestEntry
/// A single claim requested for the ID Token or the UserInfo response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClaimsRequestEntry {
    /// Claim name, without language tag
    pub name: String,
    /// Language tag, from a `name#tag` member
    pub lang_tag: Option<LangTag>,
    /// Essential or voluntary
    pub requirement: ClaimRequirement,
    /// `value`: the claim must have this exact value
    pub value: Option<Value>,
    /// `values`: the claim must have one of these values
    pub values: Option<Vec<Value>>,
    /// Other members of the claim's request object
    pub additional: Map<String, Value>,
}

impl ClaimsRequestEntry {
    /// A voluntary claim with no value constraints
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Marks the claim as essential
    #[must_use]
    pub fn essential(mut self) -> Self {
        self.requirement = ClaimRequirement::Essential;
        self
    }

    /// Requests the claim in the given language
    #[must_use]
    pub fn with_lang_tag(mut self, tag: LangTag) -> Self {
        self.lang_tag = Some(tag);
        self
    }

    /// Requires the claim to have `value`
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Requires the claim to have one of `values`
    #[must_use]
    pub fn with_values(mut self, values: Vec<Value>) -> Self {
        self.values = Some(values);
        self
    }

    /// The member name, `name#tag` when tagged
    pub fn claim_key(&self) -> String {
        join_lang_tag(&self.name, self.lang_tag.as_ref())
    }

    fn to_json(&self) -> Value {
        if self.requirement == ClaimRequirement::Voluntary
            && self.value.is_none()
            && self.values.is_none()
            && self.additional.is_empty()
        {
            return Value::Null;
        }

        let mut member = Map::new();

        if self.requirement == ClaimRequirement::Essential {
            member.insert("essential".to_string(), json!(true));
        }

        if let Some(value) = &self.value {
            member.insert("value".to_string(), value.clone());
        }

        if let Some(values) = &self.values {
            member.insert("values".to_string(), Value::Array(values.clone()));
        }

        for (k, v) in &self.additional {
            member.insert(k.clone(), v.clone());
        }

        Value::Object(member)
    }

    fn from_json(key: &str, member: &Value) -> Result<Self, InvalidClaimsRequest> {
        let (name, lang_tag) = split_lang_tag(key);

        let mut entry = Self {
            name: name.to_string(),
            lang_tag,
            ..Default::default()
        };

        let member = match member {
            Value::Null => return Ok(entry),
            Value::Object(m) => m,
            _ => {
                return Err(InvalidClaimsRequest(format!(
                    "the request for claim {key} must be null or an object"
                )))
            }
        };

        for (k, v) in member {
            match k.as_str() {
                "essential" => match v {
                    Value::Bool(true) => entry.requirement = ClaimRequirement::Essential,
                    Value::Bool(false) => entry.requirement = ClaimRequirement::Voluntary,
                    _ => {
                        return Err(InvalidClaimsRequest(format!(
                            "essential of claim {key} must be a boolean"
                        )))
                    }
                },
                "value" => entry.value = Some(v.clone()),
                "values" => match v {
                    Value::Array(values) => entry.values = Some(values.clone()),
                    _ => {
                        return Err(InvalidClaimsRequest(format!(
                            "values of claim {key} must be an array"
                        )))
                    }
                },
                _ => {
                    entry.additional.insert(k.clone(), v.clone());
                }
            }
        }

        Ok(entry)
    }
}

/// # ClaimsRequest
/// The OpenID Connect [`claims` request parameter](https://openid.net/specs/openid-connect-core-1_0.html#ClaimsParameter):
/// individual claims requested for the ID Token and for the UserInfo response.
///
/// Entries are keyed by their member name (including any language tag);
/// adding an entry with an existing key replaces it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClaimsRequest {
    id_token: IndexMap<String, ClaimsRequestEntry>,
    userinfo: IndexMap<String, ClaimsRequestEntry>,
}

impl ClaimsRequest {
    /// Creates an empty claims request
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests `entry` in the ID Token
    pub fn add_id_token_claim(&mut self, entry: ClaimsRequestEntry) {
        self.id_token.insert(entry.claim_key(), entry);
    }

    /// Requests `entry` from the UserInfo endpoint
    pub fn add_userinfo_claim(&mut self, entry: ClaimsRequestEntry) {
        self.userinfo.insert(entry.claim_key(), entry);
    }

    /// Merges `other` into this request. Entries of `other` win.
    pub fn add(&mut self, other: &ClaimsRequest) {
        for entry in other.id_token.values() {
            self.add_id_token_claim(entry.clone());
        }

        for entry in other.userinfo.values() {
            self.add_userinfo_claim(entry.clone());
        }
    }

    /// Removes an ID Token claim request, returning it
    pub fn remove_id_token_claim(
        &mut self,
        name: &str,
        lang_tag: Option<&LangTag>,
    ) -> Option<ClaimsRequestEntry> {
        self.id_token.shift_remove(&join_lang_tag(name, lang_tag))
    }

    /// Removes a UserInfo claim request, returning it
    pub fn remove_userinfo_claim(
        &mut self,
        name: &str,
        lang_tag: Option<&LangTag>,
    ) -> Option<ClaimsRequestEntry> {
        self.userinfo.shift_remove(&join_lang_tag(name, lang_tag))
    }

    /// Claims requested in the ID Token
    pub fn id_token_claims(&self) -> impl Iterator<Item = &ClaimsRequestEntry> {
        self.id_token.values()
    }

    /// Claims requested from the UserInfo endpoint
    pub fn userinfo_claims(&self) -> impl Iterator<Item = &ClaimsRequestEntry> {
        self.userinfo.values()
    }

    /// Names of the essential claims of both collections
    pub fn essential_claim_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = vec![];
        for entry in self.id_token.values().chain(self.userinfo.values()) {
            if entry.requirement == ClaimRequirement::Essential && !names.contains(&&*entry.name) {
                names.push(&entry.name);
            }
        }
        names
    }

    /// Whether nothing is requested
    pub fn is_empty(&self) -> bool {
        self.id_token.is_empty() && self.userinfo.is_empty()
    }

    /// The JSON object representation
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();

        if !self.id_token.is_empty() {
            object.insert("id_token".to_string(), collection_to_json(&self.id_token));
        }

        if !self.userinfo.is_empty() {
            object.insert("userinfo".to_string(), collection_to_json(&self.userinfo));
        }

        Value::Object(object)
    }

    /// Parses the JSON object representation. Unknown top level members are ignored.
    pub fn from_json(value: &Value) -> Result<Self, InvalidClaimsRequest> {
        let object = value
            .as_object()
            .ok_or_else(|| InvalidClaimsRequest("must be a JSON object".to_string()))?;

        let mut claims_request = ClaimsRequest::new();

        if let Some(id_token) = object.get("id_token") {
            for entry in collection_from_json("id_token", id_token)? {
                claims_request.add_id_token_claim(entry);
            }
        }

        if let Some(userinfo) = object.get("userinfo") {
            for entry in collection_from_json("userinfo", userinfo)? {
                claims_request.add_userinfo_claim(entry);
            }
        }

        Ok(claims_request)
    }
}

fn collection_to_json(collection: &IndexMap<String, ClaimsRequestEntry>) -> Value {
    Value::Object(
        collection
            .iter()
            .map(|(k, entry)| (k.clone(), entry.to_json()))
            .collect(),
    )
}

fn collection_from_json(
    member: &str,
    value: &Value,
) -> Result<Vec<ClaimsRequestEntry>, InvalidClaimsRequest> {
    let object = value
        .as_object()
        .ok_or_else(|| InvalidClaimsRequest(format!("{member} must be a JSON object")))?;

    object
        .iter()
        .map(|(k, v)| ClaimsRequestEntry::from_json(k, v))
        .collect()
}

impl FromStr for ClaimsRequest {
    type Err = InvalidClaimsRequest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| InvalidClaimsRequest(format!("not valid JSON: {e}")))?;

        Self::from_json(&value)
    }
}

impl fmt::Display for ClaimsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
