use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use url::Url;

lazy_static! {
    // RFC 6749 Appendix A: NQCHAR = %x21 / %x23-5B / %x5D-7E
    static ref NQCHAR_TOKEN_REGEX: Regex = Regex::new(r"^[\x21\x23-\x5B\x5D-\x7E]+$").unwrap();
}

/// Whether `token` is a non-empty RFC 6749 `NQCHAR` string (scope tokens,
/// response type tokens, error codes)
pub(crate) fn is_nqchar_token(token: &str) -> bool {
    NQCHAR_TOKEN_REGEX.is_match(token)
}

/// Parses an absolute URL
pub(crate) fn parse_absolute_url(url: &str) -> Result<Url, String> {
    Url::parse(url).map_err(|e| format!("{url} is not a valid absolute URI: {e}"))
}

/// Splits a space delimited parameter value. Empty items are skipped.
pub(crate) fn split_space_delimited(value: &str) -> Vec<&str> {
    value.split_ascii_whitespace().collect()
}

/// Joins items into a single space delimited parameter value
pub(crate) fn join_space_delimited<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut joined = String::new();

    for item in items {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(item.as_ref());
    }

    joined
}

/// Whether `token` has the shape of a compact JWS (three parts) or JWE (five parts)
pub(crate) fn is_compact_jwt(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();

    match parts.len() {
        3 => !parts[0].is_empty() && !parts[1].is_empty(),
        5 => parts[0..1].iter().chain(parts[2..5].iter()).all(|p| !p.is_empty()),
        _ => false,
    }
}

/// Decodes the protected header of a compact JWS or JWE without validating anything.
pub(crate) fn decode_jwt_header(token: &str) -> Result<Map<String, Value>, String> {
    let encoded_header = token
        .split('.')
        .next()
        .filter(|h| !h.is_empty())
        .ok_or("JWT is malformed")?;

    let header = base64_url::decode(encoded_header).map_err(|_| "JWT header is malformed")?;

    serde_json::from_slice::<Map<String, Value>>(&header)
        .map_err(|_| "JWT header is not a JSON object".to_string())
}

/// Flattens a JSON claim value into its parameter representation.
///
/// Strings are kept as is, numbers and booleans use their JSON text, arrays of
/// strings become space delimited values, everything else is serialized as
/// compact JSON. `null` has no parameter representation.
pub(crate) fn claim_value_to_parameter(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.to_string()),
        Value::Array(a) if a.iter().all(Value::is_string) => Some(join_space_delimited(
            a.iter().filter_map(Value::as_str),
        )),
        Value::Array(_) | Value::Object(_) => Some(v.to_string()),
    }
}

/// Escapes text for use inside an HTML attribute or element body
pub(crate) fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }

    escaped
}
