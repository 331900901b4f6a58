//! # Parameter Codec
//! Flat, ordered `String -> String` parameter maps as found in query strings,
//! fragments and `application/x-www-form-urlencoded` bodies.
//!
//! Typed request and response fields are mapped to and from [Parameters] by
//! [`crate::request::AuthorizationRequest`] and
//! [`crate::response::AuthorizationResponse`].

use indexmap::IndexMap;
use url::{form_urlencoded, Url};

use crate::types::LangTag;

/// Insertion ordered parameters
pub type Parameters = IndexMap<String, String>;

/// Parses an `application/x-www-form-urlencoded` string.
/// If a key is repeated, the first value is kept.
pub fn parse_query(query: &str) -> Parameters {
    let mut params = Parameters::new();

    for (k, v) in form_urlencoded::parse(query.trim_start_matches(['?', '#']).as_bytes()) {
        params.entry(k.to_string()).or_insert_with(|| v.to_string());
    }

    params
}

/// Parameters in the query component of `url`
pub fn from_url_query(url: &Url) -> Parameters {
    url.query().map(parse_query).unwrap_or_default()
}

/// Parameters in the fragment component of `url`
pub fn from_url_fragment(url: &Url) -> Parameters {
    url.fragment().map(parse_query).unwrap_or_default()
}

/// Serializes `params` as `application/x-www-form-urlencoded`
pub fn to_form_urlencoded(params: &Parameters) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Splits a parameter or claim name of the form `name#tag` into its base name
/// and its [LangTag].
///
/// The bare name is returned unchanged with no tag. A `#` followed by an
/// invalid language tag is kept as part of the name.
pub fn split_lang_tag(key: &str) -> (&str, Option<LangTag>) {
    if let Some((name, tag)) = key.split_once('#') {
        if let Ok(tag) = tag.parse::<LangTag>() {
            return (name, Some(tag));
        }
    }

    (key, None)
}

/// Builds a `name#tag` key, or the bare `name` when there is no tag
pub fn join_lang_tag(name: &str, tag: Option<&LangTag>) -> String {
    match tag {
        Some(tag) => format!("{name}#{tag}"),
        None => name.to_string(),
    }
}

/// Collects all entries of `params` sharing the base `name`, keyed by their
/// optional language tag.
pub fn lang_tagged_values<'a>(
    params: &'a Parameters,
    name: &str,
) -> Vec<(Option<LangTag>, &'a str)> {
    params
        .iter()
        .filter_map(|(k, v)| {
            let (base, tag) = split_lang_tag(k);
            (base == name).then_some((tag, v.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod codec_tests {
    use super::*;

    #[test]
    fn parses_query_in_order() {
        let params = parse_query("response_type=code&client_id=123&scope=openid%20email");

        let keys: Vec<&str> = params.keys().map(String::as_str).collect();

        assert_eq!(vec!["response_type", "client_id", "scope"], keys);
        assert_eq!("openid email", params["scope"]);
    }

    #[test]
    fn first_value_wins_on_repeated_keys() {
        let params = parse_query("state=a&state=b");

        assert_eq!("a", params["state"]);
    }

    #[test]
    fn reads_the_fragment() {
        let url = Url::parse("https://client.example.com/cb?existing=1#code=abc&state=xyz").unwrap();

        assert_eq!("1", from_url_query(&url)["existing"]);
        assert_eq!("abc", from_url_fragment(&url)["code"]);
        assert!(!from_url_fragment(&url).contains_key("existing"));
    }

    #[test]
    fn splits_language_tags() {
        let (name, tag) = split_lang_tag("given_name#ja-Kana-JP");

        assert_eq!("given_name", name);
        assert_eq!("ja-Kana-JP", tag.unwrap().as_str());

        assert_eq!(("nickname", None), split_lang_tag("nickname"));
    }

    #[test]
    fn collects_tagged_values() {
        let params = parse_query("client_name=Client&client_name%23de=Klient&other=x");

        let values = lang_tagged_values(&params, "client_name");

        assert_eq!(2, values.len());
        assert_eq!((None, "Client"), values[0]);
        assert_eq!("de", values[1].0.as_ref().unwrap().as_str());
    }

    #[test]
    fn serializes_form_urlencoded() {
        let mut params = Parameters::new();
        params.insert("scope".to_string(), "openid profile".to_string());
        params.insert("redirect_uri".to_string(), "https://rp/cb".to_string());

        assert_eq!(
            "scope=openid+profile&redirect_uri=https%3A%2F%2Frp%2Fcb",
            to_form_urlencoded(&params)
        );
    }
}
