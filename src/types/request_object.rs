use url::Url;

/// # RequestObjectRef
/// How an authorization request carries a
/// [Request Object](https://www.rfc-editor.org/rfc/rfc9101): not at all, by
/// value in the `request` parameter, or by reference in the `request_uri`
/// parameter. A request can never carry both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestObjectRef {
    /// Neither `request` nor `request_uri`
    #[default]
    None,
    /// `request`: the compact serialized JWT
    ByValue(String),
    /// `request_uri`: where the JWT can be fetched from (or a pushed request urn)
    ByReference(Url),
}

impl RequestObjectRef {
    /// Whether there is a request object to resolve
    pub fn is_some(&self) -> bool {
        !matches!(self, RequestObjectRef::None)
    }

    /// The `request` value, if passed by value
    pub fn jwt(&self) -> Option<&str> {
        match self {
            RequestObjectRef::ByValue(jwt) => Some(jwt),
            _ => None,
        }
    }

    /// The `request_uri` value, if passed by reference
    pub fn uri(&self) -> Option<&Url> {
        match self {
            RequestObjectRef::ByReference(uri) => Some(uri),
            _ => None,
        }
    }
}
