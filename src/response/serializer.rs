//! Rendering of [AuthorizationResponse] for the user agent

use url::Url;

use crate::{
    codec,
    helpers::html_escape,
    types::{HttpResponse, ResponseMode, SerializeError},
};

use super::AuthorizationResponse;

impl AuthorizationResponse {
    fn checked_redirect_uri(&self) -> Result<&Url, SerializeError> {
        let redirect_uri = self.redirect_uri();

        if redirect_uri.fragment().is_some() {
            return Err(SerializeError::new(format!(
                "The redirect URI {redirect_uri} must not contain a fragment"
            )));
        }

        Ok(redirect_uri)
    }

    /// The redirect URI carrying the response parameters.
    ///
    /// With the `query` response mode the parameters are appended after any
    /// query the redirect URI already has. With `fragment` they become the
    /// fragment. Other response modes can not be expressed as a URI.
    pub fn to_redirect_uri(&self) -> Result<Url, SerializeError> {
        let mut uri = self.checked_redirect_uri()?.clone();
        let params = self.to_parameters();

        match self.implied_response_mode() {
            ResponseMode::Query => {
                if !params.is_empty() {
                    uri.query_pairs_mut().extend_pairs(params.iter());
                }
            }
            ResponseMode::Fragment => {
                uri.set_fragment(Some(&codec::to_form_urlencoded(&params)));
            }
            ResponseMode::FormPost => {
                return Err(SerializeError::new(
                    "The form_post response mode can not be rendered as a redirect URI",
                ))
            }
            ResponseMode::Other(mode) => {
                return Err(SerializeError::new(format!(
                    "Unsupported response mode: {mode}"
                )))
            }
        }

        Ok(uri)
    }

    /// The HTTP response of the authorization endpoint: a `302` redirect for
    /// `query` and `fragment`, an auto-submitting HTML form for `form_post`.
    pub fn to_http_response(&self) -> Result<HttpResponse, SerializeError> {
        match self.implied_response_mode() {
            ResponseMode::Query | ResponseMode::Fragment => {
                Ok(HttpResponse::redirect(self.to_redirect_uri()?))
            }
            ResponseMode::FormPost => {
                let action = self.checked_redirect_uri()?;
                Ok(HttpResponse::html(self.form_post_html(action)))
            }
            ResponseMode::Other(mode) => Err(SerializeError::new(format!(
                "Unsupported response mode: {mode}"
            ))),
        }
    }

    fn form_post_html(&self, action: &Url) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html>\n<head><title>Submit This Form</title></head>\n\
             <body onload=\"javascript:document.forms[0].submit()\">\n",
        );

        html.push_str(&format!(
            "<form method=\"post\" action=\"{}\">\n",
            html_escape(action.as_str())
        ));

        for (k, v) in &self.to_parameters() {
            html.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\"/>\n",
                html_escape(k),
                html_escape(v)
            ));
        }

        html.push_str("</form>\n</body>\n</html>");

        html
    }
}
