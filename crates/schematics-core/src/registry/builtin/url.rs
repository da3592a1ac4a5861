//! URL validators

use super::{attr_str, expect_str};
use crate::error::FunctionError;
use crate::registry::Attributes;
use serde_json::Value;
use url::Url;

/// Parse an absolute http(s) URL with a dotted host name
fn parse_web_url(text: &str) -> Option<Url> {
    let url = Url::parse(text).ok()?;
    let web = matches!(url.scheme(), "http" | "https");
    let dotted = url.host_str().is_some_and(|host| host.contains('.'));
    (web && dotted).then_some(url)
}

fn parse_url(text: &str) -> Result<Url, FunctionError> {
    Url::parse(text).map_err(|e| FunctionError::new(format!("{} is not a valid url: {}", text, e)))
}

pub fn is_url(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    match parse_web_url(text) {
        Some(_) => Ok(()),
        None => Err(FunctionError::new(format!("{} is not a valid url", text))),
    }
}

pub fn is_not_url(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    match parse_web_url(text) {
        Some(_) => Err(FunctionError::new(format!("{} is a url", text))),
        None => Ok(()),
    }
}

/// Host must end with the `HostName` attribute
pub fn have_url_host_name(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let expected = attr_str(attrs, "HostName")?;
    let url = parse_url(text)?;
    let host = url.host_str().unwrap_or_default();
    if host.ends_with(expected) {
        Ok(())
    } else {
        Err(FunctionError::new(format!(
            "{} has host name {} instead of {}",
            text, host, expected
        )))
    }
}

/// Every comma separated name in `params` must appear in the query string
pub fn have_query_parameter(value: &Value, attrs: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    let params = attr_str(attrs, "params")?;
    let url = parse_url(text)?;

    for param in params.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !url.query_pairs().any(|(name, _)| name == param) {
            return Err(FunctionError::new(format!(
                "url {} is missing parameter: {}",
                text, param
            )));
        }
    }
    Ok(())
}

pub fn is_https(value: &Value, _: &Attributes) -> Result<(), FunctionError> {
    let text = expect_str(value)?;
    if parse_url(text)?.scheme() != "https" {
        return Err(FunctionError::new(format!("url {} is not https", text)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_is_url() {
        let none = Attributes::new();
        assert!(is_url(&json!("https://example.com/path?q=1"), &none).is_ok());
        assert!(is_url(&json!("http://sub.example.org"), &none).is_ok());
        assert!(is_url(&json!("ftp://example.com"), &none).is_err());
        assert!(is_url(&json!("example.com"), &none).is_err());
        assert!(is_url(&json!("http://localhost"), &none).is_err());

        assert!(is_not_url(&json!("plain text"), &none).is_ok());
        assert!(is_not_url(&json!("https://example.com"), &none).is_err());
    }

    #[test]
    fn test_host_name_suffix() {
        let host = attrs(json!({"HostName": "example.com"}));
        assert!(have_url_host_name(&json!("https://api.example.com/v1"), &host).is_ok());
        assert!(have_url_host_name(&json!("https://example.org"), &host).is_err());
        assert!(have_url_host_name(&json!("https://example.com"), &Attributes::new()).is_err());
    }

    #[test]
    fn test_query_parameters() {
        let params = attrs(json!({"params": "page, size"}));
        assert!(have_query_parameter(&json!("https://x.io/?page=1&size=10"), &params).is_ok());
        let err = have_query_parameter(&json!("https://x.io/?page=1"), &params).unwrap_err();
        assert!(err.message.ends_with("size"));
    }

    #[test]
    fn test_is_https() {
        let none = Attributes::new();
        assert!(is_https(&json!("https://x.io"), &none).is_ok());
        assert!(is_https(&json!("http://x.io"), &none).is_err());
        assert!(is_https(&json!("not a url"), &none).is_err());
    }
}
