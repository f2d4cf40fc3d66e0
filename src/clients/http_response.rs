//! HTTP response type for the ECS client.

use std::collections::HashMap;

/// A raw HTTP response from the service.
///
/// The body is kept as text; the router parses it into markup.
///
/// # Example
///
/// ```rust
/// use ecs_api::clients::HttpResponse;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-amzn-requestid".to_string(), vec!["abc-123".to_string()]);
///
/// let response = HttpResponse::new(200, headers, "<ItemLookupResponse/>".to_string());
/// assert!(response.is_ok());
/// assert_eq!(response.request_id(), Some("abc-123"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the request identifier assigned by the service, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-amzn-requestid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ok_for_2xx_only() {
        for code in [200, 204, 299] {
            assert!(HttpResponse::new(code, HashMap::new(), String::new()).is_ok());
        }
        for code in [199, 301, 400, 503] {
            assert!(!HttpResponse::new(code, HashMap::new(), String::new()).is_ok());
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["text/xml;charset=UTF-8".to_string()],
        );
        let response = HttpResponse::new(200, headers, String::new());
        assert_eq!(response.header("Content-Type"), Some("text/xml;charset=UTF-8"));
        assert!(response.request_id().is_none());
    }
}
