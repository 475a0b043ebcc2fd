//! Generic request building and response classification.
//!
//! # Design
//! `Dispatcher` is the one piece every resource method goes through. It holds
//! only the immutable `ClientConfig`. `build` turns a method, an interpolated
//! path, query pairs and an optional serializable body into an `HttpRequest`;
//! `parse` and `parse_empty` turn an `HttpResponse` into a typed value or an
//! error. Executing the round trip in between is somebody else's job, which
//! keeps this module free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub(crate) const JSON: &str = "application/json";

/// Builds requests from the client configuration and decodes responses.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: ClientConfig,
}

impl Dispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request for `path` (starting with `/`) under the base URL.
    ///
    /// `query` pairs are form-encoded in order; an empty slice produces no
    /// `?`. A body is serialized to JSON and marks the request as
    /// `application/json`.
    pub fn build<B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<HttpRequest>
    where
        B: Serialize + ?Sized,
    {
        let base = self.config.base_url().as_str().trim_end_matches('/');
        let mut url = url::Url::parse(&format!("{base}{path}"))
            .map_err(|e| ApiError::InvalidConfig(format!("invalid request url for {path:?}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        if let Some(auth) = self.config.credentials().header_value() {
            headers.push(("authorization".to_string(), auth));
        }
        if let Some(org_id) = self.config.org_id() {
            headers.push(("x-grafana-org-id".to_string(), org_id.to_string()));
        }

        let body = match body {
            Some(value) => {
                let encoded = serde_json::to_string(value)
                    .map_err(|e| ApiError::SerializationError(e.to_string()))?;
                headers.push(("content-type".to_string(), JSON.to_string()));
                Some(encoded)
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Decode a 2xx response body into `R`.
    pub fn parse<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R> {
        check_status(&response)?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Accept any 2xx response and discard its body.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<()> {
        check_status(&response)
    }
}

/// Map non-2xx responses to `ApiError::HttpError`, keeping the body as text.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.text().into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    const NO_BODY: Option<&()> = None;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(ClientConfig::new("http://localhost:3000").unwrap())
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn raw_response(status: u16, body: &[u8]) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Message {
        message: String,
    }

    #[test]
    fn build_get_without_query_or_body() {
        let req = dispatcher()
            .build(HttpMethod::Get, "/api/users", &[], NO_BODY)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/users");
        assert!(req.body.is_none());
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
        assert_eq!(req.header("authorization"), None);
    }

    #[test]
    fn build_encodes_query_pairs() {
        let req = dispatcher()
            .build(
                HttpMethod::Get,
                "/api/users/lookup",
                &[("loginOrEmail", "a+b@example.com")],
                NO_BODY,
            )
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/api/users/lookup?loginOrEmail=a%2Bb%40example.com"
        );
    }

    #[test]
    fn build_keeps_base_sub_path() {
        let config = ClientConfig::new("https://example.com/grafana/").unwrap();
        let req = Dispatcher::new(config)
            .build(HttpMethod::Delete, "/api/teams/4", &[], NO_BODY)
            .unwrap();
        assert_eq!(req.url, "https://example.com/grafana/api/teams/4");
    }

    #[test]
    fn build_with_body_sets_content_type() {
        let body = serde_json::json!({"name": "ops", "email": ""});
        let req = dispatcher()
            .build(HttpMethod::Post, "/api/teams", &[], Some(&body))
            .unwrap();
        assert_eq!(req.header("content-type"), Some("application/json"));
        let sent: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn build_attaches_credentials_and_org() {
        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_token("secret")
            .with_org_id(2);
        let req = Dispatcher::new(config)
            .build(HttpMethod::Get, "/api/teams/1", &[], NO_BODY)
            .unwrap();
        assert_eq!(req.header("authorization"), Some("Bearer secret"));
        assert_eq!(req.header("x-grafana-org-id"), Some("2"));
    }

    #[test]
    fn build_reports_unserializable_body() {
        use std::collections::HashMap;
        // Non-string map keys cannot be JSON object keys.
        let body: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
        let err = dispatcher()
            .build(HttpMethod::Put, "/api/teams/1", &[], Some(&body))
            .unwrap_err();
        assert!(matches!(err, ApiError::SerializationError(_)));
    }

    #[test]
    fn parse_accepts_any_2xx() {
        let msg: Message = dispatcher()
            .parse(response(201, r#"{"message":"Role added to the team."}"#))
            .unwrap();
        assert_eq!(msg.message, "Role added to the team.");
    }

    #[test]
    fn parse_non_2xx_keeps_status_and_body() {
        let err = dispatcher()
            .parse::<Message>(response(404, r#"{"message":"Team not found"}"#))
            .unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"message":"Team not found"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_invalid_json_is_deserialization_error() {
        let err = dispatcher()
            .parse::<Message>(response(200, "<html>oops</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_non_utf8_2xx_is_deserialization_error() {
        let err = dispatcher()
            .parse::<Message>(raw_response(200, &[0xff, 0xfe, b'{', b'}']))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_non_utf8_error_page_is_http_error() {
        let err = dispatcher()
            .parse_empty(raw_response(502, &[0xff, 0xfe, 0x00]))
            .unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "\u{fffd}\u{fffd}\u{0}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_empty_ignores_body() {
        assert!(dispatcher().parse_empty(response(200, "not json")).is_ok());
        let err = dispatcher().parse_empty(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }
}
