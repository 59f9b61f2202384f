//! HTTP dispatcher for the Scrappey API.
//!
//! One POST per call, no retries. Failures are translated through the
//! [`ErrorCode`] table into [`ScrappeyError::Api`].

use std::{error::Error as StdError, time::Duration};

use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Result, ScrappeyError, config::ClientConfig, model::ErrorCode, operations::JSON_CONTENT_TYPE};

/// Transport messages that always map to [`ErrorCode::TurnstileClickFailed`].
const TURNSTILE_MARKERS: [&str; 2] = ["ERR_TUNNEL_CONNECTION_FAILED", "ERR_EMPTY_RESPONSE"];
/// Status reported when the failure carries none.
const FALLBACK_STATUS: u16 = 500;

pub struct Dispatcher {
    client: Client,
    base_url: String,
}

impl Dispatcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_millis(config.timeout_ms)).build().map_err(|err| ScrappeyError::Http(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Post `body` to `base_url + endpoint` with the api key as the `key` query parameter.
    pub async fn send(
        &self,
        endpoint: &str,
        api_key: &str,
        body: &Value,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let cmd = body.get("cmd").and_then(serde_json::Value::as_str).unwrap_or("request");
        debug!("dispatching {} to {}", cmd, url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(serde_json::to_vec(body)?)
            .send()
            .await
            .map_err(|err| map_error(&error_chain(&err), None, None))?;

        let status = response.status();
        let text = response.text().await.map_err(|err| map_error(&error_chain(&err), None, Some(status.as_u16())))?;
        let payload = serde_json::from_str::<Value>(&text).ok();

        if !status.is_success() {
            let message = payload.as_ref().and_then(|p| p.get("error")).and_then(Value::as_str).map(str::to_string).unwrap_or_else(|| status.to_string());
            return Err(map_error(&message, payload.as_ref(), Some(status.as_u16())));
        }

        Ok(payload.unwrap_or(Value::String(text)))
    }
}

/// Translate a failed call into a structured API error.
///
/// `message` is the transport or API error text, `payload` the response body
/// when there was one, `status` its HTTP status.
pub fn map_error(
    message: &str,
    payload: Option<&Value>,
    status: Option<u16>,
) -> ScrappeyError {
    let (code, http_status) = if TURNSTILE_MARKERS.iter().any(|marker| message.contains(marker)) {
        (ErrorCode::TurnstileClickFailed, FALLBACK_STATUS)
    } else {
        let code = payload.and_then(|p| p.get("code")).and_then(Value::as_str).map(ErrorCode::lookup).unwrap_or_default();
        (code, status.unwrap_or(FALLBACK_STATUS))
    };

    warn!("api call failed with {} ({}): {}", code.code(), http_status, message);
    ScrappeyError::Api {
        ecode: code.code().to_string(),
        message: code.message().to_string(),
        details: code.details().to_string(),
        http_status,
    }
}

fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    use super::*;

    async fn dispatcher(server: &MockServer) -> Dispatcher {
        Dispatcher::new(&ClientConfig {
            base_url: format!("{}/api/v1", server.uri()),
            timeout_ms: 5_000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1"))
            .and(query_param("key", "secret"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"cmd": "request.get", "url": "https://a.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "success", "solution": {"statusCode": 200}})))
            .expect(1)
            .mount(&server)
            .await;

        let response = dispatcher(&server).await.send("", "secret", &json!({"cmd": "request.get", "url": "https://a.com"})).await.unwrap();
        assert_eq!(response["solution"]["statusCode"], json!(200));
    }

    #[tokio::test]
    async fn test_send_maps_api_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"data": "error", "code": "CODE-0002", "error": "blocked"})))
            .mount(&server)
            .await;

        let err = dispatcher(&server).await.send("", "k", &json!({"cmd": "request.get"})).await.unwrap_err();
        assert_eq!(err.to_string(), "Cloudflare blocked");
        assert_eq!(err.details(), Some("Cloudflare blocked the request, preventing access to the resource."));
        assert!(matches!(err, ScrappeyError::Api { http_status: 403, .. }));
    }

    #[tokio::test]
    async fn test_send_unknown_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(502).set_body_string("bad gateway")).mount(&server).await;

        let err = dispatcher(&server).await.send("", "k", &json!({})).await.unwrap_err();
        assert_eq!(
            err,
            ScrappeyError::Api {
                ecode: "CODE-10000".to_string(),
                message: "Unknown error - has to be specified".to_string(),
                details: "An unknown error occurred and needs to be specified.".to_string(),
                http_status: 502,
            }
        );
    }

    #[tokio::test]
    async fn test_send_tunnel_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "net::ERR_TUNNEL_CONNECTION_FAILED", "code": "CODE-0002"})))
            .mount(&server)
            .await;

        let err = dispatcher(&server).await.send("", "k", &json!({})).await.unwrap_err();
        assert!(matches!(err, ScrappeyError::Api { ref ecode, http_status: 500, .. } if ecode == "CODE-0007"));
        assert_eq!(err.to_string(), "Could not click turnstile button");
    }

    #[test]
    fn test_map_error() {
        let err = map_error("socket hang up: ERR_EMPTY_RESPONSE", Some(&json!({"code": "CODE-0001"})), Some(404));
        assert!(matches!(err, ScrappeyError::Api { ref ecode, http_status: 500, .. } if ecode == "CODE-0007"));

        let err = map_error("timeout", None, None);
        assert!(matches!(err, ScrappeyError::Api { ref ecode, http_status: 500, .. } if ecode == "CODE-10000"));

        let err = map_error("nope", Some(&json!({"code": "CODE-4242"})), Some(400));
        assert!(matches!(err, ScrappeyError::Api { ref ecode, http_status: 400, .. } if ecode == "CODE-10000"));
    }
}
