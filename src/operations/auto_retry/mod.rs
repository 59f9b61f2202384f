//! Replays a failed HTTP node call through Scrappey.
//!
//! Both variants read the previous node's method, url, headers, body and
//! proxy and send them as one request; the remote service does the retrying.

mod previous;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{Credentials, Result, model::RequestBody, runtime::ParameterReader};

use super::{JSON_CONTENT_TYPE, Operation, OperationType, REQUEST_TYPE_MARKER, proxy::ProxyChoice};

pub use previous::PreviousRequest;

const BROWSER_RETRIES: u64 = 3;

/// Body shared by both variants: command, url, headers, proxy and payload.
fn replay_body(
    reader: &ParameterReader<'_>,
    credentials: &Credentials,
) -> Result<RequestBody> {
    let previous = PreviousRequest::read(reader)?;
    debug!("item {}: replaying {} {}", reader.item_index(), previous.command.as_ref(), previous.url);

    let mut body = RequestBody::new(previous.command);
    body.url = Some(previous.url);
    body.custom_headers = previous.headers;

    ProxyChoice::read(reader)?.apply(&mut body.proxy, credentials, previous.proxy.as_deref());

    if let Some(data) = previous.post_data {
        body.post_data = Some(data);
        body.set_header("content-type", JSON_CONTENT_TYPE);
    }

    Ok(body)
}

/// `httpRequestAutoRetry`: replay in HTTP-only mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoRetryRequestOperation;

#[async_trait]
impl Operation for AutoRetryRequestOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::HttpRequestAutoRetry
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value> {
        let mut body = replay_body(reader, credentials)?;
        body.request_type = Some(REQUEST_TYPE_MARKER.to_string());
        Ok(serde_json::to_value(body)?)
    }
}

/// `httpRequestAutoRetryBrowser`: replay in a browser with anti-bot handling on.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoRetryBrowserOperation;

#[async_trait]
impl Operation for AutoRetryBrowserOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::HttpRequestAutoRetryBrowser
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value> {
        let mut body = replay_body(reader, credentials)?;
        body.retries = Some(BROWSER_RETRIES);
        body.browser_options.datadome_bypass = true;
        body.browser_options.mouse_movements = true;
        body.browser_options.automatically_solve_captchas = true;
        Ok(serde_json::to_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{common::Vars, runtime::Context};

    fn context(parameters: Value) -> Context {
        Context::new(vec![Vars::new()]).with_parameters(Vars::from(parameters)).with_previous_node(Vars::from(json!({
            "method": "POST",
            "url": "https://shop.example.com/api/",
            "headerParameters": {"parameters": [{"name": "x-api", "value": "1"}]},
            "bodyParameters": {"parameters": [{"name": "sku", "value": "A1"}]},
            "options": {"proxy": "http://node-proxy:3128"}
        })))
    }

    #[test]
    fn test_request_variant() {
        let ctx = context(json!({"whichProxyToUse": "proxyFromNode"}));
        let body = AutoRetryRequestOperation.build(&ctx.reader(0), &Credentials::new("k")).unwrap();
        assert_eq!(
            body,
            json!({
                "cmd": "request.post",
                "url": "https://shop.example.com/api",
                "requestType": "request",
                "customHeaders": {"x-api": "1", "content-type": "application/json"},
                "postData": "{\"sku\":\"A1\"}",
                "proxy": "http://node-proxy:3128"
            })
        );
    }

    #[test]
    fn test_browser_variant() {
        let ctx = context(json!({"whichProxyToUse": "proxyFromScrappey", "proxyType": "datacenter", "customProxyCountryBoolean": true, "customProxyCountry": "Germany"}));
        let body = AutoRetryBrowserOperation.build(&ctx.reader(0), &Credentials::new("k")).unwrap();
        assert_eq!(body["datadomeBypass"], json!(true));
        assert_eq!(body["mouseMovements"], json!(true));
        assert_eq!(body["automaticallySolveCaptchas"], json!(true));
        assert_eq!(body["retries"], json!(3));
        assert_eq!(body["datacenter"], json!(true));
        assert_eq!(body["proxyCountry"], json!("Germany"));
        assert!(body.get("proxy").is_none());
        assert!(body.get("requestType").is_none());
    }

    #[test]
    fn test_credential_proxy_source() {
        let ctx = context(json!({}));
        let credentials = Credentials::new("k").with_proxy_url("http://cred:1");
        let body = AutoRetryBrowserOperation.build(&ctx.reader(0), &credentials).unwrap();
        assert_eq!(body["proxy"], json!("http://cred:1"));
    }

    #[test]
    fn test_content_type_without_other_headers() {
        let ctx = Context::new(vec![Vars::new()]).with_previous_node(Vars::from(json!({"method": "PATCH", "url": "https://a.com", "bodyParameters": "{\"a\":1}"})));
        let body = AutoRetryRequestOperation.build(&ctx.reader(0), &Credentials::new("k")).unwrap();
        assert_eq!(body["customHeaders"], json!({"content-type": "application/json"}));
        assert_eq!(body["postData"], json!("{\"a\":1}"));
    }

    #[test]
    fn test_empty_body_on_get() {
        let ctx = Context::new(vec![Vars::new()]).with_previous_node(Vars::from(json!({"method": "GET", "url": "https://a.com", "bodyParameters": ""})));
        let body = AutoRetryRequestOperation.build(&ctx.reader(0), &Credentials::new("k")).unwrap();
        assert_eq!(body["cmd"], json!("request.get"));
        assert!(body.get("postData").is_none());
        assert!(body.get("customHeaders").is_none());
    }
}
