mod builder;
mod options;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{Credentials, Result, runtime::ParameterReader};

use super::{Operation, OperationType};

pub use builder::build_body;
pub use options::{BodySource, BrowserMode, HeadersInput, RequestOptions};

/// `requestBuilder`: a fully configurable request or browser session.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestBuilderOperation;

#[async_trait]
impl Operation for RequestBuilderOperation {
    fn operation_type(&self) -> OperationType {
        OperationType::RequestBuilder
    }

    fn build(
        &self,
        reader: &ParameterReader<'_>,
        credentials: &Credentials,
    ) -> Result<Value> {
        let options = RequestOptions::read(reader)?;
        debug!("item {}: {:?} request to {:?}", reader.item_index(), options.mode, options.url);
        let body = build_body(&options, credentials);
        Ok(serde_json::to_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ScrappeyError, WhitelistedDomains, common::Vars, runtime::Context};

    fn build(
        parameters: Value,
        credentials: &Credentials,
    ) -> Result<Value> {
        let ctx = Context::new(vec![Vars::from(json!({"slug": "items"}))]).with_parameters(Vars::from(parameters));
        RequestBuilderOperation.build(&ctx.reader(0), credentials)
    }

    #[test]
    fn test_defaults_only() {
        let body = build(json!({"url": "https://example.com/"}), &Credentials::new("k")).unwrap();
        assert_eq!(body, json!({"cmd": "request.get", "url": "https://example.com", "requestType": "request"}));
    }

    #[test]
    fn test_get_never_sends_post_data() {
        let body = build(
            json!({"url": "https://a.com", "httpMethod": "request.get", "bodyOrParams": "body_used", "body_for_request": "{\"a\":1}", "params_for_request": "x=1"}),
            &Credentials::new("k"),
        )
        .unwrap();
        assert!(body.get("postData").is_none());
        assert!(body.get("customHeaders").is_none());
    }

    #[test]
    fn test_post_body_forces_json_content_type() {
        let body = build(
            json!({"url": "https://a.com", "httpMethod": "request.post", "bodyOrParams": "body_used", "body_for_request": "{\"a\":1}"}),
            &Credentials::new("k"),
        )
        .unwrap();
        assert_eq!(body["cmd"], json!("request.post"));
        assert_eq!(body["postData"], json!("{\"a\":1}"));
        assert_eq!(body["customHeaders"], json!({"content-type": "application/json"}));
    }

    #[test]
    fn test_post_params() {
        let body = build(json!({"url": "https://a.com", "httpMethod": "request.put", "params_for_request": "a=1&b=2"}), &Credentials::new("k")).unwrap();
        assert_eq!(body["postData"], json!("a=1&b=2"));
        assert!(body.get("customHeaders").is_none());
    }

    #[test]
    fn test_user_headers_keep_forced_content_type() {
        let body = build(
            json!({
                "url": "https://a.com",
                "httpMethod": "request.patch",
                "bodyOrParams": "body_used",
                "body_for_request": "{}",
                "customHeaders": {"headers": [{"header_key": "x-token", "header_value": "t"}, {"header_key": "content-type", "header_value": "text/plain"}]}
            }),
            &Credentials::new("k"),
        )
        .unwrap();
        assert_eq!(body["customHeaders"], json!({"x-token": "t", "content-type": "application/json"}));
    }

    #[test]
    fn test_invalid_json_headers_fail() {
        let result = build(json!({"url": "https://a.com", "headersInputMethod": "json", "jsonHeaders": "{nope"}), &Credentials::new("k"));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));
    }

    #[test]
    fn test_single_string_cookie() {
        let body = build(json!({"url": "https://a.com", "oneStringCookie": true, "cookie": "a=1;b=2"}), &Credentials::new("k")).unwrap();
        assert_eq!(body["cookies"], json!("a=1;b=2"));
    }

    #[test]
    fn test_structured_cookies() {
        let body = build(
            json!({"url": "https://a.com", "customCookies": {"cookies": [{"key": "a", "value": "1"}, {"key": "b", "value": "2"}]}, "cookiejar": "[{\"name\": \"c\", \"value\": \"3\"}]"}),
            &Credentials::new("k"),
        )
        .unwrap();
        assert_eq!(body["cookies"], json!("a=1; b=2"));
        assert_eq!(body["cookiejar"], json!([{"name": "c", "value": "3"}]));

        let body = build(json!({"url": "https://a.com", "cookiejar": "[{broken"}), &Credentials::new("k")).unwrap();
        assert!(body.get("cookiejar").is_none());
    }

    #[test]
    fn test_no_proxy_ignores_credential_proxy() {
        let credentials = Credentials::new("k").with_proxy_url("http://u:p@proxy:8000");
        let body = build(json!({"url": "https://a.com", "whichProxyToUse": "noProxy"}), &credentials).unwrap();
        assert_eq!(body["noProxy"], json!(true));
        assert!(body.get("proxy").is_none());

        let body = build(json!({"url": "https://a.com"}), &credentials).unwrap();
        assert_eq!(body["proxy"], json!("http://u:p@proxy:8000"));
    }

    #[test]
    fn test_scrappey_proxy_flags() {
        let credentials = Credentials::new("k").with_proxy_url("http://u:p@proxy:8000");
        let body = build(
            json!({
                "url": "https://a.com",
                "whichProxyToUse": "proxyFromScrappey",
                "proxyType": "premiumProxy",
                "customProxyCountryBoolean": true,
                "customProxyCountry": "UnitedStates",
                "dontChangeProxy": true
            }),
            &credentials,
        )
        .unwrap();
        assert_eq!(body["premiumProxy"], json!(true));
        assert_eq!(body["proxyCountry"], json!("UnitedStates"));
        assert_eq!(body["dontChangeProxy"], json!(true));
        assert!(body.get("proxy").is_none());
    }

    #[test]
    fn test_retries_timeout_and_response_flags() {
        let credentials = Credentials::new("k").with_whitelisted_domains(WhitelistedDomains::Csv("a.com, b.com".to_string()));
        let body = build(
            json!({
                "url": "https://a.com",
                "attempts": 3,
                "timeout": 30000,
                "userSession": "s-1",
                "closeAfterUse": true,
                "referer": "https://google.com",
                "onlyStatusCode": true,
                "regex": "[\"<title>(.*)</title>\"]",
                "filter": ["statusCode", "cookies"],
                "autoparse": true,
                "model": "gpt-4o",
                "aiApiKey": "sk",
                "structure": "{bad"
            }),
            &credentials,
        )
        .unwrap();
        assert_eq!(body["attempts"], json!(3));
        assert_eq!(body["retries"], json!(3));
        assert_eq!(body["timeout"], json!(30000));
        assert_eq!(body["session"], json!("s-1"));
        assert_eq!(body["closeAfterUse"], json!(true));
        assert_eq!(body["referer"], json!("https://google.com"));
        assert_eq!(body["onlyStatusCode"], json!(true));
        assert_eq!(body["regex"], json!(["<title>(.*)</title>"]));
        assert_eq!(body["filter"], json!(["statusCode", "cookies"]));
        assert_eq!(body["autoparse"], json!(true));
        assert_eq!(body["model"], json!("gpt-4o"));
        assert_eq!(body["api_key"], json!("sk"));
        assert!(body.get("structure").is_none());
        assert_eq!(body["whitelistedDomains"], json!(["a.com", "b.com"]));
    }

    #[test]
    fn test_url_placeholders() {
        let body = build(json!({"url": "=https://a.com/{{ $json.slug }}/"}), &Credentials::new("k")).unwrap();
        assert_eq!(body["url"], json!("https://a.com/items"));
    }

    #[test]
    fn test_patched_chrome() {
        let body = build(json!({"url": "https://a.com", "request_type": "PatchedChrome"}), &Credentials::new("k")).unwrap();
        assert_eq!(body["browser"], json!([{"name": "chrome"}]));
        assert_eq!(body["noDriver"], json!(true));
        assert!(body.get("requestType").is_none());
    }

    #[test]
    fn test_browser_mode() {
        let body = build(
            json!({
                "url": "https://a.com",
                "request_type": "Browser",
                "antibot": true,
                "datadome": true,
                "browserType": "chrome",
                "browserMinVersion": 120,
                "locales": "en-US, nl-NL",
                "screenshotWidth": 800,
                "screenshot": false,
                "waitForAbortOnDetection": true,
                "waitForAbortOnDetectionTimeout": 10000,
                "websocketConnection": true,
                "localStorage": "{\"k\": \"v\"}",
                "interceptXhrFetchRequest": "/api/data",
                "browserActions": {"actions": [{"type": "goto", "url": "https://x"}, {"type": "wait", "waitTime": 500}]}
            }),
            &Credentials::new("k"),
        )
        .unwrap();

        assert!(body.get("requestType").is_none());
        assert_eq!(body["browser"], json!([{"name": "chrome", "minVersion": 120}]));
        assert_eq!(body["automaticallySolveCaptchas"], json!(true));
        assert_eq!(body["datadomeBypass"], json!(true));
        assert_eq!(body["locales"], json!(["en-US", "nl-NL"]));
        assert!(body.get("screenshotWidth").is_none());
        assert_eq!(body["waitForAbortOnDetection"], json!(true));
        assert_eq!(body["waitForAbortOnDetectionTimeout"], json!(10000));
        assert_eq!(body["websocket"], json!(true));
        assert_eq!(body["localStorage"], json!({"k": "v"}));
        assert_eq!(body["interceptFetchRequest"], json!("/api/data"));
        assert_eq!(body["browserActions"], json!([{"type": "goto", "url": "https://x"}, {"type": "wait", "wait": 500}]));
    }

    #[test]
    fn test_browser_default_spec() {
        let body = build(json!({"url": "https://a.com", "request_type": "Browser"}), &Credentials::new("k")).unwrap();
        assert_eq!(body["browser"], json!([{"name": "firefox"}]));
        assert!(body.get("browserActions").is_none());
    }

    #[test]
    fn test_session_command_is_rejected_as_method() {
        let result = build(json!({"url": "https://a.com", "httpMethod": "sessions.create"}), &Credentials::new("k"));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));
    }
}
