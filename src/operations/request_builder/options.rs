use serde::Deserialize;
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumString};
use tracing::warn;

use crate::{
    Result, ScrappeyError,
    model::{AiParsing, BrowserOptions, BrowserSpec, Command, Patterns, RequestMode, ResponseOptions},
    operations::{browser_actions, proxy::ProxyChoice},
    runtime::ParameterReader,
    template,
};

const DEFAULT_SCREENSHOT_WIDTH: u64 = 1280;
const DEFAULT_SCREENSHOT_HEIGHT: u64 = 1024;
const DEFAULT_ABORT_DETECTION_TIMEOUT_MS: u64 = 45_000;

/// Which field feeds `postData` for non-GET methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
pub enum BodySource {
    #[strum(serialize = "body_used")]
    Body,
    #[default]
    #[strum(serialize = "params_used")]
    Params,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum HeadersInput {
    #[default]
    Fields,
    Json,
}

/// Fully resolved parameters of one `requestBuilder` item.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub mode: RequestMode,
    pub url: Option<String>,
    pub command: Command,
    pub referer: Option<String>,
    pub proxy: ProxyChoice,
    pub dont_change_proxy: bool,
    pub session: Option<String>,
    pub close_after_use: bool,
    pub body_source: BodySource,
    pub body: String,
    pub params: String,
    pub headers: Option<Map<String, Value>>,
    pub cookies: Option<String>,
    pub cookie_jar: Option<Vec<Value>>,
    pub attempts: u64,
    pub timeout: u64,
    pub response: ResponseOptions,
    pub ai: Option<AiParsing>,
    /// Present in browser mode only.
    pub browser: Option<BrowserMode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserMode {
    pub spec: BrowserSpec,
    pub options: BrowserOptions,
}

impl RequestOptions {
    pub fn read(reader: &ParameterReader<'_>) -> Result<Self> {
        let mode: RequestMode = reader.choice("request_type")?;

        let command: Command = reader.choice("httpMethod")?;
        if !command.is_request() {
            return Err(ScrappeyError::Config(format!("'{}' is not an http method", command.as_ref())));
        }

        let url = reader.non_empty("url")?.map(|raw| {
            let resolved = template::resolve_url(reader.context(), &raw, reader.item_index());
            template::trim_trailing_slash(&resolved).to_string()
        });

        let headers = match reader.choice::<HeadersInput>("headersInputMethod")? {
            HeadersInput::Fields => header_fields(&reader.value("customHeaders").unwrap_or(Value::Null)),
            HeadersInput::Json => json_headers(&reader.string("jsonHeaders")?)?,
        };

        let cookies = if reader.flag("oneStringCookie")? {
            reader.non_empty("cookie")?
        } else {
            cookie_fields(&reader.value("customCookies").unwrap_or(Value::Null))
        };

        let cookie_jar = match lenient_json("cookiejar", &reader.string("cookiejar")?) {
            Some(Value::Array(list)) => Some(list),
            Some(_) => {
                warn!("ignoring cookiejar, expected a JSON array");
                None
            }
            None => None,
        };

        let browser = match mode {
            RequestMode::Browser => Some(BrowserMode::read(reader)?),
            _ => None,
        };

        Ok(Self {
            mode,
            url,
            command,
            referer: reader.non_empty("referer")?,
            proxy: ProxyChoice::read(reader)?,
            dont_change_proxy: reader.flag("dontChangeProxy")?,
            session: reader.non_empty("userSession")?,
            close_after_use: reader.flag("closeAfterUse")?,
            body_source: reader.choice("bodyOrParams")?,
            body: reader.string("body_for_request")?,
            params: reader.string("params_for_request")?,
            headers,
            cookies,
            cookie_jar,
            attempts: reader.integer("attempts")?,
            timeout: reader.integer("timeout")?,
            response: read_response_options(reader)?,
            ai: read_ai_parsing(reader)?,
            browser,
        })
    }
}

impl BrowserMode {
    fn read(reader: &ParameterReader<'_>) -> Result<Self> {
        let spec = BrowserSpec {
            name: reader.choice("browserType")?,
            min_version: positive(reader.integer("browserMinVersion")?),
            max_version: positive(reader.integer("browserMaxVersion")?),
        };

        let screenshot = reader.flag("screenshot")?;
        let wait_for_abort = reader.flag("waitForAbortOnDetection")?;

        let options = BrowserOptions {
            automatically_solve_captchas: reader.flag("antibot")?,
            mouse_movements: reader.flag("addRandomMouseMovement")?,
            force_mouse_movement: reader.flag("forceMouseMovement")?,
            video: reader.flag("recordVideoSession")?,
            css_selector: reader.non_empty("cssSelector")?,
            custom_attribute: reader.non_empty("href")?,
            intercept_fetch_request: reader.non_empty("interceptXhrFetchRequest")?.map(|raw| Patterns::parse(&raw)),

            cloudflare_bypass: reader.flag("cloudflareBypass")?,
            datadome_bypass: reader.flag("datadome")?,
            datadome_debug: reader.flag("datadomeDebug")?,
            kasada_bypass: reader.flag("kasadaBypass")?,
            disable_anti_bot: reader.flag("disableAntiBot")?,
            detect_incapsula: reader.flag("detectIncapsula")?,
            spsnspid_challenge: reader.flag("spsnspidChallenge")?,

            always_load: non_empty_list(reader.strings("alwaysLoad")?),
            captcha_answer: reader.non_empty("captchaAnswer")?,
            captcha_success_intercept: reader.non_empty("captchaSuccessIntercept")?,

            user_agent: reader.non_empty("userAgent")?,
            locales: comma_list(&reader.string("locales")?),
            set_locale: reader.flag("setLocale")?,
            force_unique_fingerprint: reader.flag("forceUniqueFingerprint")?,
            webrtc_ipv4: reader.non_empty("webrtcIpv4")?,
            webrtc_ipv6: reader.non_empty("webrtcIpv6")?,

            inner_text: reader.flag("innerText")?,
            include_images: reader.flag("includeImages")?,
            include_links: reader.flag("includeLinks")?,
            screenshot,
            screenshot_upload: screenshot && reader.flag("screenshotUpload")?,
            screenshot_width: if screenshot { differs(reader.integer("screenshotWidth")?, DEFAULT_SCREENSHOT_WIDTH) } else { None },
            screenshot_height: if screenshot { differs(reader.integer("screenshotHeight")?, DEFAULT_SCREENSHOT_HEIGHT) } else { None },
            base64: screenshot && reader.flag("base64")?,
            pdf: reader.flag("pdf")?,

            abort_on_detection: comma_list(&reader.string("abortOnDetection")?),
            abort_on_post_request: reader.flag("abortOnPostRequest")?,
            wait_for_abort_on_detection: wait_for_abort,
            wait_for_abort_on_detection_timeout: if wait_for_abort {
                differs(reader.integer("waitForAbortOnDetectionTimeout")?, DEFAULT_ABORT_DETECTION_TIMEOUT_MS)
            } else {
                None
            },
            black_listed_domains: comma_list(&reader.string("blackListedDomains")?),
            never_cache_domains: comma_list(&reader.string("neverCacheDomains")?),
            dont_load_main_site: reader.flag("dontLoadMainSite")?,
            dont_load_first_request: reader.flag("dontLoadFirstRequest")?,

            full_page_load: reader.flag("fullPageLoad")?,
            dont_wait_on_page_load: reader.flag("dontWaitOnPageLoad")?,
            wait_for_url: reader.non_empty("waitForUrl")?,
            remove_iframes: reader.flag("removeIframes")?,
            block_cookie_banners: reader.flag("blockCookieBanners")?,
            legacy: reader.flag("legacy")?,
            websocket: reader.flag("websocketConnection")?,
            local_storage: lenient_json("localStorage", &reader.string("localStorage")?),

            browser_actions: non_empty_list(browser_actions::compile(&reader.value("browserActions").unwrap_or(Value::Null))?),
        };

        Ok(Self {
            spec,
            options,
        })
    }
}

fn read_response_options(reader: &ParameterReader<'_>) -> Result<ResponseOptions> {
    Ok(ResponseOptions {
        only_status_code: reader.flag("onlyStatusCode")?,
        regex: reader.non_empty("regex")?.map(|raw| Patterns::parse(&raw)),
        filter: non_empty_list(reader.strings("filter")?),
        base64_response: reader.flag("base64Response")?,
        binary: reader.flag("binary")?,
        list_all_redirects: reader.flag("listAllRedirects")?,
    })
}

fn read_ai_parsing(reader: &ParameterReader<'_>) -> Result<Option<AiParsing>> {
    if !reader.flag("autoparse")? {
        return Ok(None);
    }
    Ok(Some(AiParsing {
        autoparse: true,
        model: reader.non_empty("model")?,
        api_key: reader.non_empty("aiApiKey")?,
        structure: lenient_json("structure", &reader.string("structure")?),
    }))
}

/// `{key, value}` entry of a header or cookie collection.
#[derive(Debug, Deserialize)]
struct KeyValue {
    #[serde(default, alias = "header_key", alias = "cookie_key", alias = "name")]
    key: Option<String>,
    #[serde(default, alias = "header_value", alias = "cookie_value")]
    value: Option<Value>,
}

impl KeyValue {
    /// Both parts, when neither is empty.
    fn pair(self) -> Option<(String, String)> {
        let key = self.key.filter(|key| !key.is_empty())?;
        let value = self.value.map(text).filter(|value| !value.is_empty())?;
        Some((key, value))
    }
}

fn key_values(list: &[Value]) -> Vec<(String, String)> {
    list.iter().filter_map(|entry| KeyValue::deserialize(entry).ok()).filter_map(KeyValue::pair).collect()
}

/// Headers from the `customHeaders` collection (`{"headers": [...]}` or a bare list).
fn header_fields(collection: &Value) -> Option<Map<String, Value>> {
    let list = match collection {
        Value::Object(map) => map.get("headers").and_then(Value::as_array)?,
        Value::Array(list) => list,
        _ => return None,
    };
    Some(key_values(list).into_iter().map(|(key, value)| (key, Value::String(value))).collect())
}

/// Headers from the raw `jsonHeaders` blob. Invalid JSON is an error.
fn json_headers(raw: &str) -> Result<Option<Map<String, Value>>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Ok(None),
        Err(err) => Err(ScrappeyError::Config(format!("Invalid JSON headers format: {}", err))),
    }
}

/// Cookie string from the `customCookies` collection, entries joined by `"; "`.
fn cookie_fields(collection: &Value) -> Option<String> {
    let pairs = match collection {
        Value::Object(map) => match map.get("cookies") {
            Some(Value::Array(list)) => key_values(list),
            _ => map.iter().map(|(key, value)| (key.clone(), text(value.clone()))).collect(),
        },
        Value::Array(list) => key_values(list),
        _ => Vec::new(),
    };

    let cookies = pairs.iter().map(|(key, value)| format!("{}={}", key, value)).collect::<Vec<_>>().join("; ");
    (!cookies.is_empty()).then_some(cookies)
}

/// Parse an optional JSON field, dropping it when blank, invalid or falsy.
fn lenient_json(
    field: &str,
    raw: &str,
) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if is_truthy(&value) => Some(value),
        Ok(_) => None,
        Err(err) => {
            warn!("ignoring invalid JSON in '{}': {}", field, err);
            None
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn comma_list(raw: &str) -> Option<Vec<String>> {
    non_empty_list(raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect())
}

fn non_empty_list<T>(list: Vec<T>) -> Option<Vec<T>> {
    (!list.is_empty()).then_some(list)
}

fn positive(n: u64) -> Option<u64> {
    (n > 0).then_some(n)
}

fn differs(
    n: u64,
    default: u64,
) -> Option<u64> {
    (n != default).then_some(n)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_header_fields() {
        let headers = header_fields(&json!({"headers": [
            {"header_key": "x-a", "header_value": "1"},
            {"header_key": "", "header_value": "skipped"},
            {"header_key": "x-b", "header_value": ""},
            {"name": "x-c", "value": 3}
        ]}))
        .unwrap();
        assert_eq!(Value::Object(headers), json!({"x-a": "1", "x-c": "3"}));
        assert_eq!(header_fields(&json!({})), None);
    }

    #[test]
    fn test_json_headers_strict() {
        assert_eq!(json_headers("  ").unwrap(), None);
        assert_eq!(Value::Object(json_headers(r#"{"Accept": "text/html"}"#).unwrap().unwrap()), json!({"Accept": "text/html"}));

        let err = json_headers("{Accept: text/html").unwrap_err();
        assert!(matches!(err, ScrappeyError::Config(_)));
        assert!(err.to_string().starts_with("Invalid JSON headers format"));
    }

    #[test]
    fn test_cookie_fields() {
        assert_eq!(cookie_fields(&json!([{"key": "a", "value": "1"}, {"key": "b", "value": "2"}])).as_deref(), Some("a=1; b=2"));
        assert_eq!(
            cookie_fields(&json!({"cookies": [{"cookie_key": "s", "cookie_value": "x"}, {"cookie_key": "t"}]})).as_deref(),
            Some("s=x")
        );
        assert_eq!(cookie_fields(&json!({"a": "1", "b": 2})).as_deref(), Some("a=1; b=2"));
        assert_eq!(cookie_fields(&json!({})), None);
    }

    #[test]
    fn test_lenient_json() {
        assert_eq!(lenient_json("structure", r#"{"title": "string"}"#), Some(json!({"title": "string"})));
        assert_eq!(lenient_json("structure", "{broken"), None);
        assert_eq!(lenient_json("localStorage", "null"), None);
        assert_eq!(lenient_json("localStorage", ""), None);
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(comma_list(" en-US, nl ,,"), Some(vec!["en-US".to_string(), "nl".to_string()]));
        assert_eq!(comma_list(" , "), None);
    }

    #[test]
    fn test_option_names() {
        assert_eq!("body_used".parse::<BodySource>().unwrap(), BodySource::Body);
        assert_eq!("json".parse::<HeadersInput>().unwrap(), HeadersInput::Json);
    }
}
