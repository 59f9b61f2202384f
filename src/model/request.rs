use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumString};

use super::{BrowserAction, is_false};

/// Remote command carried in `cmd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString)]
pub enum Command {
    #[default]
    #[serde(rename = "request.get")]
    #[strum(serialize = "request.get")]
    RequestGet,
    #[serde(rename = "request.post")]
    #[strum(serialize = "request.post")]
    RequestPost,
    #[serde(rename = "request.put")]
    #[strum(serialize = "request.put")]
    RequestPut,
    #[serde(rename = "request.delete")]
    #[strum(serialize = "request.delete")]
    RequestDelete,
    #[serde(rename = "request.patch")]
    #[strum(serialize = "request.patch")]
    RequestPatch,
    #[serde(rename = "request.publish")]
    #[strum(serialize = "request.publish")]
    RequestPublish,
    #[serde(rename = "sessions.create")]
    #[strum(serialize = "sessions.create")]
    SessionsCreate,
    #[serde(rename = "sessions.destroy")]
    #[strum(serialize = "sessions.destroy")]
    SessionsDestroy,
    #[serde(rename = "sessions.list")]
    #[strum(serialize = "sessions.list")]
    SessionsList,
    #[serde(rename = "sessions.active")]
    #[strum(serialize = "sessions.active")]
    SessionsActive,
    #[serde(rename = "websocket.create")]
    #[strum(serialize = "websocket.create")]
    WebsocketCreate,
}

impl Command {
    /// Map an HTTP method name (`GET`, `post`, ...) to its request command.
    pub fn from_http_method(method: &str) -> Option<Self> {
        let cmd = format!("request.{}", method.trim().to_lowercase());
        cmd.parse::<Command>().ok().filter(Command::is_request)
    }

    pub fn is_request(&self) -> bool {
        self.as_ref().starts_with("request.")
    }

    pub fn is_get(&self) -> bool {
        *self == Command::RequestGet
    }
}

/// Value of `request_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
pub enum RequestMode {
    Browser,
    #[default]
    Request,
    PatchedChrome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BrowserName {
    #[default]
    Firefox,
    Chrome,
    Safari,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSpec {
    pub name: BrowserName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_version: Option<u64>,
}

impl BrowserSpec {
    pub fn new(name: BrowserName) -> Self {
        Self {
            name,
            min_version: None,
            max_version: None,
        }
    }
}

/// Either one pattern or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Patterns {
    Many(Vec<Value>),
    One(String),
}

impl Patterns {
    /// A JSON array becomes [`Patterns::Many`]; anything else is kept verbatim.
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(list)) => Patterns::Many(list),
            _ => Patterns::One(raw.to_string()),
        }
    }
}

/// Remote proxy pool flavour, from `proxyType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
pub enum ProxyKind {
    #[default]
    #[strum(serialize = "")]
    Residential,
    #[strum(serialize = "premiumProxy")]
    Premium,
    #[strum(serialize = "datacenter")]
    Datacenter,
    #[strum(serialize = "mobileProxy")]
    Mobile,
}

/// Proxy fields shared by every body that carries a proxy choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_country: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub no_proxy: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub premium_proxy: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub datacenter: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mobile_proxy: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dont_change_proxy: bool,
}

impl ProxySettings {
    pub fn set_kind(
        &mut self,
        kind: ProxyKind,
    ) {
        match kind {
            ProxyKind::Residential => {}
            ProxyKind::Premium => self.premium_proxy = true,
            ProxyKind::Datacenter => self.datacenter = true,
            ProxyKind::Mobile => self.mobile_proxy = true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub only_status_code: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<Patterns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    pub base64_response: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub binary: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub list_all_redirects: bool,
}

/// AI extraction block, only sent when enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiParsing {
    pub autoparse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<Value>,
}

/// Options that only apply in browser mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub automatically_solve_captchas: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mouse_movements: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub force_mouse_movement: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub video: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercept_fetch_request: Option<Patterns>,

    #[serde(skip_serializing_if = "is_false")]
    pub cloudflare_bypass: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub datadome_bypass: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub datadome_debug: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub kasada_bypass: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub disable_anti_bot: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub detect_incapsula: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub spsnspid_challenge: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_load: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_success_intercept: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    pub set_locale: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub force_unique_fingerprint: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webrtc_ipv4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webrtc_ipv6: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub inner_text: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub include_images: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub include_links: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub screenshot: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub screenshot_upload: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_height: Option<u64>,
    #[serde(skip_serializing_if = "is_false")]
    pub base64: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub pdf: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_on_detection: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    pub abort_on_post_request: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub wait_for_abort_on_detection: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_abort_on_detection_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black_listed_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub never_cache_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "is_false")]
    pub dont_load_main_site: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dont_load_first_request: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub full_page_load: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub dont_wait_on_page_load: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_url: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub remove_iframes: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub block_cookie_banners: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub legacy: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub websocket: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_storage: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_actions: Option<Vec<BrowserAction>>,
}

/// Payload of a `request.*` call.
///
/// Every optional part is left out of the JSON when unset so the remote side
/// applies its own default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    pub cmd: Command,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// `"request"` in HTTP-only mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<Vec<BrowserSpec>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_driver: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub close_after_use: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
    #[serde(rename = "cookiejar", skip_serializing_if = "Option::is_none")]
    pub cookie_jar: Option<Vec<Value>>,

    #[serde(flatten)]
    pub proxy: ProxySettings,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(flatten)]
    pub response: ResponseOptions,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiParsing>,
    #[serde(flatten)]
    pub browser_options: BrowserOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelisted_domains: Option<Vec<String>>,
}

impl RequestBody {
    pub fn new(cmd: Command) -> Self {
        Self {
            cmd,
            ..Default::default()
        }
    }

    /// Set one header, creating the header map when needed.
    pub fn set_header(
        &mut self,
        name: &str,
        value: &str,
    ) {
        self.custom_headers.get_or_insert_with(Map::new).insert(name.to_string(), Value::from(value));
    }
}
