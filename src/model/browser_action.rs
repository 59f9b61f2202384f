use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::is_false;

/// One step of a browser automation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserAction {
    #[serde(flatten)]
    pub kind: BrowserActionKind,
    /// Omitted means `afterload`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore_errors: bool,
    /// Omitted means the remote default of 60000 ms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl BrowserAction {
    pub fn new(kind: BrowserActionKind) -> Self {
        Self {
            kind,
            when: None,
            ignore_errors: false,
            timeout: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

impl From<BrowserActionKind> for BrowserAction {
    fn from(kind: BrowserActionKind) -> Self {
        Self::new(kind)
    }
}

/// One step of an `if`/`while` branch.
///
/// Steps that are not a known action are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BranchStep {
    Action(BrowserAction),
    Raw(Value),
}

impl From<BrowserAction> for BranchStep {
    fn from(action: BrowserAction) -> Self {
        BranchStep::Action(action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum When {
    AfterLoad,
    BeforeLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    DomContentLoaded,
    NetworkIdle,
    Load,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardKey {
    Enter,
    Tab,
    Space,
    ArrowDown,
    ArrowUp,
    ArrowLeft,
    ArrowRight,
    Backspace,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptchaType {
    #[serde(rename = "turnstile")]
    Turnstile,
    #[serde(rename = "recaptcha")]
    Recaptcha,
    #[serde(rename = "recaptchav2")]
    RecaptchaV2,
    #[serde(rename = "recaptchav3")]
    RecaptchaV3,
    #[serde(rename = "hcaptcha")]
    Hcaptcha,
    #[serde(rename = "hcaptcha_inside")]
    HcaptchaInside,
    #[serde(rename = "hcaptcha_enterprise_inside")]
    HcaptchaEnterpriseInside,
    #[serde(rename = "funcaptcha")]
    Funcaptcha,
    #[serde(rename = "perimeterx")]
    Perimeterx,
    #[serde(rename = "mtcaptcha")]
    Mtcaptcha,
    #[serde(rename = "mtcaptchaisolated")]
    MtcaptchaIsolated,
    #[serde(rename = "v4guard")]
    V4guard,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "fingerprintjscom")]
    Fingerprintjs,
    #[serde(rename = "fingerprintjs_curseforge")]
    FingerprintjsCurseforge,
}

/// Captcha-specific settings of a `solve_captcha` step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitekey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub invisible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reset: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fast: bool,
}

impl CaptchaData {
    pub fn is_empty(&self) -> bool {
        *self == CaptchaData::default()
    }
}

/// Variant-specific part of a [`BrowserAction`], tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum BrowserActionKind {
    Click {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait_for_selector: Option<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        direct: bool,
    },
    Type {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
        #[serde(default, skip_serializing_if = "is_false")]
        direct: bool,
    },
    Goto {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
    },
    Wait {
        wait: u64,
    },
    WaitForSelector {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
    },
    WaitForFunction {
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    WaitForLoadState {
        #[serde(skip_serializing_if = "Option::is_none")]
        wait_for_load_state: Option<LoadState>,
    },
    WaitForCookie {
        #[serde(skip_serializing_if = "Option::is_none")]
        cookie_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cookie_value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        cookie_domain: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        poll_interval_ms: Option<u64>,
    },
    ExecuteJs {
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        dont_return_value: bool,
    },
    Scroll {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        repeat: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        delay_ms: Option<u64>,
    },
    Hover {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
    },
    Keyboard {
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<KeyboardKey>,
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait_for_selector: Option<String>,
    },
    /// Selects either by option `value` or by `index`.
    Dropdown {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait_for_selector: Option<String>,
    },
    SwitchIframe {
        #[serde(skip_serializing_if = "Option::is_none")]
        css_selector: Option<String>,
    },
    SetViewport {
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
    },
    If {
        #[serde(skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
        #[serde(default)]
        then: Vec<BranchStep>,
        #[serde(skip_serializing_if = "Option::is_none")]
        or: Option<Vec<BranchStep>>,
    },
    While {
        #[serde(skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
        #[serde(default)]
        then: Vec<BranchStep>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_attempts: Option<u64>,
    },
    SolveCaptcha {
        #[serde(skip_serializing_if = "Option::is_none")]
        captcha: Option<CaptchaType>,
        #[serde(skip_serializing_if = "Option::is_none")]
        captcha_data: Option<CaptchaData>,
        #[serde(skip_serializing_if = "Option::is_none")]
        website_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        website_key: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        input_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        click_selector: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        iframe_selector: Option<String>,
    },
    DiscordLogin {
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        direct: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        wait: Option<u64>,
    },
    RemoveIframes,
}

impl BrowserActionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            BrowserActionKind::Click { .. } => "click",
            BrowserActionKind::Type { .. } => "type",
            BrowserActionKind::Goto { .. } => "goto",
            BrowserActionKind::Wait { .. } => "wait",
            BrowserActionKind::WaitForSelector { .. } => "wait_for_selector",
            BrowserActionKind::WaitForFunction { .. } => "wait_for_function",
            BrowserActionKind::WaitForLoadState { .. } => "wait_for_load_state",
            BrowserActionKind::WaitForCookie { .. } => "wait_for_cookie",
            BrowserActionKind::ExecuteJs { .. } => "execute_js",
            BrowserActionKind::Scroll { .. } => "scroll",
            BrowserActionKind::Hover { .. } => "hover",
            BrowserActionKind::Keyboard { .. } => "keyboard",
            BrowserActionKind::Dropdown { .. } => "dropdown",
            BrowserActionKind::SwitchIframe { .. } => "switch_iframe",
            BrowserActionKind::SetViewport { .. } => "set_viewport",
            BrowserActionKind::If { .. } => "if",
            BrowserActionKind::While { .. } => "while",
            BrowserActionKind::SolveCaptcha { .. } => "solve_captcha",
            BrowserActionKind::DiscordLogin { .. } => "discord_login",
            BrowserActionKind::RemoveIframes => "remove_iframes",
        }
    }
}
