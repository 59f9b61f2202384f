use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, Error as _},
};
use serde_json::Value;
use tracing::warn;

use crate::{
    Result, ScrappeyError,
    model::{BranchStep, BrowserAction, BrowserActionKind, CaptchaData, When},
};

const DEFAULT_ACTION_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_WAIT_MS: u64 = 1_000;

/// One action record as collected by the host UI.
///
/// Every field any action type may use is present here; [`RawBrowserAction::compile`]
/// keeps only the ones that belong to `type`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBrowserAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub when: Option<String>,
    #[serde(deserialize_with = "loose_bool")]
    pub ignore_errors: bool,
    #[serde(deserialize_with = "loose_u64")]
    pub timeout: Option<u64>,

    pub css_selector: Option<String>,
    #[serde(deserialize_with = "loose_u64")]
    pub wait: Option<u64>,
    pub wait_for_selector: Option<String>,
    #[serde(deserialize_with = "loose_bool")]
    pub direct: bool,
    pub text: Option<String>,
    pub url: Option<String>,
    #[serde(deserialize_with = "loose_u64")]
    pub wait_time: Option<u64>,
    pub code: Option<String>,
    #[serde(deserialize_with = "loose_bool")]
    pub dont_return_value: bool,
    pub wait_for_load_state: Option<String>,
    pub cookie_name: Option<String>,
    pub cookie_value: Option<String>,
    pub cookie_domain: Option<String>,
    #[serde(deserialize_with = "loose_u64")]
    pub poll_interval_ms: Option<u64>,
    #[serde(deserialize_with = "loose_u64")]
    pub repeat: Option<u64>,
    #[serde(deserialize_with = "loose_u64")]
    pub delay_ms: Option<u64>,
    pub value: Option<String>,
    pub keyboard_css_selector: Option<String>,
    pub dropdown_method: Option<String>,
    pub dropdown_value: Option<String>,
    #[serde(deserialize_with = "loose_u64")]
    pub dropdown_index: Option<u64>,
    #[serde(deserialize_with = "loose_u64")]
    pub viewport_width: Option<u64>,
    #[serde(deserialize_with = "loose_u64")]
    pub viewport_height: Option<u64>,
    pub condition: Option<String>,
    pub then_actions: Option<String>,
    pub or_actions: Option<String>,
    #[serde(deserialize_with = "loose_u64")]
    pub max_attempts: Option<u64>,

    pub captcha: Option<String>,
    pub sitekey: Option<String>,
    pub captcha_action: Option<String>,
    #[serde(deserialize_with = "loose_bool")]
    pub invisible: bool,
    pub base64_image: Option<String>,
    pub captcha_css_selector: Option<String>,
    #[serde(deserialize_with = "loose_bool")]
    pub captcha_reset: bool,
    #[serde(deserialize_with = "loose_bool")]
    pub captcha_fast: bool,
    pub website_url: Option<String>,
    pub website_key: Option<String>,
    pub input_selector: Option<String>,
    pub click_selector: Option<String>,
    pub iframe_selector: Option<String>,

    pub token: Option<String>,
}

/// Compile the `browserActions` collection into the remote action list.
///
/// Accepts the collection object (`{"actions": [...]}`) or a bare list.
/// Order is preserved.
pub fn compile(collection: &Value) -> Result<Vec<BrowserAction>> {
    let records = match collection {
        Value::Array(list) => list.as_slice(),
        Value::Object(map) => match map.get("actions") {
            Some(Value::Array(list)) => list.as_slice(),
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let raw: RawBrowserAction =
                serde_json::from_value(record.clone()).map_err(|err| ScrappeyError::Config(format!("invalid browser action #{}: {}", index + 1, err)))?;
            raw.compile()
        })
        .collect()
}

impl RawBrowserAction {
    pub fn compile(&self) -> Result<BrowserAction> {
        let kind = match self.kind.as_str() {
            "click" => BrowserActionKind::Click {
                css_selector: self.css_selector.clone(),
                wait: positive(self.wait),
                wait_for_selector: filled(&self.wait_for_selector),
                direct: self.direct,
            },
            "type" => BrowserActionKind::Type {
                css_selector: self.css_selector.clone(),
                text: self.text.clone(),
                wait: positive(self.wait),
                direct: self.direct,
            },
            "goto" => BrowserActionKind::Goto {
                url: self.url.clone(),
                wait: positive(self.wait),
            },
            "wait" => BrowserActionKind::Wait {
                wait: positive(self.wait_time).unwrap_or(DEFAULT_WAIT_MS),
            },
            "wait_for_selector" => BrowserActionKind::WaitForSelector {
                css_selector: self.css_selector.clone(),
            },
            "wait_for_function" => BrowserActionKind::WaitForFunction {
                code: self.code.clone(),
            },
            "wait_for_load_state" => BrowserActionKind::WaitForLoadState {
                wait_for_load_state: parse_choice("waitForLoadState", &self.wait_for_load_state)?,
            },
            "wait_for_cookie" => BrowserActionKind::WaitForCookie {
                cookie_name: self.cookie_name.clone(),
                cookie_value: filled(&self.cookie_value),
                cookie_domain: filled(&self.cookie_domain),
                poll_interval_ms: positive(self.poll_interval_ms),
            },
            "execute_js" => BrowserActionKind::ExecuteJs {
                code: self.code.clone(),
                dont_return_value: self.dont_return_value,
            },
            "scroll" => BrowserActionKind::Scroll {
                css_selector: filled(&self.css_selector),
                repeat: positive(self.repeat),
                delay_ms: positive(self.delay_ms),
            },
            "hover" => BrowserActionKind::Hover {
                css_selector: self.css_selector.clone(),
            },
            "keyboard" => BrowserActionKind::Keyboard {
                value: parse_choice("value", &self.value)?,
                css_selector: filled(&self.keyboard_css_selector),
                wait: positive(self.wait),
                wait_for_selector: filled(&self.wait_for_selector),
            },
            "dropdown" => {
                let by_index = self.dropdown_method.as_deref() == Some("index");
                BrowserActionKind::Dropdown {
                    css_selector: self.css_selector.clone(),
                    value: if by_index { None } else { self.dropdown_value.clone() },
                    index: if by_index { self.dropdown_index } else { None },
                    wait: positive(self.wait),
                    wait_for_selector: filled(&self.wait_for_selector),
                }
            }
            "switch_iframe" => BrowserActionKind::SwitchIframe {
                css_selector: self.css_selector.clone(),
            },
            "set_viewport" => BrowserActionKind::SetViewport {
                width: positive(self.viewport_width),
                height: positive(self.viewport_height),
                wait: positive(self.wait),
            },
            "if" => BrowserActionKind::If {
                condition: self.condition.clone(),
                then: parse_branch("thenActions", &self.then_actions)?.unwrap_or_default(),
                or: parse_branch("orActions", &self.or_actions)?.filter(|steps| !steps.is_empty()),
            },
            "while" => BrowserActionKind::While {
                condition: self.condition.clone(),
                then: parse_branch("thenActions", &self.then_actions)?.unwrap_or_default(),
                max_attempts: positive(self.max_attempts),
            },
            "solve_captcha" => {
                let captcha_data = CaptchaData {
                    sitekey: filled(&self.sitekey),
                    action: filled(&self.captcha_action),
                    invisible: self.invisible,
                    base64_image: filled(&self.base64_image),
                    css_selector: filled(&self.captcha_css_selector),
                    reset: self.captcha_reset,
                    fast: self.captcha_fast,
                };
                BrowserActionKind::SolveCaptcha {
                    captcha: parse_choice("captcha", &self.captcha)?,
                    captcha_data: (!captcha_data.is_empty()).then_some(captcha_data),
                    website_url: filled(&self.website_url),
                    website_key: filled(&self.website_key),
                    input_selector: filled(&self.input_selector),
                    click_selector: filled(&self.click_selector),
                    iframe_selector: filled(&self.iframe_selector),
                }
            }
            "discord_login" => BrowserActionKind::DiscordLogin {
                token: self.token.clone(),
                direct: self.direct,
                wait: positive(self.wait),
            },
            "remove_iframes" => BrowserActionKind::RemoveIframes,
            other => return Err(ScrappeyError::Config(format!("unknown browser action type '{}'", other))),
        };

        let when = match self.when.as_deref() {
            None | Some("") | Some("afterload") => None,
            Some(when) => Some(parse_enum::<When>("when", when)?),
        };

        Ok(BrowserAction {
            kind,
            when,
            ignore_errors: self.ignore_errors,
            timeout: positive(self.timeout).filter(|timeout| *timeout != DEFAULT_ACTION_TIMEOUT_MS),
        })
    }
}

fn filled(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

fn positive(value: Option<u64>) -> Option<u64> {
    value.filter(|n| *n > 0)
}

fn parse_enum<T: DeserializeOwned>(
    field: &str,
    value: &str,
) -> Result<T> {
    serde_json::from_value(Value::String(value.to_string())).map_err(|_| ScrappeyError::Config(format!("invalid value '{}' for browser action field '{}'", value, field)))
}

fn parse_choice<T: DeserializeOwned>(
    field: &str,
    value: &Option<String>,
) -> Result<Option<T>> {
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => parse_enum(field, value).map(Some),
    }
}

/// Branch list of an `if`/`while` step, `None` when the text is not valid JSON.
///
/// Steps are forwarded as written; a well-formed value that is not a list is rejected.
fn parse_branch(
    field: &str,
    raw: &Option<String>,
) -> Result<Option<Vec<BranchStep>>> {
    let raw = raw.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("[]");
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(steps)) => Ok(Some(steps.into_iter().map(branch_step).collect())),
        Ok(other) => Err(ScrappeyError::Config(format!("browser action field '{}' must be a JSON list, got {}", field, other))),
        Err(err) => {
            warn!("ignoring malformed browser action branch '{}': {}", field, err);
            Ok(None)
        }
    }
}

/// Typed step when it reads back unchanged, the raw value otherwise.
fn branch_step(step: Value) -> BranchStep {
    match serde_json::from_value::<BrowserAction>(step.clone()) {
        Ok(action) if serde_json::to_value(&action).is_ok_and(|typed| typed == step) => BranchStep::Action(action),
        _ => BranchStep::Raw(step),
    }
}

/// Number field that also takes `null` and whole floats such as `500.0`.
fn loose_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {}", n))),
        Some(other) => Err(D::Error::custom(format!("expected a number, got {}", other))),
    }
}

/// Flag field where `null` reads as `false`.
fn loose_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{CaptchaType, KeyboardKey};

    fn compiled(actions: Value) -> Value {
        serde_json::to_value(compile(&json!({ "actions": actions })).unwrap()).unwrap()
    }

    #[test]
    fn test_goto_then_wait() {
        let output = compiled(json!([
            {"type": "goto", "url": "https://x"},
            {"type": "wait", "waitTime": 500}
        ]));
        assert_eq!(output, json!([{"type": "goto", "url": "https://x"}, {"type": "wait", "wait": 500}]));
    }

    #[test]
    fn test_ui_defaults_are_omitted() {
        let output = compiled(json!([{
            "type": "click",
            "cssSelector": "#go",
            "when": "afterload",
            "ignoreErrors": false,
            "timeout": 60000,
            "wait": 0,
            "waitForSelector": "",
            "direct": false,
            "text": "ignored",
            "url": "ignored"
        }]));
        assert_eq!(output, json!([{"type": "click", "cssSelector": "#go"}]));
    }

    #[test]
    fn test_common_fields_are_kept_when_set() {
        let output = compiled(json!([{"type": "hover", "cssSelector": "a", "when": "beforeload", "ignoreErrors": true, "timeout": 3000}]));
        assert_eq!(output, json!([{"type": "hover", "cssSelector": "a", "when": "beforeload", "ignoreErrors": true, "timeout": 3000}]));
    }

    #[test]
    fn test_wait_defaults_to_one_second() {
        let output = compiled(json!([{"type": "wait"}]));
        assert_eq!(output, json!([{"type": "wait", "wait": 1000}]));
    }

    #[test]
    fn test_dropdown_selection_method() {
        let output = compiled(json!([
            {"type": "dropdown", "cssSelector": "select", "dropdownMethod": "index", "dropdownIndex": 2, "dropdownValue": "x"},
            {"type": "dropdown", "cssSelector": "select", "dropdownMethod": "value", "dropdownIndex": 2, "dropdownValue": "x"}
        ]));
        assert_eq!(
            output,
            json!([
                {"type": "dropdown", "cssSelector": "select", "index": 2},
                {"type": "dropdown", "cssSelector": "select", "value": "x"}
            ])
        );
    }

    #[test]
    fn test_keyboard_uses_its_own_selector() {
        let actions = compile(&json!([{"type": "keyboard", "value": "tab", "cssSelector": "#a", "keyboardCssSelector": "#b"}])).unwrap();
        assert_eq!(
            actions[0].kind,
            BrowserActionKind::Keyboard {
                value: Some(KeyboardKey::Tab),
                css_selector: Some("#b".to_string()),
                wait: None,
                wait_for_selector: None,
            }
        );
    }

    #[test]
    fn test_if_branches() {
        let output = compiled(json!([{
            "type": "if",
            "condition": "document.title === 'x'",
            "thenActions": r##"[{"type": "click", "cssSelector": "#a"}]"##,
            "orActions": "[]"
        }]));
        assert_eq!(
            output,
            json!([{"type": "if", "condition": "document.title === 'x'", "then": [{"type": "click", "cssSelector": "#a"}]}])
        );
    }

    #[test]
    fn test_malformed_branches_degrade() {
        let output = compiled(json!([
            {"type": "if", "condition": "c", "thenActions": "[{not json", "orActions": "{also bad"},
            {"type": "while", "condition": "c", "thenActions": "[{\"type\": ", "maxAttempts": 5}
        ]));
        assert_eq!(
            output,
            json!([
                {"type": "if", "condition": "c", "then": []},
                {"type": "while", "condition": "c", "then": [], "maxAttempts": 5}
            ])
        );
    }

    #[test]
    fn test_well_formed_branches_are_forwarded() {
        let output = compiled(json!([{
            "type": "if",
            "condition": "document.querySelector('#x')",
            "thenActions": r##"[{"type":"click","cssSelector":"#a","wait":"500"},{"type":"scroll","repeat":3}]"##,
            "orActions": r##"[{"type":"teleport","to":"#b"}]"##
        }]));
        assert_eq!(
            output,
            json!([{
                "type": "if",
                "condition": "document.querySelector('#x')",
                "then": [{"type": "click", "cssSelector": "#a", "wait": "500"}, {"type": "scroll", "repeat": 3}],
                "or": [{"type": "teleport", "to": "#b"}]
            }])
        );

        let actions = compile(&json!([{"type": "while", "thenActions": r#"[{"type":"scroll","repeat":3},{"type":"wait","wait":200,"note":"x"}]"#}])).unwrap();
        match &actions[0].kind {
            BrowserActionKind::While {
                then,
                ..
            } => {
                assert!(matches!(then[0], BranchStep::Action(_)));
                assert_eq!(then[1], BranchStep::Raw(json!({"type": "wait", "wait": 200, "note": "x"})));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_branch_must_be_a_list() {
        let result = compile(&json!([{"type": "if", "thenActions": r#"{"type":"click"}"#}]));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));
    }

    #[test]
    fn test_loose_numbers_and_flags() {
        let output = compiled(json!([
            {"type": "click", "cssSelector": "#go", "wait": 500.0, "ignoreErrors": null, "timeout": null, "direct": null},
            {"type": "set_viewport", "viewportWidth": 1280.0, "viewportHeight": 720}
        ]));
        assert_eq!(
            output,
            json!([
                {"type": "click", "cssSelector": "#go", "wait": 500},
                {"type": "set_viewport", "width": 1280, "height": 720}
            ])
        );

        let result = compile(&json!([{"type": "click", "wait": 1.5}]));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));
    }

    #[test]
    fn test_captcha_data_only_when_set() {
        let actions = compile(&json!([
            {"type": "solve_captcha", "captcha": "turnstile", "sitekey": "", "invisible": false},
            {"type": "solve_captcha", "captcha": "recaptchav3", "sitekey": "k", "captchaAction": "login", "websiteUrl": "https://x"}
        ]))
        .unwrap();

        let first = serde_json::to_value(&actions[0]).unwrap();
        assert_eq!(first, json!({"type": "solve_captcha", "captcha": "turnstile"}));

        match &actions[1].kind {
            BrowserActionKind::SolveCaptcha {
                captcha,
                captcha_data,
                website_url,
                ..
            } => {
                assert_eq!(*captcha, Some(CaptchaType::RecaptchaV3));
                let data = captcha_data.as_ref().unwrap();
                assert_eq!(data.sitekey.as_deref(), Some("k"));
                assert_eq!(data.action.as_deref(), Some("login"));
                assert_eq!(website_url.as_deref(), Some("https://x"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = compile(&json!([{"type": "fly"}]));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));

        let result = compile(&json!([{"type": "wait_for_load_state", "waitForLoadState": "sometimes"}]));
        assert!(matches!(result, Err(ScrappeyError::Config(_))));
    }

    #[test]
    fn test_empty_collection() {
        assert!(compile(&json!({})).unwrap().is_empty());
        assert!(compile(&Value::Null).unwrap().is_empty());
        assert!(compile(&json!({"actions": []})).unwrap().is_empty());
    }
}
