use super::{DefaultValue::*, FieldDef};

/// Fields of a single browser action record.
pub static BROWSER_ACTION_FIELDS: &[FieldDef] = &[
    field!("type", "Action Type", Options, Str("click"), options = opts![
        "Click" => "click": "Click on an element using CSS selector",
        "Type" => "type": "Type text into an input field",
        "Navigate (goto)" => "goto": "Navigate to a new URL",
        "Wait" => "wait": "Wait for a specified time",
        "Wait for Selector" => "wait_for_selector": "Wait for an element to appear",
        "Wait for Function" => "wait_for_function": "Wait for JavaScript condition",
        "Wait for Load State" => "wait_for_load_state": "Wait for page load state",
        "Wait for Cookie" => "wait_for_cookie": "Wait for a cookie to be set",
        "Execute JavaScript" => "execute_js": "Execute JavaScript code on the page",
        "Scroll" => "scroll": "Scroll to an element or page bottom",
        "Hover" => "hover": "Hover over an element",
        "Keyboard" => "keyboard": "Simulate keyboard key presses",
        "Dropdown" => "dropdown": "Select an option from a dropdown",
        "Switch Iframe" => "switch_iframe": "Switch context to an iframe",
        "Set Viewport" => "set_viewport": "Change browser viewport size",
        "Conditional (if)" => "if": "Execute actions conditionally",
        "Loop (while)" => "while": "Loop actions while condition is true",
        "Solve Captcha" => "solve_captcha": "Solve various captcha types",
        "Discord Login" => "discord_login": "Login to Discord with token",
        "Remove Iframes" => "remove_iframes": "Remove all iframes from page",
    ]),
    field!("when", "When", Options, Str("afterload"), options = opts!["After Page Load" => "afterload", "Before Page Load" => "beforeload"]),
    field!("ignoreErrors", "Ignore Errors", Boolean, Bool(false)),
    field!("timeout", "Timeout (ms)", Number, Number(60000)),
    field!("cssSelector", "CSS Selector", String, Str(""), show = show!(type = ["click", "type", "wait_for_selector", "scroll", "hover", "dropdown", "switch_iframe"])),
    field!("wait", "Wait After (ms)", Number, Number(0), show = show!(type = ["click", "type", "goto", "keyboard", "dropdown", "set_viewport", "discord_login"])),
    field!("waitForSelector", "Wait for Selector", String, Str(""), show = show!(type = ["click", "keyboard", "dropdown"])),
    field!("direct", "Direct Click", Boolean, Bool(false), show = show!(type = ["click", "type", "discord_login"])),
    field!("text", "Text to Type", String, Str(""), show = show!(type = ["type"])),
    field!("url", "URL", String, Str(""), show = show!(type = ["goto"])),
    field!("waitTime", "Wait Time (ms)", Number, Number(1000), show = show!(type = ["wait"])),
    field!("code", "JavaScript Code", String, Str(""), show = show!(type = ["wait_for_function", "execute_js"])),
    field!("dontReturnValue", "Don't Return Value", Boolean, Bool(false), show = show!(type = ["execute_js"])),
    field!("waitForLoadState", "Load State", Options, Str("networkidle"), options = opts![
        "DOM Content Loaded" => "domcontentloaded",
        "Network Idle" => "networkidle",
        "Full Load" => "load",
    ], show = show!(type = ["wait_for_load_state"])),
    field!("cookieName", "Cookie Name", String, Str(""), show = show!(type = ["wait_for_cookie"])),
    field!("cookieValue", "Cookie Value", String, Str(""), show = show!(type = ["wait_for_cookie"])),
    field!("cookieDomain", "Cookie Domain", String, Str(""), show = show!(type = ["wait_for_cookie"])),
    field!("pollIntervalMs", "Poll Interval (ms)", Number, Number(200), show = show!(type = ["wait_for_cookie"])),
    field!("repeat", "Repeat", Number, Number(1), show = show!(type = ["scroll"])),
    field!("delayMs", "Delay Between Scrolls (ms)", Number, Number(100), show = show!(type = ["scroll"])),
    field!("value", "Key", Options, Str("enter"), options = opts![
        "Enter" => "enter",
        "Tab" => "tab",
        "Space" => "space",
        "Arrow Down" => "arrowdown",
        "Arrow Up" => "arrowup",
        "Arrow Left" => "arrowleft",
        "Arrow Right" => "arrowright",
        "Backspace" => "backspace",
        "Clear" => "clear",
    ], show = show!(type = ["keyboard"])),
    field!("keyboardCssSelector", "Focus Element First", String, Str(""), show = show!(type = ["keyboard"])),
    field!("dropdownMethod", "Selection Method", Options, Str("value"), options = opts!["By Value" => "value", "By Index" => "index"], show = show!(type = ["dropdown"])),
    field!("dropdownValue", "Option Value", String, Str(""), show = show!(type = ["dropdown"], dropdownMethod = ["value"])),
    field!("dropdownIndex", "Option Index", Number, Number(0), show = show!(type = ["dropdown"], dropdownMethod = ["index"])),
    field!("viewportWidth", "Width", Number, Number(1280), show = show!(type = ["set_viewport"])),
    field!("viewportHeight", "Height", Number, Number(1024), show = show!(type = ["set_viewport"])),
    field!("condition", "Condition", String, Str(""), show = show!(type = ["if", "while"])),
    field!("thenActions", "Then Actions (JSON)", String, Str("[]"), show = show!(type = ["if", "while"])),
    field!("orActions", "Else Actions (JSON)", String, Str("[]"), show = show!(type = ["if"])),
    field!("maxAttempts", "Max Iterations", Number, Number(10), show = show!(type = ["while"])),
    field!("captcha", "Captcha Type", Options, Str("turnstile"), options = opts![
        "Cloudflare Turnstile" => "turnstile",
        "reCAPTCHA v2" => "recaptcha",
        "reCAPTCHA v2 (with sitekey)" => "recaptchav2",
        "reCAPTCHA v3" => "recaptchav3",
        "hCaptcha" => "hcaptcha",
        "hCaptcha (with sitekey)" => "hcaptcha_inside",
        "hCaptcha Enterprise" => "hcaptcha_enterprise_inside",
        "FunCaptcha (Arkose Labs)" => "funcaptcha",
        "PerimeterX" => "perimeterx",
        "MTCaptcha" => "mtcaptcha",
        "MTCaptcha Isolated" => "mtcaptchaisolated",
        "v4Guard" => "v4guard",
        "Custom (Image)" => "custom",
        "FingerprintJS" => "fingerprintjscom",
        "FingerprintJS CurseForge" => "fingerprintjs_curseforge",
    ], show = show!(type = ["solve_captcha"])),
    field!("sitekey", "Site Key", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("captchaCssSelector", "Captcha CSS Selector", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("websiteUrl", "Website URL", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("websiteKey", "Website Key", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("inputSelector", "Input Selector", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("clickSelector", "Click Selector", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("iframeSelector", "Iframe Selector", String, Str(""), show = show!(type = ["solve_captcha"])),
    field!("captchaAction", "Action", String, Str(""), show = show!(type = ["solve_captcha"], captcha = ["recaptchav3"])),
    field!("invisible", "Invisible Captcha", Boolean, Bool(false), show = show!(type = ["solve_captcha"])),
    field!("captchaReset", "Reset Before Solving", Boolean, Bool(false), show = show!(type = ["solve_captcha"])),
    field!("captchaFast", "Fast Mode", Boolean, Bool(false), show = show!(type = ["solve_captcha"])),
    field!("base64Image", "Base64 Image", String, Str(""), show = show!(type = ["solve_captcha"], captcha = ["custom"])),
    field!("token", "Discord Token", String, Str(""), show = show!(type = ["discord_login"])),
];
