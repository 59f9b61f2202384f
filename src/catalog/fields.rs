use super::{DefaultValue::*, DisplayCondition, FieldDef, FieldOption};

const BUILDER: &[DisplayCondition] = show!(scrappeyOperations = ["requestBuilder"]);
const BROWSER: &[DisplayCondition] = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"]);
const SESSION_SETUP: &[DisplayCondition] = show!(scrappeyOperations = ["sessionCreate", "websocketCreate"]);
const BODY_METHODS: [super::ShowValue; 5] = [
    show_value!("request.put"),
    show_value!("request.post"),
    show_value!("request.patch"),
    show_value!("request.delete"),
    show_value!("request.publish"),
];

/// Proxy countries accepted by `proxyCountry`.
pub const COUNTRIES: &[FieldOption] = opts![
    "Any" => "",
    "Argentina" => "Argentina",
    "Australia" => "Australia",
    "Austria" => "Austria",
    "Belgium" => "Belgium",
    "Brazil" => "Brazil",
    "Bulgaria" => "Bulgaria",
    "Canada" => "Canada",
    "Chile" => "Chile",
    "China" => "China",
    "Colombia" => "Colombia",
    "Czech Republic" => "CzechRepublic",
    "Denmark" => "Denmark",
    "Egypt" => "Egypt",
    "Finland" => "Finland",
    "France" => "France",
    "Germany" => "Germany",
    "Greece" => "Greece",
    "Hong Kong" => "HongKong",
    "Hungary" => "Hungary",
    "India" => "India",
    "Indonesia" => "Indonesia",
    "Ireland" => "Ireland",
    "Israel" => "Israel",
    "Italy" => "Italy",
    "Japan" => "Japan",
    "Malaysia" => "Malaysia",
    "Mexico" => "Mexico",
    "Netherlands" => "Netherlands",
    "New Zealand" => "NewZealand",
    "Nigeria" => "Nigeria",
    "Norway" => "Norway",
    "Pakistan" => "Pakistan",
    "Philippines" => "Philippines",
    "Poland" => "Poland",
    "Portugal" => "Portugal",
    "Romania" => "Romania",
    "Saudi Arabia" => "SaudiArabia",
    "Singapore" => "Singapore",
    "South Africa" => "SouthAfrica",
    "South Korea" => "SouthKorea",
    "Spain" => "Spain",
    "Sweden" => "Sweden",
    "Switzerland" => "Switzerland",
    "Taiwan" => "Taiwan",
    "Thailand" => "Thailand",
    "Turkey" => "Turkey",
    "Ukraine" => "Ukraine",
    "United Arab Emirates" => "UnitedArabEmirates",
    "United Kingdom" => "UnitedKingdom",
    "United States" => "UnitedStates",
    "Vietnam" => "Vietnam",
];

/// Every node field, in display order.
pub static FIELDS: &[FieldDef] = &[
    // operation selector
    field!("scrappeyOperations", "Scrappey Operations", Options, Str("requestBuilder"), options = opts![
        "Request Builder" => "requestBuilder": "Create a customized HTTP or browser request with advanced configuration options",
        "HTTP Request • Auto-Retry on Protection" => "httpRequestAutoRetry": "Resend the previous HTTP node's request through Scrappey when it was blocked",
        "Browser Request • Auto-Retry & Anti-Bot" => "httpRequestAutoRetryBrowser": "Resend the previous HTTP node's request in a browser with anti-bot measures",
        "Session • Create" => "sessionCreate": "Create a persistent browser session",
        "Session • Destroy" => "sessionDestroy": "Destroy an existing browser session",
        "Session • List" => "sessionList": "List active browser sessions",
        "Session • Check Active" => "sessionActive": "Check whether a browser session is active",
        "WebSocket • Create" => "websocketCreate": "Create a WebSocket-based browser connection",
    ]),
    // sessions
    field!("sessionId", "Session ID", String, Str(""), placeholder = "my-session-123", hint = "Optional custom session ID. If not provided, one will be generated.", show = show!(scrappeyOperations = ["sessionCreate"])),
    field!("sessionTtl", "Session TTL (seconds)", Number, Number(180), hint = "Time-to-live for the session in seconds", show = SESSION_SETUP),
    field!("headless", "Headless Mode", Options, Str("true"), options = opts!["Headless (No UI)" => "true", "Headful (With UI)" => "false"], show = SESSION_SETUP),
    field!("geoip", "GeoIP Detection", Options, Str("false"), options = opts!["Disabled" => "false", "Enabled" => "true"], show = SESSION_SETUP),
    field!("sessionToDestroy", "Session to Destroy", String, Str(""), required = true, placeholder = "session-id-to-destroy", show = show!(scrappeyOperations = ["sessionDestroy"])),
    field!("userId", "User ID", Number, Number(0), hint = "Optional user ID to filter sessions", show = show!(scrappeyOperations = ["sessionList"])),
    field!("sessionToCheck", "Session to Check", String, Str(""), required = true, placeholder = "session-id-to-check", show = show!(scrappeyOperations = ["sessionActive"])),
    // request
    field!(
        "affiliateMessage",
        "This is a fallback solution and works only if the previous node is an HTTP node. Connect the error path of the HTTP node to this operation.",
        Notice,
        Str(""),
        show = show!(scrappeyOperations = ["httpRequestAutoRetry", "httpRequestAutoRetryBrowser"])
    ),
    field!("url", "URL", String, Str(""), required = true, placeholder = "https://httpbin.rs/get", hint = "URL of the page to scrape", show = BUILDER),
    field!("httpMethod", "HTTP Method", Options, Str("request.get"), options = opts![
        "GET" => "request.get",
        "POST" => "request.post",
        "PUT" => "request.put",
        "DELETE" => "request.delete",
        "PATCH" => "request.patch",
        "PUBLISH" => "request.publish",
    ], show = BUILDER),
    field!("request_type", "Request Type", Options, Str("Request"), options = opts![
        "Browser" => "Browser": "Full browser with JavaScript execution",
        "Request" => "Request": "HTTP-only mode (faster, no browser)",
        "Patched Chrome Browser" => "PatchedChrome": "Chrome with enhanced anti-detection",
    ], show = BUILDER),
    field!("referer", "Referer", String, Str(""), placeholder = "https://google.com", show = BUILDER),
    // proxy
    field!("whichProxyToUse", "Which Proxy To Use", Options, Str("proxyFromCredentials"), options = opts![
        "Proxy From Credentials" => "proxyFromCredentials": "Use the proxy defined in credentials for this request",
        "Proxy From HTTP Request Node" => "proxyFromNode": "Use the proxy defined in HTTP Request Node for this request",
        "Proxy From Scrappey" => "proxyFromScrappey": "Use the proxy defined in Scrappey for this request",
        "No Proxy" => "noProxy": "Disable proxy usage for this request",
    ], show = show!(scrappeyOperations = ["requestBuilder", "httpRequestAutoRetry", "httpRequestAutoRetryBrowser", "sessionCreate", "websocketCreate"])),
    field!("proxyType", "Proxy Type", Options, Str(""), options = opts![
        "Residential proxy" => "",
        "Premium residential proxy" => "premiumProxy",
        "Datacenter proxy" => "datacenter",
        "Mobile proxy" => "mobileProxy",
    ], show = show!(
        scrappeyOperations = ["requestBuilder", "httpRequestAutoRetry", "httpRequestAutoRetryBrowser", "sessionCreate", "websocketCreate"],
        whichProxyToUse = ["proxyFromScrappey"],
    )),
    field!("customProxyCountryBoolean", "Custom proxy country", Boolean, Bool(false), show = show!(
        scrappeyOperations = ["requestBuilder", "httpRequestAutoRetry", "httpRequestAutoRetryBrowser", "sessionCreate", "websocketCreate"],
        whichProxyToUse = ["proxyFromScrappey"],
    )),
    field!("customProxyCountry", "Custom Proxy Country", Options, Str(""), options = COUNTRIES, show = show!(
        scrappeyOperations = ["requestBuilder", "httpRequestAutoRetry", "httpRequestAutoRetryBrowser", "sessionCreate", "websocketCreate"],
        customProxyCountryBoolean = [true],
    )),
    field!("custom_proxy", "Custom Proxy", Boolean, Bool(false), hint = "When enabled, the proxy defined in credentials will be used for this request.", show = show!(
        scrappeyOperations = ["requestBuilder", "sessionCreate", "websocketCreate"],
        proxyType = [""],
        whichProxyToUse = ["proxyFromScrappey"],
    )),
    field!("dontChangeProxy", "Don't Change Proxy", Boolean, Bool(false), show = show!(scrappeyOperations = ["requestBuilder"], whichProxyToUse = ["proxyFromScrappey"])),
    // body
    field!("bodyOrParams", "Body OR Params?", Options, Str("params_used"), options = opts!["Body" => "body_used", "Params" => "params_used"], show = &[
        DisplayCondition { parameter: "scrappeyOperations", values: &[show_value!("requestBuilder")] },
        DisplayCondition { parameter: "httpMethod", values: &BODY_METHODS },
    ]),
    field!("params_for_request", "Params", String, Str(""), placeholder = "g-recaptcha-response=03AGdBq24JZ&submit=Submit", show = &[
        DisplayCondition { parameter: "bodyOrParams", values: &[show_value!("params_used")] },
        DisplayCondition { parameter: "scrappeyOperations", values: &[show_value!("requestBuilder")] },
        DisplayCondition { parameter: "httpMethod", values: &BODY_METHODS },
    ]),
    field!("body_for_request", "Body", String, Str(""), show = &[
        DisplayCondition { parameter: "bodyOrParams", values: &[show_value!("body_used")] },
        DisplayCondition { parameter: "scrappeyOperations", values: &[show_value!("requestBuilder")] },
        DisplayCondition { parameter: "httpMethod", values: &BODY_METHODS },
    ]),
    // session reuse
    field!("userSession", "User Session", String, Uuid, show = BUILDER),
    field!("closeAfterUse", "Close After Use", Boolean, Bool(false), show = BUILDER),
    // headers
    field!("headersInputMethod", "Headers Input Method", Options, Str("fields"), options = opts!["Using Fields Below" => "fields", "Using JSON" => "json"], show = BUILDER),
    field!("customHeaders", "Custom Headers", FixedCollection, EmptyObject, show = show!(scrappeyOperations = ["requestBuilder"], headersInputMethod = ["fields"])),
    field!("jsonHeaders", "JSON Headers", String, Str(r#"{"User-Agent": "Mozilla/5.0", "Accept": "application/json"}"#), show = show!(scrappeyOperations = ["requestBuilder"], headersInputMethod = ["json"])),
    // cookies
    field!("oneStringCookie", "One String Cookie", Boolean, Bool(false), show = BUILDER),
    field!("cookie", "Single String Cookie", String, Str(""), placeholder = "name=value; name2=value2", show = show!(scrappeyOperations = ["requestBuilder"], oneStringCookie = [true])),
    field!("customCookies", "Custom Cookies", FixedCollection, EmptyObject, show = show!(scrappeyOperations = ["requestBuilder"], oneStringCookie = [false])),
    field!("cookiejar", "Cookie Jar (JSON)", String, Str(""), show = show!(scrappeyOperations = ["requestBuilder"], oneStringCookie = [false])),
    // retries
    field!("attempts", "Attempts", Number, Number(1), range = Some((1, 5)), show = BUILDER),
    field!("timeout", "Timeout (ms)", Number, Number(60000), show = BUILDER),
    // antibot
    field!("antibotNotice", "Antibot Bypass Options", Notice, Str(""), show = BROWSER),
    field!("cloudflareBypass", "Cloudflare Bypass", Boolean, Bool(false), show = BROWSER),
    field!("datadome", "Datadome Bypass", Boolean, Bool(false), show = BROWSER),
    field!("datadomeDebug", "Datadome Debug", Boolean, Bool(false), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], datadome = [true])),
    field!("kasadaBypass", "Kasada Bypass", Boolean, Bool(false), show = BROWSER),
    field!("disableAntiBot", "Disable Antibot Detection", Boolean, Bool(false), show = BROWSER),
    field!("detectIncapsula", "Detect Incapsula", Boolean, Bool(false), show = BROWSER),
    field!("spsnspidChallenge", "SPSNSPID Challenge", Boolean, Bool(false), show = BROWSER),
    // captcha
    field!("antibot", "Automatically Solve Captchas", Boolean, Bool(false), show = BROWSER),
    field!("alwaysLoad", "Always Load Captcha Types", MultiOptions, EmptyList, options = opts!["reCAPTCHA" => "recaptcha", "hCaptcha" => "hcaptcha", "Turnstile" => "turnstile"], show = BROWSER),
    field!("captchaAnswer", "Captcha Answer", String, Str(""), show = BROWSER),
    field!("captchaSuccessIntercept", "Captcha Success Intercept", String, Str(""), show = BROWSER),
    // browser configuration
    field!("browserType", "Browser Type", Options, Str("firefox"), options = opts!["Firefox" => "firefox", "Chrome" => "chrome", "Safari" => "safari"], show = BROWSER),
    field!("browserMinVersion", "Browser Min Version", Number, Number(0), show = BROWSER),
    field!("browserMaxVersion", "Browser Max Version", Number, Number(0), show = BROWSER),
    field!("userAgent", "Custom User Agent", String, Str(""), show = BROWSER),
    field!("locales", "Locales", String, Str(""), placeholder = "en-US,en", show = BROWSER),
    field!("setLocale", "Auto Set Locale", Boolean, Bool(false), show = BROWSER),
    field!("forceUniqueFingerprint", "Force Unique Fingerprint", Boolean, Bool(false), show = BROWSER),
    field!("webrtcIpv4", "WebRTC IPv4", String, Str(""), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], forceUniqueFingerprint = [true])),
    field!("webrtcIpv6", "WebRTC IPv6", String, Str(""), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], forceUniqueFingerprint = [true])),
    // response options
    field!("responseOptionsNotice", "Response Options", Notice, Str(""), show = BUILDER),
    field!("onlyStatusCode", "Only Status Code", Boolean, Bool(false), show = BUILDER),
    field!("innerText", "Include Inner Text", Boolean, Bool(false), show = BROWSER),
    field!("includeImages", "Include Images", Boolean, Bool(false), show = BROWSER),
    field!("includeLinks", "Include Links", Boolean, Bool(false), show = BROWSER),
    field!("regex", "Regex Pattern", String, Str(""), hint = "A single pattern or a JSON array of patterns", show = BUILDER),
    field!("filter", "Filter Fields", MultiOptions, EmptyList, options = opts![
        "Response" => "response",
        "Cookies" => "cookies",
        "Status Code" => "statusCode",
        "Headers" => "responseHeaders",
        "Current URL" => "currentUrl",
        "User Agent" => "userAgent",
    ], show = BUILDER),
    field!("screenshot", "Screenshot", Boolean, Bool(false), show = BROWSER),
    field!("screenshotUpload", "Upload Screenshot", Boolean, Bool(false), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], screenshot = [true])),
    field!("screenshotWidth", "Screenshot Width", Number, Number(1280), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], screenshot = [true])),
    field!("screenshotHeight", "Screenshot Height", Number, Number(1024), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], screenshot = [true])),
    field!("pdf", "Generate PDF", Boolean, Bool(false), show = BROWSER),
    field!("base64", "Base64 Screenshot", Boolean, Bool(false), show = show!(scrappeyOperations = ["requestBuilder"], request_type = ["Browser"], screenshot = [true])),
    field!("base64Response", "Base64 Response", Boolean, Bool(false), show = BUILDER),
    field!("binary", "Binary Response", Boolean, Bool(false), show = BUILDER),
    field!("listAllRedirects", "List All Redirects", Boolean, Bool(false), show = BUILDER),
    // interception
    field!("abortOnDetection", "Abort On Detection", String, Str(""), hint = "Comma-separated URL patterns", show = BROWSER),
    field!("abortOnPostRequest", "Abort Only POST Requests", Boolean, Bool(false), show = BROWSER),
    field!("waitForAbortOnDetection", "Wait For Abort Detection", Boolean, Bool(false), show = BROWSER),
    field!("waitForAbortOnDetectionTimeout", "Abort Detection Timeout (ms)", Number, Number(45000), show = show!(
        scrappeyOperations = ["requestBuilder"],
        request_type = ["Browser"],
        waitForAbortOnDetection = [true],
    )),
    field!("blackListedDomains", "Blacklisted Domains", String, Str(""), hint = "Comma-separated domains", show = BROWSER),
    field!("neverCacheDomains", "Never Cache Domains", String, Str(""), hint = "Comma-separated domains", show = BROWSER),
    field!("dontLoadMainSite", "Don't Load Main Site", Boolean, Bool(false), show = BROWSER),
    field!("dontLoadFirstRequest", "Don't Load First Request", Boolean, Bool(false), show = BROWSER),
    // advanced browser settings
    field!("addRandomMouseMovement", "Add Random mouse movement", Boolean, Bool(false), show = BROWSER),
    field!("forceMouseMovement", "Force Mouse Movement", Boolean, Bool(false), show = BROWSER),
    field!("recordVideoSession", "Record Video Session", Boolean, Bool(false), show = BROWSER),
    field!("cssSelector", "CSS Selector", String, Str(""), show = BROWSER),
    field!("href", "Href (Optional)", String, Str(""), show = BROWSER),
    field!("interceptXhrFetchRequest", "Intercept XHR/Fetch Request", String, Str(""), hint = "A single URL pattern or a JSON array of patterns", show = BROWSER),
    field!("fullPageLoad", "Full Page Load", Boolean, Bool(false), show = BROWSER),
    field!("dontWaitOnPageLoad", "Don't Wait on Page Load", Boolean, Bool(false), show = BROWSER),
    field!("waitForUrl", "Wait For URL Pattern", String, Str(""), show = BROWSER),
    field!("removeIframes", "Remove Iframes", Boolean, Bool(false), show = BROWSER),
    field!("blockCookieBanners", "Block Cookie Banners", Boolean, Bool(false), show = BROWSER),
    field!("legacy", "Use Legacy Connection", Boolean, Bool(false), show = BROWSER),
    field!("websocketConnection", "Use WebSocket Connection", Boolean, Bool(false), show = BROWSER),
    field!("localStorage", "LocalStorage Data (JSON)", String, Str(""), show = BROWSER),
    // ai parsing
    field!("autoparse", "Enable AI Parsing", Boolean, Bool(false), show = BUILDER),
    field!("model", "AI Model", Options, Str("deepseek"), options = opts!["DeepSeek" => "deepseek", "GPT-4" => "gpt-4", "GPT-3.5" => "gpt-3.5-turbo"], show = show!(
        scrappeyOperations = ["requestBuilder"],
        autoparse = [true],
    )),
    field!("aiApiKey", "AI API Key", String, Str(""), show = show!(scrappeyOperations = ["requestBuilder"], autoparse = [true])),
    field!("structure", "Structure Definition (JSON)", String, Str(""), show = show!(scrappeyOperations = ["requestBuilder"], autoparse = [true])),
    // browser actions, see `BROWSER_ACTION_FIELDS` for the per-record fields
    field!("browserActions", "Browser Actions", FixedCollection, EmptyObject, show = BROWSER),
];
