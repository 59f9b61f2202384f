use std::str::FromStr;

use strum::{AsRefStr, EnumIter, EnumString};

/// Error codes documented by the Scrappey API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumString, EnumIter)]
pub enum ErrorCode {
    #[strum(serialize = "CODE-0001")]
    ServerOverloaded,
    #[strum(serialize = "CODE-0002")]
    CloudflareBlocked,
    #[strum(serialize = "CODE-0003")]
    CloudflareTooManyAttempts,
    #[strum(serialize = "CODE-0004")]
    InvalidCmd,
    #[strum(serialize = "CODE-0005")]
    TunnelConnectionFailed,
    #[strum(serialize = "CODE-0006")]
    HttpResponseCodeFailure,
    #[strum(serialize = "CODE-0007")]
    TurnstileClickFailed,
    #[strum(serialize = "CODE-0008")]
    TicketmasterBlocked,
    #[strum(serialize = "CODE-0009")]
    ChatGptError,
    #[strum(serialize = "CODE-0010")]
    DatadomeProxyBlocked,
    #[strum(serialize = "CODE-0011")]
    DatadomeUnsolved,
    #[strum(serialize = "CODE-0012")]
    DatadomeCookieParse,
    #[strum(serialize = "CODE-0013")]
    DatadomeSolverCookie,
    #[strum(serialize = "CODE-0014")]
    DatadomeLoadFailed,
    #[strum(serialize = "CODE-0015")]
    Socks4AuthUnsupported,
    #[strum(serialize = "CODE-0016")]
    Socks5AuthUnsupported,
    #[strum(serialize = "CODE-0017")]
    CloudflareUnsolvable,
    #[strum(serialize = "CODE-0018")]
    UrlErrorRateTooHigh,
    #[strum(serialize = "CODE-0019")]
    ProxyRefused,
    #[strum(serialize = "CODE-0020")]
    InterceptRequestNotFound,
    #[strum(serialize = "CODE-0021")]
    RequestUnknownError,
    #[strum(serialize = "CODE-0022")]
    CaptchaTypeNotFound,
    #[strum(serialize = "CODE-0023")]
    TurnstileNotFound,
    #[strum(serialize = "CODE-0024")]
    ProxyTimeout,
    #[strum(serialize = "CODE-0025")]
    NetTimeout,
    #[strum(serialize = "CODE-0026")]
    InternalBrowserError,
    #[strum(serialize = "CODE-0027")]
    SelectorNotFound,
    #[strum(serialize = "CODE-0028")]
    PerimeterxUnsolved,
    #[strum(serialize = "CODE-0029")]
    TooManySessions,
    #[strum(serialize = "CODE-0030")]
    InvalidBrowserName,
    #[strum(serialize = "CODE-0031")]
    RequestError,
    #[strum(serialize = "CODE-0032")]
    TurnstileUnsolved,
    #[strum(serialize = "CODE-0033")]
    MtCaptchaUnsolved,
    #[strum(serialize = "CODE-0034")]
    DatadomeCaptchaUnsolved,
    #[strum(serialize = "CODE-0035")]
    GeetestLoadFailed,
    #[strum(serialize = "CODE-0036")]
    KeyboardValueNotFound,
    #[strum(serialize = "CODE-0037")]
    DatadomeBlocked,
    #[strum(serialize = "CODE-0038")]
    FingerprintJsUnsolved,
    #[default]
    #[strum(serialize = "CODE-10000")]
    Unknown,
}

impl ErrorCode {
    /// Look up a code reported by the API, falling back to [`ErrorCode::Unknown`].
    pub fn lookup(code: &str) -> Self {
        ErrorCode::from_str(code.trim()).unwrap_or_default()
    }

    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::ServerOverloaded => "Server is overloaded",
            ErrorCode::CloudflareBlocked => "Cloudflare blocked",
            ErrorCode::CloudflareTooManyAttempts => "Cloudflare too many attempts, try again",
            ErrorCode::InvalidCmd => "Invalid cmd command",
            ErrorCode::TunnelConnectionFailed => "Tunnel connection failed",
            ErrorCode::HttpResponseCodeFailure => "ERR_HTTP_RESPONSE_CODE_FAILURE",
            ErrorCode::TurnstileClickFailed => "Could not click turnstile button",
            ErrorCode::TicketmasterBlocked => "Ticketmaster blocked",
            ErrorCode::ChatGptError => "Error from ChatGPT, try again",
            ErrorCode::DatadomeProxyBlocked => "Blocked proxy on Datadome",
            ErrorCode::DatadomeUnsolved => "Could not solve datadome",
            ErrorCode::DatadomeCookieParse => "Could not parse datadome cookie",
            ErrorCode::DatadomeSolverCookie => "Captcha solver datadome cookie error",
            ErrorCode::DatadomeLoadFailed => "Could not load Datadome",
            ErrorCode::Socks4AuthUnsupported => "Socks4 With Authentication not Supported",
            ErrorCode::Socks5AuthUnsupported => "Socks5 With Authentication not Supported",
            ErrorCode::CloudflareUnsolvable => "Cloudflare updated and is currently not solvable, try again later",
            ErrorCode::UrlErrorRateTooHigh => "Too high error rate for this URL",
            ErrorCode::ProxyRefused => "The proxy server is refusing connections",
            ErrorCode::InterceptRequestNotFound => "Could not find intercept request",
            ErrorCode::RequestUnknownError => "Unknown error occurred with request",
            ErrorCode::CaptchaTypeNotFound => "Captcha type solve_captcha is not found",
            ErrorCode::TurnstileNotFound => "Turnstile solve_captcha was not found",
            ErrorCode::ProxyTimeout => "Proxy timeout - proxy too slow",
            ErrorCode::NetTimeout => "NS_ERROR_NET_TIMEOUT - proxy too slow",
            ErrorCode::InternalBrowserError => "Internal browser error",
            ErrorCode::SelectorNotFound => "No elements found for this CSS selector",
            ErrorCode::PerimeterxUnsolved => "Could not solve perimeterx",
            ErrorCode::TooManySessions => "Too many sessions open",
            ErrorCode::InvalidBrowserName => "Browser name must be: firefox, chrome or safari",
            ErrorCode::RequestError => "Request error, please try again",
            ErrorCode::TurnstileUnsolved => "Turnstile captcha could not be solved",
            ErrorCode::MtCaptchaUnsolved => "Mt captcha could not be solved",
            ErrorCode::DatadomeCaptchaUnsolved => "Datadome captcha could not be solved after 5 attempts",
            ErrorCode::GeetestLoadFailed => "Could not load geetest",
            ErrorCode::KeyboardValueNotFound => "Keyboard action value not found",
            ErrorCode::DatadomeBlocked => "Datadome was blocked",
            ErrorCode::FingerprintJsUnsolved => "Could not solve FingerprintJS challenge",
            ErrorCode::Unknown => "Unknown error - has to be specified",
        }
    }

    pub fn details(&self) -> &'static str {
        match self {
            ErrorCode::ServerOverloaded => "All server capacity is used, please try again.",
            ErrorCode::CloudflareBlocked => "Cloudflare blocked the request, preventing access to the resource.",
            ErrorCode::CloudflareTooManyAttempts => "Cloudflare has detected too many attempts from your IP; please try again later.",
            ErrorCode::InvalidCmd => "The provided cmd command is invalid and cannot be executed.",
            ErrorCode::TunnelConnectionFailed => "Tunnel connection failed, and the request cannot be completed.",
            ErrorCode::HttpResponseCodeFailure => "Failure in the HTTP response code.",
            ErrorCode::TurnstileClickFailed => "System could not click the turnstile button, and the request cannot proceed.",
            ErrorCode::TicketmasterBlocked => "Ticketmaster has blocked access to the resource.",
            ErrorCode::ChatGptError => "An error occurred in the ChatGPT API, please try again.",
            ErrorCode::DatadomeProxyBlocked => "Proxy blocked by Datadome, please try again later.",
            ErrorCode::DatadomeUnsolved => "System could not solve Datadome protection, please try again.",
            ErrorCode::DatadomeCookieParse => "Issue parsing the Datadome cookie, please try again.",
            ErrorCode::DatadomeSolverCookie => "Captcha solver's Datadome cookie error, please retry the request.",
            ErrorCode::DatadomeLoadFailed => "Datadome protection could not be loaded, please try again.",
            ErrorCode::Socks4AuthUnsupported => "Socks4 with authentication is not supported.",
            ErrorCode::Socks5AuthUnsupported => "Socks5 with authentication is not supported.",
            ErrorCode::CloudflareUnsolvable => "Cloudflare updated and is currently unsolvable, try again later.",
            ErrorCode::UrlErrorRateTooHigh => "High error rate for this URL, affecting service. Contact support to lift the temporary ban.",
            ErrorCode::ProxyRefused => "Proxy server refusing connections, check proxy settings.",
            ErrorCode::InterceptRequestNotFound => "System could not find the intercept request, please try again.",
            ErrorCode::RequestUnknownError => "Unknown error occurred with the request, please try again.",
            ErrorCode::CaptchaTypeNotFound => "Specified captcha type \"solve_captcha\" was not found, please try again.",
            ErrorCode::TurnstileNotFound => "Turnstile \"solve_captcha\" was not found, please try again.",
            ErrorCode::ProxyTimeout => "Proxy connection timed out due to slowness, please try again.",
            ErrorCode::NetTimeout => "NS_ERROR_NET_TIMEOUT occurred due to a slow proxy, please try again.",
            ErrorCode::InternalBrowserError => "Internal browser error occurred, please try again.",
            ErrorCode::SelectorNotFound => "No elements found for the given CSS selector, please retry.",
            ErrorCode::PerimeterxUnsolved => "System could not solve PerimeterX protection, please try again.",
            ErrorCode::TooManySessions => "Too many sessions open; sessions will automatically close after 240 seconds. Contact support for more sessions.",
            ErrorCode::InvalidBrowserName => "Browser name must be one of: firefox, chrome, or safari.",
            ErrorCode::RequestError => "Request error, please try again.",
            ErrorCode::TurnstileUnsolved => "Turnstile captcha could not be solved, please try again with a different proxy.",
            ErrorCode::MtCaptchaUnsolved => "Mt captcha could not be solved, please try again.",
            ErrorCode::DatadomeCaptchaUnsolved => "Datadome captcha could not be solved after 5 attempts, try different proxy settings.",
            ErrorCode::GeetestLoadFailed => "Could not load geetest, please try again.",
            ErrorCode::KeyboardValueNotFound => "Keyboard action value not found.",
            ErrorCode::DatadomeBlocked => "Datadome was blocked, please try again with a different proxy.",
            ErrorCode::FingerprintJsUnsolved => "The FingerprintJS challenge could not be solved, please try again.",
            ErrorCode::Unknown => "An unknown error occurred and needs to be specified.",
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_lookup_known_code() {
        let code = ErrorCode::lookup("CODE-0002");
        assert_eq!(code, ErrorCode::CloudflareBlocked);
        assert_eq!(code.message(), "Cloudflare blocked");
        assert_eq!(code.details(), "Cloudflare blocked the request, preventing access to the resource.");
    }

    #[test]
    fn test_lookup_unknown_code() {
        assert_eq!(ErrorCode::lookup("CODE-9999"), ErrorCode::Unknown);
        assert_eq!(ErrorCode::lookup(""), ErrorCode::Unknown);
        assert_eq!(ErrorCode::Unknown.code(), "CODE-10000");
        assert_eq!(ErrorCode::Unknown.message(), "Unknown error - has to be specified");
    }

    #[test]
    fn test_table_is_complete() {
        let codes: Vec<ErrorCode> = ErrorCode::iter().collect();
        assert_eq!(codes.len(), 39);
        for (i, code) in codes.iter().take(38).enumerate() {
            assert_eq!(code.code(), format!("CODE-{:04}", i + 1));
            assert_eq!(ErrorCode::lookup(code.code()), *code);
        }
    }
}
