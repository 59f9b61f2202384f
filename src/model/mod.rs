mod browser_action;
mod error_code;
mod request;
mod response;
mod session;

pub use browser_action::{BranchStep, BrowserAction, BrowserActionKind, CaptchaData, CaptchaType, KeyboardKey, LoadState, When};
pub use error_code::ErrorCode;
pub use request::{AiParsing, BrowserName, BrowserOptions, BrowserSpec, Command, Patterns, ProxyKind, ProxySettings, RequestBody, RequestMode, ResponseOptions};
pub use response::{ApiResponse, CookieObject, SessionActiveResponse, SessionEntry, SessionListResponse, Solution};
pub use session::{SessionListBody, SessionRefBody, SessionSetupBody};

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}
