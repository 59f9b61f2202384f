use crate::{
    Credentials,
    config::DEFAULT_TIMEOUT_MS,
    model::{BrowserName, BrowserSpec, RequestBody, RequestMode},
    operations::{JSON_CONTENT_TYPE, REQUEST_TYPE_MARKER},
};

use super::options::{BodySource, RequestOptions};

/// Assemble the request body for one item.
///
/// Each field is only written when its option is set or differs from the
/// remote default; everything else is left out of the payload.
pub fn build_body(
    options: &RequestOptions,
    credentials: &Credentials,
) -> RequestBody {
    let mut body = RequestBody::new(options.command);

    match options.mode {
        RequestMode::Request => body.request_type = Some(REQUEST_TYPE_MARKER.to_string()),
        RequestMode::PatchedChrome => {
            body.browser = Some(vec![BrowserSpec::new(BrowserName::Chrome)]);
            body.no_driver = true;
        }
        RequestMode::Browser => {
            if let Some(browser) = &options.browser {
                body.browser = Some(vec![browser.spec.clone()]);
                body.browser_options = browser.options.clone();
            }
        }
    }

    body.url = options.url.clone();
    body.referer = options.referer.clone();
    body.session = options.session.clone();
    body.close_after_use = options.close_after_use;

    body.custom_headers = options.headers.clone().filter(|headers| !headers.is_empty());
    if !options.command.is_get() {
        match options.body_source {
            BodySource::Body => {
                body.post_data = Some(options.body.clone());
                body.set_header("content-type", JSON_CONTENT_TYPE);
            }
            BodySource::Params => body.post_data = Some(options.params.clone()),
        }
    }

    body.cookies = options.cookies.clone();
    body.cookie_jar = options.cookie_jar.clone();

    options.proxy.apply(&mut body.proxy, credentials, None);
    body.proxy.dont_change_proxy = options.dont_change_proxy;

    if options.attempts > 1 {
        body.attempts = Some(options.attempts);
        body.retries = Some(options.attempts);
    }
    if options.timeout != DEFAULT_TIMEOUT_MS {
        body.timeout = Some(options.timeout);
    }

    body.response = options.response.clone();
    body.ai = options.ai.clone();
    body.whitelisted_domains = credentials.whitelisted_domains.as_ref().map(|domains| domains.to_vec());

    body
}
