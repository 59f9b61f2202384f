use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;
use tracing::{debug, warn};

use crate::runtime::Context;

/// Host placeholder syntax: `{{ expression }}`
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{\s*(.*?)\s*\}\}").unwrap());

/// Marker the host puts in front of a field that holds an expression.
const EXPRESSION_MARKER: char = '=';

/// Resolve every `{{ expr }}` placeholder in `url` for the item at `item_index`.
///
/// Each placeholder is evaluated on its own, left to right. A placeholder that
/// fails to evaluate becomes an empty string; the rest of the URL still resolves.
/// A leading `=` marker on the input is dropped. Trailing slashes are left alone.
pub fn resolve_url(
    ctx: &Context,
    url: &str,
    item_index: usize,
) -> String {
    let trimmed = url.trim();
    let source = trimmed.strip_prefix(EXPRESSION_MARKER).unwrap_or(url);

    let resolved = PLACEHOLDER_PATTERN.replace_all(source, |caps: &Captures| {
        let expr = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        if expr.is_empty() {
            return String::new();
        }

        let wrapped = format!("={{{{ {} }}}}", expr);
        match ctx.evaluate(&wrapped, item_index) {
            Ok(value) => {
                let text = stringify(value);
                debug!("resolved '{}' to '{}' for item {}", expr, text, item_index);
                text.strip_prefix(EXPRESSION_MARKER).map(str::to_string).unwrap_or(text)
            }
            Err(err) => {
                warn!("failed to evaluate '{}' for item {}: {}", expr, item_index, err);
                String::new()
            }
        }
    });

    resolved.into_owned()
}

/// Drop one trailing `/`.
pub fn trim_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

fn stringify(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}
