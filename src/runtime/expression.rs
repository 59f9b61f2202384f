//! Host expression evaluation.
//!
//! The host owns the expression language; this crate only calls through the
//! [`ExpressionEvaluator`] trait. [`ItemExpressionEvaluator`] covers the
//! common `$json` lookups so the crate is usable without a host engine.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{Result, ScrappeyError, common::Vars};

/// Wrapped expression form: `={{ expr }}`.
static WRAPPED_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=?\{\{\s*(.*?)\s*\}\}$").unwrap());
/// `$json` path segments: `.key`, `["key"]`, `['key']`, `[0]`.
static SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:\.([A-Za-z_$][\w$]*)|\[\s*"([^"]*)"\s*\]|\[\s*'([^']*)'\s*\]|\[\s*(\d+)\s*\])"#).unwrap());

/// Evaluates a host expression against one input item.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluate `expression` (in the wrapped `={{ expr }}` form) for the item at `item_index`.
    fn evaluate(
        &self,
        expression: &str,
        item: &Vars,
        item_index: usize,
    ) -> Result<Value>;
}

/// Evaluator supporting `$json.path`, `$json["key"]`, `$json.list[0]` and `$itemIndex`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemExpressionEvaluator;

impl ItemExpressionEvaluator {
    fn lookup(
        item: &Vars,
        path: &str,
    ) -> Result<Value> {
        let mut current: Value = item.clone().into();
        let mut rest = path;

        while !rest.is_empty() {
            let caps = SEGMENT_PATTERN.captures(rest).ok_or_else(|| ScrappeyError::Expression(format!("invalid path segment '{}'", rest)))?;
            let whole = caps.get(0).map(|m| m.as_str().len()).unwrap_or(rest.len());

            current = if let Some(index) = caps.get(4) {
                let index: usize = index.as_str().parse().map_err(|_| ScrappeyError::Expression(format!("invalid index '{}'", index.as_str())))?;
                current.get(index).cloned().unwrap_or(Value::Null)
            } else {
                let key = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)).map(|m| m.as_str()).unwrap_or_default();
                current.get(key).cloned().unwrap_or(Value::Null)
            };
            rest = &rest[whole..];
        }

        Ok(current)
    }
}

impl ExpressionEvaluator for ItemExpressionEvaluator {
    fn evaluate(
        &self,
        expression: &str,
        item: &Vars,
        item_index: usize,
    ) -> Result<Value> {
        let inner = WRAPPED_PATTERN.captures(expression.trim()).and_then(|caps| caps.get(1)).map(|m| m.as_str()).unwrap_or(expression.trim());

        if inner == "$itemIndex" {
            return Ok(Value::from(item_index));
        }

        match inner.strip_prefix("$json") {
            Some(path) => Self::lookup(item, path),
            None => Err(ScrappeyError::Expression(format!("unsupported expression '{}'", inner))),
        }
    }
}
