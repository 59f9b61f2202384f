use reqwest::Url;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{Result, ScrappeyError, model::Command, runtime::ParameterReader, template};

/// `{name, value}` entry of an HTTP node parameter list.
#[derive(Debug, Deserialize)]
struct NameValue {
    name: Option<String>,
    value: Option<Value>,
}

/// The call made by the HTTP node that ran before this one.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviousRequest {
    pub command: Command,
    pub url: String,
    pub headers: Option<Map<String, Value>>,
    /// Serialized body; implies a JSON content type.
    pub post_data: Option<String>,
    pub proxy: Option<String>,
}

impl PreviousRequest {
    pub fn read(reader: &ParameterReader<'_>) -> Result<Self> {
        let method = lookup(reader, "method", "method").and_then(|method| method.as_str().map(str::to_string)).unwrap_or_default();
        let command = Command::from_http_method(&method).ok_or_else(|| ScrappeyError::Config(format!("HTTP method '{}' cannot be retried", method)))?;

        let raw_url = lookup(reader, "url", "url")
            .and_then(|url| url.as_str().map(str::to_string))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ScrappeyError::Config("the previous HTTP node has no url".to_string()))?;
        let resolved = template::resolve_url(reader.context(), &raw_url, reader.item_index());
        let mut url = template::trim_trailing_slash(&resolved).to_string();

        if lookup(reader, "sendQuery", "sendQuery").and_then(|flag| flag.as_bool()).unwrap_or(false) {
            if let Some(query) = lookup(reader, "queryParameters", "queryParameters") {
                url = append_query(&url, &pairs(&query));
            }
        }

        Ok(Self {
            command,
            url,
            headers: lookup(reader, "headerParameters", "headerParameters").and_then(|headers| header_map(&headers)),
            post_data: lookup(reader, "bodyParameters", "bodyParameters").filter(|body| !is_blank(body)).map(|body| post_data(&body)),
            proxy: lookup(reader, "proxy", "options.proxy").and_then(|proxy| proxy.as_str().map(str::to_string)),
        })
    }
}

/// This node's own parameter wins over the previous node's.
fn lookup(
    reader: &ParameterReader<'_>,
    name: &str,
    path: &str,
) -> Option<Value> {
    let ctx = reader.context();
    ctx.parameter(name, reader.item_index()).or_else(|| ctx.previous_parameter(path))
}

/// `null`, `""`, `false` and `0` carry no body.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn parameter_list(value: &Value) -> Option<&Vec<Value>> {
    value.get("parameters").and_then(Value::as_array)
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `(name, value)` pairs from a parameter list or a plain object.
fn pairs(value: &Value) -> Vec<(String, String)> {
    match parameter_list(value) {
        Some(list) => list
            .iter()
            .filter_map(|entry| NameValue::deserialize(entry).ok())
            .filter_map(|entry| Some((entry.name.filter(|name| !name.is_empty())?, text(&entry.value?))))
            .collect(),
        None => value.as_object().map(|map| map.iter().map(|(key, value)| (key.clone(), text(value))).collect()).unwrap_or_default(),
    }
}

fn header_map(value: &Value) -> Option<Map<String, Value>> {
    let headers: Map<String, Value> = match parameter_list(value) {
        Some(list) => list
            .iter()
            .filter_map(|entry| NameValue::deserialize(entry).ok())
            .filter_map(|entry| {
                let name = entry.name.filter(|name| !name.is_empty())?;
                let value = entry.value.filter(|value| !text(value).is_empty())?;
                Some((name, value))
            })
            .collect(),
        None => value.as_object()?.clone(),
    };
    (!headers.is_empty()).then_some(headers)
}

fn post_data(value: &Value) -> String {
    match parameter_list(value) {
        Some(list) => {
            let body: Map<String, Value> = list
                .iter()
                .filter_map(|entry| NameValue::deserialize(entry).ok())
                .filter_map(|entry| Some((entry.name?, entry.value?)))
                .collect();
            Value::Object(body).to_string()
        }
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

fn append_query(
    url: &str,
    query: &[(String, String)],
) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.query_pairs_mut().extend_pairs(query);
            parsed.to_string()
        }
        Err(err) => {
            warn!("cannot append query to '{}': {}", url, err);
            url.to_string()
        }
    }
}
