use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{ScrappeyError, common::Vars};

/// Link from an output item back to the input item it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One item handed back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    pub json: Value,
    pub paired_item: PairedItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ScrappeyError>,
}

impl OutputItem {
    pub fn new(
        json: Value,
        item_index: usize,
    ) -> Self {
        Self {
            json,
            paired_item: PairedItem {
                item: item_index,
            },
            error: None,
        }
    }

    /// Split a handler result into output items.
    ///
    /// Arrays of `{json: ...}` envelopes are unwrapped, other arrays become
    /// one item per element and anything else becomes a single item.
    pub fn reshape(
        response: Value,
        item_index: usize,
    ) -> Vec<Self> {
        match response {
            Value::Array(list) => {
                let enveloped = list.first().and_then(Value::as_object).is_some_and(|first| first.contains_key("json"));
                list.into_iter()
                    .map(|element| {
                        let json = if enveloped {
                            element.get("json").cloned().unwrap_or(Value::Null)
                        } else {
                            element
                        };
                        Self::new(json, item_index)
                    })
                    .collect()
            }
            single => vec![Self::new(single, item_index)],
        }
    }

    /// Error envelope kept in the output when the host continues on failure.
    pub fn failed(
        input: &Vars,
        item_index: usize,
        error: ScrappeyError,
    ) -> Self {
        Self {
            json: json!({
                "error": error.to_string(),
                "originalInput": Value::from(input.clone()),
            }),
            paired_item: PairedItem {
                item: item_index,
            },
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reshape_single_value() {
        let items = OutputItem::reshape(json!({"data": "success"}), 4);
        assert_eq!(items, vec![OutputItem::new(json!({"data": "success"}), 4)]);
    }

    #[test]
    fn test_reshape_plain_array() {
        let items = OutputItem::reshape(json!([1, {"a": 2}]), 0);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].json, json!({"a": 2}));
        assert!(items.iter().all(|item| item.paired_item.item == 0));
    }

    #[test]
    fn test_reshape_envelopes() {
        let items = OutputItem::reshape(json!([{"json": {"a": 1}}, {"json": {"b": 2}, "binary": {}}]), 1);
        assert_eq!(items[0].json, json!({"a": 1}));
        assert_eq!(items[1].json, json!({"b": 2}));
    }

    #[test]
    fn test_failed_envelope_wire_shape() {
        let item = OutputItem::failed(&Vars::new().with("id", 7), 2, ScrappeyError::Config("boom".to_string()));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["json"], json!({"error": "boom", "originalInput": {"id": 7}}));
        assert_eq!(value["pairedItem"], json!({"item": 2}));
        assert!(value.get("error").is_some());
    }
}
