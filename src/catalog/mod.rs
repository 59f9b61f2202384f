//! Field catalog: declarative metadata for every node parameter.
//!
//! The catalog describes what the host UI shows (names, types, defaults,
//! options and display conditions). It also backs the documented defaults
//! used when a parameter is unset, and produces the JSON schema the engine
//! validates node parameters against.

#[macro_use]
mod macros;
mod browser_actions;
mod fields;

use std::sync::LazyLock;

use serde_json::{Map, Value, json};

use crate::{Result, common::Vars};

pub use browser_actions::BROWSER_ACTION_FIELDS;
pub use fields::{COUNTRIES, FIELDS};

/// Kind of input control a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Options,
    MultiOptions,
    FixedCollection,
    Notice,
}

/// Documented default of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Str(&'static str),
    Number(i64),
    Bool(bool),
    EmptyList,
    EmptyObject,
    /// Generated per use (a UUID v4), never applied implicitly.
    Uuid,
}

impl DefaultValue {
    pub fn to_value(&self) -> Value {
        match self {
            DefaultValue::Str(s) => Value::from(*s),
            DefaultValue::Number(n) => Value::from(*n),
            DefaultValue::Bool(b) => Value::from(*b),
            DefaultValue::EmptyList => json!([]),
            DefaultValue::EmptyObject => json!({}),
            DefaultValue::Uuid => Value::from(uuid::Uuid::new_v4().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOption {
    pub name: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

/// Value a display condition compares against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowValue {
    Str(&'static str),
    Bool(bool),
}

impl ShowValue {
    fn matches(
        &self,
        value: &Value,
    ) -> bool {
        match (self, value) {
            (ShowValue::Str(expected), Value::String(actual)) => expected == actual,
            (ShowValue::Bool(expected), Value::Bool(actual)) => expected == actual,
            _ => false,
        }
    }
}

/// Field is shown only when `parameter` holds one of `values`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayCondition {
    pub parameter: &'static str,
    pub values: &'static [ShowValue],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub display_name: &'static str,
    pub field_type: FieldType,
    pub default: DefaultValue,
    pub options: &'static [FieldOption],
    pub required: bool,
    pub hint: &'static str,
    pub placeholder: &'static str,
    pub range: Option<(i64, i64)>,
    pub show: &'static [DisplayCondition],
}

impl FieldDef {
    pub(crate) const EMPTY: FieldDef = FieldDef {
        name: "",
        display_name: "",
        field_type: FieldType::String,
        default: DefaultValue::Str(""),
        options: &[],
        required: false,
        hint: "",
        placeholder: "",
        range: None,
        show: &[],
    };

    /// Whether the field is visible for the given parameter values.
    ///
    /// Parameters that are not set are compared using their own defaults.
    pub fn is_visible(
        &self,
        params: &Vars,
    ) -> bool {
        self.show.iter().all(|cond| {
            let current = params.get_value(cond.parameter).cloned().or_else(|| static_default(cond.parameter));
            match current {
                Some(value) => cond.values.iter().any(|expected| expected.matches(&value)),
                None => false,
            }
        })
    }

    /// Whether `value` is one of this field's option values.
    pub fn has_option(
        &self,
        value: &str,
    ) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    fn schema(&self) -> Option<Value> {
        let enum_values = || Value::from(self.options.iter().map(|option| option.value).collect::<Vec<_>>());
        let mut schema = match self.field_type {
            FieldType::Notice => return None,
            FieldType::String => json!({"type": "string"}),
            FieldType::Number => json!({"type": "number"}),
            FieldType::Boolean => json!({"type": "boolean"}),
            FieldType::Options => json!({"type": "string", "enum": enum_values()}),
            FieldType::MultiOptions => json!({"type": "array", "items": {"type": "string", "enum": enum_values()}}),
            FieldType::FixedCollection => json!({"type": "object"}),
        };
        if let (Some((min, max)), Some(obj)) = (self.range, schema.as_object_mut()) {
            obj.insert("minimum".to_string(), Value::from(min));
            obj.insert("maximum".to_string(), Value::from(max));
        }
        Some(schema)
    }
}

static SCHEMA: LazyLock<Value> = LazyLock::new(build_schema);

/// All node fields, in display order.
pub fn fields() -> &'static [FieldDef] {
    FIELDS
}

/// Sub-fields of one browser action record.
pub fn browser_action_fields() -> &'static [FieldDef] {
    BROWSER_ACTION_FIELDS
}

pub fn field(name: &str) -> Option<&'static FieldDef> {
    FIELDS.iter().find(|field| field.name == name)
}

/// Documented default of a node field, generating one where the default is dynamic.
pub fn default_value(name: &str) -> Option<Value> {
    field(name).map(|field| field.default.to_value())
}

/// Documented default of a node field, skipping generated defaults and notices.
pub fn static_default(name: &str) -> Option<Value> {
    field(name).filter(|field| field.field_type != FieldType::Notice && field.default != DefaultValue::Uuid).map(|field| field.default.to_value())
}

/// JSON schema of the node parameter object.
pub fn schema() -> &'static Value {
    &SCHEMA
}

fn build_schema() -> Value {
    let properties: Map<String, Value> = FIELDS.iter().filter_map(|field| field.schema().map(|schema| (field.name.to_string(), schema))).collect();
    json!({
        "type": "object",
        "properties": properties,
        "additionalProperties": true
    })
}

/// Validate a parameter object against the catalog schema.
pub fn validate(params: &Vars) -> Result<()> {
    let instance: Value = params.clone().into();
    jsonschema::validate(schema(), &instance)?;
    Ok(())
}
