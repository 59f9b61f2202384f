use std::{collections::HashMap, str::FromStr, sync::Arc};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Credentials, Result, ScrappeyError, catalog,
    common::Vars,
    runtime::expression::{ExpressionEvaluator, ItemExpressionEvaluator},
};

/// Execution frame handed over by the host for one node run.
///
/// Holds the input items, the node's parameters (with optional per-item
/// overrides), the parameters of the previous HTTP node, credentials and the
/// host's expression evaluator.
#[derive(Clone)]
pub struct Context {
    items: Vec<Vars>,
    parameters: Vars,
    item_parameters: HashMap<usize, Vars>,
    previous_node: Vars,
    credentials: Option<Credentials>,
    evaluator: Arc<dyn ExpressionEvaluator>,
    continue_on_fail: bool,
}

impl Context {
    pub fn new(items: Vec<Vars>) -> Self {
        Self {
            items,
            parameters: Vars::new(),
            item_parameters: HashMap::new(),
            previous_node: Vars::new(),
            credentials: None,
            evaluator: Arc::new(ItemExpressionEvaluator),
            continue_on_fail: false,
        }
    }

    pub fn with_parameters(
        mut self,
        parameters: Vars,
    ) -> Self {
        self.parameters = parameters;
        self
    }

    /// Parameters that only apply to the item at `item_index`.
    pub fn with_item_parameters(
        mut self,
        item_index: usize,
        parameters: Vars,
    ) -> Self {
        self.item_parameters.insert(item_index, parameters);
        self
    }

    /// Parameters of the HTTP node that ran before this one.
    pub fn with_previous_node(
        mut self,
        parameters: Vars,
    ) -> Self {
        self.previous_node = parameters;
        self
    }

    pub fn with_credentials(
        mut self,
        credentials: Credentials,
    ) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_evaluator(
        mut self,
        evaluator: Arc<dyn ExpressionEvaluator>,
    ) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn continue_on_fail(
        mut self,
        enabled: bool,
    ) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    pub fn items(&self) -> &[Vars] {
        &self.items
    }

    pub fn item(
        &self,
        item_index: usize,
    ) -> Option<&Vars> {
        self.items.get(item_index)
    }

    pub fn parameters(&self) -> &Vars {
        &self.parameters
    }

    pub fn item_parameters(&self) -> &HashMap<usize, Vars> {
        &self.item_parameters
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    /// Raw parameter value: the per-item override first, then the node-level value.
    pub fn parameter(
        &self,
        name: &str,
        item_index: usize,
    ) -> Option<Value> {
        self.item_parameters
            .get(&item_index)
            .and_then(|params| params.get_value(name))
            .or_else(|| self.parameters.get_value(name))
            .filter(|value| !value.is_null())
            .cloned()
    }

    /// Look up a previous-node parameter by dotted path, e.g. `options.proxy`.
    pub fn previous_parameter(
        &self,
        path: &str,
    ) -> Option<Value> {
        let mut keys = path.split('.');
        let first = keys.next()?;
        let mut current = self.previous_node.get_value(first)?.clone();
        for key in keys {
            current = current.get(key)?.clone();
        }
        (!current.is_null()).then_some(current)
    }

    /// Evaluate a wrapped host expression for the item at `item_index`.
    pub fn evaluate(
        &self,
        expression: &str,
        item_index: usize,
    ) -> Result<Value> {
        let empty = Vars::new();
        let item = self.items.get(item_index).unwrap_or(&empty);
        self.evaluator.evaluate(expression, item, item_index)
    }

    /// Typed parameter access for one item.
    pub fn reader(
        &self,
        item_index: usize,
    ) -> ParameterReader<'_> {
        ParameterReader {
            ctx: self,
            item_index,
        }
    }
}

/// Typed view over the parameters of one item.
///
/// Unset parameters fall back to the field catalog's documented default.
pub struct ParameterReader<'a> {
    ctx: &'a Context,
    item_index: usize,
}

impl ParameterReader<'_> {
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn context(&self) -> &Context {
        self.ctx
    }

    pub fn value(
        &self,
        name: &str,
    ) -> Option<Value> {
        self.ctx.parameter(name, self.item_index).or_else(|| catalog::static_default(name))
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>> {
        match self.value(name) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|err| ScrappeyError::Config(format!("parameter '{}' has an invalid value {}: {}", name, value, err))),
        }
    }

    /// String parameter, empty when unset.
    pub fn string(
        &self,
        name: &str,
    ) -> Result<String> {
        match self.value(name) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(ScrappeyError::Config(format!("parameter '{}' must be a string, got {}", name, other))),
        }
    }

    /// String parameter that is only `Some` when it has non-whitespace content.
    pub fn non_empty(
        &self,
        name: &str,
    ) -> Result<Option<String>> {
        let value = self.string(name)?;
        Ok((!value.trim().is_empty()).then_some(value))
    }

    /// Boolean parameter, `false` when unset.
    pub fn flag(
        &self,
        name: &str,
    ) -> Result<bool> {
        match self.value(name) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(b),
            Some(other) => Err(ScrappeyError::Config(format!("parameter '{}' must be a boolean, got {}", name, other))),
        }
    }

    /// Non-negative integer parameter, `0` when unset.
    pub fn integer(
        &self,
        name: &str,
    ) -> Result<u64> {
        match self.value(name) {
            None => Ok(0),
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
                .ok_or_else(|| ScrappeyError::Config(format!("parameter '{}' must be a non-negative integer, got {}", name, n))),
            Some(other) => Err(ScrappeyError::Config(format!("parameter '{}' must be a number, got {}", name, other))),
        }
    }

    /// List-of-strings parameter, empty when unset.
    pub fn strings(
        &self,
        name: &str,
    ) -> Result<Vec<String>> {
        Ok(self.get::<Vec<String>>(name)?.unwrap_or_default())
    }

    /// Option parameter parsed into an enum, `E::default()` when unset.
    pub fn choice<E>(
        &self,
        name: &str,
    ) -> Result<E>
    where
        E: FromStr + Default,
    {
        match self.value(name) {
            None => Ok(E::default()),
            Some(Value::String(s)) => s.parse::<E>().map_err(|_| ScrappeyError::Config(format!("invalid value '{}' for parameter '{}'", s, name))),
            Some(other) => Err(ScrappeyError::Config(format!("invalid value {} for parameter '{}'", other, name))),
        }
    }
}
