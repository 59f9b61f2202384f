//! JSON object wrapper shared by items, parameters and outputs.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// An ordered bag of named JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vars {
    inner: Map<String, Value>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set<V: Into<Value>>(
        &mut self,
        key: &str,
        value: V,
    ) {
        self.inner.insert(key.to_string(), value.into());
    }

    /// Builder-style [`Vars::set`].
    pub fn with<V: Into<Value>>(
        mut self,
        key: &str,
        value: V,
    ) -> Self {
        self.set(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: String,
        value: Value,
    ) -> Option<Value> {
        self.inner.insert(key, value)
    }

    /// Get the value of `key` deserialized as `T`.
    ///
    /// Returns `None` when the key is missing or the value has another shape.
    pub fn get<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Option<T> {
        self.inner.get(key).and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn get_value(
        &self,
        key: &str,
    ) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.inner.iter()
    }

    /// Copy every entry of `other` into `self`, overwriting duplicates.
    pub fn extend(
        &mut self,
        other: &Vars,
    ) {
        for (key, value) in other.iter() {
            self.inner.insert(key.clone(), value.clone());
        }
    }
}

impl From<Vars> for Value {
    fn from(vars: Vars) -> Self {
        Value::Object(vars.inner)
    }
}

impl From<Map<String, Value>> for Vars {
    fn from(inner: Map<String, Value>) -> Self {
        Self {
            inner,
        }
    }
}

impl From<Value> for Vars {
    /// Objects keep their entries; any other value ends up under the `data` key.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(inner) => Self {
                inner,
            },
            other => Vars::new().with("data", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut vars = Vars::new();
        vars.set("name", "Alice");
        vars.set("age", 30);

        assert_eq!(vars.get::<String>("name"), Some("Alice".to_string()));
        assert_eq!(vars.get::<u32>("age"), Some(30));
        assert_eq!(vars.get::<bool>("age"), None);
        assert_eq!(vars.get::<String>("missing"), None);
    }

    #[test]
    fn test_from_value() {
        let vars = Vars::from(json!({"a": 1}));
        assert_eq!(vars.get::<i64>("a"), Some(1));

        let vars = Vars::from(json!([1, 2]));
        assert_eq!(vars.get_value("data"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_extend_overwrites() {
        let mut base = Vars::new().with("a", 1).with("b", 2);
        base.extend(&Vars::new().with("b", 3));
        assert_eq!(Value::from(base), json!({"a": 1, "b": 3}));
    }
}
