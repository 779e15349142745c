use serde_json::{Map, Value};

use crate::HookError;

/// Declared arguments for a hook invocation, following the host convention
/// that a `str|[str]` argument accepts a single string or a list of strings
/// and `|none` arguments may be absent or JSON null.
#[derive(Clone, Debug, Default)]
pub struct Args(Map<String, Value>);

fn bad(name: &str, reason: &str) -> HookError {
    HookError::BadArg { name: name.to_string(), reason: reason.to_string() }
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a JSON object or null (no arguments).
    pub fn from_value(value: Value) -> Result<Self, HookError> {
        match value {
            Value::Null => Ok(Self(Map::new())),
            Value::Object(map) => Ok(Self(map)),
            other => Err(bad("<args>", &format!("expected an object, got {other}"))),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    fn get(&self, name: &str) -> Option<&Value> {
        match self.0.get(name) {
            Some(Value::Null) | None => None,
            some => some,
        }
    }

    pub fn required_str(&self, name: &str) -> Result<&str, HookError> {
        self.get(name)
            .ok_or_else(|| bad(name, "required"))?
            .as_str()
            .ok_or_else(|| bad(name, "expected a string"))
    }

    /// `str|[str]`: a single name or a list of names.
    pub fn required_names(&self, name: &str) -> Result<Vec<String>, HookError> {
        self.optional_names(name)?.ok_or_else(|| bad(name, "required"))
    }

    pub fn optional_names(&self, name: &str) -> Result<Option<Vec<String>>, HookError> {
        let Some(value) = self.get(name) else { return Ok(None) };
        match value {
            Value::String(s) => Ok(Some(vec![s.clone()])),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| bad(name, "expected a list of strings"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            _ => Err(bad(name, "expected a string or list of strings")),
        }
    }

    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>, HookError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(bad(name, "expected a bool")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_object_or_null() {
        assert!(Args::from_value(json!(null)).is_ok());
        assert!(Args::from_value(json!({"a": 1})).is_ok());
        assert!(Args::from_value(json!([1])).is_err());
    }

    #[test]
    fn scalar_and_list_both_decode_as_names() {
        let args = Args::from_value(json!({"board_name": "A"})).unwrap();
        assert_eq!(args.required_names("board_name").unwrap(), vec!["A"]);

        let args = Args::from_value(json!({"board_name": ["A", "B"]})).unwrap();
        assert_eq!(args.required_names("board_name").unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn null_counts_as_absent() {
        let args = Args::from_value(json!({"permissions": null})).unwrap();
        assert_eq!(args.optional_names("permissions").unwrap(), None);
        assert!(args.required_names("permissions").is_err());
    }

    #[test]
    fn wrong_types_are_rejected() {
        let args = Args::from_value(json!({"board_name": 7, "onoff": "yes"})).unwrap();
        assert!(args.required_names("board_name").is_err());
        assert!(args.required_str("board_name").is_err());
        assert!(args.optional_bool("onoff").is_err());
    }

    #[test]
    fn bools_decode() {
        let args = Args::from_value(json!({"onoff": false})).unwrap();
        assert_eq!(args.optional_bool("onoff").unwrap(), Some(false));
        assert_eq!(args.optional_bool("missing").unwrap(), None);
    }
}
