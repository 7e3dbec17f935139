use std::fmt;

/// A primitive query-string value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::UInt(u) => write!(f, "{}", u),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(f64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        ParamValue::UInt(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        // usize is at most 64 bits on every supported target.
        ParamValue::UInt(v as u64)
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(impl From<$t> for ParamValue {
            fn from(v: $t) -> Self {
                ParamValue::Int(i64::from(v))
            }
        })*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

/// Options for a single `get` call.
///
/// Params are forwarded as-is to the WordPress REST API (`per_page`, `order`,
/// `orderby`, `search`, ...). Setting a key again replaces its value.
///
/// ```
/// use rooftop::GetOptions;
///
/// let opts = GetOptions::new()
///     .param("per_page", 2)
///     .param("order", "asc")
///     .param("orderby", "id");
/// assert_eq!(opts.params().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetOptions {
    params: Vec<(String, ParamValue)>,
}

impl GetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Builds options from a JSON object, e.g. `json!({"per_page": 2})`.
    ///
    /// Nested arrays/objects and nulls are skipped.
    pub fn from_json(params: &serde_json::Value) -> Self {
        let mut opts = Self::new();
        let Some(map) = params.as_object() else {
            return opts;
        };
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => ParamValue::String(s.clone()),
                serde_json::Value::Bool(b) => ParamValue::Bool(*b),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        ParamValue::Int(i)
                    } else if let Some(u) = n.as_u64() {
                        ParamValue::UInt(u)
                    } else if let Some(f) = n.as_f64() {
                        ParamValue::Float(f)
                    } else {
                        continue;
                    }
                }
                _ => continue,
            };
            opts = opts.param(key.as_str(), value);
        }
        opts
    }

    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn repeated_key_replaces_value_in_place() {
        let opts = GetOptions::new()
            .param("per_page", 2)
            .param("order", "asc")
            .param("per_page", 5);
        assert_eq!(
            opts.params(),
            &[
                ("per_page".to_string(), ParamValue::Int(5)),
                ("order".to_string(), ParamValue::String("asc".into())),
            ]
        );
    }

    #[test]
    fn values_render_as_query_text() {
        assert_eq!(ParamValue::from(2u32).to_string(), "2");
        assert_eq!(ParamValue::from(-7i64).to_string(), "-7");
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
        assert_eq!(ParamValue::from("a b").to_string(), "a b");
    }

    #[test]
    fn from_json_keeps_primitives_only() {
        let opts = GetOptions::from_json(&json!({
            "per_page": 2,
            "order": "asc",
            "sticky": false,
            "ratio": 0.5,
            "tags": [1, 2],
            "meta": {"a": 1},
            "missing": null
        }));
        let keys: Vec<&str> = opts.params().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys.len(), 4);
        assert!(keys.contains(&"per_page"));
        assert!(keys.contains(&"order"));
        assert!(keys.contains(&"sticky"));
        assert!(keys.contains(&"ratio"));
    }

    #[test]
    fn from_json_keeps_integers_above_i64_max() {
        let opts = GetOptions::from_json(&json!({"include": 18446744073709551615u64}));
        assert_eq!(
            opts.params(),
            &[("include".to_string(), ParamValue::UInt(u64::MAX))]
        );
        assert_eq!(opts.params()[0].1.to_string(), "18446744073709551615");
    }

    #[test]
    fn unsigned_and_f32_values_convert() {
        let items = vec![1, 2, 3];
        let opts = GetOptions::new()
            .param("per_page", items.len())
            .param("include", u64::MAX)
            .param("ratio", 0.5f32);
        let rendered: Vec<String> = opts.params().iter().map(|(_, v)| v.to_string()).collect();
        assert_eq!(rendered, vec!["3", "18446744073709551615", "0.5"]);
    }

    #[test]
    fn from_json_ignores_non_objects() {
        assert_eq!(GetOptions::from_json(&json!([1, 2])), GetOptions::new());
    }
}
