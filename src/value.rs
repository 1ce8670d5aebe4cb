//! Scalar values flowing through targets, conditions and collection items.

use std::fmt;

/// A scalar value used for target values, condition parameters and
/// collection item value ids.
///
/// The persisted model stores these as opaque integers or strings; the
/// engines never interpret them beyond equality comparison, so a small
/// tagged enum is enough.
///
/// `From` implementations exist for the common literal types:
///
/// ```
/// use pageflow::value::Value;
///
/// let route: Value = "my_route".into();
/// let id: Value = 42.into();
/// assert_ne!(route, id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// An integer value (database ids, numeric parameters).
    Int(i64),
    /// A string value (route names, URIs, slugs).
    Str(String),
    /// A boolean parameter value.
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from("route"), Value::Str("route".to_string()));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Str("a/b".into()).to_string(), "a/b");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_equality_across_variants() {
        assert_ne!(Value::Int(1), Value::Str("1".into()));
        assert_ne!(Value::Bool(true), Value::Int(1));
    }
}
