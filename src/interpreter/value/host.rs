use std::{cell::RefCell, collections::HashSet, fmt, rc::Rc};

use crate::{
    interpreter::value::{
        array::{ArrayKey, ArrayValue},
        core::Value,
    },
    util::num::{exact_integer, format_number},
};

/// A value as the host program sees it.
///
/// Null has no variant: it crosses the boundary as `None`, so callbacks and
/// accessors deal in `Option<HostValue>`.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    /// An integral number.
    Integer(i64),
    /// A number with a fractional part, or one too large to be exact.
    Float(f64),
    /// A string.
    String(String),
    /// A boolean.
    Boolean(bool),
    /// The mysterious sentinel.
    Mysterious,
    /// The entries of an array, in insertion order.
    Array(Vec<(Option<Self>, Option<Self>)>),
    /// An opaque handle naming a function.
    Function(String),
}

impl From<i64> for HostValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for HostValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for HostValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for HostValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for HostValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T> From<Vec<T>> for HostValue where T: Into<Self>
{
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter()
                          .enumerate()
                          .map(|(i, v)| (Some(Self::Integer(i64::try_from(i).unwrap_or(i64::MAX))),
                                         Some(v.into())))
                          .collect())
    }
}

impl HostValue {
    /// Converts a host value into a language value.
    ///
    /// Sequences and maps become arrays. Keys that cannot index an array are
    /// stored under their printed form.
    ///
    /// # Example
    /// ```
    /// use lyric::interpreter::value::{core::Value, host::HostValue};
    ///
    /// assert_eq!(HostValue::into_value(Some(HostValue::from(4_i64))), Value::Number(4.0));
    /// assert_eq!(HostValue::into_value(None), Value::Null);
    /// ```
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn into_value(host: Option<Self>) -> Value {
        let Some(host) = host else {
            return Value::Null;
        };
        match host {
            Self::Integer(n) => Value::Number(n as f64),
            Self::Float(n) => Value::Number(n),
            Self::String(s) => Value::String(s),
            Self::Boolean(b) => Value::Boolean(b),
            Self::Mysterious => Value::Mysterious,
            Self::Function(name) => Value::String(name),
            Self::Array(entries) => {
                let mut array = ArrayValue::new();
                for (key, value) in entries {
                    let key = match Self::into_value(key) {
                        Value::Number(n) => ArrayKey::number(n),
                        Value::String(s) => ArrayKey::String(s),
                        Value::Boolean(b) => ArrayKey::Boolean(b),
                        Value::Null => ArrayKey::Null,
                        other => ArrayKey::String(other.to_string()),
                    };
                    array.set(key, Self::into_value(value));
                }
                array.into()
            },
        }
    }

    /// Converts a language value into a host value.
    ///
    /// Exact integers surface as [`HostValue::Integer`]; null surfaces as
    /// `None`. An array nested inside itself surfaces as
    /// [`HostValue::Mysterious`] where it repeats.
    ///
    /// # Example
    /// ```
    /// use lyric::interpreter::value::{core::Value, host::HostValue};
    ///
    /// assert_eq!(HostValue::from_value(&Value::Number(3.0)), Some(HostValue::Integer(3)));
    /// assert_eq!(HostValue::from_value(&Value::Number(0.5)), Some(HostValue::Float(0.5)));
    /// assert_eq!(HostValue::from_value(&Value::Null), None);
    /// ```
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::convert(value, &mut HashSet::new())
    }

    /// Converts `value`, with `open` holding the arrays currently being
    /// converted.
    fn convert(value: &Value, open: &mut HashSet<*const RefCell<ArrayValue>>) -> Option<Self> {
        match value {
            Value::Number(n) => Some(exact_integer(*n).map_or(Self::Float(*n), Self::Integer)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Boolean(b) => Some(Self::Boolean(*b)),
            Value::Null => None,
            Value::Mysterious => Some(Self::Mysterious),
            Value::Function(function) => Some(Self::Function(function.name.clone())),
            Value::Array(array) => {
                let id = Rc::as_ptr(array);
                if !open.insert(id) {
                    return Some(Self::Mysterious);
                }
                let entries: Vec<_> = array.borrow()
                                          .entries()
                                          .map(|(key, value)| {
                                              (Self::convert(&key.to_value(), open),
                                               Self::convert(value, open))
                                          })
                                          .collect();
                open.remove(&id);
                Some(Self::Array(entries))
            },
        }
    }
}

/// Renders an optional host value the way the language prints it; `None`
/// prints as `null`.
///
/// # Example
/// ```
/// use lyric::interpreter::value::host::{HostValue, render};
///
/// assert_eq!(render(Some(&HostValue::Integer(12))), "12");
/// assert_eq!(render(None), "null");
/// ```
#[must_use]
pub fn render(value: Option<&HostValue>) -> String {
    value.map_or_else(|| "null".to_string(), ToString::to_string)
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Mysterious => write!(f, "mysterious"),
            Self::Array(entries) => write!(f, "{}", entries.len()),
            Self::Function(name) => write!(f, "{name}"),
        }
    }
}
