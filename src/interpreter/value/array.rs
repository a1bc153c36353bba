use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::position::Range, value::core::Value},
    util::num::{f64_to_usize_checked, usize_to_f64},
};

/// A key of an array.
///
/// Only scalar values can be keys. Numbers are hashed through `OrderedFloat`,
/// with negative zero folded into zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArrayKey {
    /// A numeric key.
    Number(OrderedFloat<f64>),
    /// A string key.
    String(String),
    /// A boolean key.
    Boolean(bool),
    /// The null key.
    Null,
}

impl ArrayKey {
    /// Converts a value into a key.
    ///
    /// # Errors
    /// Returns [`RuntimeError::InvalidIndex`] for mysterious, arrays and
    /// functions.
    pub fn from_value(value: &Value, range: Range) -> EvalResult<Self> {
        match value {
            Value::Number(n) => Ok(Self::number(*n)),
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Boolean(b) => Ok(Self::Boolean(*b)),
            Value::Null => Ok(Self::Null),
            other => Err(RuntimeError::InvalidIndex { index: other.describe(),
                                                      range }),
        }
    }

    /// A numeric key.
    #[must_use]
    pub fn number(n: f64) -> Self {
        Self::Number(OrderedFloat(n + 0.0))
    }

    /// The key as a value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::Number(n.into_inner()),
            Self::String(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Boolean(*b),
            Self::Null => Value::Null,
        }
    }

    /// The key as an array position, if it is a non-negative integer.
    fn position(&self) -> Option<usize> {
        match self {
            Self::Number(n) => f64_to_usize_checked(n.into_inner(), ()).ok(),
            _ => None,
        }
    }
}

/// An ordered key-value map with a stack index.
///
/// Entries keep their insertion order. `next_index` is one past the highest
/// non-negative integer key assigned so far; `push` writes there and `pop`
/// takes the entry just below it.
///
/// # Example
/// ```
/// use lyric::interpreter::value::{array::ArrayValue, core::Value};
///
/// let mut array = ArrayValue::new();
/// array.push(Value::from("a"));
/// array.push(Value::from("b"));
/// assert_eq!(array.next_index(), 2);
/// assert_eq!(array.pop(), Value::from("b"));
/// assert_eq!(array.next_index(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArrayValue {
    entries:    HashMap<ArrayKey, Value>,
    order:      Vec<ArrayKey>,
    next_index: usize,
}

impl ArrayValue {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an array holding `values` at keys `0..n`.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let mut array = Self::new();
        for value in values {
            array.push(value);
        }
        array
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the array has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The key the next push writes to.
    #[must_use]
    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    /// Reads an entry.
    #[must_use]
    pub fn get(&self, key: &ArrayKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Writes an entry, advancing the stack index past integer keys.
    pub fn set(&mut self, key: ArrayKey, value: Value) {
        if let Some(position) = key.position()
           && position >= self.next_index
        {
            self.next_index = position + 1;
        }
        if self.entries.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    /// Appends a value at the stack index.
    pub fn push(&mut self, value: Value) {
        self.set(ArrayKey::number(usize_to_f64(self.next_index)), value);
    }

    /// Removes and returns the entry just below the stack index.
    ///
    /// An empty stack, or a hole at that key, yields mysterious.
    pub fn pop(&mut self) -> Value {
        let Some(index) = self.next_index.checked_sub(1) else {
            return Value::Mysterious;
        };
        self.next_index = index;

        let key = ArrayKey::number(usize_to_f64(index));
        match self.entries.remove(&key) {
            Some(value) => {
                if self.order.last() == Some(&key) {
                    self.order.pop();
                } else if let Some(position) = self.order.iter().rposition(|k| k == &key) {
                    self.order.remove(position);
                }
                value
            },
            None => Value::Mysterious,
        }
    }

    /// Iterates over the entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&ArrayKey, &Value)> {
        self.order.iter().filter_map(|key| self.entries.get(key).map(|value| (key, value)))
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries().map(|(_, value)| value)
    }
}
