use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::{Operation, RuntimeError},
    interpreter::{
        evaluator::core::EvalResult,
        lexer::position::Range,
        value::{array::ArrayValue, function::FunctionValue},
    },
    util::num::format_number,
};

/// Represents a runtime value in the interpreter.
///
/// Arrays and functions are reference values: cloning a `Value` holding one
/// clones the handle, so every variable sees the same array.
#[derive(Debug, Clone)]
pub enum Value {
    /// The only numeric type.
    Number(f64),
    /// A string.
    String(String),
    /// A boolean.
    Boolean(bool),
    /// The null sentinel, also returned by functions that never return.
    Null,
    /// The "unknown" sentinel, distinct from null.
    Mysterious,
    /// A shared, mutable array.
    Array(Rc<RefCell<ArrayValue>>),
    /// A function together with its defining scope.
    Function(Rc<FunctionValue>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<ArrayValue> for Value {
    fn from(v: ArrayValue) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// Zero, the empty string, `false`, null and mysterious are falsy;
    /// everything else, including every array and function, is truthy.
    ///
    /// # Example
    /// ```
    /// use lyric::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(3.0).is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::Mysterious.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Boolean(b) => *b,
            Self::Null | Self::Mysterious => false,
            Self::Array(_) | Self::Function(_) => true,
        }
    }

    /// Returns `true` for null and mysterious, the values a push or an index
    /// write may replace with a fresh array.
    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Null | Self::Mysterious)
    }

    /// Renders the value for error messages: strings are quoted, everything
    /// else reads as it would print.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::String(s) => format!("\"{s}\""),
            Self::Array(_) => format!("array of {}", self),
            Self::Function(function) => format!("function '{}'", function.name),
            other => other.to_string(),
        }
    }

    /// Builds the error for a value that `operation` cannot work with.
    #[must_use]
    pub fn unfit(&self, operation: Operation, range: Range) -> RuntimeError {
        RuntimeError::UnfitValue { operation,
                                   value: self.describe(),
                                   range }
    }

    /// Returns the number inside, or an unfit-value error for `operation`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] if the value is not a number.
    pub fn as_number(&self, operation: Operation, range: Range) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(other.unfit(operation, range)),
        }
    }

    /// Returns the string inside, or an unfit-value error for `operation`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] if the value is not a string.
    pub fn as_str(&self, operation: Operation, range: Range) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(other.unfit(operation, range)),
        }
    }
}

/// Language equality.
///
/// Values of different variants are never equal. Numbers compare as `f64`;
/// arrays and functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Null, Self::Null) | (Self::Mysterious, Self::Mysterious) => true,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Formats the value the way `say` prints it.
///
/// Exact integers print without a fractional part. An array prints as its
/// length, a function as its name.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Mysterious => write!(f, "mysterious"),
            Self::Array(array) => write!(f, "{}", array.borrow().len()),
            Self::Function(function) => write!(f, "{}", function.name),
        }
    }
}
