use crate::{
    ast::{BinaryOperator, Node},
    error::Operation,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::position::Range,
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a binary operation.
    ///
    /// `and`, `or` and `nor` short-circuit: the right operand is only
    /// evaluated when the left one does not decide the result.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] for operands the operator cannot
    /// work with.
    ///
    /// [`RuntimeError::UnfitValue`]: crate::error::RuntimeError::UnfitValue
    pub(crate) fn eval_binary(&mut self,
                              op: BinaryOperator,
                              left: &Node,
                              right: &Node,
                              range: Range)
                              -> EvalResult<Value> {
        let lhs = self.eval(left)?;

        if op.is_boolean() {
            let lhs = truth(&lhs, range)?;
            let decided = match op {
                BinaryOperator::And => !lhs,
                _ => lhs,
            };
            if decided {
                return Ok(Value::Boolean(op == BinaryOperator::Or));
            }
            let rhs = truth(&self.eval(right)?, range)?;
            return Ok(Value::Boolean(match op {
                                         BinaryOperator::Nor => !rhs,
                                         _ => rhs,
                                     }));
        }

        let rhs = self.eval(right)?;
        Self::apply_binary(op, &lhs, &rhs, range)
    }

    /// Applies an arithmetic or comparison operator to two values.
    ///
    /// # Example
    /// ```
    /// use lyric::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, lexer::position::Range, value::core::Value},
    /// };
    ///
    /// let sum = Context::apply_binary(BinaryOperator::Add,
    ///                                 &Value::Number(2.0),
    ///                                 &Value::Number(3.0),
    ///                                 Range::default()).unwrap();
    /// assert_eq!(sum, Value::Number(5.0));
    ///
    /// let text = Context::apply_binary(BinaryOperator::Add,
    ///                                  &Value::from("rock"),
    ///                                  &Value::from("star"),
    ///                                  Range::default()).unwrap();
    /// assert_eq!(text, Value::from("rockstar"));
    ///
    /// assert!(Context::apply_binary(BinaryOperator::Mul,
    ///                               &Value::from("rock"),
    ///                               &Value::Number(2.0),
    ///                               Range::default()).is_err());
    /// ```
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] naming the first operand of the
    /// wrong type.
    ///
    /// [`RuntimeError::UnfitValue`]: crate::error::RuntimeError::UnfitValue
    pub fn apply_binary(op: BinaryOperator,
                        lhs: &Value,
                        rhs: &Value,
                        range: Range)
                        -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Equal, Mul, NotEqual, Sub};
        use Value::{Number, String};

        match (op, lhs, rhs) {
            (Equal, ..) => Ok(Value::Boolean(lhs == rhs)),
            (NotEqual, ..) => Ok(Value::Boolean(lhs != rhs)),
            (Add, Number(a), Number(b)) => Ok(Number(a + b)),
            (Sub, Number(a), Number(b)) => Ok(Number(a - b)),
            (Mul, Number(a), Number(b)) => Ok(Number(a * b)),
            (Div, Number(a), Number(b)) => Ok(Number(a / b)),
            (Add, String(a), String(b)) => Ok(String(format!("{a}{b}"))),
            (Add | Sub | Mul | Div, ..) => Err(offender(lhs, rhs, op).unfit(Operation::Equation, range)),
            (_, Number(a), Number(b)) => Ok(Value::Boolean(compare(op, a, b))),
            (_, String(a), String(b)) => Ok(Value::Boolean(compare(op, a, b))),
            _ => Err(offender(lhs, rhs, op).unfit(Operation::Comparison, range)),
        }
    }

    /// Evaluates `not`.
    pub(crate) fn eval_not(&mut self, operand: &Node) -> EvalResult<Value> {
        let value = self.eval(operand)?;
        Ok(Value::Boolean(!truth(&value, operand.range)?))
    }
}

/// The truthiness of a scalar operand of boolean logic.
///
/// Arrays and functions are truthy in conditions but cannot take part in
/// `and`, `or`, `nor` and `not`.
fn truth(value: &Value, range: Range) -> EvalResult<bool> {
    match value {
        Value::Array(_) | Value::Function(_) => Err(value.unfit(Operation::Boolean, range)),
        scalar => Ok(scalar.is_truthy()),
    }
}

/// Picks the operand to blame for a type mismatch: the left one unless it is
/// of a type the operator accepts.
fn offender<'v>(lhs: &'v Value, rhs: &'v Value, op: BinaryOperator) -> &'v Value {
    let accepted = match lhs {
        Value::Number(_) => true,
        Value::String(_) => op == BinaryOperator::Add || op.is_comparison(),
        _ => false,
    };
    if accepted { rhs } else { lhs }
}

fn compare<T: PartialOrd + ?Sized>(op: BinaryOperator, a: &T, b: &T) -> bool {
    match op {
        BinaryOperator::Greater => a > b,
        BinaryOperator::Less => a < b,
        BinaryOperator::GreaterEqual => a >= b,
        BinaryOperator::LessEqual => a <= b,
        _ => false,
    }
}
