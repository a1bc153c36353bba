use log::trace;

use crate::{
    ast::{Mutation, Node, RoundMode},
    error::{Operation, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        lexer::position::Range,
        value::{array::ArrayValue, core::Value},
    },
    util::num::{f64_to_u32_checked, format_number},
};

impl Context<'_> {
    /// Pushes values onto the array at `target`.
    ///
    /// A location holding nothing, null or mysterious gets a new array first,
    /// so a bare `rock X` just makes `X` an empty array.
    pub(crate) fn eval_push(&mut self,
                            target: &Node,
                            values: &[Node],
                            range: Range)
                            -> EvalResult<()> {
        let values = values.iter()
                           .map(|value| self.eval(value))
                           .collect::<EvalResult<Vec<_>>>()?;
        let array = self.array_at(target, Operation::Array)?;
        let mut array = array.borrow_mut();
        for value in values {
            array.push(value);
        }
        trace!("pushed onto array at {range}, next index {}", array.next_index());
        Ok(())
    }

    /// Pops the last auto-indexed entry of the array at `target`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] if the location does not hold an
    /// array.
    pub(crate) fn eval_pop(&mut self, target: &Node) -> EvalResult<Value> {
        match self.read(target)? {
            Value::Array(array) => Ok(array.borrow_mut().pop()),
            other => Err(other.unfit(Operation::Array, target.range)),
        }
    }

    /// Splits a string into an array of characters, or of the pieces around
    /// a delimiter.
    pub(crate) fn eval_split(&mut self, mutation: &Mutation, range: Range) -> EvalResult<()> {
        let source = self.eval(&mutation.source)?;
        let text = source.as_str(Operation::String, range)?;
        let delimiter = self.delimiter(mutation)?;

        let pieces: Vec<Value> = if delimiter.is_empty() {
            text.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            text.split(delimiter.as_str()).map(Value::from).collect()
        };

        self.store(mutation, ArrayValue::from_values(pieces).into())
    }

    /// Joins the values of an array into a string, in insertion order.
    pub(crate) fn eval_join(&mut self, mutation: &Mutation, range: Range) -> EvalResult<()> {
        let source = self.eval(&mutation.source)?;
        let Value::Array(array) = &source else {
            return Err(source.unfit(Operation::Array, range));
        };
        let delimiter = self.delimiter(mutation)?;

        let joined = array.borrow()
                          .values()
                          .map(ToString::to_string)
                          .collect::<Vec<_>>()
                          .join(&delimiter);
        self.store(mutation, Value::String(joined))
    }

    /// Converts a string to a number, in an optional radix, or a number to
    /// the character with that code point.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] for unparsable strings and
    /// non-scalar values, and [`RuntimeError::NumberOutOfRange`] for numbers
    /// that are not valid code points.
    pub(crate) fn eval_cast(&mut self, mutation: &Mutation, range: Range) -> EvalResult<()> {
        let source = self.eval(&mutation.source)?;
        let radix = match &mutation.argument {
            Some(argument) => {
                let radix = self.eval(argument)?.as_number(Operation::Cast, argument.range)?;
                let out_of_range = RuntimeError::NumberOutOfRange { value: format_number(radix),
                                                                    range: argument.range, };
                match f64_to_u32_checked(radix, ()) {
                    Ok(radix) if (2..=36).contains(&radix) => radix,
                    _ => return Err(out_of_range),
                }
            },
            None => 10,
        };

        let cast = match &source {
            Value::String(text) => {
                parse_number(text.trim(), radix).ok_or_else(|| source.unfit(Operation::Cast, range))?
            },
            Value::Number(n) => {
                let out_of_range = || RuntimeError::NumberOutOfRange { value: format_number(*n),
                                                                       range };
                let code = f64_to_u32_checked(*n, out_of_range())?;
                let c = char::from_u32(code).ok_or_else(out_of_range)?;
                Value::String(c.to_string())
            },
            other => return Err(other.unfit(Operation::Cast, range)),
        };

        self.store(mutation, cast)
    }

    /// Rounds the number at `target` in place.
    pub(crate) fn eval_round(&mut self,
                             target: &Node,
                             mode: RoundMode,
                             range: Range)
                             -> EvalResult<()> {
        let n = self.read(target)?.as_number(Operation::Rounding, range)?;
        let rounded = match mode {
            RoundMode::Up => n.ceil(),
            RoundMode::Down => n.floor(),
            RoundMode::Nearest => n.round(),
        };
        self.write(target, Value::Number(rounded))
    }

    /// The delimiter argument of a split or join, empty when absent.
    fn delimiter(&mut self, mutation: &Mutation) -> EvalResult<String> {
        match &mutation.argument {
            Some(argument) => {
                let value = self.eval(argument)?;
                Ok(value.as_str(Operation::String, argument.range)?.to_string())
            },
            None => Ok(String::new()),
        }
    }

    /// Writes the result of a mutation to its destination, or back to its
    /// source.
    fn store(&mut self, mutation: &Mutation, value: Value) -> EvalResult<()> {
        let target = mutation.destination.as_ref().unwrap_or(&mutation.source);
        self.write(target, value)
    }
}

/// Parses a number in `radix`. Base ten accepts fractions and exponents;
/// other bases accept signed integers only.
#[allow(clippy::cast_precision_loss)]
fn parse_number(text: &str, radix: u32) -> Option<Value> {
    if radix == 10 {
        return text.parse::<f64>().ok().filter(|n| !n.is_nan()).map(Value::Number);
    }
    i64::from_str_radix(text, radix).ok().map(|n| Value::Number(n as f64))
}
