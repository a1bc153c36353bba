use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::{Node, NodeKind},
    error::{Operation, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            array::{ArrayKey, ArrayValue},
            core::Value,
        },
    },
    util::num::f64_to_usize_checked,
};

impl Context<'_> {
    /// Resolves a variable or pronoun to the name it stands for.
    ///
    /// Pronouns stand for the most recently assigned variable visible from the
    /// current frame.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Unassigned`] for a pronoun used before anything
    /// was assigned.
    pub fn resolve_name(&self, node: &Node) -> EvalResult<Option<String>> {
        match &node.kind {
            NodeKind::Variable(name) => Ok(Some(name.clone())),
            NodeKind::Pronoun(word) => {
                let referent = self.scope.borrow().referent();
                referent.map(Some)
                        .ok_or_else(|| RuntimeError::Unassigned { location: word.clone(),
                                                                  range:    node.range, })
            },
            _ => Ok(None),
        }
    }

    /// Reads a location, yielding `None` for a variable that holds nothing.
    ///
    /// Missing array entries read as mysterious.
    pub(crate) fn try_read(&mut self, node: &Node) -> EvalResult<Option<Value>> {
        if let Some(name) = self.resolve_name(node)? {
            return Ok(self.scope.borrow().get(&name));
        }

        let NodeKind::Index { target, index } = &node.kind else {
            return self.eval(node).map(Some);
        };

        let container = self.eval(target)?;
        let index = self.eval(index)?;
        match &container {
            Value::Array(array) => {
                let key = ArrayKey::from_value(&index, node.range)?;
                Ok(Some(array.borrow().get(&key).cloned().unwrap_or(Value::Mysterious)))
            },
            Value::String(s) => {
                let invalid = || RuntimeError::InvalidIndex { index: index.describe(),
                                                              range: node.range, };
                let Value::Number(n) = index else {
                    return Err(invalid());
                };
                let position = f64_to_usize_checked(n, invalid())?;
                s.chars()
                 .nth(position)
                 .map(|c| Some(Value::String(c.to_string())))
                 .ok_or_else(invalid)
            },
            other => Err(other.unfit(Operation::Index, node.range)),
        }
    }

    /// Reads a location.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Unassigned`] if the location holds nothing.
    pub(crate) fn read(&mut self, node: &Node) -> EvalResult<Value> {
        self.try_read(node)?.ok_or_else(|| RuntimeError::Unassigned { location: describe(node),
                                                                      range:    node.range, })
    }

    /// Writes a location.
    ///
    /// Variables follow the scoping rules of [`Scope::set`] and become the
    /// referent of pronouns. Writing an index of a location that holds
    /// nothing, null or mysterious creates an array there first.
    ///
    /// [`Scope::set`]: crate::interpreter::evaluator::scope::Scope::set
    pub(crate) fn write(&mut self, node: &Node, value: Value) -> EvalResult<()> {
        if let Some(name) = self.resolve_name(node)? {
            let mut scope = self.scope.borrow_mut();
            scope.set(&name, value);
            scope.remember(&name);
            return Ok(());
        }

        let NodeKind::Index { target, index } = &node.kind else {
            return Err(RuntimeError::Unassigned { location: describe(node),
                                                  range:    node.range, });
        };

        let key = ArrayKey::from_value(&self.eval(index)?, node.range)?;
        let array = self.array_at(target, Operation::Index)?;
        array.borrow_mut().set(key, value);
        Ok(())
    }

    /// Returns the array held at `target`, creating an empty one if the
    /// location holds nothing, null or mysterious.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnfitValue`] for `operation` if the location
    /// holds anything else.
    pub(crate) fn array_at(&mut self,
                           target: &Node,
                           operation: Operation)
                           -> EvalResult<Rc<RefCell<ArrayValue>>> {
        match self.try_read(target)? {
            Some(Value::Array(array)) => Ok(array),
            Some(other) if !other.is_nothing() => Err(other.unfit(operation, target.range)),
            _ => {
                let array = Rc::new(RefCell::new(ArrayValue::new()));
                self.write(target, Value::Array(Rc::clone(&array)))?;
                Ok(array)
            },
        }
    }
}

/// Renders a location node for error messages.
fn describe(node: &Node) -> String {
    match &node.kind {
        NodeKind::Variable(name) | NodeKind::Pronoun(name) => name.clone(),
        NodeKind::Index { target, .. } => format!("{} at ...", describe(target)),
        other => other.name().to_string(),
    }
}
