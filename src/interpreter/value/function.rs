use std::{cell::RefCell, fmt, rc::Rc};

use crate::{ast::Node, interpreter::evaluator::scope::Scope};

/// A user-defined function.
///
/// The function keeps a handle to the scope it was declared in, so every call
/// reads and writes the same captured variables.
pub struct FunctionValue {
    /// The normalized function name.
    pub name:       String,
    /// Normalized parameter names, bound positionally.
    pub parameters: Vec<String>,
    /// The statements of the body.
    pub body:       Vec<Node>,
    /// The defining scope.
    pub closure:    Rc<RefCell<Scope>>,
}

impl FunctionValue {
    /// The number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

// The closure may hold the function itself.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
         .field("name", &self.name)
         .field("parameters", &self.parameters)
         .finish_non_exhaustive()
    }
}
