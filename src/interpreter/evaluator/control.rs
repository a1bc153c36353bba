use std::rc::Rc;

use log::{debug, trace};

use crate::{
    ast::Node,
    error::{Operation, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            scope::{FrameKind, Scope},
        },
        lexer::position::Range,
        value::{core::Value, function::FunctionValue},
    },
};

impl Context<'_> {
    /// Runs one of the two blocks of a conditional in a fresh frame.
    ///
    /// Any signal raised inside the block is passed on to the caller.
    pub(crate) fn eval_conditional(&mut self,
                                   condition: &Node,
                                   then_block: &[Node],
                                   else_block: &[Node])
                                   -> EvalResult<Flow> {
        let block = if self.eval(condition)?.is_truthy() { then_block } else { else_block };
        if block.is_empty() {
            return Ok(Flow::Normal);
        }
        self.execute_nested(FrameKind::Conditional, block)
    }

    /// Runs a `while` or `until` loop.
    ///
    /// The condition is checked before every iteration, and every iteration
    /// gets a fresh frame. `break` and `continue` are handled here; `return`
    /// is passed on.
    ///
    /// # Errors
    /// Returns [`RuntimeError::LoopCeiling`] when the configured ceiling is
    /// reached and the loop still wants to run.
    pub(crate) fn eval_loop(&mut self,
                            condition: &Node,
                            body: &[Node],
                            until: bool,
                            range: Range)
                            -> EvalResult<Flow> {
        let mut iterations = 0_usize;

        while self.eval(condition)?.is_truthy() != until {
            if let Some(limit) = self.config.max_loop_iterations
               && iterations >= limit
            {
                return Err(RuntimeError::LoopCeiling { limit, range });
            }
            iterations += 1;

            match self.execute_nested(FrameKind::Loop, body)? {
                Flow::Break(_) => break,
                Flow::Normal | Flow::Continue(_) => {},
                flow @ Flow::Return(..) => return Ok(flow),
            }
        }

        trace!("loop at {range} finished after {iterations} iteration(s)");
        Ok(Flow::Normal)
    }

    /// Stores a function value closing over the current frame.
    pub(crate) fn declare_function(&mut self, name: &str, parameters: &[String], body: &[Node]) {
        let function = FunctionValue { name:       name.to_string(),
                                       parameters: parameters.to_vec(),
                                       body:       body.to_vec(),
                                       closure:    Rc::clone(&self.scope), };
        debug!("declared {name} taking {} parameter(s)", function.arity());
        self.scope.borrow_mut().set(name, Value::Function(Rc::new(function)));
    }

    /// Calls a function.
    ///
    /// Arguments are evaluated in the caller's frame and bound positionally in
    /// a new frame nested in the function's defining scope. A body that ends
    /// without `return` yields null.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ArgumentCount`] on an arity mismatch,
    /// [`RuntimeError::UnfitValue`] if the callee is not a function and
    /// [`RuntimeError::StrayControlFlow`] for a `break` or `continue` that no
    /// loop inside the function caught.
    pub(crate) fn eval_call(&mut self,
                            callee: &Node,
                            arguments: &[Node],
                            range: Range)
                            -> EvalResult<Value> {
        let function = match self.read(callee)? {
            Value::Function(function) => function,
            other => return Err(other.unfit(Operation::Call, callee.range)),
        };

        if function.arity() != arguments.len() {
            return Err(RuntimeError::ArgumentCount { function: function.name.clone(),
                                                     expected: function.arity(),
                                                     found: arguments.len(),
                                                     range });
        }

        let values = arguments.iter().map(|argument| self.eval(argument)).collect::<EvalResult<Vec<_>>>()?;

        let frame = Scope::child(&function.closure, FrameKind::Function);
        {
            let mut frame = frame.borrow_mut();
            for (parameter, value) in function.parameters.iter().zip(values) {
                frame.define(parameter, value);
            }
        }

        debug!("calling {} with {} argument(s)", function.name, arguments.len());
        match self.within(frame, |context| context.execute_block(&function.body))? {
            Flow::Return(value, _) => Ok(value),
            Flow::Normal => Ok(Value::Null),
            stray => stray.stray().map(|()| Value::Null),
        }
    }
}
