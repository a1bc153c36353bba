use std::{cell::RefCell, rc::Rc};

use log::trace;

use crate::{
    ast::{Node, NodeKind},
    error::RuntimeError,
    interpreter::{
        evaluator::scope::{FrameKind, Scope},
        lexer::position::Range,
        value::{array::ArrayValue, core::Value, host::HostValue},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The callback asked for a value by `listen`.
pub type InputFn = dyn FnMut() -> Option<HostValue>;

/// The callback handed every value passed to `say`.
pub type OutputFn = dyn FnMut(Option<HostValue>);

/// Evaluation settings.
///
/// # Example
/// ```
/// use lyric::interpreter::evaluator::core::Config;
///
/// let config = Config::new().with_max_loop_iterations(1000);
/// assert_eq!(config.max_loop_iterations, Some(1000));
/// assert_eq!(Config::default().max_loop_iterations, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// How many iterations a single loop may run before it is aborted.
    /// `None` means no ceiling.
    pub max_loop_iterations: Option<usize>,
}

impl Config {
    /// Creates the default configuration: no loop ceiling.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_loop_iterations: None }
    }

    /// Sets the loop ceiling.
    #[must_use]
    pub const fn with_max_loop_iterations(mut self, limit: usize) -> Self {
        self.max_loop_iterations = Some(limit);
        self
    }
}

/// How a statement finished.
///
/// Anything but `Normal` unwinds the enclosing blocks until a loop or a
/// function call handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Carry on with the next statement.
    Normal,
    /// `break`.
    Break(Range),
    /// `continue`.
    Continue(Range),
    /// `return`, with the returned value.
    Return(Value, Range),
}

impl Flow {
    /// Turns a signal that reached a frame unable to handle it into an error.
    pub(crate) fn stray(self) -> EvalResult<()> {
        let (signal, range) = match self {
            Self::Normal => return Ok(()),
            Self::Break(range) => ("break", range),
            Self::Continue(range) => ("continue", range),
            Self::Return(_, range) => ("return", range),
        };
        Err(RuntimeError::StrayControlFlow { signal, range })
    }
}

/// Stores the runtime evaluation context.
///
/// The context holds the current scope frame, the settings and the I/O
/// callbacks. It is created for a single run; the global frame it starts from
/// belongs to the caller and outlives it.
///
/// ## Usage
///
/// `run()` evaluates a list of top-level statements. Everything else walks the
/// tree below it: `execute()` for statements and `eval()` for values, with
/// blocks getting a fresh frame each time they are entered.
pub struct Context<'io> {
    /// The innermost frame.
    pub scope:  Rc<RefCell<Scope>>,
    /// Evaluation settings.
    pub config: Config,
    input:      &'io mut InputFn,
    output:     &'io mut OutputFn,
}

impl<'io> Context<'io> {
    /// Creates a context evaluating in `global`.
    pub fn new(global: Rc<RefCell<Scope>>,
               config: Config,
               input: &'io mut InputFn,
               output: &'io mut OutputFn)
               -> Self {
        Self { scope: global,
               config,
               input,
               output }
    }

    /// Evaluates top-level statements in order.
    ///
    /// # Errors
    /// Returns the first runtime error, or
    /// [`RuntimeError::StrayControlFlow`] for a `break`, `continue` or
    /// `return` outside any loop or function.
    pub fn run(&mut self, nodes: &[Node]) -> EvalResult<()> {
        for node in nodes {
            self.execute(node)?.stray()?;
        }
        Ok(())
    }

    /// Evaluates a block of statements, stopping at the first signal.
    pub(crate) fn execute_block(&mut self, nodes: &[Node]) -> EvalResult<Flow> {
        for node in nodes {
            let flow = self.execute(node)?;
            if !matches!(flow, Flow::Normal) {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs `f` with `scope` as the current frame, restoring the previous
    /// frame afterwards, error or not.
    ///
    /// The pronoun referent set inside is kept unless it names a variable that
    /// went away with the frame.
    pub(crate) fn within<T>(&mut self,
                            scope: Rc<RefCell<Scope>>,
                            f: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        trace!("entering {:?} frame", scope.borrow().kind());
        let referent = self.scope.borrow().referent();
        let outer = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = outer;

        // A name bound only in the dropped frame can no longer be referred to.
        let mut scope = self.scope.borrow_mut();
        if let Some(name) = scope.referent()
           && scope.get(&name).is_none()
        {
            scope.set_referent(referent);
        }
        drop(scope);
        result
    }

    /// Runs a block in a fresh frame of `kind` nested in the current one.
    pub(crate) fn execute_nested(&mut self, kind: FrameKind, nodes: &[Node]) -> EvalResult<Flow> {
        let scope = Scope::child(&self.scope, kind);
        self.within(scope, |context| context.execute_block(nodes))
    }

    /// Evaluates a single statement.
    ///
    /// Value expressions are evaluated for their side effects and their result
    /// is dropped.
    ///
    /// # Returns
    /// The signal the statement finished with.
    pub fn execute(&mut self, node: &Node) -> EvalResult<Flow> {
        match &node.kind {
            NodeKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.write(target, value)?;
            },
            NodeKind::Input(target) => {
                let value = HostValue::into_value((self.input)());
                if let Some(target) = target {
                    self.write(target, value)?;
                }
            },
            NodeKind::Output(value) => {
                let value = self.eval(value)?;
                (self.output)(HostValue::from_value(&value));
            },
            NodeKind::Push { target, values } => self.eval_push(target, values, node.range)?,
            NodeKind::Split(mutation) => self.eval_split(mutation, node.range)?,
            NodeKind::Join(mutation) => self.eval_join(mutation, node.range)?,
            NodeKind::Cast(mutation) => self.eval_cast(mutation, node.range)?,
            NodeKind::Round { target, mode } => self.eval_round(target, *mode, node.range)?,
            NodeKind::Conditional { condition,
                                    then_block,
                                    else_block, } => {
                return self.eval_conditional(condition, then_block, else_block);
            },
            NodeKind::Loop { condition,
                             body,
                             until, } => return self.eval_loop(condition, body, *until, node.range),
            NodeKind::Function { name,
                                 parameters,
                                 body, } => self.declare_function(name, parameters, body),
            NodeKind::Return(value) => return Ok(Flow::Return(self.eval(value)?, node.range)),
            NodeKind::Break => return Ok(Flow::Break(node.range)),
            NodeKind::Continue => return Ok(Flow::Continue(node.range)),
            NodeKind::Else | NodeKind::NoOp => {},
            _ => {
                self.eval(node)?;
            },
        }
        Ok(Flow::Normal)
    }

    /// Evaluates a value expression.
    ///
    /// Statement nodes evaluate as statements and produce null.
    ///
    /// # Errors
    /// Propagates any [`RuntimeError`] raised while evaluating the node or its
    /// children.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        match &node.kind {
            NodeKind::Number(n) => Ok(Value::Number(*n)),
            NodeKind::String(s) => Ok(Value::String(s.clone())),
            NodeKind::Boolean(b) => Ok(Value::Boolean(*b)),
            NodeKind::Null => Ok(Value::Null),
            NodeKind::Mysterious => Ok(Value::Mysterious),
            NodeKind::Variable(_) | NodeKind::Pronoun(_) | NodeKind::Index { .. } => self.read(node),
            NodeKind::List(items) => {
                let values = items.iter().map(|item| self.eval(item)).collect::<EvalResult<Vec<_>>>()?;
                Ok(ArrayValue::from_values(values).into())
            },
            NodeKind::Binary { op, left, right } => self.eval_binary(*op, left, right, node.range),
            NodeKind::Not(operand) => self.eval_not(operand),
            NodeKind::Call { callee, arguments } => self.eval_call(callee, arguments, node.range),
            NodeKind::Pop(target) => self.eval_pop(target),
            _ => {
                self.execute(node)?.stray()?;
                Ok(Value::Null)
            },
        }
    }
}
