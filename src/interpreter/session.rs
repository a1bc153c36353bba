use std::{cell::RefCell, rc::Rc};

use log::debug;

use crate::{
    ast::Node,
    error::Error,
    interpreter::{
        evaluator::{
            core::{Config, Context, InputFn, OutputFn},
            scope::Scope,
        },
        parser::{
            core::{ParseResult, parse},
            value::normalize,
        },
        value::host::HostValue,
    },
};

/// A program together with everything needed to run it.
///
/// The source is parsed once, on the first call to [`parse`](Self::parse) or
/// [`run`](Self::run), and the syntax tree is cached. Global variables persist
/// from one run to the next until [`reset`](Self::reset) clears them.
///
/// By default `listen` reads null and `say` goes nowhere.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use lyric::interpreter::{session::Interpreter, value::host::HostValue};
///
/// let said = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&said);
///
/// let mut interpreter =
///     Interpreter::new("Tommy was a lean mean wrecking machine\nshout Tommy")
///         .with_output(move |value| sink.borrow_mut().push(value));
/// interpreter.run().unwrap();
///
/// assert_eq!(*said.borrow(), vec![Some(HostValue::Integer(14487))]);
/// assert_eq!(interpreter.global("tommy"), Some(HostValue::Integer(14487)));
/// ```
pub struct Interpreter {
    source: String,
    ast:    Option<Vec<Node>>,
    global: Rc<RefCell<Scope>>,
    config: Config,
    input:  Box<InputFn>,
    output: Box<OutputFn>,
}

impl Interpreter {
    /// Creates an interpreter for `source` with the default callbacks and
    /// configuration.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(),
               ast:    None,
               global: Scope::global(),
               config: Config::default(),
               input:  Box::new(|| None),
               output: Box::new(|_| {}), }
    }

    /// Replaces the input callback.
    #[must_use]
    pub fn with_input(mut self, input: impl FnMut() -> Option<HostValue> + 'static) -> Self {
        self.set_input(input);
        self
    }

    /// Replaces the output callback.
    #[must_use]
    pub fn with_output(mut self, output: impl FnMut(Option<HostValue>) + 'static) -> Self {
        self.set_output(output);
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Replaces the input callback between runs.
    pub fn set_input(&mut self, input: impl FnMut() -> Option<HostValue> + 'static) {
        self.input = Box::new(input);
    }

    /// Replaces the output callback between runs.
    pub fn set_output(&mut self, output: impl FnMut(Option<HostValue>) + 'static) {
        self.output = Box::new(output);
    }

    /// Parses the source, or returns the cached syntax tree.
    ///
    /// # Errors
    /// Returns the first [`ParseError`](crate::error::ParseError) in the
    /// source.
    pub fn parse(&mut self) -> ParseResult<&[Node]> {
        let ast = match self.ast.take() {
            Some(ast) => ast,
            None => {
                let ast = parse(&self.source)?;
                debug!("parsed {} top-level statement(s)", ast.len());
                ast
            },
        };
        Ok(self.ast.insert(ast))
    }

    /// Parses the program if needed and runs it against the global
    /// variables.
    ///
    /// # Errors
    /// Returns the parse error, or the runtime error that stopped the run.
    pub fn run(&mut self) -> Result<(), Error> {
        self.parse()?;
        let Some(ast) = &self.ast else {
            return Ok(());
        };

        let mut context = Context::new(Rc::clone(&self.global),
                                       self.config,
                                       &mut *self.input,
                                       &mut *self.output);
        context.run(ast)?;
        Ok(())
    }

    /// Forgets every global variable.
    pub fn reset(&mut self) {
        self.global.borrow_mut().clear();
    }

    /// Reads a global variable by name. Null and unassigned variables both
    /// read as `None`.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<HostValue> {
        self.global.borrow().get(&normalize(name)).as_ref().and_then(HostValue::from_value)
    }
}
