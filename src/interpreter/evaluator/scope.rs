use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// What opened a scope frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// The root frame, alive as long as the interpreter.
    Global,
    /// The body of an `if` or `else` block.
    Conditional,
    /// One iteration of a loop body.
    Loop,
    /// One call of a function.
    Function,
}

/// A frame of variables.
///
/// Frames link outwards to their parent; only the global frame has none.
/// Lookups walk outwards, and so does assignment, which writes to the
/// innermost frame that already owns the name and falls back to the current
/// frame.
///
/// # Example
/// ```
/// use lyric::interpreter::{
///     evaluator::scope::{FrameKind, Scope},
///     value::core::Value,
/// };
///
/// let global = Scope::global();
/// global.borrow_mut().set("my heart", Value::Number(1.0));
///
/// let inner = Scope::child(&global, FrameKind::Loop);
/// inner.borrow_mut().set("my heart", Value::Number(2.0));
/// inner.borrow_mut().set("the night", Value::Boolean(true));
///
/// assert_eq!(global.borrow().get("my heart"), Some(Value::Number(2.0)));
/// assert_eq!(global.borrow().get("the night"), None);
/// ```
#[derive(Debug)]
pub struct Scope {
    kind:          FrameKind,
    variables:     HashMap<String, Value>,
    last_assigned: Option<String>,
    parent:        Option<Rc<RefCell<Self>>>,
}

impl Scope {
    /// Creates a global frame.
    #[must_use]
    pub fn global() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { kind:          FrameKind::Global,
                                    variables:     HashMap::new(),
                                    last_assigned: None,
                                    parent:        None, }))
    }

    /// Creates a frame nested in `parent`.
    #[must_use]
    pub fn child(parent: &Rc<RefCell<Self>>, kind: FrameKind) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { kind,
                                    variables: HashMap::new(),
                                    last_assigned: None,
                                    parent: Some(Rc::clone(parent)) }))
    }

    /// What opened this frame.
    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Looks a name up, walking outwards.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.variables.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.borrow().get(name)),
        }
    }

    /// Writes to the innermost frame owning `name`, or binds it here.
    pub fn set(&mut self, name: &str, value: Value) {
        if let Err(value) = self.assign_existing(name, value) {
            self.variables.insert(name.to_string(), value);
        }
    }

    /// Binds `name` in this frame, shadowing any outer binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    fn assign_existing(&mut self, name: &str, value: Value) -> Result<(), Value> {
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign_existing(name, value),
            None => Err(value),
        }
    }

    /// Records `name` as the referent of pronouns.
    ///
    /// There is one referent per program, kept in the global frame, so it
    /// survives the frame that made the assignment.
    pub fn remember(&mut self, name: &str) {
        self.set_referent(Some(name.to_string()));
    }

    /// Replaces the referent of pronouns.
    pub fn set_referent(&mut self, name: Option<String>) {
        match &self.parent {
            Some(parent) => parent.borrow_mut().set_referent(name),
            None => self.last_assigned = name,
        }
    }

    /// The most recently assigned name.
    #[must_use]
    pub fn referent(&self) -> Option<String> {
        match &self.parent {
            Some(parent) => parent.borrow().referent(),
            None => self.last_assigned.clone(),
        }
    }

    /// Forgets every variable and the pronoun referent.
    pub fn clear(&mut self) {
        self.variables.clear();
        self.last_assigned = None;
    }
}
