// sprig-core - Environment for lexical scoping
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use sprig_parser::{Form, Symbol};

use crate::docs::DocStore;
use crate::error::{Error, Result};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. A child keeps its
/// parent alive, and a closure keeps its defining environment alive, so a
/// frame lives as long as its longest-lived referrer.
///
/// # Examples
///
/// ```
/// use sprig_core::Env;
/// use sprig_parser::{Form, Symbol};
///
/// let env = Env::new();
/// env.define(Symbol::new("x"), Form::int(42)).unwrap();
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), Form::int(42));
///
/// // A child sees its parent's bindings and may shadow them
/// let child = env.child();
/// child.define(Symbol::new("x"), Form::int(100)).unwrap();
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), Form::int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), Form::int(42));
///
/// // Redefining in the same frame is an error
/// assert!(env.define(Symbol::new("x"), Form::int(1)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, Form>,
    parent: Option<Env>,
    /// Documentation pages (only set on the root environment)
    docs: Option<Rc<DocStore>>,
}

thread_local! {
    static LIVE_FRAMES: Cell<usize> = const { Cell::new(0) };
}

/// Number of environment frames currently alive on this thread.
///
/// A closure stored in a frame it captures keeps that frame alive for as
/// long as the closure is reachable, so a count that keeps growing across
/// repeated calls points at such a cycle.
pub fn live_frames() -> usize {
    LIVE_FRAMES.with(|n| n.get())
}

impl EnvInner {
    fn new(parent: Option<Env>) -> Self {
        LIVE_FRAMES.with(|n| n.set(n.get() + 1));
        EnvInner {
            bindings: HashMap::new(),
            parent,
            docs: None,
        }
    }
}

impl Drop for EnvInner {
    fn drop(&mut self) {
        LIVE_FRAMES.with(|n| n.set(n.get().saturating_sub(1)));
    }
}

/// A non-owning handle to an environment.
///
/// Primitives that need the root environment hold one of these, so the
/// root does not keep itself alive through its own bindings.
#[derive(Debug, Clone)]
pub struct WeakEnv(Weak<RefCell<EnvInner>>);

impl WeakEnv {
    pub fn upgrade(&self) -> Option<Env> {
        self.0.upgrade().map(|inner| Env { inner })
    }
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner::new(None))),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner::new(Some(self.clone())))),
        }
    }

    /// Create a child frame binding `params` to `args` in order.
    ///
    /// A `&rest` marker binds the following parameter to the remaining
    /// arguments as a list and ends binding. Missing arguments bind to
    /// `null`; surplus arguments are ignored.
    pub fn with_bindings(&self, params: &[Symbol], args: &[Form]) -> Result<Env> {
        let env = self.child();
        {
            let mut inner = env.inner.borrow_mut();
            let mut params_iter = params.iter().enumerate();
            while let Some((i, param)) = params_iter.next() {
                if param.is_rest_marker() {
                    let (_, rest_name) = params_iter
                        .next()
                        .ok_or_else(|| Error::syntax("lambda", "&rest must be followed by a name"))?;
                    let rest = args.get(i..).unwrap_or_default();
                    inner
                        .bindings
                        .insert(rest_name.clone(), Form::list(rest.iter().cloned()));
                    break;
                }
                let value = args.get(i).cloned().unwrap_or(Form::Nil);
                inner.bindings.insert(param.clone(), value);
            }
        }
        Ok(env)
    }

    /// Define a binding in this frame.
    ///
    /// Fails with `DuplicateDefinition` if the name is already bound in this
    /// exact frame; shadowing an outer binding is allowed.
    pub fn define(&self, name: Symbol, value: Form) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.bindings.contains_key(&name) {
            return Err(Error::DuplicateDefinition(name));
        }
        inner.bindings.insert(name, value);
        Ok(())
    }

    /// Look up a symbol, searching parent environments.
    pub fn lookup(&self, name: &Symbol) -> Result<Form> {
        self.get(name)
            .ok_or_else(|| Error::UnboundSymbol(name.clone()))
    }

    /// Look up a symbol, returning None if unbound.
    pub fn get(&self, name: &Symbol) -> Option<Form> {
        let mut current = self.clone();
        loop {
            let next = {
                let inner = current.inner.borrow();
                if let Some(val) = inner.bindings.get(name) {
                    return Some(val.clone());
                }
                inner.parent.clone()
            };
            current = next?;
        }
    }

    /// Check if a symbol is bound anywhere in the chain.
    pub fn contains(&self, name: &Symbol) -> bool {
        self.find(name).is_some()
    }

    /// Check if a symbol is bound in this frame.
    pub fn contains_local(&self, name: &Symbol) -> bool {
        self.inner.borrow().bindings.contains_key(name)
    }

    /// Overwrite a binding in whichever frame holds it.
    ///
    /// Fails with `UnboundSymbol` if no frame in the chain binds the name.
    pub fn set(&self, name: &Symbol, value: Form) -> Result<()> {
        let frame = self
            .find(name)
            .ok_or_else(|| Error::UnboundSymbol(name.clone()))?;
        frame.inner.borrow_mut().bindings.insert(name.clone(), value);
        Ok(())
    }

    /// Overwrite or create a binding in this frame without the duplicate
    /// check. Used for loop counters.
    pub(crate) fn set_local(&self, name: &Symbol, value: Form) {
        self.inner.borrow_mut().bindings.insert(name.clone(), value);
    }

    /// Remove a binding from this frame.
    pub(crate) fn remove_local(&self, name: &Symbol) {
        self.inner.borrow_mut().bindings.remove(name);
    }

    /// Find the frame that binds `name`.
    fn find(&self, name: &Symbol) -> Option<Env> {
        let mut current = self.clone();
        loop {
            let next = {
                let inner = current.inner.borrow();
                if inner.bindings.contains_key(name) {
                    None
                } else {
                    Some(inner.parent.clone())
                }
            };
            match next {
                None => return Some(current),
                Some(parent) => current = parent?,
            }
        }
    }

    /// Get the root environment.
    pub fn root(&self) -> Env {
        let mut current = self.clone();
        loop {
            let parent = current.inner.borrow().parent.clone();
            match parent {
                Some(p) => current = p,
                None => return current,
            }
        }
    }

    /// A non-owning handle to this environment.
    pub fn downgrade(&self) -> WeakEnv {
        WeakEnv(Rc::downgrade(&self.inner))
    }

    /// Attach documentation pages to the root of this chain.
    pub fn set_docs(&self, docs: DocStore) {
        self.root().inner.borrow_mut().docs = Some(Rc::new(docs));
    }

    /// Documentation pages attached to the root, if any were loaded.
    pub fn docs(&self) -> Option<Rc<DocStore>> {
        self.root().inner.borrow().docs.clone()
    }

    /// Check if two environments are the same frame.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
