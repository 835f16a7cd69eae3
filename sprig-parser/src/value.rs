// sprig-parser - Value types for sprig
// Copyright (c) 2025 The sprig developers. MIT licensed.

//! The core value type, [`Form`], and its supporting types.
//!
//! Every runtime value and every piece of source code is a `Form`.
//! Collections are persistent (`im`) so "modifying" one builds a new
//! value that shares structure with the old one.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::{OrdMap, Vector};
use num_bigint::BigInt;

use crate::keyword::Keyword;
use crate::symbol::Symbol;

/// Metadata attached to a collection or function. `None` reads as `Nil`.
pub type Meta = Option<Rc<Form>>;

/// A value in the interpreted language.
///
/// `Nil`, `True` and `False` are unit variants so each is a singleton by
/// construction. Metadata never takes part in equality.
#[derive(Clone)]
pub enum Form {
    /// The `null` constant
    Nil,
    /// The `#t` constant
    True,
    /// The `#f` constant
    False,
    Symbol(Symbol),
    /// Arbitrary precision integer
    Integer(BigInt),
    /// Double precision float; never mixed with `Integer` in arithmetic
    Float(f64),
    Text(Rc<str>),
    Keyword(Keyword),
    List(Vector<Form>, Meta),
    Vector(Vector<Form>, Meta),
    Map(OrdMap<MapKey, Form>, Meta),
    /// Mutable single-slot cell
    Atom(Cell),
    /// An ordinary callable
    Function(Function, Meta),
    /// A callable applied to unevaluated arguments during expansion
    Macro(Function, Meta),
}

// ============================================================================
// Map keys
// ============================================================================

/// A mapping key. Only text and keywords may key a map.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Text(Rc<str>),
    Keyword(Keyword),
}

impl MapKey {
    /// Convert a form into a key, if it is a valid key variant.
    pub fn from_form(form: &Form) -> Option<MapKey> {
        match form {
            Form::Text(s) => Some(MapKey::Text(s.clone())),
            Form::Keyword(k) => Some(MapKey::Keyword(k.clone())),
            _ => None,
        }
    }

    pub fn to_form(&self) -> Form {
        match self {
            MapKey::Text(s) => Form::Text(s.clone()),
            MapKey::Keyword(k) => Form::Keyword(k.clone()),
        }
    }
}

impl fmt::Debug for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_form())
    }
}

// ============================================================================
// Functions
// ============================================================================

/// A callable value: either native code or a user closure.
///
/// Clones share the underlying function, and equality is identity.
#[derive(Clone)]
pub enum Function {
    Primitive(Rc<Primitive>),
    Closure(Rc<Closure>),
}

impl Function {
    pub fn primitive(name: &'static str, func: Rc<dyn Any>) -> Self {
        Function::Primitive(Rc::new(Primitive { name, func }))
    }

    pub fn closure(params: Vec<Symbol>, body: Form, env: Rc<dyn Any>) -> Self {
        Function::Closure(Rc::new(Closure { params, body, env }))
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        match (self, other) {
            (Function::Primitive(a), Function::Primitive(b)) => Rc::ptr_eq(a, b),
            (Function::Closure(a), Function::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A native function exposed under a fixed name.
pub struct Primitive {
    pub name: &'static str,
    /// The actual function (type-erased, the signature lives in sprig-core)
    func: Rc<dyn Any>,
}

impl Primitive {
    pub fn func(&self) -> &Rc<dyn Any> {
        &self.func
    }
}

/// A user-defined function paired with its defining environment.
pub struct Closure {
    /// Parameter names in order, possibly including the `&rest` marker
    pub params: Vec<Symbol>,
    pub body: Form,
    /// Captured environment (type-erased to avoid a circular dependency)
    pub env: Rc<dyn Any>,
}

// ============================================================================
// Cell
// ============================================================================

/// A mutable slot holding one form. Clones refer to the same slot.
#[derive(Clone)]
pub struct Cell(Rc<RefCell<Form>>);

impl Cell {
    pub fn new(value: Form) -> Self {
        Cell(Rc::new(RefCell::new(value)))
    }

    pub fn get(&self) -> Form {
        self.0.borrow().clone()
    }

    /// Replace the held value, returning the new value.
    pub fn set(&self, value: Form) -> Form {
        *self.0.borrow_mut() = value.clone();
        value
    }

    pub fn ptr_eq(&self, other: &Cell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Constructors and accessors
// ============================================================================

impl Form {
    pub fn nil() -> Self {
        Form::Nil
    }

    pub fn bool(b: bool) -> Self {
        if b { Form::True } else { Form::False }
    }

    pub fn int(n: i64) -> Self {
        Form::Integer(BigInt::from(n))
    }

    pub fn float(n: f64) -> Self {
        Form::Float(n)
    }

    pub fn text(s: impl AsRef<str>) -> Self {
        Form::Text(Rc::from(s.as_ref()))
    }

    pub fn symbol(name: &str) -> Self {
        Form::Symbol(Symbol::new(name))
    }

    pub fn keyword(name: &str) -> Self {
        Form::Keyword(Keyword::new(name))
    }

    pub fn list(items: impl IntoIterator<Item = Form>) -> Self {
        Form::List(items.into_iter().collect(), None)
    }

    pub fn vector(items: impl IntoIterator<Item = Form>) -> Self {
        Form::Vector(items.into_iter().collect(), None)
    }

    pub fn empty_list() -> Self {
        Form::List(Vector::new(), None)
    }

    pub fn map(entries: OrdMap<MapKey, Form>) -> Self {
        Form::Map(entries, None)
    }

    pub fn atom(value: Form) -> Self {
        Form::Atom(Cell::new(value))
    }

    /// Wrap a function as an ordinary callable.
    pub fn function(f: Function) -> Self {
        Form::Function(f, None)
    }

    /// Wrap a function as a macro.
    pub fn macro_fn(f: Function) -> Self {
        Form::Macro(f, None)
    }

    /// Everything except `#f` and `null` is true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Form::False | Form::Nil)
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Form::Nil)
    }

    /// The elements of a list or vector.
    pub fn as_seq(&self) -> Option<&Vector<Form>> {
        match self {
            Form::List(items, _) | Form::Vector(items, _) => Some(items),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Form::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// True if this is a list whose head is the symbol `name`.
    pub fn is_call_to(&self, name: &str) -> bool {
        match self {
            Form::List(items, _) => {
                matches!(items.front(), Some(Form::Symbol(s)) if s.name() == name)
            }
            _ => false,
        }
    }

    /// Attached metadata, `Nil` when none.
    pub fn meta(&self) -> Form {
        match self {
            Form::List(_, m)
            | Form::Vector(_, m)
            | Form::Map(_, m)
            | Form::Function(_, m)
            | Form::Macro(_, m) => m.as_deref().cloned().unwrap_or(Form::Nil),
            _ => Form::Nil,
        }
    }

    /// Return a copy carrying `meta`, or `None` if this variant has no
    /// metadata slot.
    pub fn with_meta(&self, meta: Form) -> Option<Form> {
        let meta = if meta.is_nil() {
            None
        } else {
            Some(Rc::new(meta))
        };
        match self {
            Form::List(items, _) => Some(Form::List(items.clone(), meta)),
            Form::Vector(items, _) => Some(Form::Vector(items.clone(), meta)),
            Form::Map(entries, _) => Some(Form::Map(entries.clone(), meta)),
            Form::Function(f, _) => Some(Form::Function(f.clone(), meta)),
            Form::Macro(f, _) => Some(Form::Macro(f.clone(), meta)),
            _ => None,
        }
    }

    /// Name of this value's variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Form::Nil => "null",
            Form::True | Form::False => "boolean",
            Form::Symbol(_) => "symbol",
            Form::Integer(_) => "integer",
            Form::Float(_) => "float",
            Form::Text(_) => "string",
            Form::Keyword(_) => "keyword",
            Form::List(_, _) => "list",
            Form::Vector(_, _) => "vector",
            Form::Map(_, _) => "map",
            Form::Atom(_) => "atom",
            Form::Function(_, _) => "function",
            Form::Macro(_, _) => "macro",
        }
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Form::Nil, Form::Nil) | (Form::True, Form::True) | (Form::False, Form::False) => true,
            (Form::Symbol(a), Form::Symbol(b)) => a == b,
            (Form::Integer(a), Form::Integer(b)) => a == b,
            (Form::Float(a), Form::Float(b)) => a == b,
            (Form::Text(a), Form::Text(b)) => a == b,
            (Form::Keyword(a), Form::Keyword(b)) => a == b,
            // Lists and vectors compare structurally regardless of tag
            (
                Form::List(a, _) | Form::Vector(a, _),
                Form::List(b, _) | Form::Vector(b, _),
            ) => a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y),
            (Form::Map(a, _), Form::Map(b, _)) => map_eq(a, b),
            (Form::Atom(a), Form::Atom(b)) => a.ptr_eq(b),
            (Form::Function(a, _), Form::Function(b, _)) => a.ptr_eq(b),
            (Form::Macro(a, _), Form::Macro(b, _)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// Sizes must match, then every left entry must be present on the right
/// with an equal value.
fn map_eq(a: &OrdMap<MapKey, Form>, b: &OrdMap<MapKey, Form>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(k, v)| b.get(k).is_some_and(|w| v == w))
}

impl From<bool> for Form {
    fn from(b: bool) -> Self {
        Form::bool(b)
    }
}

impl From<i64> for Form {
    fn from(n: i64) -> Self {
        Form::int(n)
    }
}

impl From<BigInt> for Form {
    fn from(n: BigInt) -> Self {
        Form::Integer(n)
    }
}

impl From<&str> for Form {
    fn from(s: &str) -> Self {
        Form::text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_vector_cross_equal() {
        let l = Form::list([Form::int(1), Form::int(2)]);
        let v = Form::vector([Form::int(1), Form::int(2)]);
        assert_eq!(l, v);
        assert_ne!(l, Form::vector([Form::int(1)]));
    }

    #[test]
    fn test_numbers_do_not_cross_variants() {
        assert_ne!(Form::int(1), Form::float(1.0));
        assert_eq!(Form::float(2.5), Form::float(2.5));
    }

    #[test]
    fn test_keyword_is_not_text() {
        assert_ne!(Form::keyword("a"), Form::text("a"));
        assert_eq!(Form::keyword("a"), Form::keyword("a"));
    }

    #[test]
    fn test_map_equality() {
        let mut a = OrdMap::new();
        a.insert(MapKey::Text(Rc::from("a")), Form::int(1));
        let mut b = OrdMap::new();
        b.insert(MapKey::Text(Rc::from("a")), Form::int(1));
        assert_eq!(Form::map(a.clone()), Form::map(b.clone()));

        b.insert(MapKey::Keyword(Keyword::new("b")), Form::int(2));
        assert_ne!(Form::map(a.clone()), Form::map(b));

        let mut c = OrdMap::new();
        c.insert(MapKey::Text(Rc::from("z")), Form::int(1));
        assert_ne!(Form::map(a), Form::map(c));
    }

    #[test]
    fn test_metadata_ignored_in_equality() {
        let plain = Form::list([Form::int(1)]);
        let tagged = plain.with_meta(Form::keyword("tag")).unwrap();
        assert_eq!(plain, tagged);
        assert_eq!(tagged.meta(), Form::keyword("tag"));
        assert_eq!(plain.meta(), Form::Nil);
    }

    #[test]
    fn test_atoms_compare_by_identity() {
        let a = Form::atom(Form::int(1));
        let b = Form::atom(Form::int(1));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Form::Nil.is_truthy());
        assert!(!Form::False.is_truthy());
        assert!(Form::int(0).is_truthy());
        assert!(Form::empty_list().is_truthy());
    }

    #[test]
    fn test_is_call_to() {
        let form = Form::list([Form::symbol("unquote"), Form::symbol("x")]);
        assert!(form.is_call_to("unquote"));
        assert!(!form.is_call_to("quote"));
        assert!(!Form::vector([Form::symbol("unquote")]).is_call_to("unquote"));
    }
}
