use std::{cell::RefCell, fmt, rc::Rc};

use crate::runtime::{
    attributes::{Attributes, NAMES},
    char_cell::CharCell,
    closure::{Closure, DotArgs, FunctionKind, Promise},
    environment::Environment,
    external_ptr::ExternalPtr,
    format::{format_complex, format_real},
    list::{ListObj, ListRef},
    pairlist::PairList,
    sexp_type::SexpType,
    sharing::Sharing,
    symbol::{Symbol, install},
    vector::{Complex, Element, Logical, Vector, VectorRef},
};

/// An R value as seen from native code.
///
/// ## Memory Management Model
///
/// Every heap object sits behind an `Rc`. Objects native code may mutate in
/// place (cons cells, vectors, lists, environments, external pointers) add a
/// `RefCell`, so aliasing is observable: writes through one handle are seen
/// through all of them. Cloning a `Value` clones the handle, never the
/// object; use [`crate::runtime::duplicate`] for copies.
///
/// Environments can form cycles through closures they bind. Those cycles are
/// never reclaimed by reference counting.
#[derive(Clone, Default)]
pub enum Value {
    /// `R_NilValue`.
    #[default]
    Null,
    /// Interned name.
    Symbol(Rc<Symbol>),
    /// Character cell; also the NA string.
    Char(CharCell),
    /// Cons cell of a pairlist or a call.
    PairList(PairList),
    /// Materialized `...` arguments.
    Dots(Rc<DotArgs>),
    Logical(VectorRef<Logical>),
    Integer(VectorRef<i32>),
    Real(VectorRef<f64>),
    Complex(VectorRef<Complex>),
    String(VectorRef<CharCell>),
    Raw(VectorRef<u8>),
    /// Generic vector.
    List(ListRef),
    Expression(ListRef),
    Environment(Environment),
    ExternalPtr(ExternalPtr),
    /// Closure, builtin or special.
    Closure(Rc<Closure>),
    Promise(Promise),
}

/// Runs `$body` with `$v` bound to the typed vector handle of any atomic
/// vector variant, or evaluates `$fallback` for everything else.
macro_rules! match_vector {
    ($value:expr, $v:ident => $body:expr, _ => $fallback:expr) => {
        match $value {
            $crate::runtime::value::Value::Logical($v) => $body,
            $crate::runtime::value::Value::Integer($v) => $body,
            $crate::runtime::value::Value::Real($v) => $body,
            $crate::runtime::value::Value::Complex($v) => $body,
            $crate::runtime::value::Value::String($v) => $body,
            $crate::runtime::value::Value::Raw($v) => $body,
            _ => $fallback,
        }
    };
}
pub(crate) use match_vector;

fn vector_value<T: Element>(items: Vec<T>) -> Value {
    T::wrap(Vector::new(items).into_ref())
}

impl Value {
    pub fn scalar_int(x: i32) -> Value {
        vector_value(vec![x])
    }

    pub fn scalar_real(x: f64) -> Value {
        vector_value(vec![x])
    }

    pub fn scalar_logical(x: Logical) -> Value {
        vector_value(vec![x])
    }

    pub fn scalar_string(x: CharCell) -> Value {
        vector_value(vec![x])
    }

    pub fn int_vec(items: Vec<i32>) -> Value {
        vector_value(items)
    }

    pub fn real_vec(items: Vec<f64>) -> Value {
        vector_value(items)
    }

    pub fn logical_vec(items: Vec<Logical>) -> Value {
        vector_value(items)
    }

    pub fn complex_vec(items: Vec<Complex>) -> Value {
        vector_value(items)
    }

    pub fn raw_vec(items: Vec<u8>) -> Value {
        vector_value(items)
    }

    pub fn string_vec(items: Vec<CharCell>) -> Value {
        vector_value(items)
    }

    pub fn strings(items: &[&str]) -> Value {
        vector_value(items.iter().map(|s| CharCell::new(s)).collect())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(ListObj::new(items).into_ref())
    }

    /// A list whose `names` attribute is set from `items`.
    pub fn named_list(items: Vec<(&str, Value)>) -> Value {
        let names = Value::strings(&items.iter().map(|(n, _)| *n).collect::<Vec<_>>());
        let mut attributes = Attributes::new();
        attributes.set(NAMES, names);
        let values = items.into_iter().map(|(_, v)| v).collect();
        Value::List(ListObj::with_attributes(values, attributes).into_ref())
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(install(name))
    }

    pub fn char(text: &str) -> Value {
        Value::Char(CharCell::new(text))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The type code from the variant alone, without the context cache.
    pub fn sexp_type(&self) -> SexpType {
        match self {
            Value::Null => SexpType::Nil,
            Value::Symbol(_) => SexpType::Symbol,
            Value::Char(_) => SexpType::Char,
            Value::PairList(cell) if cell.is_language() => SexpType::Language,
            Value::PairList(_) => SexpType::PairList,
            Value::Dots(_) => SexpType::Dots,
            Value::Logical(_) => SexpType::Logical,
            Value::Integer(_) => SexpType::Integer,
            Value::Real(_) => SexpType::Real,
            Value::Complex(_) => SexpType::Complex,
            Value::String(_) => SexpType::String,
            Value::Raw(_) => SexpType::Raw,
            Value::List(_) => SexpType::List,
            Value::Expression(_) => SexpType::Expression,
            Value::Environment(_) => SexpType::Environment,
            Value::ExternalPtr(_) => SexpType::ExternalPtr,
            Value::Closure(f) => match f.kind {
                FunctionKind::Closure => SexpType::Closure,
                FunctionKind::Builtin => SexpType::Builtin,
                FunctionKind::Special => SexpType::Special,
            },
            Value::Promise(_) => SexpType::Promise,
        }
    }

    /// The type name GNU R reports for this value, e.g. `"double"`.
    pub fn type_name(&self) -> &'static str {
        self.sexp_type().name()
    }

    pub fn is_atomic_vector(&self) -> bool {
        match_vector!(self, _v => true, _ => false)
    }

    pub fn is_list_like(&self) -> bool {
        matches!(self, Value::List(_) | Value::Expression(_))
    }

    /// Address of the underlying object, for values with identity.
    pub fn identity(&self) -> Option<usize> {
        fn addr<T: ?Sized>(rc: &Rc<T>) -> usize {
            Rc::as_ptr(rc) as *const () as usize
        }
        match self {
            Value::Null | Value::Char(_) => None,
            Value::Symbol(s) => Some(addr(s)),
            Value::PairList(cell) => Some(cell.identity()),
            Value::Dots(d) => Some(addr(d)),
            Value::List(l) | Value::Expression(l) => Some(addr(l)),
            Value::Environment(env) => Some(env.identity()),
            Value::ExternalPtr(ptr) => Some(ptr.identity()),
            Value::Closure(f) => Some(addr(f)),
            Value::Promise(p) => Some(p.identity()),
            other => match_vector!(other, v => Some(addr(v)), _ => None),
        }
    }

    /// Identity comparison, as native code comparing two `SEXP`s.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Char(a), Value::Char(b)) => a.ptr_eq(b),
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b && self.sexp_type() == other.sexp_type(),
                _ => false,
            },
        }
    }

    /// Reads the attribute store of attributable values.
    pub fn with_attributes<R>(&self, f: impl FnOnce(&Attributes) -> R) -> Option<R> {
        match self {
            Value::PairList(cell) => Some(f(&cell.attributes())),
            Value::List(l) | Value::Expression(l) => Some(f(l.borrow().attributes())),
            Value::ExternalPtr(ptr) => Some(f(&ptr.attributes())),
            Value::Closure(c) => Some(f(&c.attributes)),
            other => match_vector!(other, v => Some(f(v.borrow().attributes())), _ => None),
        }
    }

    /// Mutates the attribute store; `None` for values without one.
    pub fn with_attributes_mut<R>(&self, f: impl FnOnce(&mut Attributes) -> R) -> Option<R> {
        match self {
            Value::PairList(cell) => Some(f(&mut cell.attributes_mut())),
            Value::List(l) | Value::Expression(l) => Some(f(l.borrow_mut().attributes_mut())),
            Value::ExternalPtr(ptr) => Some(f(&mut ptr.attributes_mut())),
            other => match_vector!(other, v => Some(f(v.borrow_mut().attributes_mut())), _ => None),
        }
    }

    /// `Rf_getAttrib`; `Null` when absent.
    pub fn attribute(&self, name: &str) -> Value {
        self.with_attributes(|attrs| attrs.get(name).cloned())
            .flatten()
            .unwrap_or_default()
    }

    pub fn inherits(&self, class_name: &str) -> bool {
        self.with_attributes(|attrs| attrs.inherits(class_name))
            .unwrap_or(false)
    }

    pub fn is_s4(&self) -> bool {
        self.with_attributes(|attrs| attrs.is_s4()).unwrap_or(false)
    }

    /// Copy-on-write state of shareable values.
    pub fn sharing(&self) -> Option<Sharing> {
        match self {
            Value::PairList(cell) => Some(cell.sharing()),
            Value::List(l) | Value::Expression(l) => Some(l.borrow().sharing()),
            other => match_vector!(other, v => Some(v.borrow().sharing()), _ => None),
        }
    }

    /// Applies `f` to the sharing state; no-op for non-shareable values.
    pub fn update_sharing(&self, f: impl FnOnce(&mut Sharing)) {
        match self {
            Value::PairList(cell) => cell.update_sharing(f),
            Value::List(l) | Value::Expression(l) => f(l.borrow_mut().sharing_mut()),
            other => match_vector!(other, v => f(v.borrow_mut().sharing_mut()), _ => ()),
        }
    }
}

fn same_attributes(a: &Attributes, b: &Attributes) -> bool {
    a.len() == b.len()
        && a.is_s4() == b.is_s4()
        && a.iter().all(|(key, value)| b.get(key).is_some_and(|other| other == value))
}

fn same_vectors<T: Element>(a: &VectorRef<T>, b: &VectorRef<T>) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    let (a, b) = (a.borrow(), b.borrow());
    match (a.as_slice(), b.as_slice()) {
        (Some(x), Some(y)) => {
            x.len() == y.len()
                && x.iter().zip(y).all(|(p, q)| p.same(q))
                && same_attributes(a.attributes(), b.attributes())
        }
        _ => false,
    }
}

fn same_lists(a: &ListRef, b: &ListRef) -> bool {
    if Rc::ptr_eq(a, b) {
        return true;
    }
    let (a, b) = (a.borrow(), b.borrow());
    a.items() == b.items() && same_attributes(a.attributes(), b.attributes())
}

/// Structural equality in the sense of `identical()`. Environments, external
/// pointers, closures and promises compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Symbol(a), Value::Symbol(b)) => Rc::ptr_eq(a, b),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::PairList(a), Value::PairList(b)) => same_chains(a, b),
            (Value::Logical(a), Value::Logical(b)) => same_vectors(a, b),
            (Value::Integer(a), Value::Integer(b)) => same_vectors(a, b),
            (Value::Real(a), Value::Real(b)) => same_vectors(a, b),
            (Value::Complex(a), Value::Complex(b)) => same_vectors(a, b),
            (Value::String(a), Value::String(b)) => same_vectors(a, b),
            (Value::Raw(a), Value::Raw(b)) => same_vectors(a, b),
            (Value::List(a), Value::List(b)) | (Value::Expression(a), Value::Expression(b)) => {
                same_lists(a, b)
            }
            _ => self.identity().is_some() && self.ptr_eq(other),
        }
    }
}

/// Walks both chains in step; a shared tail ends the walk early.
fn same_chains(a: &PairList, b: &PairList) -> bool {
    let (mut a, mut b) = (a.clone(), b.clone());
    loop {
        if a.ptr_eq(&b) {
            return true;
        }
        if a.is_language() != b.is_language() || a.car() != b.car() || a.tag() != b.tag() {
            return false;
        }
        match (a.cdr(), b.cdr()) {
            (Value::PairList(x), Value::PairList(y)) => {
                a = x;
                b = y;
            }
            (x, y) => return x == y,
        }
    }
}

fn write_names(names: &Option<Vec<CharCell>>, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(name) = names.as_ref().and_then(|n| n.get(index)) {
        if let Some(text) = name.as_str().filter(|t| !t.is_empty()) {
            write!(f, "{} = ", text)?;
        }
    }
    Ok(())
}

fn names_of(attrs: &Attributes) -> Option<Vec<CharCell>> {
    match attrs.get(NAMES) {
        Some(Value::String(names)) => names.borrow().as_slice().map(<[CharCell]>::to_vec),
        _ => None,
    }
}

fn write_vector<T: Element>(
    vector: &RefCell<Vector<T>>,
    empty: &str,
    f: &mut fmt::Formatter<'_>,
    item: impl Fn(&T) -> String,
) -> fmt::Result {
    let vector = vector.borrow();
    let Some(items) = vector.as_slice() else {
        return write!(f, "<altrep {}>", T::TYPE.name());
    };
    let names = names_of(vector.attributes());
    match items.len() {
        0 => write!(f, "{}", empty),
        1 if names.is_none() => write!(f, "{}", item(&items[0])),
        _ => {
            f.write_str("c(")?;
            for (i, x) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_names(&names, i, f)?;
                f.write_str(&item(x))?;
            }
            f.write_str(")")
        }
    }
}

fn logical_text(x: &Logical) -> String {
    match x {
        Logical::True => "TRUE",
        Logical::False => "FALSE",
        Logical::Na => "NA",
    }
    .to_string()
}

fn int_text(x: &i32) -> String {
    if x.is_na() { "NA".to_string() } else { format!("{}L", x) }
}

fn string_text(x: &CharCell) -> String {
    match x.as_str() {
        Some(text) => format!("{:?}", text),
        None => "NA".to_string(),
    }
}

/// Deparse-style rendering, close to `dput()`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Symbol(s) => f.write_str(s.name()),
            Value::Char(c) => f.write_str(&string_text(c)),
            Value::Logical(v) => write_vector(v, "logical(0)", f, logical_text),
            Value::Integer(v) => write_vector(v, "integer(0)", f, int_text),
            Value::Real(v) => write_vector(v, "numeric(0)", f, |x| format_real(*x)),
            Value::Complex(v) => write_vector(v, "complex(0)", f, |z| format_complex(*z)),
            Value::String(v) => write_vector(v, "character(0)", f, string_text),
            Value::Raw(v) => write_vector(v, "raw(0)", f, |b| format!("as.raw(0x{:02x})", b)),
            Value::List(l) | Value::Expression(l) => {
                let list = l.borrow();
                let names = names_of(list.attributes());
                let head = if matches!(self, Value::List(_)) { "list" } else { "expression" };
                write!(f, "{}(", head)?;
                for (i, item) in list.items().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_names(&names, i, f)?;
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
            Value::PairList(cell) => {
                let cells = cell.cells();
                let (head, rest) = if cell.is_language() {
                    (cell.car().to_string(), &cells[1..])
                } else {
                    ("pairlist".to_string(), &cells[..])
                };
                write!(f, "{}(", head)?;
                for (i, c) in rest.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if let Value::Symbol(tag) = c.tag() {
                        write!(f, "{} = ", tag.name())?;
                    }
                    write!(f, "{}", c.car())?;
                }
                f.write_str(")")
            }
            Value::Dots(d) => write!(f, "<...[{}]>", d.len()),
            Value::Environment(_) => f.write_str("<environment>"),
            Value::ExternalPtr(ptr) => write!(f, "{:?}", ptr),
            Value::Closure(c) => match c.kind {
                FunctionKind::Closure => f.write_str("<closure>"),
                FunctionKind::Builtin => f.write_str("<builtin>"),
                FunctionKind::Special => f.write_str("<special>"),
            },
            Value::Promise(_) => f.write_str("<promise>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
