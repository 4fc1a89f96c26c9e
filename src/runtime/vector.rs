//! Typed atomic vectors.
//!
//! A `Vector<T>` either owns its elements or is backed by an ALTREP class.
//! ALTREP-backed vectors may later be materialized; once they are, reads and
//! writes go to the materialized copy.
use std::{
    cell::{Cell, RefCell},
    cmp::Ordering,
    fmt,
    rc::Rc,
};

use crate::runtime::{
    altrep::{AltClassId, AltTypedMethods, AltVecMethods, AltrepData},
    attributes::Attributes,
    char_cell::CharCell,
    na::{NA_INTEGER, NA_LOGICAL, NA_REAL, is_na_real, same_real},
    sexp_type::SexpType,
    sharing::Sharing,
    value::Value,
};

pub type VectorRef<T> = Rc<RefCell<Vector<T>>>;

/// Tri-state logical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logical {
    False,
    True,
    Na,
}

impl Logical {
    pub fn from_bool(value: bool) -> Self {
        if value { Logical::True } else { Logical::False }
    }

    /// Reads GNU R's `int` encoding: NA, zero, anything else.
    pub fn from_r_int(value: i32) -> Self {
        match value {
            NA_LOGICAL => Logical::Na,
            0 => Logical::False,
            _ => Logical::True,
        }
    }

    pub fn to_r_int(self) -> i32 {
        match self {
            Logical::False => 0,
            Logical::True => 1,
            Logical::Na => NA_LOGICAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

/// Element kinds storable in a [`Vector`].
pub trait Element: Clone + fmt::Debug + 'static {
    const TYPE: SexpType;

    fn na() -> Self;

    fn is_na(&self) -> bool;

    /// Fill value for freshly allocated storage.
    fn zero() -> Self;

    /// `identical()` semantics; NA matches NA.
    fn same(&self, other: &Self) -> bool;

    /// Order between two non-NA elements; `None` for unordered kinds.
    fn compare(&self, other: &Self) -> Option<Ordering>;

    fn wrap(vector: VectorRef<Self>) -> Value;

    fn unwrap(value: &Value) -> Option<&VectorRef<Self>>;

    fn alt_methods(methods: &AltTypedMethods) -> Option<&AltVecMethods<Self>>;

    fn alt_methods_mut(methods: &mut AltTypedMethods) -> Option<&mut AltVecMethods<Self>>;

    fn any_na(items: &[Self], _parallel_threshold: usize) -> bool {
        items.iter().any(Self::is_na)
    }
}

#[cfg(feature = "parallel-scan")]
fn any_na_parallel<T: Element + Sync>(items: &[T], threshold: usize) -> bool {
    use rayon::prelude::*;
    if items.len() >= threshold {
        items.par_iter().any(|x| x.is_na())
    } else {
        items.iter().any(T::is_na)
    }
}

#[cfg(not(feature = "parallel-scan"))]
fn any_na_parallel<T: Element>(items: &[T], _threshold: usize) -> bool {
    items.iter().any(T::is_na)
}

macro_rules! element_glue {
    ($variant:ident) => {
        fn wrap(vector: VectorRef<Self>) -> Value {
            Value::$variant(vector)
        }

        fn unwrap(value: &Value) -> Option<&VectorRef<Self>> {
            match value {
                Value::$variant(v) => Some(v),
                _ => None,
            }
        }

        fn alt_methods(methods: &AltTypedMethods) -> Option<&AltVecMethods<Self>> {
            match methods {
                AltTypedMethods::$variant(m) => Some(m),
                _ => None,
            }
        }

        fn alt_methods_mut(methods: &mut AltTypedMethods) -> Option<&mut AltVecMethods<Self>> {
            match methods {
                AltTypedMethods::$variant(m) => Some(m),
                _ => None,
            }
        }
    };
}

impl Element for i32 {
    const TYPE: SexpType = SexpType::Integer;

    fn na() -> Self {
        NA_INTEGER
    }

    fn is_na(&self) -> bool {
        *self == NA_INTEGER
    }

    fn zero() -> Self {
        0
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    fn any_na(items: &[Self], parallel_threshold: usize) -> bool {
        any_na_parallel(items, parallel_threshold)
    }

    element_glue!(Integer);
}

impl Element for f64 {
    const TYPE: SexpType = SexpType::Real;

    fn na() -> Self {
        NA_REAL
    }

    fn is_na(&self) -> bool {
        is_na_real(*self)
    }

    fn zero() -> Self {
        0.0
    }

    fn same(&self, other: &Self) -> bool {
        same_real(*self, *other)
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }

    fn any_na(items: &[Self], parallel_threshold: usize) -> bool {
        any_na_parallel(items, parallel_threshold)
    }

    element_glue!(Real);
}

impl Element for Logical {
    const TYPE: SexpType = SexpType::Logical;

    fn na() -> Self {
        Logical::Na
    }

    fn is_na(&self) -> bool {
        *self == Logical::Na
    }

    fn zero() -> Self {
        Logical::False
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.to_r_int().cmp(&other.to_r_int()))
    }

    fn any_na(items: &[Self], parallel_threshold: usize) -> bool {
        any_na_parallel(items, parallel_threshold)
    }

    element_glue!(Logical);
}

impl Element for Complex {
    const TYPE: SexpType = SexpType::Complex;

    fn na() -> Self {
        Complex::new(NA_REAL, NA_REAL)
    }

    fn is_na(&self) -> bool {
        is_na_real(self.re) || is_na_real(self.im)
    }

    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }

    fn same(&self, other: &Self) -> bool {
        same_real(self.re, other.re) && same_real(self.im, other.im)
    }

    fn compare(&self, _other: &Self) -> Option<Ordering> {
        None
    }

    fn any_na(items: &[Self], parallel_threshold: usize) -> bool {
        any_na_parallel(items, parallel_threshold)
    }

    element_glue!(Complex);
}

impl Element for CharCell {
    const TYPE: SexpType = SexpType::String;

    fn na() -> Self {
        CharCell::na()
    }

    fn is_na(&self) -> bool {
        CharCell::is_na(self)
    }

    fn zero() -> Self {
        CharCell::new("")
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        CharCell::compare(self, other)
    }

    element_glue!(String);
}

impl Element for u8 {
    const TYPE: SexpType = SexpType::Raw;

    /// Raw vectors have no NA; zero stands in where one is required.
    fn na() -> Self {
        0
    }

    fn is_na(&self) -> bool {
        false
    }

    fn zero() -> Self {
        0
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    element_glue!(Raw);
}

pub(crate) enum Storage<T> {
    Plain(Vec<T>),
    Altrep(AltrepBacking<T>),
}

pub(crate) struct AltrepBacking<T> {
    pub(crate) class: AltClassId,
    pub(crate) data: AltrepData,
    pub(crate) materialized: Option<Vec<T>>,
}

pub struct Vector<T: Element> {
    storage: Storage<T>,
    attributes: Attributes,
    complete: Cell<Option<bool>>,
    sharing: Sharing,
}

impl<T: Element> Vector<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            storage: Storage::Plain(items),
            attributes: Attributes::new(),
            complete: Cell::new(None),
            sharing: Sharing::default(),
        }
    }

    pub(crate) fn from_altrep(class: AltClassId, data: AltrepData) -> Self {
        Self {
            storage: Storage::Altrep(AltrepBacking {
                class,
                data,
                materialized: None,
            }),
            attributes: Attributes::new(),
            complete: Cell::new(None),
            sharing: Sharing::default(),
        }
    }

    pub fn into_ref(self) -> VectorRef<T> {
        Rc::new(RefCell::new(self))
    }

    /// Element storage, if the vector owns or has materialized it.
    pub fn as_slice(&self) -> Option<&[T]> {
        match &self.storage {
            Storage::Plain(items) => Some(items),
            Storage::Altrep(backing) => backing.materialized.as_deref(),
        }
    }

    /// Mutable element storage. Invalidates the completeness cache.
    pub fn as_mut_vec(&mut self) -> Option<&mut Vec<T>> {
        self.complete.set(None);
        match &mut self.storage {
            Storage::Plain(items) => Some(items),
            Storage::Altrep(backing) => backing.materialized.as_mut(),
        }
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.as_slice()?.get(index).cloned()
    }

    /// Writes one element; returns `false` when the storage is not
    /// accessible or `index` is out of range.
    pub fn set(&mut self, index: usize, value: T) -> bool {
        let becomes_incomplete = value.is_na();
        let Some(items) = self.as_mut_vec() else {
            return false;
        };
        let Some(slot) = items.get_mut(index) else {
            return false;
        };
        *slot = value;
        if becomes_incomplete {
            self.complete.set(Some(false));
        }
        true
    }

    pub fn is_altrep(&self) -> bool {
        matches!(self.storage, Storage::Altrep(_))
    }

    pub fn altrep_class(&self) -> Option<AltClassId> {
        match &self.storage {
            Storage::Altrep(backing) => Some(backing.class),
            Storage::Plain(_) => None,
        }
    }

    pub fn is_materialized(&self) -> bool {
        match &self.storage {
            Storage::Plain(_) => true,
            Storage::Altrep(backing) => backing.materialized.is_some(),
        }
    }

    pub(crate) fn altrep_data(&self) -> Option<&AltrepData> {
        match &self.storage {
            Storage::Altrep(backing) => Some(&backing.data),
            Storage::Plain(_) => None,
        }
    }

    pub(crate) fn altrep_data_mut(&mut self) -> Option<&mut AltrepData> {
        match &mut self.storage {
            Storage::Altrep(backing) => Some(&mut backing.data),
            Storage::Plain(_) => None,
        }
    }

    pub(crate) fn set_materialized(&mut self, items: Vec<T>) {
        if let Storage::Altrep(backing) = &mut self.storage {
            backing.materialized = Some(items);
        }
    }

    pub fn cached_complete(&self) -> Option<bool> {
        self.complete.get()
    }

    pub fn set_complete(&self, complete: bool) {
        self.complete.set(Some(complete));
    }

    pub fn invalidate_complete(&self) {
        self.complete.set(None);
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn sharing(&self) -> Sharing {
        self.sharing
    }

    pub fn sharing_mut(&mut self) -> &mut Sharing {
        &mut self.sharing
    }
}

impl<T: Element> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.storage {
            Storage::Plain(items) => f.debug_list().entries(items.iter()).finish(),
            Storage::Altrep(backing) => write!(f, "<altrep class #{}>", backing.class.index()),
        }
    }
}
