use std::fmt;

use crate::{
    error::RResult,
    runtime::{
        char_cell::CharCell,
        context::RContext,
        sexp_type::SexpType,
        value::Value,
        vector::{Complex, Logical},
    },
};

use super::sortedness::Sortedness;

pub type LengthMethod = fn(&mut RContext, &Value) -> RResult<usize>;
pub type DuplicateMethod = fn(&mut RContext, &Value, bool) -> RResult<Value>;
pub type IsSortedMethod = fn(&mut RContext, &Value) -> RResult<Sortedness>;
pub type NoNaMethod = fn(&mut RContext, &Value) -> RResult<bool>;
/// `Sum`, `Min` and `Max`; the flag is `na.rm`.
pub type SummaryMethod = fn(&mut RContext, &Value, bool) -> RResult<Value>;

pub type EltMethod<T> = fn(&mut RContext, &Value, usize) -> RResult<T>;
/// Fills `buf` with elements starting at `from`; returns how many it wrote.
pub type GetRegionMethod<T> = fn(&mut RContext, &Value, usize, &mut [T]) -> RResult<usize>;
/// Produces the full element storage.
pub type DataptrMethod<T> = fn(&mut RContext, &Value) -> RResult<Vec<T>>;
pub type SetEltMethod<T> = fn(&mut RContext, &Value, usize, T) -> RResult<()>;

/// Element-typed method slots of one class.
pub struct AltVecMethods<T> {
    pub elt: Option<EltMethod<T>>,
    pub get_region: Option<GetRegionMethod<T>>,
    pub dataptr: Option<DataptrMethod<T>>,
    pub set_elt: Option<SetEltMethod<T>>,
}

impl<T> Clone for AltVecMethods<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AltVecMethods<T> {}

impl<T> Default for AltVecMethods<T> {
    fn default() -> Self {
        Self {
            elt: None,
            get_region: None,
            dataptr: None,
            set_elt: None,
        }
    }
}

/// Typed slots, one variant per vector kind.
pub enum AltTypedMethods {
    Logical(AltVecMethods<Logical>),
    Integer(AltVecMethods<i32>),
    Real(AltVecMethods<f64>),
    Complex(AltVecMethods<Complex>),
    String(AltVecMethods<CharCell>),
    Raw(AltVecMethods<u8>),
}

impl AltTypedMethods {
    fn for_kind(kind: AltKind) -> Self {
        match kind {
            AltKind::Logical => AltTypedMethods::Logical(AltVecMethods::default()),
            AltKind::Integer => AltTypedMethods::Integer(AltVecMethods::default()),
            AltKind::Real => AltTypedMethods::Real(AltVecMethods::default()),
            AltKind::Complex => AltTypedMethods::Complex(AltVecMethods::default()),
            AltKind::String => AltTypedMethods::String(AltVecMethods::default()),
            AltKind::Raw => AltTypedMethods::Raw(AltVecMethods::default()),
        }
    }
}

/// Vector kinds a class can back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AltKind {
    Integer,
    Real,
    Logical,
    String,
    Complex,
    Raw,
}

impl AltKind {
    pub fn sexp_type(self) -> SexpType {
        match self {
            AltKind::Integer => SexpType::Integer,
            AltKind::Real => SexpType::Real,
            AltKind::Logical => SexpType::Logical,
            AltKind::String => SexpType::String,
            AltKind::Complex => SexpType::Complex,
            AltKind::Raw => SexpType::Raw,
        }
    }

    pub fn from_sexp_type(ty: SexpType) -> Option<Self> {
        match ty {
            SexpType::Integer => Some(AltKind::Integer),
            SexpType::Real => Some(AltKind::Real),
            SexpType::Logical => Some(AltKind::Logical),
            SexpType::String => Some(AltKind::String),
            SexpType::Complex => Some(AltKind::Complex),
            SexpType::Raw => Some(AltKind::Raw),
            _ => None,
        }
    }
}

/// Handle to a registered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AltClassId(pub(crate) u32);

impl AltClassId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A registered class and its optional methods.
pub struct AltClassDescriptor {
    pub kind: AltKind,
    pub class_name: String,
    pub package_name: String,
    /// Opaque `DllInfo` of the registering library.
    pub owner: usize,
    pub length: Option<LengthMethod>,
    pub duplicate: Option<DuplicateMethod>,
    pub is_sorted: Option<IsSortedMethod>,
    pub no_na: Option<NoNaMethod>,
    pub sum: Option<SummaryMethod>,
    pub min: Option<SummaryMethod>,
    pub max: Option<SummaryMethod>,
    pub typed: AltTypedMethods,
}

impl AltClassDescriptor {
    pub fn new(kind: AltKind, class_name: &str, package_name: &str, owner: usize) -> Self {
        Self {
            kind,
            class_name: class_name.to_string(),
            package_name: package_name.to_string(),
            owner,
            length: None,
            duplicate: None,
            is_sorted: None,
            no_na: None,
            sum: None,
            min: None,
            max: None,
            typed: AltTypedMethods::for_kind(kind),
        }
    }
}

impl fmt::Debug for AltClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AltClassDescriptor")
            .field("kind", &self.kind)
            .field("class_name", &self.class_name)
            .field("package_name", &self.package_name)
            .finish_non_exhaustive()
    }
}

/// The two opaque slots of an instance.
#[derive(Debug, Clone, Default)]
pub struct AltrepData {
    data1: Value,
    data2: Value,
}

impl AltrepData {
    pub fn new(data1: Value, data2: Value) -> Self {
        Self { data1, data2 }
    }

    pub fn data1(&self) -> Value {
        self.data1.clone()
    }

    pub fn data2(&self) -> Value {
        self.data2.clone()
    }

    pub fn set_data1(&mut self, value: Value) {
        self.data1 = value;
    }

    pub fn set_data2(&mut self, value: Value) {
        self.data2 = value;
    }
}
