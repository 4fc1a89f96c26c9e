//! GNU R `SEXPTYPE` codes.
//!
//! Native callers compare against these integers directly, so the
//! discriminants must never change.

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SexpType {
    Nil = 0,
    Symbol = 1,
    PairList = 2,
    Closure = 3,
    Environment = 4,
    Promise = 5,
    Language = 6,
    Special = 7,
    Builtin = 8,
    Char = 9,
    Logical = 10,
    Integer = 13,
    Real = 14,
    Complex = 15,
    String = 16,
    Dots = 17,
    Any = 18,
    /// Generic vector (`VECSXP`), surfaced to R as `list`.
    List = 19,
    Expression = 20,
    ByteCode = 21,
    ExternalPtr = 22,
    WeakRef = 23,
    Raw = 24,
    S4 = 25,
}

const ALL: [SexpType; 24] = [
    SexpType::Nil,
    SexpType::Symbol,
    SexpType::PairList,
    SexpType::Closure,
    SexpType::Environment,
    SexpType::Promise,
    SexpType::Language,
    SexpType::Special,
    SexpType::Builtin,
    SexpType::Char,
    SexpType::Logical,
    SexpType::Integer,
    SexpType::Real,
    SexpType::Complex,
    SexpType::String,
    SexpType::Dots,
    SexpType::Any,
    SexpType::List,
    SexpType::Expression,
    SexpType::ByteCode,
    SexpType::ExternalPtr,
    SexpType::WeakRef,
    SexpType::Raw,
    SexpType::S4,
];

impl SexpType {
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Maps an integer code back to its type; `None` for unassigned codes
    /// such as 11 and 12.
    pub fn from_code(code: i32) -> Option<Self> {
        ALL.iter().copied().find(|t| t.code() == code)
    }

    /// The name GNU R's `type2char` reports.
    pub fn name(self) -> &'static str {
        match self {
            SexpType::Nil => "NULL",
            SexpType::Symbol => "symbol",
            SexpType::PairList => "pairlist",
            SexpType::Closure => "closure",
            SexpType::Environment => "environment",
            SexpType::Promise => "promise",
            SexpType::Language => "language",
            SexpType::Special => "special",
            SexpType::Builtin => "builtin",
            SexpType::Char => "char",
            SexpType::Logical => "logical",
            SexpType::Integer => "integer",
            SexpType::Real => "double",
            SexpType::Complex => "complex",
            SexpType::String => "character",
            SexpType::Dots => "...",
            SexpType::Any => "any",
            SexpType::List => "list",
            SexpType::Expression => "expression",
            SexpType::ByteCode => "bytecode",
            SexpType::ExternalPtr => "externalptr",
            SexpType::WeakRef => "weakref",
            SexpType::Raw => "raw",
            SexpType::S4 => "S4",
        }
    }

    pub fn is_atomic_vector(self) -> bool {
        matches!(
            self,
            SexpType::Logical
                | SexpType::Integer
                | SexpType::Real
                | SexpType::Complex
                | SexpType::String
                | SexpType::Raw
        )
    }
}

impl std::fmt::Display for SexpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
