//! ALTREP class registration, instances and typed dispatch.
use crate::{
    error::RResult,
    runtime::{
        altrep::{
            self, AltClassId, AltKind, RegionBuffer, Sortedness,
            class::{
                DataptrMethod, DuplicateMethod, EltMethod, GetRegionMethod, IsSortedMethod,
                LengthMethod, NoNaMethod, SetEltMethod, SummaryMethod,
            },
            dispatch::{self, typed},
            summary,
        },
        char_cell::CharCell,
        context::RContext,
        value::Value,
        vector::{Complex, Element, Logical},
    },
};

macro_rules! class_maker {
    ($name:ident, $kind:ident) => {
        pub fn $name(
            ctx: &mut RContext,
            class_name: &str,
            package_name: &str,
            dll: usize,
        ) -> AltClassId {
            ctx.trace_upcall(stringify!($name));
            ctx.make_alt_class(AltKind::$kind, class_name, package_name, dll)
        }
    };
}

class_maker!(R_make_altinteger_class, Integer);
class_maker!(R_make_altreal_class, Real);
class_maker!(R_make_altlogical_class, Logical);
class_maker!(R_make_altstring_class, String);
class_maker!(R_make_altcomplex_class, Complex);
class_maker!(R_make_altraw_class, Raw);

macro_rules! method_setter {
    ($name:ident, $setter:ident, $method:ty) => {
        pub fn $name(ctx: &mut RContext, class: AltClassId, method: $method) -> RResult<()> {
            ctx.trace_upcall(stringify!($name));
            ctx.$setter(class, method)
        }
    };
}

method_setter!(R_set_altrep_Length_method, set_length_method, LengthMethod);
method_setter!(R_set_altrep_Duplicate_method, set_duplicate_method, DuplicateMethod);

method_setter!(R_set_altinteger_Elt_method, set_elt_method, EltMethod<i32>);
method_setter!(R_set_altinteger_Get_region_method, set_get_region_method, GetRegionMethod<i32>);
method_setter!(R_set_altinteger_Is_sorted_method, set_is_sorted_method, IsSortedMethod);
method_setter!(R_set_altinteger_No_NA_method, set_no_na_method, NoNaMethod);
method_setter!(R_set_altinteger_Sum_method, set_sum_method, SummaryMethod);
method_setter!(R_set_altinteger_Min_method, set_min_method, SummaryMethod);
method_setter!(R_set_altinteger_Max_method, set_max_method, SummaryMethod);

method_setter!(R_set_altreal_Elt_method, set_elt_method, EltMethod<f64>);
method_setter!(R_set_altreal_Get_region_method, set_get_region_method, GetRegionMethod<f64>);
method_setter!(R_set_altreal_Is_sorted_method, set_is_sorted_method, IsSortedMethod);
method_setter!(R_set_altreal_No_NA_method, set_no_na_method, NoNaMethod);
method_setter!(R_set_altreal_Sum_method, set_sum_method, SummaryMethod);
method_setter!(R_set_altreal_Min_method, set_min_method, SummaryMethod);
method_setter!(R_set_altreal_Max_method, set_max_method, SummaryMethod);

method_setter!(R_set_altlogical_Elt_method, set_elt_method, EltMethod<Logical>);
method_setter!(R_set_altlogical_Get_region_method, set_get_region_method, GetRegionMethod<Logical>);
method_setter!(R_set_altlogical_Is_sorted_method, set_is_sorted_method, IsSortedMethod);
method_setter!(R_set_altlogical_No_NA_method, set_no_na_method, NoNaMethod);
method_setter!(R_set_altlogical_Sum_method, set_sum_method, SummaryMethod);

method_setter!(R_set_altstring_Elt_method, set_elt_method, EltMethod<CharCell>);
method_setter!(R_set_altstring_Set_elt_method, set_set_elt_method, SetEltMethod<CharCell>);
method_setter!(R_set_altstring_Is_sorted_method, set_is_sorted_method, IsSortedMethod);
method_setter!(R_set_altstring_No_NA_method, set_no_na_method, NoNaMethod);

method_setter!(R_set_altcomplex_Elt_method, set_elt_method, EltMethod<Complex>);
method_setter!(R_set_altcomplex_Get_region_method, set_get_region_method, GetRegionMethod<Complex>);

method_setter!(R_set_altraw_Elt_method, set_elt_method, EltMethod<u8>);
method_setter!(R_set_altraw_Get_region_method, set_get_region_method, GetRegionMethod<u8>);

/// `Dataptr` for a class of any kind; `T` must match the class's kind.
pub fn R_set_altvec_Dataptr_method<T: Element>(
    ctx: &mut RContext,
    class: AltClassId,
    method: DataptrMethod<T>,
) -> RResult<()> {
    ctx.trace_upcall("R_set_altvec_Dataptr_method");
    ctx.set_dataptr_method(class, method)
}

pub fn R_new_altrep(
    ctx: &mut RContext,
    class: AltClassId,
    data1: Value,
    data2: Value,
) -> RResult<Value> {
    ctx.trace_upcall("R_new_altrep");
    ctx.new_altrep_instance(class, data1, data2)
}

pub fn R_altrep_data1(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("R_altrep_data1");
    altrep::altrep_data1(x)
}

pub fn R_altrep_data2(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("R_altrep_data2");
    altrep::altrep_data2(x)
}

pub fn R_set_altrep_data1(ctx: &mut RContext, x: &Value, v: Value) -> RResult<()> {
    ctx.trace_upcall("R_set_altrep_data1");
    altrep::set_altrep_data1(x, v)
}

pub fn R_set_altrep_data2(ctx: &mut RContext, x: &Value, v: Value) -> RResult<()> {
    ctx.trace_upcall("R_set_altrep_data2");
    altrep::set_altrep_data2(x, v)
}

pub fn ALTREP(ctx: &mut RContext, x: &Value) -> bool {
    ctx.trace_upcall("ALTREP");
    altrep::is_altrep(x)
}

pub fn R_altrep_inherits(ctx: &mut RContext, x: &Value, class: AltClassId) -> bool {
    ctx.trace_upcall("R_altrep_inherits");
    ctx.altrep_inherits(x, class)
}

/// Class and package name; `None` for ordinary vectors.
pub fn R_altrep_class_name(ctx: &mut RContext, x: &Value) -> Option<(String, String)> {
    ctx.trace_upcall("R_altrep_class_name");
    ctx.altrep_class_name(x)
}

macro_rules! region_reader {
    ($name:ident, $elt:ty) => {
        /// Copies up to `buf.len()` elements starting at `from`; returns the
        /// count written.
        pub fn $name(ctx: &mut RContext, x: &Value, from: usize, buf: &mut [$elt]) -> RResult<usize> {
            ctx.trace_upcall(stringify!($name));
            dispatch::get_region(ctx, x, from, RegionBuffer::Native(buf))
        }
    };
}

region_reader!(INTEGER_GET_REGION, i32);
region_reader!(REAL_GET_REGION, f64);
region_reader!(LOGICAL_GET_REGION, Logical);
region_reader!(COMPLEX_GET_REGION, Complex);
region_reader!(RAW_GET_REGION, u8);

macro_rules! typed_query {
    ($sorted:ident, $no_na:ident, $elt:ty) => {
        /// GNU R's sortedness code.
        pub fn $sorted(ctx: &mut RContext, x: &Value) -> RResult<i32> {
            ctx.trace_upcall(stringify!($sorted));
            typed::<$elt>(x)?;
            dispatch::is_sorted(ctx, x).map(Sortedness::code)
        }

        pub fn $no_na(ctx: &mut RContext, x: &Value) -> RResult<bool> {
            ctx.trace_upcall(stringify!($no_na));
            typed::<$elt>(x)?;
            dispatch::no_na(ctx, x)
        }
    };
}

typed_query!(INTEGER_IS_SORTED, INTEGER_NO_NA, i32);
typed_query!(REAL_IS_SORTED, REAL_NO_NA, f64);
typed_query!(LOGICAL_IS_SORTED, LOGICAL_NO_NA, Logical);
typed_query!(STRING_IS_SORTED, STRING_NO_NA, CharCell);

macro_rules! summary_entry {
    ($name:ident, $f:ident, $elt:ty) => {
        pub fn $name(ctx: &mut RContext, x: &Value, na_rm: bool) -> RResult<Value> {
            ctx.trace_upcall(stringify!($name));
            typed::<$elt>(x)?;
            summary::$f(ctx, x, na_rm)
        }
    };
}

summary_entry!(ALTINTEGER_SUM, sum, i32);
summary_entry!(ALTINTEGER_MIN, min, i32);
summary_entry!(ALTINTEGER_MAX, max, i32);
summary_entry!(ALTREAL_SUM, sum, f64);
summary_entry!(ALTREAL_MIN, min, f64);
summary_entry!(ALTREAL_MAX, max, f64);
summary_entry!(ALTLOGICAL_SUM, sum, Logical);

/// `from:to` as a compact sequence.
pub fn R_compact_intrange(ctx: &mut RContext, from: i64, to: i64) -> RResult<Value> {
    ctx.trace_upcall("R_compact_intrange");
    ctx.compact_intrange(from, to)
}
