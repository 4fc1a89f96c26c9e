//! Coercion entry points. The scalar family never fails.
use crate::{
    error::RResult,
    runtime::{coerce, context::RContext, value::Value},
};

pub fn Rf_asInteger(ctx: &mut RContext, x: &Value) -> i32 {
    ctx.trace_upcall("Rf_asInteger");
    coerce::as_integer(ctx, x)
}

pub fn Rf_asReal(ctx: &mut RContext, x: &Value) -> f64 {
    ctx.trace_upcall("Rf_asReal");
    coerce::as_real(ctx, x)
}

/// Returns the C encoding: 0, 1 or `NA_LOGICAL`.
pub fn Rf_asLogical(ctx: &mut RContext, x: &Value) -> i32 {
    ctx.trace_upcall("Rf_asLogical");
    coerce::as_logical(ctx, x).to_r_int()
}

/// Returns a character cell.
pub fn Rf_asChar(ctx: &mut RContext, x: &Value) -> Value {
    ctx.trace_upcall("Rf_asChar");
    Value::Char(coerce::as_char(ctx, x))
}

pub fn Rf_coerceVector(ctx: &mut RContext, x: &Value, mode: i32) -> RResult<Value> {
    ctx.trace_upcall("Rf_coerceVector");
    coerce::coerce_vector(ctx, x, mode)
}

pub fn Rf_asCharacterFactor(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_asCharacterFactor");
    coerce::as_character_factor(ctx, x)
}
