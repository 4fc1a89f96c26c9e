//! Protection stack and precious list.
use crate::{
    error::RResult,
    runtime::{context::RContext, protect::ProtectIndex, value::Value},
};

/// Fails with "protect(): protection stack overflow" at the configured
/// limit.
pub fn PROTECT(ctx: &mut RContext, x: Value) -> RResult<Value> {
    ctx.trace_upcall("PROTECT");
    ctx.protect(x)
}

pub fn UNPROTECT(ctx: &mut RContext, n: usize) {
    ctx.trace_upcall("UNPROTECT");
    ctx.unprotect(n);
}

pub fn UNPROTECT_PTR(ctx: &mut RContext, x: &Value) {
    ctx.trace_upcall("UNPROTECT_PTR");
    ctx.unprotect_ptr(x);
}

pub fn R_ProtectWithIndex(ctx: &mut RContext, x: Value) -> RResult<ProtectIndex> {
    ctx.trace_upcall("R_ProtectWithIndex");
    ctx.protect_with_index(x).map(|(_, index)| index)
}

pub fn R_Reprotect(ctx: &mut RContext, x: Value, index: ProtectIndex) -> RResult<()> {
    ctx.trace_upcall("R_Reprotect");
    ctx.reprotect(x, index)
}

pub fn R_PreserveObject(ctx: &mut RContext, x: Value) {
    ctx.trace_upcall("R_PreserveObject");
    ctx.preserve_object(x);
}

pub fn R_ReleaseObject(ctx: &mut RContext, x: &Value) {
    ctx.trace_upcall("R_ReleaseObject");
    ctx.release_object(x);
}

pub fn R_gc(ctx: &mut RContext) {
    ctx.trace_upcall("R_gc");
    ctx.collect();
}
