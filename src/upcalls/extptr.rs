//! External pointers.
use crate::{
    error::{RError, RResult},
    runtime::{context::RContext, external_ptr::ExternalPtr, value::Value},
};

fn pointer(x: &Value, function: &str) -> RResult<ExternalPtr> {
    match x {
        Value::ExternalPtr(ptr) => Ok(ptr.clone()),
        other => Err(RError::error(format!(
            "{}: argument of type '{}' is not an external pointer",
            function,
            other.type_name()
        ))),
    }
}

pub fn R_MakeExternalPtr(ctx: &mut RContext, addr: usize, tag: Value, prot: Value) -> Value {
    ctx.trace_upcall("R_MakeExternalPtr");
    ctx.alloc(Value::ExternalPtr(ExternalPtr::new(addr, tag, prot)))
}

pub fn R_ExternalPtrAddr(ctx: &mut RContext, x: &Value) -> RResult<usize> {
    ctx.trace_upcall("R_ExternalPtrAddr");
    Ok(pointer(x, "R_ExternalPtrAddr")?.addr())
}

pub fn R_ExternalPtrTag(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("R_ExternalPtrTag");
    Ok(pointer(x, "R_ExternalPtrTag")?.tag())
}

pub fn R_ExternalPtrProtected(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    ctx.trace_upcall("R_ExternalPtrProtected");
    Ok(pointer(x, "R_ExternalPtrProtected")?.protected())
}

/// Sets the address to zero; tag and protected value are kept.
pub fn R_ClearExternalPtr(ctx: &mut RContext, x: &Value) -> RResult<()> {
    ctx.trace_upcall("R_ClearExternalPtr");
    pointer(x, "R_ClearExternalPtr")?.clear();
    Ok(())
}

pub fn R_SetExternalPtrAddr(ctx: &mut RContext, x: &Value, addr: usize) -> RResult<()> {
    ctx.trace_upcall("R_SetExternalPtrAddr");
    pointer(x, "R_SetExternalPtrAddr")?.set_addr(addr);
    Ok(())
}

pub fn R_SetExternalPtrTag(ctx: &mut RContext, x: &Value, tag: Value) -> RResult<()> {
    ctx.trace_upcall("R_SetExternalPtrTag");
    pointer(x, "R_SetExternalPtrTag")?.set_tag(tag);
    Ok(())
}

pub fn R_SetExternalPtrProtected(ctx: &mut RContext, x: &Value, prot: Value) -> RResult<()> {
    ctx.trace_upcall("R_SetExternalPtrProtected");
    pointer(x, "R_SetExternalPtrProtected")?.set_protected(prot);
    Ok(())
}
