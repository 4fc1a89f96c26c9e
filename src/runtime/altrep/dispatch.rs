//! Element access with ALTREP fallbacks.
//!
//! Reads of an ALTREP vector try, in order: the materialized copy, the
//! class's region method, a loop over its element method, and finally
//! materialization. Every method call goes through
//! [`RContext::call_native`], so callbacks may reenter the bridge.
use crate::{
    error::{RError, RResult},
    runtime::{
        context::RContext,
        sexp_type::SexpType,
        value::{Value, match_vector},
        vector::{Element, VectorRef},
    },
};

use super::{
    class::AltClassId,
    sortedness::{self, Sortedness},
};

/// Destination of a region read.
pub enum RegionBuffer<'a, T> {
    /// Memory the callback writes into directly.
    Native(&'a mut [T]),
    /// Managed storage; results are staged and copied back.
    Managed(&'a mut Vec<T>),
}

impl<T> RegionBuffer<'_, T> {
    pub fn len(&self) -> usize {
        match self {
            RegionBuffer::Native(out) => out.len(),
            RegionBuffer::Managed(out) => out.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn accessor_name(ty: SexpType) -> &'static str {
    match ty {
        SexpType::Logical => "LOGICAL",
        SexpType::Integer => "INTEGER",
        SexpType::Real => "REAL",
        SexpType::Complex => "COMPLEX",
        SexpType::String => "STRING_ELT",
        _ => "RAW",
    }
}

pub(crate) fn typed<T: Element>(x: &Value) -> RResult<VectorRef<T>> {
    T::unwrap(x).cloned().ok_or_else(|| {
        let expected = match T::TYPE {
            SexpType::String => "character vector",
            other => other.name(),
        };
        RError::error(format!(
            "{}() can only be applied to a '{}', not a '{}'",
            accessor_name(T::TYPE),
            expected,
            x.type_name()
        ))
    })
}

pub(crate) fn unexpected_type(x: &Value) -> RError {
    RError::should_not_reach_here(format!(
        "unexpected type '{}' in ALTREP dispatch",
        x.type_name()
    ))
}

fn out_of_bounds() -> RError {
    RError::error("subscript out of bounds")
}

/// Class of an ALTREP vector whose storage is not materialized yet.
pub(crate) fn pending_class<T: Element>(v: &VectorRef<T>) -> Option<AltClassId> {
    let vector = v.borrow();
    if vector.is_materialized() {
        None
    } else {
        vector.altrep_class()
    }
}

/// `Rf_length`/`XLENGTH` for any value.
pub fn length(ctx: &mut RContext, x: &Value) -> RResult<usize> {
    match x {
        Value::Null => Ok(0),
        Value::List(l) | Value::Expression(l) => Ok(l.borrow().len()),
        Value::PairList(cell) => Ok(cell.len()),
        Value::Dots(d) => Ok(d.len()),
        Value::Environment(env) => Ok(env.len()),
        Value::Char(c) => Ok(c.as_str().map_or(2, str::len)),
        other => match_vector!(other, v => vector_length(ctx, x, v), _ => Ok(1)),
    }
}

pub(crate) fn vector_length<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
) -> RResult<usize> {
    let Some(class) = pending_class(v) else {
        return Ok(v.borrow().as_slice().map_or(0, <[T]>::len));
    };
    if let Some(method) = ctx.altrep.descriptor(class)?.length {
        return ctx.call_native(|ctx| method(ctx, x));
    }
    if ctx.altrep.vec_methods::<T>(class)?.dataptr.is_some() {
        materialize_vector(ctx, x, v)?;
        return Ok(v.borrow().as_slice().map_or(0, <[T]>::len));
    }
    Err(RError::error("no Length method defined"))
}

/// `INTEGER_ELT` and friends.
pub fn elt<T: Element>(ctx: &mut RContext, x: &Value, index: usize) -> RResult<T> {
    let v = typed::<T>(x)?;
    vector_elt(ctx, x, &v, index)
}

pub(crate) fn vector_elt<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
    index: usize,
) -> RResult<T> {
    if let Some(class) = pending_class(v) {
        let methods = *ctx.altrep.vec_methods::<T>(class)?;
        if let Some(method) = methods.get_region {
            let mut buf = [T::zero()];
            let written = ctx.call_native(|ctx| method(ctx, x, index, &mut buf))?;
            let [item] = buf;
            return if written == 1 { Ok(item) } else { Err(out_of_bounds()) };
        }
        if let Some(method) = methods.elt {
            return ctx.call_native(|ctx| method(ctx, x, index));
        }
        materialize_vector(ctx, x, v)?;
    }
    v.borrow().get(index).ok_or_else(out_of_bounds)
}

/// `INTEGER_GET_REGION` and friends. Returns the number of elements written,
/// which is short when the region runs past the end.
pub fn get_region<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    from: usize,
    buf: RegionBuffer<'_, T>,
) -> RResult<usize> {
    let v = typed::<T>(x)?;
    match buf {
        RegionBuffer::Native(out) => fill_region(ctx, x, &v, from, out),
        RegionBuffer::Managed(out) => {
            let mut staged = vec![T::zero(); out.len()];
            let written = fill_region(ctx, x, &v, from, &mut staged)?;
            out[..written].clone_from_slice(&staged[..written]);
            Ok(written)
        }
    }
}

fn fill_region<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
    from: usize,
    out: &mut [T],
) -> RResult<usize> {
    if let Some(class) = pending_class(v) {
        let methods = *ctx.altrep.vec_methods::<T>(class)?;
        if let Some(method) = methods.get_region {
            let written = ctx.call_native(|ctx| method(ctx, x, from, &mut *out))?;
            return Ok(written.min(out.len()));
        }
        if let Some(method) = methods.elt {
            let count = match ctx.altrep.descriptor(class)?.length {
                Some(_) => out.len().min(vector_length(ctx, x, v)?.saturating_sub(from)),
                None => out.len(),
            };
            for (offset, slot) in out[..count].iter_mut().enumerate() {
                *slot = ctx.call_native(|ctx| method(ctx, x, from + offset))?;
            }
            return Ok(count);
        }
        materialize_vector(ctx, x, v)?;
    }
    let vector = v.borrow();
    let items = vector.as_slice().unwrap_or(&[]);
    let start = from.min(items.len());
    let count = out.len().min(items.len() - start);
    out[..count].clone_from_slice(&items[start..start + count]);
    Ok(count)
}

/// `SET_INTEGER_ELT` and friends.
pub fn set_elt<T: Element>(ctx: &mut RContext, x: &Value, index: usize, value: T) -> RResult<()> {
    let v = typed::<T>(x)?;
    if let Some(class) = pending_class(&v) {
        let methods = *ctx.altrep.vec_methods::<T>(class)?;
        if let Some(method) = methods.set_elt {
            ctx.call_native(|ctx| method(ctx, x, index, value))?;
            v.borrow().invalidate_complete();
            return Ok(());
        }
        materialize_vector(ctx, x, &v)?;
    }
    if v.borrow_mut().set(index, value) {
        Ok(())
    } else {
        Err(out_of_bounds())
    }
}

/// `DATAPTR`: forces the vector into ordinary storage.
pub fn materialize(ctx: &mut RContext, x: &Value) -> RResult<()> {
    match_vector!(x, v => materialize_vector(ctx, x, v), _ => Err(unexpected_type(x)))
}

pub(crate) fn materialize_vector<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
) -> RResult<()> {
    let Some(class) = pending_class(v) else {
        return Ok(());
    };
    let methods = *ctx.altrep.vec_methods::<T>(class)?;
    let items = if let Some(method) = methods.dataptr {
        ctx.call_native(|ctx| method(ctx, x))?
    } else if let Some(method) = methods.elt {
        let len = vector_length(ctx, x, v)?;
        (0..len)
            .map(|index| ctx.call_native(|ctx| method(ctx, x, index)))
            .collect::<RResult<Vec<T>>>()?
    } else if let Some(method) = methods.get_region {
        let len = vector_length(ctx, x, v)?;
        let mut items = vec![T::zero(); len];
        let written = ctx.call_native(|ctx| method(ctx, x, 0, &mut items))?;
        items.truncate(written);
        items
    } else {
        return Err(RError::error(
            "cannot access data pointer for this ALTVEC object",
        ));
    };
    v.borrow_mut().set_materialized(items);
    Ok(())
}

/// Runs `f` over the element storage, materializing first if needed.
pub fn with_slice<T: Element, R>(
    ctx: &mut RContext,
    x: &Value,
    f: impl FnOnce(&[T]) -> R,
) -> RResult<R> {
    let v = typed::<T>(x)?;
    materialize_vector(ctx, x, &v)?;
    let vector = v.borrow();
    Ok(f(vector.as_slice().unwrap_or(&[])))
}

/// Mutable variant of [`with_slice`]; invalidates the completeness cache.
pub fn with_slice_mut<T: Element, R>(
    ctx: &mut RContext,
    x: &Value,
    f: impl FnOnce(&mut [T]) -> R,
) -> RResult<R> {
    let v = typed::<T>(x)?;
    materialize_vector(ctx, x, &v)?;
    let mut vector = v.borrow_mut();
    let items = vector.as_mut_vec().ok_or_else(|| unexpected_type(x))?;
    Ok(f(items.as_mut_slice()))
}

/// All elements as an owned vector, through the region fallback chain.
pub fn elements<T: Element>(ctx: &mut RContext, x: &Value) -> RResult<Vec<T>> {
    let v = typed::<T>(x)?;
    vector_elements(ctx, x, &v)
}

pub(crate) fn vector_elements<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
) -> RResult<Vec<T>> {
    if let Some(items) = v.borrow().as_slice() {
        return Ok(items.to_vec());
    }
    let len = vector_length(ctx, x, v)?;
    let mut items = vec![T::zero(); len];
    let written = fill_region(ctx, x, v, 0, &mut items)?;
    items.truncate(written);
    Ok(items)
}

pub fn is_sorted(ctx: &mut RContext, x: &Value) -> RResult<Sortedness> {
    match_vector!(x, v => vector_is_sorted(ctx, x, v), _ => Err(unexpected_type(x)))
}

fn vector_is_sorted<T: Element>(
    ctx: &mut RContext,
    x: &Value,
    v: &VectorRef<T>,
) -> RResult<Sortedness> {
    if let Some(class) = pending_class(v) {
        if let Some(method) = ctx.altrep.descriptor(class)?.is_sorted {
            return ctx.call_native(|ctx| method(ctx, x));
        }
    }
    let items = vector_elements(ctx, x, v)?;
    Ok(sortedness::probe(&items))
}

/// `*_NO_NA`: the class's completeness check, else a full scan whose result
/// is cached on the vector.
pub fn no_na(ctx: &mut RContext, x: &Value) -> RResult<bool> {
    match_vector!(x, v => vector_no_na(ctx, x, v), _ => Err(unexpected_type(x)))
}

fn vector_no_na<T: Element>(ctx: &mut RContext, x: &Value, v: &VectorRef<T>) -> RResult<bool> {
    let threshold = ctx.config().parallel_scan_threshold;
    {
        let vector = v.borrow();
        if let Some(complete) = vector.cached_complete() {
            return Ok(complete);
        }
        if let Some(items) = vector.as_slice() {
            let complete = !T::any_na(items, threshold);
            vector.set_complete(complete);
            return Ok(complete);
        }
    }
    if let Some(class) = pending_class(v) {
        if let Some(method) = ctx.altrep.descriptor(class)?.no_na {
            return ctx.call_native(|ctx| method(ctx, x));
        }
    }
    let items = vector_elements(ctx, x, v)?;
    let complete = !T::any_na(&items, threshold);
    v.borrow().set_complete(complete);
    Ok(complete)
}
