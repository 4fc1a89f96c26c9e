//! Built-in `compact_intseq` and `compact_realseq` classes.
//!
//! An instance stores `c(length, start, step)` as a double vector in its
//! first data slot and computes elements on demand.
use crate::{
    error::{RError, RResult},
    runtime::{context::RContext, value::Value, vector::Element},
};

use super::{
    class::{AltClassDescriptor, AltClassId, AltKind},
    instance::altrep_data1,
    registry::AltrepRegistry,
    sortedness::Sortedness,
};

const BASE_PACKAGE: &str = "base";

/// Ids of the compact sequence classes registered in every context.
#[derive(Debug, Clone, Copy)]
pub struct CompactClasses {
    pub intseq: AltClassId,
    pub realseq: AltClassId,
}

impl CompactClasses {
    pub(crate) fn register(registry: &mut AltrepRegistry) -> Self {
        let mut intseq = AltClassDescriptor::new(AltKind::Integer, "compact_intseq", BASE_PACKAGE, 0);
        set_shared_methods(&mut intseq);
        intseq.duplicate = Some(duplicate_seq::<i32>);
        intseq.sum = Some(intseq_sum);
        intseq.min = Some(seq_min::<i32>);
        intseq.max = Some(seq_max::<i32>);
        if let Some(methods) = i32::alt_methods_mut(&mut intseq.typed) {
            methods.elt = Some(seq_elt::<i32>);
            methods.get_region = Some(seq_region::<i32>);
            methods.dataptr = Some(seq_dataptr::<i32>);
        }

        let mut realseq = AltClassDescriptor::new(AltKind::Real, "compact_realseq", BASE_PACKAGE, 0);
        set_shared_methods(&mut realseq);
        realseq.duplicate = Some(duplicate_seq::<f64>);
        realseq.sum = Some(realseq_sum);
        realseq.min = Some(seq_min::<f64>);
        realseq.max = Some(seq_max::<f64>);
        if let Some(methods) = f64::alt_methods_mut(&mut realseq.typed) {
            methods.elt = Some(seq_elt::<f64>);
            methods.get_region = Some(seq_region::<f64>);
            methods.dataptr = Some(seq_dataptr::<f64>);
        }

        Self {
            intseq: registry.register(intseq),
            realseq: registry.register(realseq),
        }
    }
}

fn set_shared_methods(descriptor: &mut AltClassDescriptor) {
    descriptor.length = Some(seq_length);
    descriptor.is_sorted = Some(seq_is_sorted);
    descriptor.no_na = Some(seq_no_na);
}

/// Element kinds a compact sequence can produce.
trait SeqElement: Element {
    fn from_f64(x: f64) -> Self;
    fn scalar(x: Self) -> Value;
    fn materialized(items: Vec<Self>) -> Value;
}

impl SeqElement for i32 {
    fn from_f64(x: f64) -> Self {
        x as i32
    }

    fn scalar(x: Self) -> Value {
        Value::scalar_int(x)
    }

    fn materialized(items: Vec<Self>) -> Value {
        Value::int_vec(items)
    }
}

impl SeqElement for f64 {
    fn from_f64(x: f64) -> Self {
        x
    }

    fn scalar(x: Self) -> Value {
        Value::scalar_real(x)
    }

    fn materialized(items: Vec<Self>) -> Value {
        Value::real_vec(items)
    }
}

#[derive(Debug, Clone, Copy)]
struct SeqInfo {
    len: usize,
    start: f64,
    step: f64,
}

impl SeqInfo {
    fn read(x: &Value) -> RResult<Self> {
        let state = altrep_data1(x)?;
        let Value::Real(state) = &state else {
            return Err(RError::should_not_reach_here("compact sequence without state"));
        };
        match state.borrow().as_slice() {
            Some(&[len, start, step]) => Ok(SeqInfo {
                len: len as usize,
                start,
                step,
            }),
            _ => Err(RError::should_not_reach_here("malformed compact sequence state")),
        }
    }

    fn at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    fn last(&self) -> Option<f64> {
        self.len.checked_sub(1).map(|i| self.at(i))
    }
}

fn seq_length(_ctx: &mut RContext, x: &Value) -> RResult<usize> {
    Ok(SeqInfo::read(x)?.len)
}

fn seq_elt<T: SeqElement>(_ctx: &mut RContext, x: &Value, index: usize) -> RResult<T> {
    let info = SeqInfo::read(x)?;
    if index >= info.len {
        return Err(RError::error("subscript out of bounds"));
    }
    Ok(T::from_f64(info.at(index)))
}

fn seq_region<T: SeqElement>(
    _ctx: &mut RContext,
    x: &Value,
    from: usize,
    buf: &mut [T],
) -> RResult<usize> {
    let info = SeqInfo::read(x)?;
    let count = buf.len().min(info.len.saturating_sub(from));
    for (offset, slot) in buf[..count].iter_mut().enumerate() {
        *slot = T::from_f64(info.at(from + offset));
    }
    Ok(count)
}

fn seq_dataptr<T: SeqElement>(_ctx: &mut RContext, x: &Value) -> RResult<Vec<T>> {
    let info = SeqInfo::read(x)?;
    Ok((0..info.len).map(|i| T::from_f64(info.at(i))).collect())
}

fn seq_is_sorted(_ctx: &mut RContext, x: &Value) -> RResult<Sortedness> {
    let info = SeqInfo::read(x)?;
    Ok(if info.step >= 0.0 {
        Sortedness::Incr
    } else {
        Sortedness::Decr
    })
}

fn seq_no_na(_ctx: &mut RContext, _x: &Value) -> RResult<bool> {
    Ok(true)
}

fn seq_total(info: &SeqInfo) -> f64 {
    let n = info.len as f64;
    n * info.start + info.step * n * (n - 1.0) / 2.0
}

/// Returns an integer when the total fits, a double otherwise.
fn intseq_sum(_ctx: &mut RContext, x: &Value, _na_rm: bool) -> RResult<Value> {
    let total = seq_total(&SeqInfo::read(x)?);
    if total > i32::MIN as f64 && total <= i32::MAX as f64 {
        Ok(Value::scalar_int(total as i32))
    } else {
        Ok(Value::scalar_real(total))
    }
}

fn realseq_sum(_ctx: &mut RContext, x: &Value, _na_rm: bool) -> RResult<Value> {
    Ok(Value::scalar_real(seq_total(&SeqInfo::read(x)?)))
}

/// `NULL` for an empty sequence, so the default computation runs.
fn seq_min<T: SeqElement>(_ctx: &mut RContext, x: &Value, _na_rm: bool) -> RResult<Value> {
    let info = SeqInfo::read(x)?;
    Ok(match info.last() {
        Some(last) => T::scalar(T::from_f64(info.start.min(last))),
        None => Value::Null,
    })
}

fn seq_max<T: SeqElement>(_ctx: &mut RContext, x: &Value, _na_rm: bool) -> RResult<Value> {
    let info = SeqInfo::read(x)?;
    Ok(match info.last() {
        Some(last) => T::scalar(T::from_f64(info.start.max(last))),
        None => Value::Null,
    })
}

fn duplicate_seq<T: SeqElement>(ctx: &mut RContext, x: &Value, _deep: bool) -> RResult<Value> {
    let items = seq_dataptr::<T>(ctx, x)?;
    Ok(ctx.alloc(T::materialized(items)))
}

impl RContext {
    pub fn compact_intseq(&mut self, len: usize, start: i32, step: i32) -> RResult<Value> {
        let state = Value::real_vec(vec![len as f64, f64::from(start), f64::from(step)]);
        self.new_altrep_instance(self.compact.intseq, state, Value::Null)
    }

    pub fn compact_realseq(&mut self, len: usize, start: f64, step: f64) -> RResult<Value> {
        let state = Value::real_vec(vec![len as f64, start, step]);
        self.new_altrep_instance(self.compact.realseq, state, Value::Null)
    }

    /// `R_compact_intrange`: `from:to` as a compact sequence. Bounds outside
    /// the int range produce a double sequence; a single element is an
    /// ordinary scalar.
    pub fn compact_intrange(&mut self, from: i64, to: i64) -> RResult<Value> {
        let len = (to - from).unsigned_abs() as usize + 1;
        let fits = |v: i64| v > i64::from(i32::MIN) && v <= i64::from(i32::MAX);
        let ascending = from <= to;
        if !fits(from) || !fits(to) {
            let step = if ascending { 1.0 } else { -1.0 };
            return self.compact_realseq(len, from as f64, step);
        }
        if len == 1 {
            return Ok(self.alloc(Value::scalar_int(from as i32)));
        }
        self.compact_intseq(len, from as i32, if ascending { 1 } else { -1 })
    }

    pub fn compact_classes(&self) -> CompactClasses {
        self.compact
    }
}
