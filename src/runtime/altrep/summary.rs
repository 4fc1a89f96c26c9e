//! `sum`, `min` and `max` with ALTREP method dispatch.
//!
//! A class method returning `NULL` asks for the default computation.
use tracing::warn;

use crate::{
    error::{RError, RResult},
    runtime::{
        context::RContext,
        na::{NA_INTEGER, NA_REAL},
        value::Value,
        vector::{Element, Logical},
    },
};

use super::{
    class::{AltClassDescriptor, SummaryMethod},
    dispatch::{pending_class, unexpected_type, vector_elements},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Summary {
    Sum,
    Min,
    Max,
}

impl Summary {
    fn name(self) -> &'static str {
        match self {
            Summary::Sum => "sum",
            Summary::Min => "min",
            Summary::Max => "max",
        }
    }

    fn method(self, descriptor: &AltClassDescriptor) -> Option<SummaryMethod> {
        match self {
            Summary::Sum => descriptor.sum,
            Summary::Min => descriptor.min,
            Summary::Max => descriptor.max,
        }
    }
}

pub fn sum(ctx: &mut RContext, x: &Value, na_rm: bool) -> RResult<Value> {
    summarize(ctx, x, na_rm, Summary::Sum)
}

pub fn min(ctx: &mut RContext, x: &Value, na_rm: bool) -> RResult<Value> {
    summarize(ctx, x, na_rm, Summary::Min)
}

pub fn max(ctx: &mut RContext, x: &Value, na_rm: bool) -> RResult<Value> {
    summarize(ctx, x, na_rm, Summary::Max)
}

fn summarize(ctx: &mut RContext, x: &Value, na_rm: bool, op: Summary) -> RResult<Value> {
    if let Some(result) = class_summary(ctx, x, na_rm, op)? {
        return Ok(result);
    }
    match x {
        Value::Integer(v) => {
            let items = vector_elements(ctx, x, v)?;
            Ok(integer_summary(&items, na_rm, op))
        }
        Value::Logical(v) => {
            let items: Vec<i32> = vector_elements(ctx, x, v)?
                .into_iter()
                .map(Logical::to_r_int)
                .collect();
            Ok(integer_summary(&items, na_rm, op))
        }
        Value::Real(v) => {
            let items = vector_elements(ctx, x, v)?;
            Ok(real_summary(&items, na_rm, op))
        }
        Value::Complex(_) | Value::String(_) | Value::Raw(_) => Err(RError::error(format!(
            "invalid 'type' ({}) of argument",
            x.type_name()
        ))),
        _ => Err(unexpected_type(x)),
    }
}

fn class_summary(ctx: &mut RContext, x: &Value, na_rm: bool, op: Summary) -> RResult<Option<Value>> {
    let class = match x {
        Value::Integer(v) => pending_class(v),
        Value::Logical(v) => pending_class(v),
        Value::Real(v) => pending_class(v),
        _ => None,
    };
    let Some(class) = class else {
        return Ok(None);
    };
    let Some(method) = op.method(ctx.altrep.descriptor(class)?) else {
        return Ok(None);
    };
    let result = ctx.call_native(|ctx| method(ctx, x, na_rm))?;
    Ok((!result.is_null()).then_some(result))
}

fn integer_summary(items: &[i32], na_rm: bool, op: Summary) -> Value {
    let present = items.iter().copied().filter(|x| *x != NA_INTEGER);
    if !na_rm && items.contains(&NA_INTEGER) {
        return Value::scalar_int(NA_INTEGER);
    }
    match op {
        Summary::Sum => {
            let total: i64 = present.map(i64::from).sum();
            match i32::try_from(total) {
                Ok(total) if total != NA_INTEGER => Value::scalar_int(total),
                _ => {
                    warn!("integer overflow - use sum(as.numeric(.))");
                    Value::scalar_int(NA_INTEGER)
                }
            }
        }
        Summary::Min | Summary::Max => {
            let extreme = if op == Summary::Min { present.min() } else { present.max() };
            extreme.map_or_else(|| empty_extreme(op), Value::scalar_int)
        }
    }
}

fn real_summary(items: &[f64], na_rm: bool, op: Summary) -> Value {
    let kept: Vec<f64> = if na_rm {
        items.iter().copied().filter(|x| !x.is_nan()).collect()
    } else {
        items.to_vec()
    };
    if kept.iter().any(Element::is_na) {
        return Value::scalar_real(NA_REAL);
    }
    if op == Summary::Sum {
        return Value::scalar_real(kept.iter().sum());
    }
    if kept.iter().any(|x| x.is_nan()) {
        return Value::scalar_real(f64::NAN);
    }
    if kept.is_empty() {
        return empty_extreme(op);
    }
    let fold = if op == Summary::Min { f64::min } else { f64::max };
    Value::scalar_real(kept.into_iter().reduce(fold).unwrap_or(NA_REAL))
}

fn empty_extreme(op: Summary) -> Value {
    let (value, text) = if op == Summary::Min {
        (f64::INFINITY, "Inf")
    } else {
        (f64::NEG_INFINITY, "-Inf")
    };
    warn!("no non-missing arguments to {}; returning {}", op.name(), text);
    Value::scalar_real(value)
}
