//! Environments and bindings.
use std::rc::Rc;

use crate::{
    error::{RError, RResult},
    runtime::{
        context::RContext,
        environment::Environment,
        sharing::Sharing,
        symbol::{Symbol, unbound_value},
        value::Value,
    },
};

fn environment(x: &Value) -> RResult<Environment> {
    match x {
        Value::Environment(env) => Ok(env.clone()),
        Value::Null => Err(RError::error("use of NULL environment is defunct")),
        _ => Err(RError::error("argument is not an environment")),
    }
}

fn symbol(x: &Value) -> RResult<Rc<Symbol>> {
    match x {
        Value::Symbol(symbol) => Ok(symbol.clone()),
        other => Err(RError::error(format!(
            "not a symbol: '{}'",
            other.type_name()
        ))),
    }
}

fn or_unbound(value: Option<Value>) -> Value {
    value.unwrap_or_else(|| Value::Symbol(unbound_value()))
}

pub fn R_GlobalEnv(ctx: &mut RContext) -> Value {
    ctx.trace_upcall("R_GlobalEnv");
    Value::Environment(ctx.global_env().clone())
}

/// A fresh environment enclosed by `enclos`.
pub fn R_NewEnv(ctx: &mut RContext, enclos: &Value) -> RResult<Value> {
    ctx.trace_upcall("R_NewEnv");
    let parent = environment(enclos)?;
    Ok(ctx.alloc(Value::Environment(Environment::new(Some(parent)))))
}

/// Binds `value` in `rho`; the value gains a reference.
pub fn Rf_defineVar(ctx: &mut RContext, sym: &Value, value: Value, rho: &Value) -> RResult<()> {
    ctx.trace_upcall("Rf_defineVar");
    let (sym, env) = (symbol(sym)?, environment(rho)?);
    env.define(sym.name(), value.clone())?;
    value.update_sharing(Sharing::increment);
    Ok(())
}

/// `R_UnboundValue` when `sym` has no binding in this frame.
pub fn Rf_findVarInFrame(ctx: &mut RContext, rho: &Value, sym: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_findVarInFrame");
    let (env, sym) = (environment(rho)?, symbol(sym)?);
    Ok(or_unbound(env.get_in_frame(sym.name())))
}

/// Searches `rho` and its parents; `R_UnboundValue` when nothing binds
/// `sym`.
pub fn Rf_findVar(ctx: &mut RContext, sym: &Value, rho: &Value) -> RResult<Value> {
    ctx.trace_upcall("Rf_findVar");
    let (sym, env) = (symbol(sym)?, environment(rho)?);
    Ok(or_unbound(env.lookup(sym.name())))
}

pub fn R_existsVarInFrame(ctx: &mut RContext, rho: &Value, sym: &Value) -> RResult<bool> {
    ctx.trace_upcall("R_existsVarInFrame");
    let (env, sym) = (environment(rho)?, symbol(sym)?);
    Ok(env.get_in_frame(sym.name()).is_some())
}

pub fn R_lockEnvironment(ctx: &mut RContext, env: &Value, bindings: bool) -> RResult<()> {
    ctx.trace_upcall("R_lockEnvironment");
    environment(env)?.lock(bindings);
    Ok(())
}

pub fn R_EnvironmentIsLocked(ctx: &mut RContext, env: &Value) -> RResult<bool> {
    ctx.trace_upcall("R_EnvironmentIsLocked");
    Ok(environment(env)?.is_locked())
}

pub fn R_lockBinding(ctx: &mut RContext, sym: &Value, env: &Value) -> RResult<()> {
    ctx.trace_upcall("R_lockBinding");
    let (sym, env) = (symbol(sym)?, environment(env)?);
    env.lock_binding(sym.name())
}

pub fn R_unLockBinding(ctx: &mut RContext, sym: &Value, env: &Value) -> RResult<()> {
    ctx.trace_upcall("R_unLockBinding");
    let (sym, env) = (symbol(sym)?, environment(env)?);
    env.unlock_binding(sym.name())
}

pub fn R_BindingIsLocked(ctx: &mut RContext, sym: &Value, env: &Value) -> RResult<bool> {
    ctx.trace_upcall("R_BindingIsLocked");
    let (sym, env) = (symbol(sym)?, environment(env)?);
    env.binding_is_locked(sym.name())
}
