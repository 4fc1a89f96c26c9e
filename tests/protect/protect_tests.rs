use rnative::config::BridgeConfig;
use rnative::runtime::{context::RContext, sexp_type::SexpType, value::Value};
use rnative::upcalls::{
    PROTECT, R_PreserveObject, R_ProtectWithIndex, R_ReleaseObject, R_Reprotect, R_gc,
    Rf_ScalarInteger, Rf_allocVector, UNPROTECT, UNPROTECT_PTR,
};

fn small_stack(size: usize) -> RContext {
    RContext::with_config(BridgeConfig {
        protect_stack_size: size,
        ..BridgeConfig::default()
    })
}

#[test]
fn protect_unprotect_is_balanced() {
    let mut ctx = RContext::new();

    let a = Rf_allocVector(&mut ctx, SexpType::Integer.code(), 4).unwrap();
    let a = PROTECT(&mut ctx, a).unwrap();
    let b = Rf_ScalarInteger(&mut ctx, 5);
    PROTECT(&mut ctx, b).unwrap();
    assert_eq!(ctx.protect_depth(), 2);

    UNPROTECT(&mut ctx, 2);

    assert_eq!(ctx.protect_depth(), 0);
    assert!(ctx.heap().contains(&a));
}

#[test]
fn overflow_reports_stack_message() {
    let mut ctx = small_stack(3);
    for i in 0..3 {
        let x = Rf_ScalarInteger(&mut ctx, i);
        PROTECT(&mut ctx, x).unwrap();
    }

    let err = PROTECT(&mut ctx, Value::Null).unwrap_err();

    assert_eq!(err.message(), "protect(): protection stack overflow");
    assert_eq!(ctx.protect_depth(), 3);
    UNPROTECT(&mut ctx, 3);
    assert!(PROTECT(&mut ctx, Value::Null).is_ok());
}

#[test]
fn over_unprotect_empties_stack() {
    let mut ctx = RContext::new();
    PROTECT(&mut ctx, Value::Null).unwrap();

    UNPROTECT(&mut ctx, 4);

    assert_eq!(ctx.protect_depth(), 0);
    assert_eq!(ctx.protect_stack().underflow_count(), 1);
}

#[test]
fn unprotect_ptr_removes_from_middle() {
    let mut ctx = RContext::new();
    let values: Vec<Value> = (0..3).map(|i| Rf_ScalarInteger(&mut ctx, i)).collect();
    for v in &values {
        PROTECT(&mut ctx, v.clone()).unwrap();
    }

    UNPROTECT_PTR(&mut ctx, &values[0]);

    let entries = ctx.protect_stack().entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].ptr_eq(&values[1]));
    assert!(entries[1].ptr_eq(&values[2]));
}

#[test]
fn reprotect_keeps_new_value_alive() {
    let mut ctx = RContext::new();
    let first = Rf_ScalarInteger(&mut ctx, 1);
    let index = R_ProtectWithIndex(&mut ctx, first.clone()).unwrap();

    let second = Rf_ScalarInteger(&mut ctx, 2);
    R_Reprotect(&mut ctx, second.clone(), index).unwrap();
    R_gc(&mut ctx);
    R_gc(&mut ctx);

    assert!(ctx.heap().contains(&second));
    assert!(!ctx.heap().contains(&first));
}

#[test]
fn preserved_object_outlives_protect_stack() {
    let mut ctx = RContext::new();
    let x = Rf_allocVector(&mut ctx, SexpType::Real.code(), 2).unwrap();

    R_PreserveObject(&mut ctx, x.clone());
    R_gc(&mut ctx);
    R_gc(&mut ctx);
    assert!(ctx.heap().contains(&x));

    R_ReleaseObject(&mut ctx, &x);
    R_gc(&mut ctx);
    assert!(!ctx.heap().contains(&x));
}

#[test]
fn release_of_unpreserved_is_noop() {
    let mut ctx = RContext::new();
    let x = Rf_ScalarInteger(&mut ctx, 1);

    R_ReleaseObject(&mut ctx, &x);

    assert!(!ctx.is_preserved(&x));
}

#[test]
fn native_callback_leak_is_cut_back() {
    let mut ctx = RContext::new();
    PROTECT(&mut ctx, Value::Null).unwrap();

    let result = ctx.call_native(|ctx| {
        let leaked = Rf_ScalarInteger(ctx, 9);
        PROTECT(ctx, leaked).unwrap();
        7
    });

    assert_eq!(result, 7);
    assert_eq!(ctx.protect_depth(), 1);
    assert_eq!(ctx.protect_stack().imbalance_count(), 1);
}
