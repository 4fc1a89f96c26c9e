use rnative::config::BridgeConfig;
use rnative::runtime::{context::RContext, sexp_type::SexpType, value::Value};
use rnative::upcalls::{
    PROTECT, R_GlobalEnv, R_MakeExternalPtr, R_gc, Rf_ScalarInteger, Rf_allocVector,
    Rf_defineVar, Rf_install, Rf_list2, Rf_setAttrib, SET_VECTOR_ELT, UNPROTECT,
};

fn with_threshold(threshold: usize) -> RContext {
    RContext::with_config(BridgeConfig {
        gc_threshold: threshold,
        ..BridgeConfig::default()
    })
}

#[test]
fn protected_list_keeps_its_elements() {
    let mut ctx = RContext::new();
    let list = Rf_allocVector(&mut ctx, SexpType::List.code(), 2).unwrap();
    PROTECT(&mut ctx, list.clone()).unwrap();
    let element = Rf_ScalarInteger(&mut ctx, 4);
    SET_VECTOR_ELT(&mut ctx, &list, 1, element.clone()).unwrap();
    let stray = Rf_ScalarInteger(&mut ctx, 5);

    R_gc(&mut ctx);

    assert!(ctx.heap().contains(&element));
    assert!(!ctx.heap().contains(&stray));
    UNPROTECT(&mut ctx, 1);
}

#[test]
fn pairlist_cells_and_attributes_are_traced() {
    let mut ctx = RContext::new();
    let car = Rf_ScalarInteger(&mut ctx, 1);
    let cadr = Rf_ScalarInteger(&mut ctx, 2);
    let pl = Rf_list2(&mut ctx, car.clone(), cadr.clone());
    let holder = Rf_allocVector(&mut ctx, SexpType::Integer.code(), 1).unwrap();
    let payload = Rf_install(&mut ctx, "payload");
    Rf_setAttrib(&mut ctx, &holder, &payload, pl.clone()).unwrap();
    PROTECT(&mut ctx, holder).unwrap();

    R_gc(&mut ctx);

    assert!(ctx.heap().contains(&pl));
    assert!(ctx.heap().contains(&car));
    assert!(ctx.heap().contains(&cadr));
}

#[test]
fn global_bindings_are_roots() {
    let mut ctx = RContext::new();
    let x = Rf_ScalarInteger(&mut ctx, 3);
    let global = R_GlobalEnv(&mut ctx);
    let sym = Rf_install(&mut ctx, "kept");
    Rf_defineVar(&mut ctx, &sym, x.clone(), &global).unwrap();

    R_gc(&mut ctx);
    R_gc(&mut ctx);

    assert!(ctx.heap().contains(&x));
}

#[test]
fn external_pointer_fields_are_traced() {
    let mut ctx = RContext::new();
    let prot = Rf_ScalarInteger(&mut ctx, 1);
    let ptr = R_MakeExternalPtr(&mut ctx, 0xbeef, Value::Null, prot.clone());
    PROTECT(&mut ctx, ptr).unwrap();

    R_gc(&mut ctx);

    assert!(ctx.heap().contains(&prot));
}

#[test]
fn allocation_past_threshold_collects() {
    let mut ctx = with_threshold(3);
    let garbage: Vec<Value> = (0..3).map(|i| Rf_ScalarInteger(&mut ctx, i)).collect();
    assert_eq!(ctx.heap().total_collections(), 0);

    let next = Rf_ScalarInteger(&mut ctx, 10);

    assert_eq!(ctx.heap().total_collections(), 1);
    assert!(garbage.iter().all(|g| !ctx.heap().contains(g)));
    assert!(ctx.heap().contains(&next));
}

#[test]
fn disabled_collector_never_runs_automatically() {
    let mut ctx = RContext::with_config(BridgeConfig {
        gc_threshold: 2,
        gc_enabled: false,
        ..BridgeConfig::default()
    });

    for i in 0..10 {
        Rf_ScalarInteger(&mut ctx, i);
    }

    assert_eq!(ctx.heap().total_collections(), 0);
    assert_eq!(ctx.heap().live_count(), 10);
}

#[test]
fn collected_values_stay_usable_by_holders() {
    let mut ctx = RContext::new();
    let x = Rf_ScalarInteger(&mut ctx, 42);

    R_gc(&mut ctx);

    assert!(!ctx.heap().contains(&x));
    assert_eq!(x, Value::scalar_int(42));
}
