use rnative::runtime::{attributes::NAMES, context::RContext, sexp_type::SexpType, value::Value};
use rnative::upcalls::{
    CAD4R, CADDDR, CADDR, CADR, CAR, CDDDR, CDDR, CDR, NAMED, Rf_PairToVectorList, Rf_ScalarInteger,
    Rf_VectorToPairList, Rf_coerceVector, Rf_install, Rf_lcons, Rf_list2, Rf_list4, SETCADDR, SETCAR,
    SETCADR, SET_NAMED, SET_TAG, TAG, TYPEOF,
};

fn call_f(ctx: &mut RContext) -> Value {
    let f = Rf_install(ctx, "f");
    let args = Rf_list2(ctx, Value::scalar_int(1), Value::scalar_int(2));
    let x = Rf_install(ctx, "x");
    SET_TAG(ctx, &args, x).unwrap();
    Rf_lcons(ctx, f, args)
}

#[test]
fn language_object_walks_like_a_pairlist() {
    let mut ctx = RContext::new();
    let call = call_f(&mut ctx);

    assert_eq!(TYPEOF(&mut ctx, &call), SexpType::Language.code());
    assert_eq!(call.to_string(), "f(x = 1L, 2L)");
    assert!(CAR(&mut ctx, &call).unwrap().ptr_eq(&Value::symbol("f")));
    let args = CDR(&mut ctx, &call).unwrap();
    assert!(TAG(&mut ctx, &args).unwrap().ptr_eq(&Value::symbol("x")));
    assert_eq!(CADDR(&mut ctx, &call).unwrap(), Value::scalar_int(2));
    assert!(CDDDR(&mut ctx, &call).unwrap().is_null());
}

#[test]
fn setters_rewrite_arguments_in_place() {
    let mut ctx = RContext::new();
    let call = call_f(&mut ctx);

    SETCADR(&mut ctx, &call, Value::strings(&["a"])).unwrap();
    SETCADDR(&mut ctx, &call, Value::Null).unwrap();

    assert_eq!(call.to_string(), "f(x = \"a\", NULL)");
}

#[test]
fn deep_accessors_reach_fifth_cell() {
    let mut ctx = RContext::new();
    let items: Vec<Value> = (1..=4).map(|i| Rf_ScalarInteger(&mut ctx, i)).collect();
    let tail = Rf_list4(
        &mut ctx,
        items[0].clone(),
        items[1].clone(),
        items[2].clone(),
        items[3].clone(),
    );
    let head = Rf_install(&mut ctx, "g");
    let call = Rf_lcons(&mut ctx, head, tail);

    assert!(CADDDR(&mut ctx, &call).unwrap().ptr_eq(&items[2]));
    assert!(CAD4R(&mut ctx, &call).unwrap().ptr_eq(&items[3]));
    let args = CDR(&mut ctx, &call).unwrap();
    assert!(CAD4R(&mut ctx, &args).unwrap().is_null());
}

#[test]
fn non_pairlists_are_rejected_as_internal() {
    let mut ctx = RContext::new();

    let err = CAR(&mut ctx, &Value::int_vec(vec![1])).unwrap_err();
    let set = SETCADR(&mut ctx, &Value::list(vec![]), Value::Null).unwrap_err();

    assert!(err.is_internal());
    assert!(set.is_internal());
}

#[test]
fn named_vector_round_trips_through_pairlist() {
    let mut ctx = RContext::new();
    let x = Value::named_list(vec![("a", Value::scalar_int(1)), ("", Value::scalar_real(2.0))]);
    x.with_attributes_mut(|attrs| attrs.set("note", Value::strings(&["kept"])));

    let pl = Rf_VectorToPairList(&mut ctx, &x).unwrap();
    let back = Rf_PairToVectorList(&mut ctx, &pl).unwrap();

    assert_eq!(pl.to_string(), "pairlist(a = 1L, 2)");
    assert!(TAG(&mut ctx, &pl).unwrap().ptr_eq(&Value::symbol("a")));
    assert_eq!(back.to_string(), "list(a = 1L, 2)");
    assert_eq!(back.attribute(NAMES), Value::strings(&["a", ""]));
    assert_eq!(back.attribute("note"), Value::strings(&["kept"]));
}

#[test]
fn atomic_vector_becomes_pairlist_of_scalars() {
    let mut ctx = RContext::new();
    let x = Value::int_vec(vec![7, 8]);

    let pl = Rf_VectorToPairList(&mut ctx, &x).unwrap();

    assert_eq!(TYPEOF(&mut ctx, &pl), SexpType::PairList.code());
    assert_eq!(CADR(&mut ctx, &pl).unwrap(), Value::scalar_int(8));
    assert!(TAG(&mut ctx, &pl).unwrap().is_null());
}

#[test]
fn coerce_pairlist_to_list_and_vector() {
    let mut ctx = RContext::new();
    let pl = Rf_list2(&mut ctx, Value::scalar_int(3), Value::scalar_int(4));

    let list = Rf_coerceVector(&mut ctx, &pl, SexpType::List.code()).unwrap();
    let ints = Rf_coerceVector(&mut ctx, &pl, SexpType::Integer.code()).unwrap();

    assert_eq!(list, Value::list(vec![Value::scalar_int(3), Value::scalar_int(4)]));
    assert_eq!(ints, Value::int_vec(vec![3, 4]));
}

#[test]
fn elements_of_shared_list_become_shared() {
    let mut ctx = RContext::new();
    let element = Rf_ScalarInteger(&mut ctx, 1);
    let list = Value::list(vec![element.clone()]);
    SET_NAMED(&mut ctx, &list, 2);

    Rf_VectorToPairList(&mut ctx, &list).unwrap();

    assert_eq!(NAMED(&mut ctx, &element), 2);
}

#[test]
fn long_chains_compare_and_drop_without_recursion() {
    const CELLS: i32 = 300_000;
    let mut ctx = RContext::new();
    let x = Value::int_vec((0..CELLS).collect());

    let a = Rf_VectorToPairList(&mut ctx, &x).unwrap();
    let b = Rf_VectorToPairList(&mut ctx, &x).unwrap();
    let back = Rf_coerceVector(&mut ctx, &a, SexpType::Integer.code()).unwrap();

    assert!(!a.ptr_eq(&b));
    assert!(a == b);
    assert_eq!(back, x);
    let third = CDDR(&mut ctx, &b).unwrap();
    SETCAR(&mut ctx, &third, Value::Null).unwrap();
    assert!(a != b);

    drop(ctx);
    drop(a);
    drop(b);
}
