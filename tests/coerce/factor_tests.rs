use rnative::runtime::{
    attributes::{CLASS, LEVELS},
    context::RContext,
    na::NA_INTEGER,
    sexp_type::SexpType,
    value::Value,
};
use rnative::upcalls::{Rf_asCharacterFactor, Rf_coerceVector, STRING_NO_NA};

fn factor(codes: Vec<i32>, levels: &[&str]) -> Value {
    let x = Value::int_vec(codes);
    x.with_attributes_mut(|attrs| {
        attrs.set(LEVELS, Value::strings(levels));
        attrs.set(CLASS, Value::strings(&["factor"]));
    });
    x
}

#[test]
fn codes_map_to_levels() {
    let mut ctx = RContext::new();
    let x = factor(vec![1, 2, NA_INTEGER], &["lo", "hi"]);

    let y = Rf_asCharacterFactor(&mut ctx, &x).unwrap();

    assert_eq!(y.to_string(), "c(\"lo\", \"hi\", NA)");
    assert!(!STRING_NO_NA(&mut ctx, &y).unwrap());
}

#[test]
fn result_has_no_attributes() {
    let mut ctx = RContext::new();
    let x = factor(vec![2, 2], &["a", "b"]);

    let y = Rf_asCharacterFactor(&mut ctx, &x).unwrap();

    assert!(y.attribute(LEVELS).is_null());
    assert!(!y.inherits("factor"));
    assert!(STRING_NO_NA(&mut ctx, &y).unwrap());
}

#[test]
fn coerce_vector_to_string_goes_through_levels() {
    let mut ctx = RContext::new();
    let x = factor(vec![3, 1], &["x", "y", "z"]);

    let y = Rf_coerceVector(&mut ctx, &x, SexpType::String.code()).unwrap();

    assert_eq!(y, Value::strings(&["z", "x"]));
}

#[test]
fn code_past_levels_is_malformed() {
    let mut ctx = RContext::new();
    let x = factor(vec![1, 3], &["lo", "hi"]);

    let err = Rf_asCharacterFactor(&mut ctx, &x).unwrap_err();

    assert_eq!(err.message(), "malformed factor");
    assert!(!err.is_internal());
}

#[test]
fn non_integer_codes_are_malformed() {
    let mut ctx = RContext::new();
    let x = Value::real_vec(vec![1.0]);
    x.with_attributes_mut(|attrs| {
        attrs.set(LEVELS, Value::strings(&["a"]));
        attrs.set(CLASS, Value::strings(&["factor"]));
    });

    let err = Rf_asCharacterFactor(&mut ctx, &x).unwrap_err();

    assert_eq!(err.message(), "malformed factor");
}

#[test]
fn plain_vector_is_rejected() {
    let mut ctx = RContext::new();

    let err = Rf_asCharacterFactor(&mut ctx, &Value::int_vec(vec![1])).unwrap_err();

    assert_eq!(err.message(), "attempting to coerce non-factor");
}
