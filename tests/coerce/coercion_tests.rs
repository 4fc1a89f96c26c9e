use rnative::runtime::{
    attributes::NAMES,
    closure::Closure,
    context::RContext,
    environment::Environment,
    na::{NA_INTEGER, NA_LOGICAL, is_na_real},
    sexp_type::SexpType,
    value::Value,
    vector::Logical,
};
use rnative::upcalls::{
    Rf_asChar, Rf_asInteger, Rf_asLogical, Rf_asReal, Rf_coerceVector, Rf_mkChar, Rf_setAttrib,
    STRING_ELT,
};
use std::rc::Rc;

fn char_text(x: &Value) -> Option<String> {
    match x {
        Value::Char(cell) => cell.as_str().map(str::to_string),
        other => panic!("expected a CHARSXP, got {}", other.type_name()),
    }
}

#[test]
fn scalar_coercions_never_fail() {
    let mut ctx = RContext::new();
    let inputs = vec![
        Value::Null,
        Value::list(vec![Value::scalar_int(1)]),
        Value::Environment(Environment::new(None)),
        Value::Closure(Rc::new(Closure::builtin())),
        Value::symbol("x"),
    ];

    for x in &inputs {
        assert_eq!(Rf_asLogical(&mut ctx, x), NA_LOGICAL, "asLogical({})", x.type_name());
        assert!(is_na_real(Rf_asReal(&mut ctx, x)), "asReal({})", x.type_name());
    }
    assert_eq!(Rf_asInteger(&mut ctx, &Value::Null), NA_INTEGER);
    assert_eq!(char_text(&Rf_asChar(&mut ctx, &Value::Null)), None);
    assert_eq!(char_text(&Rf_asChar(&mut ctx, &Value::symbol("x"))), Some("x".to_string()));
}

#[test]
fn string_parsing_for_scalars() {
    let mut ctx = RContext::new();

    assert_eq!(Rf_asInteger(&mut ctx, &Value::strings(&[" 12 "])), 12);
    assert_eq!(Rf_asInteger(&mut ctx, &Value::strings(&["1e3"])), 1000);
    assert_eq!(Rf_asInteger(&mut ctx, &Value::strings(&["abc"])), NA_INTEGER);
    assert_eq!(Rf_asReal(&mut ctx, &Value::strings(&["2.5"])), 2.5);
    assert_eq!(Rf_asLogical(&mut ctx, &Value::strings(&["T"])), 1);
    assert_eq!(Rf_asLogical(&mut ctx, &Value::strings(&["false"])), 0);
}

#[test]
fn real_to_integer_truncates() {
    let mut ctx = RContext::new();

    assert_eq!(Rf_asInteger(&mut ctx, &Value::scalar_real(2.9)), 2);
    assert_eq!(Rf_asInteger(&mut ctx, &Value::scalar_real(-2.9)), -2);
    assert_eq!(Rf_asInteger(&mut ctx, &Value::scalar_real(f64::NAN)), NA_INTEGER);
}

#[test]
fn as_char_formats_numbers() {
    let mut ctx = RContext::new();

    let one = Rf_asChar(&mut ctx, &Value::scalar_real(1.0));
    let flag = Rf_asChar(&mut ctx, &Value::scalar_logical(Logical::True));
    let na_int = Rf_asChar(&mut ctx, &Value::scalar_int(NA_INTEGER));

    assert_eq!(char_text(&one), Some("1".to_string()));
    assert_eq!(char_text(&flag), Some("TRUE".to_string()));
    assert_eq!(char_text(&na_int), None);
}

#[test]
fn coerce_vector_preserves_names_for_atomic_targets() {
    let mut ctx = RContext::new();
    let x = Value::int_vec(vec![1, 0, NA_INTEGER]);
    Rf_setAttrib(&mut ctx, &x, &Value::symbol(NAMES), Value::strings(&["a", "b", "c"])).unwrap();

    let y = Rf_coerceVector(&mut ctx, &x, SexpType::Logical.code()).unwrap();

    assert_eq!(y.to_string(), "c(a = TRUE, b = FALSE, c = NA)");
}

#[test]
fn coerce_vector_to_list_keeps_only_names() {
    let mut ctx = RContext::new();
    let x = Value::real_vec(vec![1.5, 2.0]);
    x.with_attributes_mut(|attrs| {
        attrs.set(NAMES, Value::strings(&["p", "q"]));
        attrs.set("units", Value::strings(&["cm"]));
    });

    let y = Rf_coerceVector(&mut ctx, &x, SexpType::List.code()).unwrap();

    assert_eq!(y.to_string(), "list(p = 1.5, q = 2)");
    assert!(y.attribute("units").is_null());
}

#[test]
fn coerce_vector_strings_to_real() {
    let mut ctx = RContext::new();
    let x = Value::strings(&["1", "x", "3.25"]);

    let y = Rf_coerceVector(&mut ctx, &x, SexpType::Real.code()).unwrap();

    assert_eq!(y.to_string(), "c(1, NA, 3.25)");
}

#[test]
fn coerce_vector_raw_round_trip_warns_out_of_range() {
    let mut ctx = RContext::new();
    let x = Value::int_vec(vec![255, 256, -1]);

    let raw = Rf_coerceVector(&mut ctx, &x, SexpType::Raw.code()).unwrap();
    let text = Rf_coerceVector(&mut ctx, &raw, SexpType::String.code()).unwrap();

    assert_eq!(raw, Value::raw_vec(vec![255, 0, 0]));
    let first = STRING_ELT(&mut ctx, &text, 0).unwrap();
    assert!(first.ptr_eq(&Rf_mkChar(&mut ctx, "ff")));
}

#[test]
fn coerce_vector_errors_are_r_errors() {
    let mut ctx = RContext::new();
    let env = Value::Environment(Environment::new(None));

    let from_env = Rf_coerceVector(&mut ctx, &env, SexpType::Integer.code()).unwrap_err();
    let nested = Value::list(vec![Value::int_vec(vec![1, 2])]);
    let from_list = Rf_coerceVector(&mut ctx, &nested, SexpType::Real.code()).unwrap_err();

    assert!(!from_env.is_internal());
    assert!(!from_list.is_internal());
    assert_eq!(from_list.message(), "(list) object cannot be coerced to type 'double'");
}

#[test]
fn coerce_vector_unsupported_targets_are_internal() {
    let mut ctx = RContext::new();
    let x = Value::int_vec(vec![1]);

    let language = Rf_coerceVector(&mut ctx, &x, SexpType::Language.code()).unwrap_err();
    let unknown = Rf_coerceVector(&mut ctx, &x, 11).unwrap_err();

    assert!(language.is_internal());
    assert!(unknown.is_internal());
}
