use rnative::runtime::{context::RContext, sexp_type::SexpType, value::Value};
use rnative::upcalls::{
    ALTINTEGER_MAX, ALTINTEGER_SUM, ALTREAL_MIN, ALTREP, INTEGER_ELT, INTEGER_IS_SORTED,
    R_altrep_class_name, R_compact_intrange, REAL_ELT, Rf_asInteger, Rf_coerceVector,
    Rf_duplicate, Rf_length, SET_INTEGER_ELT, TYPEOF,
};

#[test]
fn intrange_is_a_lazy_integer_vector() {
    let mut ctx = RContext::new();

    let x = R_compact_intrange(&mut ctx, 1, 10).unwrap();

    assert!(ALTREP(&mut ctx, &x));
    assert_eq!(TYPEOF(&mut ctx, &x), SexpType::Integer.code());
    assert_eq!(Rf_length(&mut ctx, &x).unwrap(), 10);
    assert_eq!(Rf_asInteger(&mut ctx, &x), 1);
    assert_eq!(
        R_altrep_class_name(&mut ctx, &x),
        Some(("compact_intseq".to_string(), "base".to_string()))
    );
}

#[test]
fn descending_range_reports_decreasing() {
    let mut ctx = RContext::new();

    let x = R_compact_intrange(&mut ctx, 3, -1).unwrap();

    assert_eq!(INTEGER_IS_SORTED(&mut ctx, &x).unwrap(), -1);
    assert_eq!(INTEGER_ELT(&mut ctx, &x, 4).unwrap(), -1);
    assert_eq!(ALTINTEGER_MAX(&mut ctx, &x, false).unwrap(), Value::scalar_int(3));
}

#[test]
fn coercion_reads_every_element() {
    let mut ctx = RContext::new();
    let x = R_compact_intrange(&mut ctx, 1, 3).unwrap();

    let text = Rf_coerceVector(&mut ctx, &x, SexpType::String.code()).unwrap();
    let reals = Rf_coerceVector(&mut ctx, &x, SexpType::Real.code()).unwrap();

    assert_eq!(text, Value::strings(&["1", "2", "3"]));
    assert!(!ALTREP(&mut ctx, &reals));
    assert_eq!(reals, Value::real_vec(vec![1.0, 2.0, 3.0]));
}

#[test]
fn duplicate_is_an_ordinary_vector() {
    let mut ctx = RContext::new();
    let x = R_compact_intrange(&mut ctx, 4, 6).unwrap();

    let copy = Rf_duplicate(&mut ctx, &x).unwrap();

    assert!(!ALTREP(&mut ctx, &copy));
    assert_eq!(copy, Value::int_vec(vec![4, 5, 6]));
}

#[test]
fn write_materializes_and_disables_closed_forms() {
    let mut ctx = RContext::new();
    let x = R_compact_intrange(&mut ctx, 1, 4).unwrap();
    assert_eq!(ALTINTEGER_SUM(&mut ctx, &x, false).unwrap(), Value::scalar_int(10));

    SET_INTEGER_ELT(&mut ctx, &x, 0, 100).unwrap();

    assert!(ALTREP(&mut ctx, &x));
    assert_eq!(INTEGER_ELT(&mut ctx, &x, 0).unwrap(), 100);
    assert_eq!(ALTINTEGER_SUM(&mut ctx, &x, false).unwrap(), Value::scalar_int(109));
    assert_eq!(INTEGER_IS_SORTED(&mut ctx, &x).unwrap(), i32::MIN);
}

#[test]
fn out_of_range_bounds_give_real_sequence() {
    let mut ctx = RContext::new();
    let from = i64::from(i32::MIN) - 1;

    let x = R_compact_intrange(&mut ctx, from, from + 2).unwrap();

    assert_eq!(TYPEOF(&mut ctx, &x), SexpType::Real.code());
    assert_eq!(REAL_ELT(&mut ctx, &x, 2).unwrap(), -2147483647.0);
    assert_eq!(ALTREAL_MIN(&mut ctx, &x, false).unwrap(), Value::scalar_real(from as f64));
}
