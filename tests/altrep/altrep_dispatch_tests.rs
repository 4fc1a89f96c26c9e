use rnative::error::{RError, RResult};
use rnative::runtime::{altrep::AltClassId, char_cell::CharCell, context::RContext, value::Value};
use rnative::upcalls::{
    ALTINTEGER_MAX, ALTINTEGER_SUM, ALTREP, DATAPTR, INTEGER_ELT, INTEGER_GET_REGION,
    INTEGER_IS_SORTED, INTEGER_NO_NA, PROTECT, R_altrep_class_name, R_altrep_data1,
    R_altrep_inherits, R_make_altinteger_class, R_make_altreal_class, R_make_altstring_class,
    R_new_altrep, R_set_altinteger_Elt_method, R_set_altinteger_Max_method,
    R_set_altinteger_Sum_method, R_set_altreal_Elt_method, R_set_altreal_Get_region_method,
    R_set_altrep_Duplicate_method, R_set_altrep_Length_method, R_set_altstring_Elt_method,
    R_set_altstring_Set_elt_method, REAL_ELT, REAL_GET_REGION, Rf_duplicate, Rf_length,
    Rf_mkChar, SET_STRING_ELT, STRING_ELT, STRING_NO_NA,
};

/// `data1` is `c(length, value)`.
fn rep_state(ctx: &mut RContext, x: &Value) -> RResult<(usize, i32)> {
    let state = R_altrep_data1(ctx, x)?;
    let len = INTEGER_ELT(ctx, &state, 0)?;
    let value = INTEGER_ELT(ctx, &state, 1)?;
    Ok((len as usize, value))
}

fn rep_length(ctx: &mut RContext, x: &Value) -> RResult<usize> {
    Ok(rep_state(ctx, x)?.0)
}

fn rep_elt(ctx: &mut RContext, x: &Value, i: usize) -> RResult<i32> {
    let (len, value) = rep_state(ctx, x)?;
    if i >= len {
        return Err(RError::error("subscript out of bounds"));
    }
    Ok(value)
}

fn defer_sum(_ctx: &mut RContext, _x: &Value, _na_rm: bool) -> RResult<Value> {
    Ok(Value::Null)
}

fn rep_max(ctx: &mut RContext, x: &Value, _na_rm: bool) -> RResult<Value> {
    Ok(Value::scalar_int(rep_state(ctx, x)?.1))
}

fn plain_copy(ctx: &mut RContext, x: &Value, _deep: bool) -> RResult<Value> {
    let (len, value) = rep_state(ctx, x)?;
    Ok(Value::int_vec(vec![value; len]))
}

fn leaky_elt(ctx: &mut RContext, _x: &Value, i: usize) -> RResult<i32> {
    PROTECT(ctx, Value::Null)?;
    Ok(i as i32)
}

fn rep_class(ctx: &mut RContext) -> AltClassId {
    let class = R_make_altinteger_class(ctx, "rep_int", "reptest", 0);
    R_set_altrep_Length_method(ctx, class, rep_length).unwrap();
    R_set_altinteger_Elt_method(ctx, class, rep_elt).unwrap();
    class
}

fn rep(ctx: &mut RContext, class: AltClassId, len: i32, value: i32) -> Value {
    R_new_altrep(ctx, class, Value::int_vec(vec![len, value]), Value::Null).unwrap()
}

fn halves_length(ctx: &mut RContext, x: &Value) -> RResult<usize> {
    let state = R_altrep_data1(ctx, x)?;
    Ok(INTEGER_ELT(ctx, &state, 0)? as usize)
}

fn halves_region(ctx: &mut RContext, x: &Value, from: usize, buf: &mut [f64]) -> RResult<usize> {
    let len = halves_length(ctx, x)?;
    let count = buf.len().min(len.saturating_sub(from));
    for (offset, slot) in buf[..count].iter_mut().enumerate() {
        *slot = (from + offset) as f64 / 2.0;
    }
    Ok(count)
}

fn backing_strings(ctx: &mut RContext, x: &Value) -> RResult<Value> {
    R_altrep_data1(ctx, x)
}

fn backing_length(ctx: &mut RContext, x: &Value) -> RResult<usize> {
    let backing = backing_strings(ctx, x)?;
    Rf_length(ctx, &backing)
}

fn string_elt(ctx: &mut RContext, x: &Value, i: usize) -> RResult<CharCell> {
    let backing = backing_strings(ctx, x)?;
    match STRING_ELT(ctx, &backing, i)? {
        Value::Char(cell) => Ok(cell),
        _ => Err(RError::error("backing store is not a character vector")),
    }
}

fn three(_ctx: &mut RContext, _x: &Value) -> RResult<usize> {
    Ok(3)
}

fn zero_real(_ctx: &mut RContext, _x: &Value, _i: usize) -> RResult<f64> {
    Ok(0.0)
}

fn string_set_elt(ctx: &mut RContext, x: &Value, i: usize, v: CharCell) -> RResult<()> {
    let backing = backing_strings(ctx, x)?;
    SET_STRING_ELT(ctx, &backing, i, &Value::Char(v))
}

#[test]
fn elements_come_from_class_methods() {
    let mut ctx = RContext::new();
    let class = rep_class(&mut ctx);
    let x = rep(&mut ctx, class, 4, 7);

    assert!(ALTREP(&mut ctx, &x));
    assert_eq!(Rf_length(&mut ctx, &x).unwrap(), 4);
    assert_eq!(INTEGER_ELT(&mut ctx, &x, 3).unwrap(), 7);
    assert!(INTEGER_ELT(&mut ctx, &x, 4).is_err());
}

#[test]
fn region_falls_back_to_elements_and_clamps() {
    let mut ctx = RContext::new();
    let class = rep_class(&mut ctx);
    let x = rep(&mut ctx, class, 3, 2);

    let mut buf = [0; 5];
    let written = INTEGER_GET_REGION(&mut ctx, &x, 1, &mut buf).unwrap();

    assert_eq!(written, 2);
    assert_eq!(buf, [2, 2, 0, 0, 0]);
}

#[test]
fn region_method_serves_element_reads() {
    let mut ctx = RContext::new();
    let class = R_make_altreal_class(&mut ctx, "halves", "reptest", 0);
    R_set_altrep_Length_method(&mut ctx, class, halves_length).unwrap();
    R_set_altreal_Get_region_method(&mut ctx, class, halves_region).unwrap();
    let x = R_new_altrep(&mut ctx, class, Value::int_vec(vec![5]), Value::Null).unwrap();

    let mut buf = [0.0; 2];
    let written = REAL_GET_REGION(&mut ctx, &x, 3, &mut buf).unwrap();

    assert_eq!(written, 2);
    assert_eq!(buf, [1.5, 2.0]);
    assert_eq!(REAL_ELT(&mut ctx, &x, 1).unwrap(), 0.5);
}

#[test]
fn dataptr_materializes_through_region() {
    let mut ctx = RContext::new();
    let class = R_make_altreal_class(&mut ctx, "halves", "reptest", 0);
    R_set_altrep_Length_method(&mut ctx, class, halves_length).unwrap();
    R_set_altreal_Get_region_method(&mut ctx, class, halves_region).unwrap();
    let x = R_new_altrep(&mut ctx, class, Value::int_vec(vec![3]), Value::Null).unwrap();

    DATAPTR(&mut ctx, &x).unwrap();

    assert_eq!(x.to_string(), "c(0, 0.5, 1)");
    assert!(ALTREP(&mut ctx, &x));
}

#[test]
fn summaries_prefer_class_methods() {
    let mut ctx = RContext::new();
    let class = rep_class(&mut ctx);
    R_set_altinteger_Sum_method(&mut ctx, class, defer_sum).unwrap();
    R_set_altinteger_Max_method(&mut ctx, class, rep_max).unwrap();
    let x = rep(&mut ctx, class, 4, 3);

    assert_eq!(ALTINTEGER_SUM(&mut ctx, &x, false).unwrap(), Value::scalar_int(12));
    assert_eq!(ALTINTEGER_MAX(&mut ctx, &x, false).unwrap(), Value::scalar_int(3));
}

#[test]
fn sortedness_and_na_fall_back_to_scans() {
    let mut ctx = RContext::new();
    let class = rep_class(&mut ctx);
    let x = rep(&mut ctx, class, 3, 1);

    assert_eq!(INTEGER_IS_SORTED(&mut ctx, &x).unwrap(), 1);
    assert!(INTEGER_NO_NA(&mut ctx, &x).unwrap());
    assert!(INTEGER_IS_SORTED(&mut ctx, &Value::real_vec(vec![1.0])).is_err());
}

#[test]
fn string_writes_go_through_set_elt() {
    let mut ctx = RContext::new();
    let class = R_make_altstring_class(&mut ctx, "backed", "reptest", 0);
    R_set_altrep_Length_method(&mut ctx, class, backing_length).unwrap();
    R_set_altstring_Elt_method(&mut ctx, class, string_elt).unwrap();
    R_set_altstring_Set_elt_method(&mut ctx, class, string_set_elt).unwrap();
    let backing = Value::strings(&["a", "b"]);
    let x = R_new_altrep(&mut ctx, class, backing.clone(), Value::Null).unwrap();
    assert!(STRING_NO_NA(&mut ctx, &x).unwrap());

    let z = Rf_mkChar(&mut ctx, "z");
    SET_STRING_ELT(&mut ctx, &x, 1, &z).unwrap();
    SET_STRING_ELT(&mut ctx, &x, 0, &Value::Char(CharCell::na())).unwrap();

    assert_eq!(backing.to_string(), "c(NA, \"z\")");
    assert!(STRING_ELT(&mut ctx, &x, 1).unwrap().ptr_eq(&z));
    assert!(!STRING_NO_NA(&mut ctx, &x).unwrap());
}

#[test]
fn class_identity() {
    let mut ctx = RContext::new();
    let class = rep_class(&mut ctx);
    let other = R_make_altinteger_class(&mut ctx, "other", "reptest", 0);
    let x = rep(&mut ctx, class, 1, 1);

    assert!(R_altrep_inherits(&mut ctx, &x, class));
    assert!(!R_altrep_inherits(&mut ctx, &x, other));
    assert_eq!(
        R_altrep_class_name(&mut ctx, &x),
        Some(("rep_int".to_string(), "reptest".to_string()))
    );
    assert_eq!(R_altrep_class_name(&mut ctx, &Value::int_vec(vec![1])), None);
}

#[test]
fn wrong_kind_method_is_internal_error() {
    let mut ctx = RContext::new();
    let class = rep_class(&mut ctx);

    let err = R_set_altreal_Elt_method(&mut ctx, class, zero_real).unwrap_err();

    assert!(err.is_internal());
}

#[test]
fn duplicate_uses_class_method_or_materializes() {
    let mut ctx = RContext::new();
    let plain = rep_class(&mut ctx);
    let custom = rep_class(&mut ctx);
    R_set_altrep_Duplicate_method(&mut ctx, custom, plain_copy).unwrap();
    let a = rep(&mut ctx, plain, 2, 5);
    let b = rep(&mut ctx, custom, 3, 6);

    let a_copy = Rf_duplicate(&mut ctx, &a).unwrap();
    let b_copy = Rf_duplicate(&mut ctx, &b).unwrap();

    assert!(!ALTREP(&mut ctx, &a_copy));
    assert_eq!(a_copy, Value::int_vec(vec![5, 5]));
    assert_eq!(b_copy, Value::int_vec(vec![6, 6, 6]));
}

#[test]
fn methods_leaking_protection_are_balanced() {
    let mut ctx = RContext::new();
    let class = R_make_altinteger_class(&mut ctx, "leaky", "reptest", 0);
    R_set_altrep_Length_method(&mut ctx, class, three).unwrap();
    R_set_altinteger_Elt_method(&mut ctx, class, leaky_elt).unwrap();
    let x = R_new_altrep(&mut ctx, class, Value::Null, Value::Null).unwrap();

    let mut buf = [0; 3];
    INTEGER_GET_REGION(&mut ctx, &x, 0, &mut buf).unwrap();

    assert_eq!(buf, [0, 1, 2]);
    assert_eq!(ctx.protect_depth(), 0);
    assert_eq!(ctx.protect_stack().imbalance_count(), 3);
}
