use insta::assert_snapshot;
use rnative::config::BridgeConfig;
use rnative::error::RResult;
use rnative::runtime::{
    context::RContext, environment::Environment, sexp_type::SexpType, value::Value,
    vector::Complex,
};
use rnative::upcalls::{
    PRINTNAME, PROTECT, R_ExternalPtrAddr, R_MakeExternalPtr, Rf_ScalarComplex, Rf_ScalarRaw,
    Rf_asCharacterFactor, Rf_asLogical, Rf_allocVector, Rf_coerceVector, Rf_findVar, Rf_install,
    Rf_lcons, Rf_list1, Rf_mkChar, Rf_namesgets, Rf_setAttrib, SET_INTEGER_ELT, TYPEOF,
    UNPROTECT, VECTOR_ELT,
};

fn outcome(result: RResult<Value>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(err) if err.is_internal() => format!("[internal] {}", err.message()),
        Err(err) => format!("[error] {}", err.message()),
    }
}

#[test]
fn native_routine_transcript() {
    let mut ctx = RContext::new();
    let mut lines = Vec::new();

    let x = Rf_allocVector(&mut ctx, SexpType::Integer.code(), 3).unwrap();
    let x = PROTECT(&mut ctx, x).unwrap();
    lines.push(format!("allocVector -> {}", x));

    for (i, v) in [10, 20, i32::MIN].into_iter().enumerate() {
        SET_INTEGER_ELT(&mut ctx, &x, i, v).unwrap();
    }
    lines.push(format!("SET_INTEGER_ELT -> {}", x));

    Rf_namesgets(&mut ctx, &x, Value::strings(&["a", "b", "c"])).unwrap();
    lines.push(format!("namesgets -> {}", x));

    for (label, ty) in [
        ("REALSXP", SexpType::Real),
        ("STRSXP", SexpType::String),
        ("VECSXP", SexpType::List),
    ] {
        let y = Rf_coerceVector(&mut ctx, &x, ty.code());
        lines.push(format!("coerceVector({}) -> {}", label, outcome(y)));
    }
    lines.push(format!("asLogical -> {}", Rf_asLogical(&mut ctx, &x)));

    UNPROTECT(&mut ctx, 1);
    lines.push(format!("protect depth -> {}", ctx.protect_depth()));

    assert_snapshot!(lines.join("\n"), @r###"
    allocVector -> c(0L, 0L, 0L)
    SET_INTEGER_ELT -> c(10L, 20L, NA)
    namesgets -> c(a = 10L, b = 20L, c = NA)
    coerceVector(REALSXP) -> c(a = 10, b = 20, c = NA)
    coerceVector(STRSXP) -> c(a = "10", b = "20", c = NA)
    coerceVector(VECSXP) -> list(a = 10L, b = 20L, c = NA)
    asLogical -> 1
    protect depth -> 0
    "###);
}

#[test]
fn typeof_codes() {
    let mut ctx = RContext::new();
    let f = Rf_install(&mut ctx, "f");
    let values = vec![
        Value::Null,
        f.clone(),
        Rf_list1(&mut ctx, Value::Null),
        Rf_lcons(&mut ctx, f, Value::Null),
        Rf_mkChar(&mut ctx, "x"),
        Value::logical_vec(vec![]),
        Value::int_vec(vec![]),
        Value::real_vec(vec![]),
        Rf_ScalarComplex(&mut ctx, Complex::new(1.0, 0.0)),
        Value::strings(&[]),
        Value::list(vec![]),
        R_MakeExternalPtr(&mut ctx, 1, Value::Null, Value::Null),
        Rf_ScalarRaw(&mut ctx, 0),
        Value::Environment(Environment::new(None)),
    ];

    let table: Vec<String> = values
        .iter()
        .map(|v| format!("{} {}", TYPEOF(&mut ctx, v), v.type_name()))
        .collect();

    assert_snapshot!(table.join("\n"), @r###"
    0 NULL
    1 symbol
    2 pairlist
    6 language
    9 char
    10 logical
    13 integer
    14 double
    15 complex
    16 character
    19 list
    22 externalptr
    24 raw
    4 environment
    "###);
}

#[test]
fn error_messages() {
    let mut ctx = RContext::with_config(BridgeConfig {
        protect_stack_size: 1,
        ..BridgeConfig::default()
    });
    PROTECT(&mut ctx, Value::Null).unwrap();
    let sym = Rf_install(&mut ctx, "x");
    let env = Value::Environment(Environment::new(None));
    let ints = Value::int_vec(vec![1]);

    let results = vec![
        PROTECT(&mut ctx, Value::Null),
        Rf_asCharacterFactor(&mut ctx, &ints),
        VECTOR_ELT(&mut ctx, &ints, 0),
        R_ExternalPtrAddr(&mut ctx, &Value::Null).map(|addr| Value::scalar_int(addr as i32)),
        Rf_setAttrib(&mut ctx, &Value::Null, &sym, Value::Null),
        Rf_coerceVector(&mut ctx, &env, SexpType::Integer.code()),
        Rf_coerceVector(&mut ctx, &ints, SexpType::Language.code()),
        Rf_findVar(&mut ctx, &sym, &Value::Null),
        PRINTNAME(&mut ctx, &Value::Null),
    ];
    let lines: Vec<String> = results.into_iter().map(outcome).collect();

    assert_snapshot!(lines.join("\n"), @r###"
    [error] protect(): protection stack overflow
    [error] attempting to coerce non-factor
    [error] VECTOR_ELT() can only be applied to a 'list', not a 'integer'
    [error] R_ExternalPtrAddr: argument of type 'NULL' is not an external pointer
    [error] attempt to set an attribute on NULL
    [error] environments cannot be coerced to other types
    [internal] coerceVector to 'language'
    [error] use of NULL environment is defunct
    [error] unimplemented type 'NULL' in 'PRINTNAME'
    "###);
}
