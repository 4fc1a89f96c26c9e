use rnative::runtime::{context::RContext, symbol::unbound_value, value::Value};
use rnative::upcalls::{
    NAMED, R_BindingIsLocked, R_EnvironmentIsLocked, R_GlobalEnv, R_NewEnv, R_existsVarInFrame,
    R_lockBinding, R_lockEnvironment, R_unLockBinding, Rf_ScalarInteger, Rf_defineVar,
    Rf_findVar, Rf_findVarInFrame, Rf_install,
};

fn is_unbound(x: &Value) -> bool {
    matches!(x, Value::Symbol(s) if std::rc::Rc::ptr_eq(s, &unbound_value()))
}

#[test]
fn define_and_find_in_frame() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let sym = Rf_install(&mut ctx, "x");
    let x = Rf_ScalarInteger(&mut ctx, 1);

    Rf_defineVar(&mut ctx, &sym, x.clone(), &global).unwrap();

    let found = Rf_findVarInFrame(&mut ctx, &global, &sym).unwrap();
    assert!(found.ptr_eq(&x));
    assert!(R_existsVarInFrame(&mut ctx, &global, &sym).unwrap());
    assert_eq!(NAMED(&mut ctx, &x), 1);
}

#[test]
fn find_var_walks_enclosures() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let child = R_NewEnv(&mut ctx, &global).unwrap();
    let sym = Rf_install(&mut ctx, "outer");
    Rf_defineVar(&mut ctx, &sym, Value::scalar_int(5), &global).unwrap();

    let in_frame = Rf_findVarInFrame(&mut ctx, &child, &sym).unwrap();
    let inherited = Rf_findVar(&mut ctx, &sym, &child).unwrap();

    assert!(is_unbound(&in_frame));
    assert_eq!(inherited, Value::scalar_int(5));
    assert!(!R_existsVarInFrame(&mut ctx, &child, &sym).unwrap());
}

#[test]
fn missing_binding_is_unbound_value() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let sym = Rf_install(&mut ctx, "nowhere");

    let found = Rf_findVar(&mut ctx, &sym, &global).unwrap();

    assert!(is_unbound(&found));
}

#[test]
fn locked_environment_rejects_new_bindings() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let env = R_NewEnv(&mut ctx, &global).unwrap();
    let a = Rf_install(&mut ctx, "a");
    let b = Rf_install(&mut ctx, "b");
    Rf_defineVar(&mut ctx, &a, Value::scalar_int(1), &env).unwrap();

    R_lockEnvironment(&mut ctx, &env, false).unwrap();

    assert!(R_EnvironmentIsLocked(&mut ctx, &env).unwrap());
    Rf_defineVar(&mut ctx, &a, Value::scalar_int(2), &env).unwrap();
    let err = Rf_defineVar(&mut ctx, &b, Value::scalar_int(3), &env).unwrap_err();
    assert_eq!(err.message(), "cannot add bindings to a locked environment");
    assert_eq!(Rf_findVarInFrame(&mut ctx, &env, &a).unwrap(), Value::scalar_int(2));
}

#[test]
fn binding_locks_toggle() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let env = R_NewEnv(&mut ctx, &global).unwrap();
    let sym = Rf_install(&mut ctx, "v");
    Rf_defineVar(&mut ctx, &sym, Value::scalar_int(1), &env).unwrap();

    R_lockBinding(&mut ctx, &sym, &env).unwrap();
    let err = Rf_defineVar(&mut ctx, &sym, Value::scalar_int(2), &env).unwrap_err();
    assert_eq!(err.message(), "cannot change value of locked binding for 'v'");
    assert!(R_BindingIsLocked(&mut ctx, &sym, &env).unwrap());

    R_unLockBinding(&mut ctx, &sym, &env).unwrap();
    assert!(!R_BindingIsLocked(&mut ctx, &sym, &env).unwrap());
    Rf_defineVar(&mut ctx, &sym, Value::scalar_int(2), &env).unwrap();
}

#[test]
fn rejected_binding_leaves_value_unshared() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let env = R_NewEnv(&mut ctx, &global).unwrap();
    let fixed = Rf_install(&mut ctx, "fixed");
    let fresh = Rf_install(&mut ctx, "fresh");
    Rf_defineVar(&mut ctx, &fixed, Value::Null, &env).unwrap();
    R_lockBinding(&mut ctx, &fixed, &env).unwrap();
    let x = Rf_ScalarInteger(&mut ctx, 1);
    let y = Rf_ScalarInteger(&mut ctx, 2);

    assert!(Rf_defineVar(&mut ctx, &fixed, x.clone(), &env).is_err());
    R_lockEnvironment(&mut ctx, &env, false).unwrap();
    assert!(Rf_defineVar(&mut ctx, &fresh, y.clone(), &env).is_err());

    assert_eq!(NAMED(&mut ctx, &x), 0);
    assert_eq!(NAMED(&mut ctx, &y), 0);
}

#[test]
fn lock_with_bindings_locks_existing() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let env = R_NewEnv(&mut ctx, &global).unwrap();
    let sym = Rf_install(&mut ctx, "fixed");
    Rf_defineVar(&mut ctx, &sym, Value::Null, &env).unwrap();

    R_lockEnvironment(&mut ctx, &env, true).unwrap();

    assert!(R_BindingIsLocked(&mut ctx, &sym, &env).unwrap());
}

#[test]
fn argument_errors() {
    let mut ctx = RContext::new();
    let global = R_GlobalEnv(&mut ctx);
    let sym = Rf_install(&mut ctx, "x");

    let null_env = Rf_findVar(&mut ctx, &sym, &Value::Null).unwrap_err();
    let not_env = R_NewEnv(&mut ctx, &Value::scalar_int(1)).unwrap_err();
    let not_sym = Rf_findVarInFrame(&mut ctx, &global, &Value::strings(&["x"])).unwrap_err();
    let missing = Rf_install(&mut ctx, "missing");
    let unknown = R_BindingIsLocked(&mut ctx, &missing, &global);

    assert_eq!(null_env.message(), "use of NULL environment is defunct");
    assert_eq!(not_env.message(), "argument is not an environment");
    assert_eq!(not_sym.message(), "not a symbol: 'character'");
    assert_eq!(unknown.unwrap_err().message(), "no binding for \"missing\"");
}
