//! GNU R's C entry points.
//!
//! Each function carries the name native code uses for it, takes the
//! calling context first and then GNU R's arguments in GNU R's order. A
//! `SEXP` result is a [`Value`]; operations that can raise an R error return
//! [`RResult`]. Entry is logged at `trace` level when
//! [`BridgeConfig::trace_upcalls`] is set.
//!
//! [`Value`]: crate::runtime::value::Value
//! [`RResult`]: crate::error::RResult
//! [`BridgeConfig::trace_upcalls`]: crate::config::BridgeConfig::trace_upcalls
#![allow(non_snake_case)]

pub mod altrep;
pub mod attrib;
pub mod coerce;
pub mod env;
pub mod extptr;
pub mod lists;
pub mod memory;
pub mod protect;

pub use altrep::*;
pub use attrib::*;
pub use coerce::*;
pub use env::*;
pub use extptr::*;
pub use lists::*;
pub use memory::*;
pub use protect::*;


/// Every entry point, grouped as in the submodules.
#[cfg(test)]
pub(crate) static UPCALLS: &[&str] = &[
    // memory
    "Rf_allocVector",
    "Rf_ScalarInteger",
    "Rf_ScalarReal",
    "Rf_ScalarLogical",
    "Rf_ScalarString",
    "Rf_ScalarComplex",
    "Rf_ScalarRaw",
    "Rf_mkChar",
    "Rf_mkString",
    "Rf_install",
    "PRINTNAME",
    "Rf_length",
    "TYPEOF",
    "INTEGER_ELT",
    "REAL_ELT",
    "LOGICAL_ELT",
    "COMPLEX_ELT",
    "RAW_ELT",
    "STRING_ELT",
    "VECTOR_ELT",
    "SET_INTEGER_ELT",
    "SET_REAL_ELT",
    "SET_LOGICAL_ELT",
    "SET_COMPLEX_ELT",
    "SET_RAW_ELT",
    "SET_STRING_ELT",
    "SET_VECTOR_ELT",
    "DATAPTR",
    "NAMED",
    "SET_NAMED",
    "MARK_NOT_MUTABLE",
    "Rf_duplicate",
    "Rf_shallow_duplicate",
    // attributes
    "ATTRIB",
    "Rf_getAttrib",
    "Rf_setAttrib",
    "Rf_namesgets",
    "Rf_classgets",
    "Rf_inherits",
    "DUPLICATE_ATTRIB",
    "SHALLOW_DUPLICATE_ATTRIB",
    "Rf_copyMostAttrib",
    "IS_S4_OBJECT",
    "SET_S4_OBJECT",
    "UNSET_S4_OBJECT",
    // environments
    "R_GlobalEnv",
    "R_NewEnv",
    "Rf_defineVar",
    "Rf_findVarInFrame",
    "Rf_findVar",
    "R_existsVarInFrame",
    "R_lockEnvironment",
    "R_EnvironmentIsLocked",
    "R_lockBinding",
    "R_unLockBinding",
    "R_BindingIsLocked",
    // external pointers
    "R_MakeExternalPtr",
    "R_ExternalPtrAddr",
    "R_ExternalPtrTag",
    "R_ExternalPtrProtected",
    "R_ClearExternalPtr",
    "R_SetExternalPtrAddr",
    "R_SetExternalPtrTag",
    "R_SetExternalPtrProtected",
    // protection
    "PROTECT",
    "UNPROTECT",
    "UNPROTECT_PTR",
    "R_ProtectWithIndex",
    "R_Reprotect",
    "R_PreserveObject",
    "R_ReleaseObject",
    "R_gc",
    // coercion
    "Rf_asInteger",
    "Rf_asReal",
    "Rf_asLogical",
    "Rf_asChar",
    "Rf_coerceVector",
    "Rf_asCharacterFactor",
    // lists
    "CAR",
    "CDR",
    "TAG",
    "CAAR",
    "CDAR",
    "CADR",
    "CDDR",
    "CADDR",
    "CDDDR",
    "CADDDR",
    "CAD4R",
    "SETCAR",
    "SETCDR",
    "SET_TAG",
    "SETCADR",
    "SETCADDR",
    "SETCADDDR",
    "SETCAD4R",
    "Rf_cons",
    "Rf_lcons",
    "Rf_list1",
    "Rf_list2",
    "Rf_list3",
    "Rf_list4",
    "Rf_VectorToPairList",
    "Rf_PairToVectorList",
    // ALTREP
    "R_make_altinteger_class",
    "R_make_altreal_class",
    "R_make_altlogical_class",
    "R_make_altstring_class",
    "R_make_altcomplex_class",
    "R_make_altraw_class",
    "R_set_altrep_Length_method",
    "R_set_altrep_Duplicate_method",
    "R_set_altinteger_Elt_method",
    "R_set_altinteger_Get_region_method",
    "R_set_altinteger_Is_sorted_method",
    "R_set_altinteger_No_NA_method",
    "R_set_altinteger_Sum_method",
    "R_set_altinteger_Min_method",
    "R_set_altinteger_Max_method",
    "R_set_altreal_Elt_method",
    "R_set_altreal_Get_region_method",
    "R_set_altreal_Is_sorted_method",
    "R_set_altreal_No_NA_method",
    "R_set_altreal_Sum_method",
    "R_set_altreal_Min_method",
    "R_set_altreal_Max_method",
    "R_set_altlogical_Elt_method",
    "R_set_altlogical_Get_region_method",
    "R_set_altlogical_Is_sorted_method",
    "R_set_altlogical_No_NA_method",
    "R_set_altlogical_Sum_method",
    "R_set_altstring_Elt_method",
    "R_set_altstring_Set_elt_method",
    "R_set_altstring_Is_sorted_method",
    "R_set_altstring_No_NA_method",
    "R_set_altcomplex_Elt_method",
    "R_set_altcomplex_Get_region_method",
    "R_set_altraw_Elt_method",
    "R_set_altraw_Get_region_method",
    "R_set_altvec_Dataptr_method",
    "R_new_altrep",
    "R_altrep_data1",
    "R_altrep_data2",
    "R_set_altrep_data1",
    "R_set_altrep_data2",
    "ALTREP",
    "R_altrep_inherits",
    "R_altrep_class_name",
    "INTEGER_GET_REGION",
    "REAL_GET_REGION",
    "LOGICAL_GET_REGION",
    "COMPLEX_GET_REGION",
    "RAW_GET_REGION",
    "INTEGER_IS_SORTED",
    "REAL_IS_SORTED",
    "LOGICAL_IS_SORTED",
    "STRING_IS_SORTED",
    "INTEGER_NO_NA",
    "REAL_NO_NA",
    "LOGICAL_NO_NA",
    "STRING_NO_NA",
    "ALTINTEGER_SUM",
    "ALTINTEGER_MIN",
    "ALTINTEGER_MAX",
    "ALTREAL_SUM",
    "ALTREAL_MIN",
    "ALTREAL_MAX",
    "ALTLOGICAL_SUM",
    "R_compact_intrange",
];
