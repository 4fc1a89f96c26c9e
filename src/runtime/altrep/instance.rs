use crate::{
    error::{RError, RResult},
    runtime::{
        char_cell::CharCell,
        context::RContext,
        value::{Value, match_vector},
        vector::{Complex, Element, Logical, Vector},
    },
};

use super::class::{AltClassId, AltKind, AltrepData};

fn instance<T: Element>(class: AltClassId, data: AltrepData) -> Value {
    T::wrap(Vector::<T>::from_altrep(class, data).into_ref())
}

impl RContext {
    /// `R_new_altrep`: a vector of the class's kind backed by `data1` and
    /// `data2`.
    pub fn new_altrep_instance(
        &mut self,
        class: AltClassId,
        data1: Value,
        data2: Value,
    ) -> RResult<Value> {
        let kind = self.altrep.descriptor(class)?.kind;
        let data = AltrepData::new(data1, data2);
        let value = match kind {
            AltKind::Integer => instance::<i32>(class, data),
            AltKind::Real => instance::<f64>(class, data),
            AltKind::Logical => instance::<Logical>(class, data),
            AltKind::String => instance::<CharCell>(class, data),
            AltKind::Complex => instance::<Complex>(class, data),
            AltKind::Raw => instance::<u8>(class, data),
        };
        Ok(self.alloc(value))
    }

    /// `R_altrep_inherits`.
    pub fn altrep_inherits(&self, x: &Value, class: AltClassId) -> bool {
        altrep_class_of(x) == Some(class)
    }

    /// Class and package name of an ALTREP instance.
    pub fn altrep_class_name(&self, x: &Value) -> Option<(String, String)> {
        let descriptor = self.altrep.get(altrep_class_of(x)?)?;
        Some((descriptor.class_name.clone(), descriptor.package_name.clone()))
    }
}

/// `ALTREP(x)`.
pub fn is_altrep(x: &Value) -> bool {
    altrep_class_of(x).is_some()
}

pub fn altrep_class_of(x: &Value) -> Option<AltClassId> {
    match_vector!(x, v => v.borrow().altrep_class(), _ => None)
}

fn not_altrep(x: &Value) -> RError {
    RError::should_not_reach_here(format!("'{}' object is not an ALTREP instance", x.type_name()))
}

fn read_data<R>(x: &Value, f: impl FnOnce(&AltrepData) -> R) -> RResult<R> {
    let result = match_vector!(x, v => v.borrow().altrep_data().map(f), _ => None);
    result.ok_or_else(|| not_altrep(x))
}

fn write_data(x: &Value, f: impl FnOnce(&mut AltrepData)) -> RResult<()> {
    let result = match_vector!(x, v => v.borrow_mut().altrep_data_mut().map(f), _ => None);
    result.ok_or_else(|| not_altrep(x))
}

/// `R_altrep_data1`.
pub fn altrep_data1(x: &Value) -> RResult<Value> {
    read_data(x, AltrepData::data1)
}

/// `R_altrep_data2`.
pub fn altrep_data2(x: &Value) -> RResult<Value> {
    read_data(x, AltrepData::data2)
}

/// `R_set_altrep_data1`.
pub fn set_altrep_data1(x: &Value, value: Value) -> RResult<()> {
    write_data(x, |data| data.set_data1(value))
}

/// `R_set_altrep_data2`.
pub fn set_altrep_data2(x: &Value, value: Value) -> RResult<()> {
    write_data(x, |data| data.set_data2(value))
}
