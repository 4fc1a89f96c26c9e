use tracing::debug;

use crate::{
    error::{RError, RResult},
    runtime::{context::RContext, vector::Element},
};

use super::class::{
    AltClassDescriptor, AltClassId, AltKind, AltVecMethods, DataptrMethod, DuplicateMethod,
    EltMethod, GetRegionMethod, IsSortedMethod, LengthMethod, NoNaMethod, SetEltMethod,
    SummaryMethod,
};

/// Class table of one context. Ids are never reused.
#[derive(Debug, Default)]
pub struct AltrepRegistry {
    classes: Vec<AltClassDescriptor>,
}

impl AltrepRegistry {
    pub fn register(&mut self, descriptor: AltClassDescriptor) -> AltClassId {
        let id = AltClassId(self.classes.len() as u32);
        debug!(
            class = %descriptor.class_name,
            package = %descriptor.package_name,
            kind = ?descriptor.kind,
            id = id.index(),
            "registered ALTREP class"
        );
        self.classes.push(descriptor);
        id
    }

    pub fn get(&self, id: AltClassId) -> Option<&AltClassDescriptor> {
        self.classes.get(id.index())
    }

    pub fn get_mut(&mut self, id: AltClassId) -> Option<&mut AltClassDescriptor> {
        self.classes.get_mut(id.index())
    }

    pub fn find(&self, class_name: &str, package_name: &str) -> Option<AltClassId> {
        self.classes
            .iter()
            .position(|c| c.class_name == class_name && c.package_name == package_name)
            .map(|index| AltClassId(index as u32))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn descriptor(&self, id: AltClassId) -> RResult<&AltClassDescriptor> {
        self.get(id)
            .ok_or_else(|| RError::should_not_reach_here(format!("unknown ALTREP class #{}", id.index())))
    }

    pub(crate) fn descriptor_mut(&mut self, id: AltClassId) -> RResult<&mut AltClassDescriptor> {
        self.get_mut(id)
            .ok_or_else(|| RError::should_not_reach_here(format!("unknown ALTREP class #{}", id.index())))
    }

    pub(crate) fn vec_methods<T: Element>(&self, id: AltClassId) -> RResult<&AltVecMethods<T>> {
        let descriptor = self.descriptor(id)?;
        T::alt_methods(&descriptor.typed)
            .ok_or_else(|| kind_mismatch::<T>(&descriptor.class_name, descriptor.kind))
    }

    pub(crate) fn vec_methods_mut<T: Element>(
        &mut self,
        id: AltClassId,
    ) -> RResult<&mut AltVecMethods<T>> {
        let descriptor = self.descriptor_mut(id)?;
        let (name, kind) = (descriptor.class_name.clone(), descriptor.kind);
        T::alt_methods_mut(&mut descriptor.typed).ok_or_else(|| kind_mismatch::<T>(&name, kind))
    }
}

fn kind_mismatch<T: Element>(class_name: &str, kind: AltKind) -> RError {
    RError::should_not_reach_here(format!(
        "ALTREP class '{}' of kind {:?} has no {} methods",
        class_name,
        kind,
        T::TYPE.name()
    ))
}

/// Class registration and method setters.
impl RContext {
    pub fn make_alt_class(
        &mut self,
        kind: AltKind,
        class_name: &str,
        package_name: &str,
        owner: usize,
    ) -> AltClassId {
        self.altrep
            .register(AltClassDescriptor::new(kind, class_name, package_name, owner))
    }

    pub fn altrep_registry(&self) -> &AltrepRegistry {
        &self.altrep
    }

    pub fn set_length_method(&mut self, id: AltClassId, method: LengthMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.length = Some(method);
        Ok(())
    }

    pub fn set_duplicate_method(&mut self, id: AltClassId, method: DuplicateMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.duplicate = Some(method);
        Ok(())
    }

    pub fn set_is_sorted_method(&mut self, id: AltClassId, method: IsSortedMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.is_sorted = Some(method);
        Ok(())
    }

    pub fn set_no_na_method(&mut self, id: AltClassId, method: NoNaMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.no_na = Some(method);
        Ok(())
    }

    pub fn set_sum_method(&mut self, id: AltClassId, method: SummaryMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.sum = Some(method);
        Ok(())
    }

    pub fn set_min_method(&mut self, id: AltClassId, method: SummaryMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.min = Some(method);
        Ok(())
    }

    pub fn set_max_method(&mut self, id: AltClassId, method: SummaryMethod) -> RResult<()> {
        self.altrep.descriptor_mut(id)?.max = Some(method);
        Ok(())
    }

    pub fn set_elt_method<T: Element>(&mut self, id: AltClassId, method: EltMethod<T>) -> RResult<()> {
        self.altrep.vec_methods_mut::<T>(id)?.elt = Some(method);
        Ok(())
    }

    pub fn set_get_region_method<T: Element>(
        &mut self,
        id: AltClassId,
        method: GetRegionMethod<T>,
    ) -> RResult<()> {
        self.altrep.vec_methods_mut::<T>(id)?.get_region = Some(method);
        Ok(())
    }

    pub fn set_dataptr_method<T: Element>(
        &mut self,
        id: AltClassId,
        method: DataptrMethod<T>,
    ) -> RResult<()> {
        self.altrep.vec_methods_mut::<T>(id)?.dataptr = Some(method);
        Ok(())
    }

    pub fn set_set_elt_method<T: Element>(
        &mut self,
        id: AltClassId,
        method: SetEltMethod<T>,
    ) -> RResult<()> {
        self.altrep.vec_methods_mut::<T>(id)?.set_elt = Some(method);
        Ok(())
    }
}
