//! ALTREP: vectors whose storage and accessors are supplied by native code.
//!
//! A class is registered once per context with [`RContext::make_alt_class`]
//! and collects optional methods. Instances are ordinary [`Value`] vectors
//! carrying the class id and two opaque data slots, so every other part of
//! the bridge treats them like plain vectors. Missing methods fall back
//! through [`dispatch`]:
//!
//! - element reads: region method, element loop, materialization
//! - materialization: `Dataptr`, element loop, region method
//! - sortedness: `Is_sorted`, else probing the elements
//! - completeness: `No_NA`, else a cached scan
//!
//! [`Value`]: crate::runtime::value::Value
//! [`RContext::make_alt_class`]: crate::runtime::context::RContext::make_alt_class
pub mod class;
pub mod compact;
pub mod dispatch;
pub mod instance;
pub mod registry;
pub mod sortedness;
pub mod summary;

pub use class::{
    AltClassDescriptor, AltClassId, AltKind, AltTypedMethods, AltVecMethods, AltrepData,
};
pub use dispatch::RegionBuffer;
pub use instance::{
    altrep_class_of, altrep_data1, altrep_data2, is_altrep, set_altrep_data1, set_altrep_data2,
};
pub use registry::AltrepRegistry;
pub use sortedness::Sortedness;
