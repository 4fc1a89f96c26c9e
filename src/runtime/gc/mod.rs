pub mod gc_handle;
pub mod gc_heap;
pub mod heap_entry;

pub use gc_handle::GcHandle;
pub use gc_heap::GcHeap;
