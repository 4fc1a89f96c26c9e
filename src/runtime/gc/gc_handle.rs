/// Slot of a registered value in the [`GcHeap`](super::GcHeap).
///
/// Handles are only meaningful to the heap that issued them and go stale
/// once a collection sweeps the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GcHandle(pub(crate) u32);

impl GcHandle {
    pub fn slot(self) -> u32 {
        self.0
    }
}
