use crate::runtime::value::Value;

/// Values kept alive by `R_PreserveObject` until released.
#[derive(Debug, Default)]
pub struct PreciousList {
    entries: Vec<Value>,
}

impl PreciousList {
    pub fn preserve(&mut self, value: Value) {
        self.entries.push(value);
    }

    /// Releases the most recent preservation of `value`; returns `false`
    /// when it was not preserved.
    pub fn release(&mut self, value: &Value) -> bool {
        match self.entries.iter().rposition(|entry| entry.ptr_eq(value)) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries.iter().any(|entry| entry.ptr_eq(value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Value] {
        &self.entries
    }
}
