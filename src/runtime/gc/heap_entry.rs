use crate::runtime::value::Value;

pub struct HeapEntry {
    pub(crate) value: Value,
    pub(crate) identity: usize,
    pub(crate) marked: bool,
}
