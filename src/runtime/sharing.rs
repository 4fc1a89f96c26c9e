//! Copy-on-write reference state (`NAMED`).
//!
//! A fresh object is temporary (no references), one reference makes it
//! non-shared, two or more make it shared. Permanently shared objects never
//! drop back.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sharing {
    refs: u32,
    permanent: bool,
}

impl Sharing {
    /// The `NAMED` level: 0, 1 or 2.
    pub fn named(&self) -> i32 {
        if self.permanent { 2 } else { self.refs.min(2) as i32 }
    }

    pub fn is_temporary(&self) -> bool {
        !self.permanent && self.refs == 0
    }

    pub fn is_shared(&self) -> bool {
        self.permanent || self.refs >= 2
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    pub fn increment(&mut self) {
        self.refs = self.refs.saturating_add(1);
    }

    pub fn make_permanent(&mut self) {
        self.permanent = true;
    }
}
