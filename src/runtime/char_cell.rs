//! Interned character cells (`CHARSXP`).
//!
//! Equal strings share one allocation per thread. The NA cell carries no
//! text at all, so it never compares equal to the two-letter string "NA".
use std::{cell::RefCell, cmp::Ordering, collections::HashSet, fmt, rc::Rc};

thread_local! {
    static CHAR_CACHE: RefCell<HashSet<Rc<str>>> = RefCell::new(HashSet::new());
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CharCell(Option<Rc<str>>);

impl CharCell {
    /// `mkChar`: returns the cached cell for `text`.
    pub fn new(text: &str) -> Self {
        CHAR_CACHE.with(|cache| {
            let mut cache = cache.borrow_mut();
            if let Some(existing) = cache.get(text) {
                return CharCell(Some(existing.clone()));
            }
            let interned: Rc<str> = Rc::from(text);
            cache.insert(interned.clone());
            CharCell(Some(interned))
        })
    }

    /// `NA_STRING`.
    pub fn na() -> Self {
        CharCell(None)
    }

    pub fn is_na(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Identity comparison, as native code comparing `SEXP`s would see it.
    pub fn ptr_eq(&self, other: &CharCell) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Byte-order comparison of non-NA cells; `None` if either is NA.
    pub fn compare(&self, other: &CharCell) -> Option<Ordering> {
        Some(self.as_str()?.cmp(other.as_str()?))
    }
}

impl From<&str> for CharCell {
    fn from(text: &str) -> Self {
        CharCell::new(text)
    }
}

impl fmt::Display for CharCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(text) => f.write_str(text),
            None => f.write_str("NA"),
        }
    }
}

impl fmt::Debug for CharCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(text) => write!(f, "{:?}", text),
            None => f.write_str("NA_character_"),
        }
    }
}
