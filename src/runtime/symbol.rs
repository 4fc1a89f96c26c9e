//! Interned symbols (`SYMSXP`).
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::runtime::char_cell::CharCell;

thread_local! {
    static SYMBOL_TABLE: RefCell<HashMap<Rc<str>, Rc<Symbol>>> = RefCell::new(HashMap::new());
    static UNBOUND: Rc<Symbol> = Rc::new(Symbol { printname: CharCell::new("") });
    static MISSING_ARG: Rc<Symbol> = Rc::new(Symbol { printname: CharCell::new("") });
}

pub struct Symbol {
    printname: CharCell,
}

impl Symbol {
    pub fn name(&self) -> &str {
        self.printname.as_str().unwrap_or_default()
    }

    /// `PRINTNAME`: the cached character cell for the symbol's name.
    pub fn printname(&self) -> CharCell {
        self.printname.clone()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.name())
    }
}

/// `Rf_install`: returns the unique symbol for `name`.
pub fn install(name: &str) -> Rc<Symbol> {
    SYMBOL_TABLE.with(|table| {
        let mut table = table.borrow_mut();
        if let Some(symbol) = table.get(name) {
            return symbol.clone();
        }
        let symbol = Rc::new(Symbol {
            printname: CharCell::new(name),
        });
        table.insert(Rc::from(name), symbol.clone());
        symbol
    })
}

/// `R_UnboundValue`: a symbol outside the table, only reachable here.
pub fn unbound_value() -> Rc<Symbol> {
    UNBOUND.with(Rc::clone)
}

/// `R_MissingArg`.
pub fn missing_arg() -> Rc<Symbol> {
    MISSING_ARG.with(Rc::clone)
}
