//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs.

mod repr;
pub mod set;
pub mod source;

pub use self::repr::Symbol;
pub use self::set::SymbolBitSet;
pub use self::source::SymbolSource;
