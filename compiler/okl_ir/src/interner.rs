//! Identifier interning.
//!
//! The loader interns every identifier of a module once; validation then
//! only reads. A single `RwLock` over the table is enough for that pattern,
//! and lets rayon workers share one interner for the whole run.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Interning failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Every `u32` index is taken.
    Full { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Full { count } => {
                write!(f, "identifier table is full ({count} names)")
            }
        }
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct NameTable {
    ids: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

impl NameTable {
    fn push(&mut self, text: &'static str) -> Result<Name, InternError> {
        let index = u32::try_from(self.strings.len()).map_err(|_| InternError::Full {
            count: self.strings.len(),
        })?;
        let name = Name::from_index(index);
        self.strings.push(text);
        self.ids.insert(text, name);
        Ok(name)
    }
}

/// Identifier table shared by the loader and the validation stages.
pub struct StringInterner {
    table: RwLock<NameTable>,
}

/// Interner handed to threads that outlive the caller's borrow.
pub type SharedInterner = Arc<StringInterner>;

/// Names every kernel refers to: attribute markers and C type keywords.
const PREINTERNED: &[&str] = &[
    "kernel", "outer", "inner", "shared", "exclusive", "void", "bool", "char", "short", "int",
    "long", "float", "double", "size_t", "ptrdiff_t",
];

impl StringInterner {
    pub fn new() -> Self {
        let mut table = NameTable::default();
        let _ = table.push("");
        for word in PREINTERNED {
            let _ = table.push(word);
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Intern `s`, or fail when the table is full.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(name) = self.get(s) {
            return Ok(name);
        }
        let mut table = self.table.write();
        // Another thread may have inserted it between the two locks.
        if let Some(&name) = table.ids.get(s) {
            return Ok(name);
        }
        // Names outlive every AST built from them
        table.push(Box::leak(s.to_owned().into_boxed_str()))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics when the table is full; loaders use [`try_intern`](Self::try_intern).
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The string behind `name`, or `""` for a name from another interner.
    pub fn lookup(&self, name: Name) -> &str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// The name of `s` if it was interned before.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().ids.get(s).copied()
    }

    /// Number of names, the empty string included.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// True when only the empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
