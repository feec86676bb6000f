//! Symbol table: interns names into small sequential integer ids.
//!
//! Ids are assigned in insertion order starting at zero and are never
//! reused or removed. The table is bounded; once full, only names that are
//! already present can be looked up.

use indexmap::IndexSet;

/// Maximum number of distinct names a default interner accepts.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Maximum length of a single name, in bytes.
pub const MAX_NAME_LEN: usize = 255;

/// A lightweight handle to an interned name.
///
/// Symbols are ordered by insertion order, not lexicographically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(u32);

impl Symbol {
    /// Raw id, as emitted into bytecode.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a Symbol from a raw id.
    #[inline]
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

/// The table already holds its maximum number of names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("symbol table full ({capacity} names)")]
pub struct InternerFull {
    pub capacity: usize,
}

/// Name interner. Deduplicates names and hands out sequential ids.
#[derive(Debug, Clone)]
pub struct Interner {
    names: IndexSet<String>,
    capacity: usize,
}

impl Default for Interner {
    fn default() -> Self {
        Self::with_capacity_limit(DEFAULT_CAPACITY)
    }
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interner that accepts at most `capacity` distinct names.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            names: IndexSet::new(),
            capacity,
        }
    }

    /// Create an interner pre-filled with `names`, in order.
    ///
    /// The limit is raised to fit the seed names if needed.
    pub fn with_names<'a>(names: impl IntoIterator<Item = &'a str>, capacity: usize) -> Self {
        let names: IndexSet<String> = names.into_iter().map(str::to_owned).collect();
        let capacity = capacity.max(names.len());
        Self { names, capacity }
    }

    /// Intern a name, returning its Symbol.
    /// If the name was already interned, returns the existing Symbol.
    pub fn intern(&mut self, name: &str) -> Result<Symbol, InternerFull> {
        if let Some(index) = self.names.get_index_of(name) {
            return Ok(Symbol(index as u32));
        }

        if self.names.len() >= self.capacity {
            return Err(InternerFull {
                capacity: self.capacity,
            });
        }

        let (index, _) = self.names.insert_full(name.to_owned());
        Ok(Symbol(index as u32))
    }

    /// Look up a name without interning it.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.names.get_index_of(name).map(|i| Symbol(i as u32))
    }

    /// Resolve a Symbol back to its name.
    ///
    /// # Panics
    /// Panics if the symbol was not created by this interner.
    #[inline]
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.names[sym.0 as usize]
    }

    /// Resolve a raw runtime id, returning None for ids outside the table.
    #[inline]
    pub fn try_resolve_id(&self, id: i64) -> Option<&str> {
        let index = usize::try_from(id).ok()?;
        self.names.get_index(index).map(|s| s.as_str())
    }

    /// Number of interned names.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over all interned names with their symbols, in id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, s)| (Symbol(i as u32), s.as_str()))
    }
}
