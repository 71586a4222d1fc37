//! String interner for identifiers.
//!
//! Interned strings are leaked, so lookups hand out `&'static str` and
//! `Name` comparisons are integer comparisons. The interner is shared between
//! the parser, the generator and the evaluator through [`SharedInterner`].

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct strings.
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(f, "interner exceeded capacity: {count} strings")
            }
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned as
    /// [`Name::EMPTY`].
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            table: RwLock::new(InternTable {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(s) {
                return Ok(Name::from_index(index));
            }
        }

        let mut guard = self.table.write();
        // Another writer may have raced us between the two locks.
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_index(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_index(index))
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the string for a `Name`.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard.strings.get(name.index()).copied().unwrap_or("")
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied().map(Name::from_index)
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// True when only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference-counted interner handle shared across compilation phases.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}
