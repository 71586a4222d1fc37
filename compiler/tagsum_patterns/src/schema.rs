//! Case schema: what the match compiler needs to know about a variant.

use rustc_hash::FxHashMap;
use tagsum_ir::{CaseTag, Name, TypeDecls};

/// One case as seen by the match compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseEntry {
    pub label: Name,
    pub tag: CaseTag,
    pub predicate: Name,
    /// Field names in declared order.
    pub fields: Vec<Name>,
}

/// Declared-order map from case label to tag and fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseSchema {
    cases: Vec<CaseEntry>,
    by_label: FxHashMap<Name, usize>,
}

impl CaseSchema {
    pub fn from_decls(decls: &TypeDecls) -> Self {
        let cases: Vec<CaseEntry> = decls
            .cases
            .iter()
            .map(|case| CaseEntry {
                label: case.label,
                tag: case.tag,
                predicate: case.predicate,
                fields: case.fields.iter().map(|field| field.name).collect(),
            })
            .collect();
        let by_label = cases
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.label, index))
            .collect();
        CaseSchema { cases, by_label }
    }

    pub fn get(&self, label: Name) -> Option<&CaseEntry> {
        self.by_label.get(&label).map(|&index| &self.cases[index])
    }

    /// Cases in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CaseEntry> {
        self.cases.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = Name> + '_ {
        self.cases.iter().map(|entry| entry.label)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
