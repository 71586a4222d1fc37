//! Generated type declarations.
//!
//! One abstract declaration per variant and one concrete declaration per
//! case. Options are carried through untouched.

use crate::ast::Options;
use crate::core_ir::CaseTag;
use crate::Name;

/// Declarations generated for one variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecls {
    pub variant: VariantDecl,
    /// Concrete case declarations, in case declaration order.
    pub cases: Vec<CaseDecl>,
}

impl TypeDecls {
    /// Total declarations: the abstract base plus one per case.
    pub fn len(&self) -> usize {
        1 + self.cases.len()
    }

    /// Never true: the abstract base is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = Decl<'_>> {
        std::iter::once(Decl::Abstract(&self.variant)).chain(self.cases.iter().map(Decl::Case))
    }

    pub fn case(&self, tag: CaseTag) -> Option<&CaseDecl> {
        self.cases.get(tag.0 as usize)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decl<'a> {
    Abstract(&'a VariantDecl),
    Case(&'a CaseDecl),
}

impl Decl<'_> {
    pub fn name(&self) -> Name {
        match self {
            Decl::Abstract(decl) => decl.name,
            Decl::Case(decl) => decl.name,
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Decl::Abstract(_))
    }
}

/// The abstract base type. It has no constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantDecl {
    pub name: Name,
    pub options: Options,
}

/// A concrete case type subtyping its variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseDecl {
    /// Case type name; also the constructor's name.
    pub name: Name,
    /// Label as declared in the variant.
    pub label: Name,
    pub parent: Name,
    pub tag: CaseTag,
    pub predicate: Name,
    pub options: Options,
    pub fields: Vec<FieldDecl>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Name,
    pub accessor: Name,
    pub options: Options,
}
