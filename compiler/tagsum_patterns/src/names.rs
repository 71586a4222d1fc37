//! Identifier synthesis for generated code.
//!
//! Every generated name is built from the same fragments the user wrote:
//!
//! | Name | Parts | Case | `Tree`, `node`, `val` |
//! |---|---|---|---|
//! | case type / constructor | variant, case | UpperCamel | `TreeNode` |
//! | accessor | variant, case, field | snake | `tree_node_val` |
//! | predicate | `is`, variant, case | snake | `is_tree_node` |
//! | match operator | `match`, variant | snake | `match_tree` |
//!
//! Fresh names contain `%`, which the lexer never accepts, so they cannot
//! collide with anything written in source.

use std::sync::atomic::{AtomicU32, Ordering};

use tagsum_ir::{Name, StringInterner};

/// Output casing for [`synthesize`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IdentCase {
    /// `TreeNode`
    UpperCamel,
    /// `tree_node`
    Snake,
}

/// Split a fragment into lowercase words.
///
/// Words break on `_`, `-` and on a lowercase letter or digit followed by an
/// uppercase letter. Empty words are dropped.
pub fn split_words(fragment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in fragment.chars() {
        if ch == '_' || ch == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Join the words of all `parts` in `case`.
pub fn synthesize(parts: &[&str], case: IdentCase) -> String {
    let words = parts.iter().flat_map(|part| split_words(part));
    match case {
        IdentCase::Snake => words.collect::<Vec<_>>().join("_"),
        IdentCase::UpperCamel => words.map(|word| capitalize(&word)).collect(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static FRESH_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A process-wide unique identifier of the form `prefix%N`.
pub fn fresh_name(prefix: &str) -> String {
    let n = FRESH_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}%{n}")
}

/// Interning front end for the naming conventions above.
#[derive(Copy, Clone)]
pub struct NameSynthesizer<'a> {
    interner: &'a StringInterner,
}

impl<'a> NameSynthesizer<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        NameSynthesizer { interner }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Source text of `name`.
    pub fn text(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    fn make(&self, parts: &[&str], case: IdentCase) -> Name {
        self.interner.intern(&synthesize(parts, case))
    }

    /// Case type name, also used for its constructor.
    pub fn case_type(&self, variant: Name, case: Name) -> Name {
        self.make(&[self.text(variant), self.text(case)], IdentCase::UpperCamel)
    }

    pub fn accessor(&self, variant: Name, case: Name, field: Name) -> Name {
        self.make(
            &[self.text(variant), self.text(case), self.text(field)],
            IdentCase::Snake,
        )
    }

    pub fn predicate(&self, variant: Name, case: Name) -> Name {
        self.make(&["is", self.text(variant), self.text(case)], IdentCase::Snake)
    }

    pub fn match_operator(&self, variant: Name) -> Name {
        self.make(&["match", self.text(variant)], IdentCase::Snake)
    }

    pub fn fresh(&self, prefix: &str) -> Name {
        self.interner.intern(&fresh_name(prefix))
    }
}
