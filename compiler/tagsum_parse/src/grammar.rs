//! Grammar productions.
//!
//! Each module extends `Parser` with methods for one group of productions:
//!
//! - [`attr`]: `#[...]` option lists
//! - [`item`]: `variant` declarations and `fn` definitions
//! - [`expr`]: expressions, blocks and match use sites

mod attr;
mod expr;
mod item;
