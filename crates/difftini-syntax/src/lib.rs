//! Normalized, immutable syntax trees for structural diffing.
//!
//! Both files of a diff are built into one arena with [`Builder`], then
//! indexed once into a [`SyntaxPair`]. Indexing gives every node a pre-order
//! [`SyntaxId`], a [`ContentId`] shared by structurally equal nodes on either
//! side, and parent/sibling links that a tree matcher can follow without
//! allocation.

mod arena;
mod builder;
mod id;
mod index;
mod raw;
mod syntax;
#[cfg(test)]
mod tests;

pub use arena::{Arena, ArenaMap, Key};
pub use builder::Builder;
pub use id::{ContentId, SyntaxId};
pub use index::{Preorder, Roots, Side, SyntaxPair, SyntaxRef, index};
pub use raw::{RawNode, RawTree};
pub use syntax::{
    Atom, AtomKind, List, SingleLineSpan, Syntax, SyntaxKey, SyntaxNodes, comment_positions,
};
