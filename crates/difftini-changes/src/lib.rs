//! Classification produced by a tree matcher over an indexed [`SyntaxPair`].
//!
//! The matcher itself lives elsewhere; this crate only fixes the shape of its
//! output so that renderers can consume it.
//!
//! [`SyntaxPair`]: difftini_syntax::SyntaxPair

use difftini_syntax::{AtomKind, SingleLineSpan, SyntaxId, SyntaxRef};
use rustc_hash::FxHashMap;
use serde::Serialize;


/// How a node relates to the other side of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind<'a> {
    /// Holds the matching node on the other side.
    Unchanged(SyntaxRef<'a>),
    ReplacedComment { before: SyntaxRef<'a>, after: SyntaxRef<'a> },
    ReplacedString { before: SyntaxRef<'a>, after: SyntaxRef<'a> },
    Novel,
}

/// Classification of every node of a pair, keyed by [`SyntaxId`].
#[derive(Debug, Default)]
pub struct ChangeMap<'a> {
    changes: FxHashMap<SyntaxId, ChangeKind<'a>>,
}

impl<'a> ChangeMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `kind` for `node`, returning the previous classification.
    pub fn insert(&mut self, node: SyntaxRef<'a>, kind: ChangeKind<'a>) -> Option<ChangeKind<'a>> {
        self.changes.insert(node.id(), kind)
    }

    pub fn get(&self, node: SyntaxRef<'_>) -> Option<ChangeKind<'a>> {
        self.changes.get(&node.id()).copied()
    }

    pub fn is_unchanged(&self, node: SyntaxRef<'_>) -> bool {
        matches!(self.get(node), Some(ChangeKind::Unchanged(_)))
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// What a highlighted token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TokenKind {
    Delimiter,
    Atom { kind: AtomKind },
}

/// How a single token should be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum MatchKind {
    UnchangedToken {
        highlight: TokenKind,
        self_pos: Vec<SingleLineSpan>,
        opposite_pos: Vec<SingleLineSpan>,
    },
    Novel {
        highlight: TokenKind,
    },
    NovelLinePart {
        highlight: TokenKind,
        self_pos: Vec<SingleLineSpan>,
        opposite_pos: Vec<SingleLineSpan>,
    },
    NovelWord {
        highlight: TokenKind,
    },
    Ignored {
        highlight: TokenKind,
    },
}

impl MatchKind {
    pub fn highlight(&self) -> TokenKind {
        match *self {
            Self::UnchangedToken { highlight, .. }
            | Self::Novel { highlight }
            | Self::NovelLinePart { highlight, .. }
            | Self::NovelWord { highlight }
            | Self::Ignored { highlight } => highlight,
        }
    }

    /// `true` for tokens that exist on this side only, in whole or in part.
    pub fn is_novel(&self) -> bool {
        matches!(self, Self::Novel { .. } | Self::NovelWord { .. } | Self::NovelLinePart { .. })
    }
}

pub fn is_novel(kind: &MatchKind) -> bool {
    kind.is_novel()
}

/// A rendered position and how to highlight it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPos {
    pub kind: MatchKind,
    pub pos: SingleLineSpan,
}
