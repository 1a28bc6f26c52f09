//! Node payloads: lists, atoms and the frozen arena holding them.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arena::{Arena, Key};

pub type SyntaxKey = Key<Syntax>;

/// A region of a single source line.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SingleLineSpan {
    pub line: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl SingleLineSpan {
    pub fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Self { line, start_col, end_col }
    }
}

impl fmt::Display for SingleLineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.line, self.start_col, self.end_col)
    }
}

/// How an atom should be highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtomKind {
    #[default]
    Normal,
    String,
    Type,
    Comment,
    Keyword,
    ParseError,
}

impl AtomKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::String => "string",
            Self::Type => "type",
            Self::Comment => "comment",
            Self::Keyword => "keyword",
            Self::ParseError => "parse-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Syntax {
    List(List),
    Atom(Atom),
}

impl Syntax {
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            Self::Atom(_) => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::List(_) => None,
        }
    }

    /// Children of a list; atoms have none.
    pub fn children(&self) -> &[SyntaxKey] {
        match self {
            Self::List(list) => &list.children,
            Self::Atom(_) => &[],
        }
    }
}

/// A delimited sequence of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub(crate) open_position: Vec<SingleLineSpan>,
    pub(crate) open_content: Box<str>,
    pub(crate) children: Vec<SyntaxKey>,
    pub(crate) close_position: Vec<SingleLineSpan>,
    pub(crate) close_content: Box<str>,
    pub(crate) num_descendants: u32,
}

impl List {
    pub fn open_position(&self) -> &[SingleLineSpan] {
        &self.open_position
    }

    pub fn open_content(&self) -> &str {
        &self.open_content
    }

    pub fn children(&self) -> &[SyntaxKey] {
        &self.children
    }

    pub fn close_position(&self) -> &[SingleLineSpan] {
        &self.close_position
    }

    pub fn close_content(&self) -> &str {
        &self.close_content
    }

    /// Number of nodes strictly below this list.
    pub fn num_descendants(&self) -> u32 {
        self.num_descendants
    }
}

/// A leaf token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub(crate) position: Vec<SingleLineSpan>,
    pub(crate) content: Box<str>,
    pub(crate) kind: AtomKind,
}

impl Atom {
    /// One span per physical line the atom occupies.
    pub fn position(&self) -> &[SingleLineSpan] {
        &self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    /// Content used for equivalence: multi-line comments ignore the
    /// indentation of each line.
    pub fn normalized_content(&self) -> Cow<'_, str> {
        let content = &*self.content;
        if self.kind == AtomKind::Comment && content.contains(['\r', '\n']) {
            let lines: Vec<&str> = content.split(['\r', '\n']).map(str::trim_start).collect();
            Cow::Owned(lines.join("\n"))
        } else {
            Cow::Borrowed(content)
        }
    }
}

/// Immutable node storage produced by [`Builder::finish`].
///
/// [`Builder::finish`]: crate::Builder::finish
#[derive(Debug, Clone, Default)]
pub struct SyntaxNodes {
    pub(crate) nodes: Arena<Syntax>,
}

impl SyntaxNodes {
    #[track_caller]
    pub fn get(&self, key: SyntaxKey) -> &Syntax {
        match self.nodes.get(key) {
            Some(syntax) => syntax,
            None => panic!("{key:?} does not belong to this syntax arena"),
        }
    }

    /// Number of allocated nodes, including ones no root reaches.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Comment spans under `roots`, in source order.
    pub fn comment_positions(&self, roots: &[SyntaxKey]) -> Vec<SingleLineSpan> {
        let mut positions = Vec::new();
        for &root in roots {
            self.walk_comment_positions(root, &mut positions);
        }
        positions
    }

    fn walk_comment_positions(&self, key: SyntaxKey, positions: &mut Vec<SingleLineSpan>) {
        match self.get(key) {
            Syntax::List(list) => {
                for &child in list.children() {
                    self.walk_comment_positions(child, positions);
                }
            }
            Syntax::Atom(atom) if atom.kind == AtomKind::Comment => {
                positions.extend_from_slice(&atom.position);
            }
            Syntax::Atom(_) => {}
        }
    }
}

/// Flattened comment spans under `roots`.
pub fn comment_positions(nodes: &SyntaxNodes, roots: &[SyntaxKey]) -> Vec<SingleLineSpan> {
    nodes.comment_positions(roots)
}
