//! Parser output before normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::syntax::{AtomKind, SingleLineSpan};

/// A node exactly as a parser reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RawNode {
    List {
        #[serde(default)]
        open_position: Vec<SingleLineSpan>,
        #[serde(default)]
        open_content: String,
        #[serde(default)]
        children: Vec<RawNode>,
        #[serde(default)]
        close_position: Vec<SingleLineSpan>,
        #[serde(default)]
        close_content: String,
    },
    Atom {
        #[serde(default)]
        position: Vec<SingleLineSpan>,
        content: String,
        #[serde(default)]
        kind: AtomKind,
    },
}

impl RawNode {
    pub fn list(open_content: &str, children: Vec<Self>, close_content: &str) -> Self {
        Self::List {
            open_position: Vec::new(),
            open_content: open_content.to_owned(),
            children,
            close_position: Vec::new(),
            close_content: close_content.to_owned(),
        }
    }

    pub fn atom(position: Vec<SingleLineSpan>, content: &str, kind: AtomKind) -> Self {
        Self::Atom { position, content: content.to_owned(), kind }
    }
}

/// S-expression form, e.g. `(list "(" (normal "x") ")")`.
impl fmt::Display for RawNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { open_content, children, close_content, .. } => {
                write!(f, "(list {open_content:?}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, " {close_content:?})")
            }
            Self::Atom { content, kind, .. } => write!(f, "({} {content:?})", kind.name()),
        }
    }
}

/// All roots of one parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTree {
    pub roots: Vec<RawNode>,
}

impl RawTree {
    pub fn new(roots: Vec<RawNode>) -> Self {
        Self { roots }
    }
}

/// One root per line.
impl fmt::Display for RawTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, root) in self.roots.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{root}")?;
        }
        Ok(())
    }
}
