use std::fmt;

use difftini_syntax::RawTree;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ParserError;

/// Opaque handle to a parse result kept by the parser worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeHandle(Uuid);

impl TreeHandle {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TreeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseCodeResult {
    pub id: TreeHandle,
}

/// A request to the parser worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "camelCase")]
pub enum ParserEvent {
    ParseCode { code: String },
    GetParseString { id: TreeHandle },
    GetTreeString { id: TreeHandle },
    GetTree { id: TreeHandle },
    /// Like `GetTree`, but the worker forgets the tree afterwards.
    TakeTree { id: TreeHandle },
    ReleaseTree { id: TreeHandle },
    GetTreeCount,
}

/// The single reply to a [`ParserEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ParserResponse {
    Parsed(ParseCodeResult),
    TreeString(Option<String>),
    Tree(Option<RawTree>),
    /// Whether the handle still had a tree to release.
    Released(bool),
    TreeCount(usize),
}

impl ParserResponse {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Parsed(_) => "parsed",
            Self::TreeString(_) => "treeString",
            Self::Tree(_) => "tree",
            Self::Released(_) => "released",
            Self::TreeCount(_) => "treeCount",
        }
    }

    pub fn into_parsed(self) -> Result<ParseCodeResult, ParserError> {
        match self {
            Self::Parsed(result) => Ok(result),
            other => Err(other.unexpected("parsed")),
        }
    }

    pub fn into_tree_string(self) -> Result<Option<String>, ParserError> {
        match self {
            Self::TreeString(string) => Ok(string),
            other => Err(other.unexpected("treeString")),
        }
    }

    pub fn into_tree(self) -> Result<Option<RawTree>, ParserError> {
        match self {
            Self::Tree(tree) => Ok(tree),
            other => Err(other.unexpected("tree")),
        }
    }

    pub fn into_released(self) -> Result<bool, ParserError> {
        match self {
            Self::Released(released) => Ok(released),
            other => Err(other.unexpected("released")),
        }
    }

    pub fn into_tree_count(self) -> Result<usize, ParserError> {
        match self {
            Self::TreeCount(count) => Ok(count),
            other => Err(other.unexpected("treeCount")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParserError {
        ParserError::UnexpectedResponse { expected, found: self.name() }
    }
}
