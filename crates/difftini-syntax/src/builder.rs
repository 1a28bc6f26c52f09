//! Normalizing builder for syntax nodes.

use crate::arena::Arena;
use crate::raw::RawNode;
use crate::syntax::{Atom, AtomKind, List, SingleLineSpan, Syntax, SyntaxKey, SyntaxNodes};

/// Allocates normalized nodes bottom-up.
///
/// Children must be built before the list that holds them, and a node may be
/// attached to at most one list. Both sides of a diff are built with the same
/// builder so that they share one arena.
#[derive(Debug, Default)]
pub struct Builder {
    nodes: Arena<Syntax>,
    attached: Vec<bool>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list, or returns its only child when the list has no
    /// delimiters.
    ///
    /// Empty atoms are dropped first. Parsers produce them for incomplete or
    /// malformed programs and they are never displayed.
    pub fn list(
        &mut self,
        open_position: Vec<SingleLineSpan>,
        open_content: &str,
        mut children: Vec<SyntaxKey>,
        close_position: Vec<SingleLineSpan>,
        close_content: &str,
    ) -> SyntaxKey {
        children.retain(|&child| match &self.nodes[child] {
            Syntax::List(_) => true,
            Syntax::Atom(atom) => !atom.content.is_empty(),
        });

        // Grammars tend to wrap a single node in several anonymous layers,
        // e.g. (compilation_unit (declaration (function ...))).
        if let [child] = children[..] {
            if open_content.is_empty() && close_content.is_empty() {
                return child;
            }
        }

        let mut num_descendants = 0;
        for &child in &children {
            self.attach(child);
            num_descendants += match &self.nodes[child] {
                Syntax::List(list) => list.num_descendants + 1,
                Syntax::Atom(_) => 1,
            };
        }

        self.alloc(Syntax::List(List {
            open_position,
            open_content: open_content.into(),
            children,
            close_position,
            close_content: close_content.into(),
            num_descendants,
        }))
    }

    /// Builds an atom.
    ///
    /// A trailing `\r` is discarded for parsers that keep it on CRLF files.
    /// Comments lose their line terminator and the span it was given.
    pub fn atom(
        &mut self,
        mut position: Vec<SingleLineSpan>,
        content: &str,
        kind: AtomKind,
    ) -> SyntaxKey {
        let mut content = content.strip_suffix('\r').unwrap_or(content);
        if kind == AtomKind::Comment {
            if let Some(stripped) = content.strip_suffix('\n') {
                position.pop();
                content = stripped;
            }
        }

        self.alloc(Syntax::Atom(Atom { position, content: content.into(), kind }))
    }

    /// Builds `raw` and everything below it.
    pub fn build_raw(&mut self, raw: &RawNode) -> SyntaxKey {
        match raw {
            RawNode::List {
                open_position,
                open_content,
                children,
                close_position,
                close_content,
            } => {
                let children = children.iter().map(|child| self.build_raw(child)).collect();
                self.list(
                    open_position.clone(),
                    open_content,
                    children,
                    close_position.clone(),
                    close_content,
                )
            }
            RawNode::Atom { position, content, kind } => {
                self.atom(position.clone(), content, *kind)
            }
        }
    }

    /// Builds every root of one side.
    pub fn build_roots(&mut self, roots: &[RawNode]) -> Vec<SyntaxKey> {
        roots.iter().map(|root| self.build_raw(root)).collect()
    }

    /// Freezes the arena.
    pub fn finish(self) -> SyntaxNodes {
        SyntaxNodes { nodes: self.nodes }
    }

    fn alloc(&mut self, syntax: Syntax) -> SyntaxKey {
        self.attached.push(false);
        self.nodes.alloc(syntax)
    }

    #[track_caller]
    fn attach(&mut self, child: SyntaxKey) {
        let attached = &mut self.attached[child.index() as usize];
        assert!(!*attached, "{child:?} is already a child of another list");
        *attached = true;
    }
}
