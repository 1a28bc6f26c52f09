//! Identity, content addressing and linkage for a pair of syntax forests.

use std::fmt::{self, Write as _};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::arena::ArenaMap;
use crate::id::{ContentId, SyntaxId};
use crate::syntax::{Atom, List, SingleLineSpan, Syntax, SyntaxKey, SyntaxNodes};

/// Per-node metadata, kept in a table parallel to the node arena.
#[derive(Debug, Clone, Default)]
struct SyntaxInfo {
    previous_sibling: Option<SyntaxKey>,
    next_sibling: Option<SyntaxKey>,
    prev: Option<SyntaxKey>,
    parent: Option<SyntaxKey>,
    num_ancestors: u32,
    num_after: u32,
    unique_id: SyntaxId,
    content_id: ContentId,
    content_is_unique: bool,
}

/// Which file of the diff a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Lhs,
    Rhs,
}

/// Structural key of a content-equivalence class.
#[derive(PartialEq, Eq, Hash)]
enum ContentKey<'a> {
    List { open: &'a str, close: &'a str, children: Vec<ContentId> },
    Atom(std::borrow::Cow<'a, str>),
}

/// Indexes `lhs_roots` and `rhs_roots`, consuming the node arena.
pub fn index(
    nodes: SyntaxNodes,
    lhs_roots: Vec<SyntaxKey>,
    rhs_roots: Vec<SyntaxKey>,
) -> SyntaxPair {
    let (info, num_lhs, num_ids) = {
        let mut indexer = Indexer { nodes: &nodes, info: ArenaMap::for_arena(&nodes.nodes) };

        let mut next_id = 1;
        indexer.init_info_on_side(&lhs_roots, None, 0, 0, &mut next_id);
        let num_lhs = next_id - 1;
        indexer.init_info_on_side(&rhs_roots, None, 0, 0, &mut next_id);
        let num_ids = next_id - 1;

        let mut existing = FxHashMap::default();
        indexer.set_content_id(&lhs_roots, &mut existing);
        indexer.set_content_id(&rhs_roots, &mut existing);

        let mut counts = FxHashMap::default();
        indexer.count_content_ids(&lhs_roots, &mut counts);
        indexer.count_content_ids(&rhs_roots, &mut counts);
        indexer.set_content_is_unique(&lhs_roots, &counts);
        indexer.set_content_is_unique(&rhs_roots, &counts);

        indexer.init_next_prev(&lhs_roots);
        indexer.init_next_prev(&rhs_roots);

        debug!(
            lhs = num_lhs,
            rhs = num_ids - num_lhs,
            classes = existing.len(),
            unique = counts.values().filter(|&&count| count == 1).count(),
            "indexed syntax pair"
        );
        (indexer.info, num_lhs, num_ids)
    };

    SyntaxPair { nodes, info, lhs_roots, rhs_roots, num_lhs, num_ids }
}

impl SyntaxNodes {
    /// Indexes both sides. See [`index`].
    pub fn index(self, lhs_roots: Vec<SyntaxKey>, rhs_roots: Vec<SyntaxKey>) -> SyntaxPair {
        index(self, lhs_roots, rhs_roots)
    }
}

struct Indexer<'a> {
    nodes: &'a SyntaxNodes,
    info: ArenaMap<Syntax, SyntaxInfo>,
}

impl<'a> Indexer<'a> {
    /// Pre-order pass assigning ids, parents, depth and `num_after`.
    fn init_info_on_side(
        &mut self,
        keys: &[SyntaxKey],
        parent: Option<SyntaxKey>,
        num_ancestors: u32,
        parent_num_after: u32,
        next_id: &mut u32,
    ) {
        let nodes = self.nodes;
        for (i, &key) in keys.iter().enumerate() {
            let num_after = parent_num_after + (keys.len() - 1 - i) as u32;

            let info = &mut self.info[key];
            assert!(info.unique_id.is_zero(), "{key:?} is reachable more than once");
            info.unique_id = SyntaxId::new(*next_id);
            *next_id += 1;
            info.parent = parent;
            info.num_ancestors = num_ancestors;
            info.num_after = num_after;

            if let Syntax::List(list) = nodes.get(key) {
                self.init_info_on_side(
                    list.children(),
                    Some(key),
                    num_ancestors + 1,
                    num_after,
                    next_id,
                );
            }
        }
    }

    /// Bottom-up pass: children get their class before the parent's key is
    /// formed from them.
    fn set_content_id(
        &mut self,
        keys: &[SyntaxKey],
        existing: &mut FxHashMap<ContentKey<'a>, ContentId>,
    ) {
        let nodes = self.nodes;
        for &key in keys {
            let content_key = match nodes.get(key) {
                Syntax::List(list) => {
                    self.set_content_id(list.children(), existing);
                    ContentKey::List {
                        open: list.open_content(),
                        close: list.close_content(),
                        children: list
                            .children()
                            .iter()
                            .map(|&child| self.info[child].content_id)
                            .collect(),
                    }
                }
                Syntax::Atom(atom) => ContentKey::Atom(atom.normalized_content()),
            };

            let next_id = ContentId::new(existing.len() as u32 + 1);
            self.info[key].content_id = *existing.entry(content_key).or_insert(next_id);
        }
    }

    fn count_content_ids(&self, keys: &[SyntaxKey], counts: &mut FxHashMap<ContentId, u32>) {
        for &key in keys {
            *counts.entry(self.info[key].content_id).or_default() += 1;
            self.count_content_ids(self.nodes.get(key).children(), counts);
        }
    }

    fn set_content_is_unique(&mut self, keys: &[SyntaxKey], counts: &FxHashMap<ContentId, u32>) {
        let nodes = self.nodes;
        for &key in keys {
            let info = &mut self.info[key];
            let Some(&count) = counts.get(&info.content_id) else {
                panic!("content id {} of {key:?} was never counted", info.content_id);
            };
            info.content_is_unique = count == 1;

            self.set_content_is_unique(nodes.get(key).children(), counts);
        }
    }

    /// Sibling and `prev` links never cross from one side to the other.
    fn init_next_prev(&mut self, roots: &[SyntaxKey]) {
        self.set_siblings(roots);
        self.set_prev(roots, None);
    }

    fn set_siblings(&mut self, keys: &[SyntaxKey]) {
        let nodes = self.nodes;
        for (i, &key) in keys.iter().enumerate() {
            let info = &mut self.info[key];
            info.previous_sibling = i.checked_sub(1).map(|prev| keys[prev]);
            info.next_sibling = keys.get(i + 1).copied();

            self.set_siblings(nodes.get(key).children());
        }
    }

    fn set_prev(&mut self, keys: &[SyntaxKey], parent: Option<SyntaxKey>) {
        let nodes = self.nodes;
        for (i, &key) in keys.iter().enumerate() {
            self.info[key].prev = if i == 0 { parent } else { Some(keys[i - 1]) };

            self.set_prev(nodes.get(key).children(), Some(key));
        }
    }
}

/// Both sides of a diff, fully indexed and read-only.
#[derive(Debug, Clone)]
pub struct SyntaxPair {
    nodes: SyntaxNodes,
    info: ArenaMap<Syntax, SyntaxInfo>,
    lhs_roots: Vec<SyntaxKey>,
    rhs_roots: Vec<SyntaxKey>,
    num_lhs: u32,
    num_ids: u32,
}

impl SyntaxPair {
    pub fn nodes(&self) -> &SyntaxNodes {
        &self.nodes
    }

    #[track_caller]
    pub fn node(&self, key: SyntaxKey) -> SyntaxRef<'_> {
        let syntax = self.nodes.get(key);
        assert!(!self.info[key].unique_id.is_zero(), "{key:?} is not reachable from any root");
        SyntaxRef { pair: self, key, syntax }
    }

    pub fn roots(&self, side: Side) -> Roots<'_> {
        let keys = match side {
            Side::Lhs => &self.lhs_roots,
            Side::Rhs => &self.rhs_roots,
        };
        Roots { pair: self, keys: keys.iter() }
    }

    pub fn lhs_roots(&self) -> Roots<'_> {
        self.roots(Side::Lhs)
    }

    pub fn rhs_roots(&self) -> Roots<'_> {
        self.roots(Side::Rhs)
    }

    /// Number of indexed nodes on both sides; also the largest id.
    pub fn len(&self) -> usize {
        self.num_ids as usize
    }

    pub fn is_empty(&self) -> bool {
        self.num_ids == 0
    }

    pub fn side_len(&self, side: Side) -> usize {
        match side {
            Side::Lhs => self.num_lhs as usize,
            Side::Rhs => (self.num_ids - self.num_lhs) as usize,
        }
    }

    /// Pre-order walk over one side.
    pub fn preorder(&self, side: Side) -> Preorder<'_> {
        let mut stack: Vec<SyntaxRef<'_>> = self.roots(side).collect();
        stack.reverse();
        Preorder { stack }
    }

    /// Comment spans under one side's roots, in source order.
    pub fn comment_positions(&self, side: Side) -> Vec<SingleLineSpan> {
        let roots = match side {
            Side::Lhs => &self.lhs_roots,
            Side::Rhs => &self.rhs_roots,
        };
        self.nodes.comment_positions(roots)
    }

    /// Indented dump of both sides, one node per line.
    pub fn debug_tree(&self) -> String {
        let mut buf = String::new();
        for (side, name) in [(Side::Lhs, "lhs"), (Side::Rhs, "rhs")] {
            buf.push_str(name);
            buf.push('\n');
            for node in self.preorder(side) {
                let indent = 2 * (node.num_ancestors() as usize + 1);
                let _ = writeln!(buf, "{:indent$}{node}", "");
            }
        }
        buf
    }
}

/// Handle to an indexed node, tied to the lifetime of its pair.
#[derive(Clone, Copy)]
pub struct SyntaxRef<'a> {
    pair: &'a SyntaxPair,
    key: SyntaxKey,
    syntax: &'a Syntax,
}

impl<'a> SyntaxRef<'a> {
    fn info(self) -> &'a SyntaxInfo {
        &self.pair.info[self.key]
    }

    fn to_ref(self, key: Option<SyntaxKey>) -> Option<Self> {
        key.map(|key| Self { pair: self.pair, key, syntax: self.pair.nodes.get(key) })
    }

    pub fn key(self) -> SyntaxKey {
        self.key
    }

    pub fn kind(self) -> &'a Syntax {
        self.syntax
    }

    pub fn as_list(self) -> Option<&'a List> {
        self.syntax.as_list()
    }

    pub fn as_atom(self) -> Option<&'a Atom> {
        self.syntax.as_atom()
    }

    pub fn parent(self) -> Option<Self> {
        self.to_ref(self.info().parent)
    }

    pub fn previous_sibling(self) -> Option<Self> {
        self.to_ref(self.info().previous_sibling)
    }

    pub fn next_sibling(self) -> Option<Self> {
        self.to_ref(self.info().next_sibling)
    }

    /// The node before this one in a pre-order walk of the same side.
    pub fn prev(self) -> Option<Self> {
        self.to_ref(self.info().prev)
    }

    pub fn children(self) -> Roots<'a> {
        Roots { pair: self.pair, keys: self.syntax.children().iter() }
    }

    pub fn id(self) -> SyntaxId {
        self.info().unique_id
    }

    pub fn content_id(self) -> ContentId {
        self.info().content_id
    }

    /// `true` if no other node on either side has the same content.
    pub fn content_is_unique(self) -> bool {
        self.info().content_is_unique
    }

    pub fn num_ancestors(self) -> u32 {
        self.info().num_ancestors
    }

    pub fn num_after(self) -> u32 {
        self.info().num_after
    }

    pub fn side(self) -> Side {
        if self.id().get() <= self.pair.num_lhs { Side::Lhs } else { Side::Rhs }
    }
}

impl PartialEq for SyntaxRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.pair, other.pair) && self.key == other.key
    }
}

impl Eq for SyntaxRef<'_> {}

impl fmt::Debug for SyntaxRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxRef")
            .field("id", &self.id())
            .field("content_id", &self.content_id())
            .field("syntax", self.syntax)
            .finish()
    }
}

/// `list@1 #3 "(" ")" descendants=2 unique` or `atom@2 #1 normal "x" shared`.
impl fmt::Display for SyntaxRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.syntax {
            Syntax::List(list) => write!(
                f,
                "list@{} #{} {:?} {:?} descendants={}",
                self.id(),
                self.content_id(),
                list.open_content(),
                list.close_content(),
                list.num_descendants(),
            )?,
            Syntax::Atom(atom) => write!(
                f,
                "atom@{} #{} {} {:?}",
                self.id(),
                self.content_id(),
                atom.kind().name(),
                atom.content(),
            )?,
        }
        f.write_str(if self.content_is_unique() { " unique" } else { " shared" })
    }
}

/// Iterator over a sequence of sibling keys as handles.
#[derive(Clone)]
pub struct Roots<'a> {
    pair: &'a SyntaxPair,
    keys: std::slice::Iter<'a, SyntaxKey>,
}

impl<'a> Iterator for Roots<'a> {
    type Item = SyntaxRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next().map(|&key| self.pair.node(key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl DoubleEndedIterator for Roots<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back().map(|&key| self.pair.node(key))
    }
}

impl ExactSizeIterator for Roots<'_> {}

/// Pre-order iterator over one side of a pair.
pub struct Preorder<'a> {
    stack: Vec<SyntaxRef<'a>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = SyntaxRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().rev());
        Some(node)
    }
}
