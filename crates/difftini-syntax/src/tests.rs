use expect_test::expect;

use crate::{AtomKind, Builder, Side, SingleLineSpan, Syntax, SyntaxKey, SyntaxPair};

fn span(line: u32, start_col: u32, end_col: u32) -> SingleLineSpan {
    SingleLineSpan::new(line, start_col, end_col)
}

fn atom(builder: &mut Builder, content: &str) -> SyntaxKey {
    builder.atom(vec![span(0, 0, content.len() as u32)], content, AtomKind::Normal)
}

fn comment(builder: &mut Builder, content: &str) -> SyntaxKey {
    builder.atom(vec![span(0, 0, content.len() as u32)], content, AtomKind::Comment)
}

fn parens(builder: &mut Builder, children: Vec<SyntaxKey>) -> SyntaxKey {
    builder.list(vec![span(0, 0, 1)], "(", children, vec![span(0, 9, 10)], ")")
}

fn content_ids(pair: &SyntaxPair, side: Side) -> Vec<u32> {
    pair.preorder(side).map(|node| node.content_id().get()).collect()
}

#[test]
fn empty_atoms_are_dropped() {
    let mut builder = Builder::new();
    let empty = atom(&mut builder, "");
    let x = atom(&mut builder, "x");
    let inner = parens(&mut builder, vec![]);
    let outer = parens(&mut builder, vec![empty, x, inner]);

    let nodes = builder.finish();
    let list = nodes.get(outer).as_list().unwrap();
    assert_eq!(list.children(), &[x, inner]);
    assert_eq!(list.num_descendants(), 2);
}

#[test]
fn undelimited_singleton_is_returned_as_is() {
    let mut builder = Builder::new();
    let empty = atom(&mut builder, "");
    let x = atom(&mut builder, "x");
    assert_eq!(builder.list(vec![], "", vec![empty, x], vec![], ""), x);

    let inner = parens(&mut builder, vec![]);
    assert_eq!(builder.list(vec![], "", vec![inner], vec![], ""), inner);

    let y = atom(&mut builder, "y");
    let z = atom(&mut builder, "z");
    let wrapper = builder.list(vec![], "", vec![y, z], vec![], "");
    assert_ne!(wrapper, y);

    let a = atom(&mut builder, "a");
    let delimited = builder.list(vec![], "{", vec![a], vec![], "}");
    assert_ne!(delimited, a);

    let nodes = builder.finish();
    assert_eq!(nodes.get(wrapper).children(), &[y, z]);
    assert_eq!(nodes.get(delimited).children(), &[a]);
}

#[test]
fn trailing_carriage_return_is_stripped() {
    let mut builder = Builder::new();
    let string = builder.atom(vec![span(0, 0, 5)], "\"hi\"\r", AtomKind::String);
    let twice = atom(&mut builder, "x\r\r");

    let nodes = builder.finish();
    let string = nodes.get(string).as_atom().unwrap();
    assert_eq!(string.content(), "\"hi\"");
    assert_eq!(string.kind(), AtomKind::String);
    assert_eq!(string.position(), &[span(0, 0, 5)]);
    assert_eq!(nodes.get(twice).as_atom().unwrap().content(), "x\r");
}

#[test]
fn comment_line_terminator_is_dropped() {
    let mut builder = Builder::new();
    let note = builder.atom(vec![span(3, 4, 11), span(4, 0, 0)], "// note\n", AtomKind::Comment);
    let normal = builder.atom(vec![span(3, 4, 6), span(4, 0, 0)], "x\n", AtomKind::Normal);

    let nodes = builder.finish();
    let note = nodes.get(note).as_atom().unwrap();
    assert_eq!(note.content(), "// note");
    assert_eq!(note.position(), &[span(3, 4, 11)]);

    let normal = nodes.get(normal).as_atom().unwrap();
    assert_eq!(normal.content(), "x\n");
    assert_eq!(normal.position().len(), 2);
}

#[test]
fn num_descendants_counts_nested_lists() {
    let mut builder = Builder::new();
    let a = atom(&mut builder, "a");
    let b = atom(&mut builder, "b");
    let c = atom(&mut builder, "c");
    let inner = parens(&mut builder, vec![b, c]);
    let d = atom(&mut builder, "d");
    let outer = parens(&mut builder, vec![a, inner, d]);

    let nodes = builder.finish();
    assert_eq!(nodes.get(inner).as_list().unwrap().num_descendants(), 2);
    assert_eq!(nodes.get(outer).as_list().unwrap().num_descendants(), 5);
}

#[test]
#[should_panic(expected = "already a child of another list")]
fn a_node_has_one_parent() {
    let mut builder = Builder::new();
    let x = atom(&mut builder, "x");
    parens(&mut builder, vec![x]);
    parens(&mut builder, vec![x]);
}

#[test]
fn ids_are_contiguous_with_lhs_first() {
    let mut builder = Builder::new();
    let a = atom(&mut builder, "a");
    let b = atom(&mut builder, "b");
    let lhs = parens(&mut builder, vec![a, b]);
    let c = atom(&mut builder, "c");
    let rhs_list = parens(&mut builder, vec![c]);
    let d = atom(&mut builder, "d");

    let pair = builder.finish().index(vec![lhs], vec![rhs_list, d]);
    assert_eq!(pair.len(), 6);
    assert_eq!(pair.side_len(Side::Lhs), 3);
    assert_eq!(pair.side_len(Side::Rhs), 3);

    let lhs_ids: Vec<u32> = pair.preorder(Side::Lhs).map(|node| node.id().get()).collect();
    let rhs_ids: Vec<u32> = pair.preorder(Side::Rhs).map(|node| node.id().get()).collect();
    assert_eq!(lhs_ids, [1, 2, 3]);
    assert_eq!(rhs_ids, [4, 5, 6]);

    assert_eq!(pair.node(c).id().get(), 5);
    assert_eq!(pair.node(b).side(), Side::Lhs);
    assert_eq!(pair.node(d).side(), Side::Rhs);
}

#[test]
fn equal_atoms_share_content_across_sides() {
    let mut builder = Builder::new();
    let lhs_foo = atom(&mut builder, "foo");
    let lhs = parens(&mut builder, vec![lhs_foo]);
    let rhs_foo = atom(&mut builder, "foo");
    let bar = atom(&mut builder, "bar");

    let pair = builder.finish().index(vec![lhs], vec![bar, rhs_foo]);
    let (lhs_foo, rhs_foo, bar) = (pair.node(lhs_foo), pair.node(rhs_foo), pair.node(bar));
    assert_eq!(lhs_foo.content_id(), rhs_foo.content_id());
    assert_ne!(lhs_foo.content_id(), bar.content_id());
    assert!(!lhs_foo.content_is_unique());
    assert!(!rhs_foo.content_is_unique());
    assert!(bar.content_is_unique());
}

#[test]
fn lists_never_share_content_with_atoms() {
    let mut builder = Builder::new();
    let text = atom(&mut builder, "()");
    let empty = parens(&mut builder, vec![]);

    let pair = builder.finish().index(vec![text], vec![empty]);
    assert_ne!(pair.node(text).content_id(), pair.node(empty).content_id());
    assert!(pair.node(text).content_is_unique());
    assert!(pair.node(empty).content_is_unique());
}

#[test]
fn atom_kind_does_not_split_content() {
    let mut builder = Builder::new();
    let note = comment(&mut builder, "note");
    let word = atom(&mut builder, "note");

    let pair = builder.finish().index(vec![note], vec![word]);
    assert_eq!(pair.node(note).content_id(), pair.node(word).content_id());
    assert!(!pair.node(note).content_is_unique());
    assert!(!pair.node(word).content_is_unique());
}

#[test]
fn single_occurrence_is_unique() {
    let mut builder = Builder::new();
    let foo = atom(&mut builder, "foo");
    let baz = atom(&mut builder, "baz");

    let pair = builder.finish().index(vec![foo], vec![baz]);
    assert!(pair.node(foo).content_is_unique());
    assert!(pair.node(baz).content_is_unique());
}

#[test]
fn lists_are_equal_when_delimiters_and_children_are() {
    let mut builder = Builder::new();
    let x1 = atom(&mut builder, "x");
    let lhs = parens(&mut builder, vec![x1]);
    let x2 = atom(&mut builder, "x");
    let same = parens(&mut builder, vec![x2]);
    let x3 = atom(&mut builder, "x");
    let braces = builder.list(vec![], "{", vec![x3], vec![], "}");
    let y = atom(&mut builder, "y");
    let other_child = parens(&mut builder, vec![y]);

    let pair = builder.finish().index(vec![lhs], vec![same, braces, other_child]);
    assert_eq!(pair.node(lhs).content_id(), pair.node(same).content_id());
    assert_ne!(pair.node(lhs).content_id(), pair.node(braces).content_id());
    assert_ne!(pair.node(lhs).content_id(), pair.node(other_child).content_id());
    assert!(!pair.node(lhs).content_is_unique());
    assert!(pair.node(braces).content_is_unique());
}

#[test]
fn multi_line_comments_ignore_indentation() {
    let mut builder = Builder::new();
    let lhs = comment(&mut builder, "/* a\n   b */");
    let rhs = comment(&mut builder, "/* a\nb */");
    let indented = comment(&mut builder, "  // x");
    let flush = comment(&mut builder, "// x");

    let pair = builder.finish().index(vec![lhs, indented], vec![rhs, flush]);
    assert_eq!(pair.node(lhs).content_id(), pair.node(rhs).content_id());
    assert_ne!(pair.node(indented).content_id(), pair.node(flush).content_id());
    assert_eq!(pair.node(lhs).as_atom().unwrap().content(), "/* a\n   b */");
}

#[test]
fn num_after_counts_remaining_siblings() {
    let mut builder = Builder::new();
    let a = atom(&mut builder, "a");
    let b = atom(&mut builder, "b");
    let c = atom(&mut builder, "c");
    let list = parens(&mut builder, vec![a, b, c]);
    let tail = atom(&mut builder, "tail");

    let pair = builder.finish().index(vec![list, tail], vec![]);
    let parent_num_after = pair.node(list).num_after();
    assert_eq!(parent_num_after, 1);
    assert_eq!(pair.node(a).num_after(), parent_num_after + 2);
    assert_eq!(pair.node(b).num_after(), parent_num_after + 1);
    assert_eq!(pair.node(c).num_after(), parent_num_after);
    assert_eq!(pair.node(tail).num_after(), 0);
}

#[test]
fn links_stay_within_one_side() {
    let mut builder = Builder::new();
    let a = atom(&mut builder, "a");
    let b = atom(&mut builder, "b");
    let lhs_list = parens(&mut builder, vec![a, b]);
    let lhs_tail = atom(&mut builder, "t");
    let rhs_head = atom(&mut builder, "h");

    let pair = builder.finish().index(vec![lhs_list, lhs_tail], vec![rhs_head]);
    let (list, a, b) = (pair.node(lhs_list), pair.node(a), pair.node(b));
    let (tail, head) = (pair.node(lhs_tail), pair.node(rhs_head));

    assert_eq!(list.parent(), None);
    assert_eq!(a.parent(), Some(list));
    assert_eq!((a.num_ancestors(), list.num_ancestors()), (1, 0));

    assert_eq!(a.previous_sibling(), None);
    assert_eq!(a.next_sibling(), Some(b));
    assert_eq!(b.previous_sibling(), Some(a));
    assert_eq!(b.next_sibling(), None);
    assert_eq!(list.next_sibling(), Some(tail));
    assert_eq!(tail.next_sibling(), None);
    assert_eq!(head.previous_sibling(), None);

    assert_eq!(list.prev(), None);
    assert_eq!(a.prev(), Some(list));
    assert_eq!(b.prev(), Some(a));
    assert_eq!(tail.prev(), Some(list));
    assert_eq!(head.prev(), None);
}

#[test]
fn descendants_match_subtree_size() {
    let mut builder = Builder::new();
    let a = atom(&mut builder, "a");
    let b = atom(&mut builder, "b");
    let inner = parens(&mut builder, vec![a, b]);
    let empty = parens(&mut builder, vec![]);
    let c = atom(&mut builder, "c");
    let root = builder.list(vec![], "{", vec![inner, empty, c], vec![], "}");

    let pair = builder.finish().index(vec![root], vec![]);
    for node in pair.preorder(Side::Lhs) {
        if let Syntax::List(list) = node.kind() {
            let subtree = pair
                .preorder(Side::Lhs)
                .filter(|other| {
                    std::iter::successors(other.parent(), |parent| parent.parent())
                        .any(|ancestor| ancestor == node)
                })
                .count();
            assert_eq!(list.num_descendants() as usize, subtree);
        }
    }
}

#[test]
fn content_ids_are_deterministic() {
    fn build() -> SyntaxPair {
        let mut builder = Builder::new();
        let x = atom(&mut builder, "x");
        let y = atom(&mut builder, "y");
        let lhs = parens(&mut builder, vec![x, y]);
        let y = atom(&mut builder, "y");
        let x = atom(&mut builder, "x");
        let rhs = parens(&mut builder, vec![y, x]);
        builder.finish().index(vec![lhs], vec![rhs])
    }

    let (first, second) = (build(), build());
    assert_eq!(content_ids(&first, Side::Lhs), content_ids(&second, Side::Lhs));
    assert_eq!(content_ids(&first, Side::Rhs), content_ids(&second, Side::Rhs));
}

#[test]
#[should_panic(expected = "reachable more than once")]
fn roots_cannot_be_shared_between_sides() {
    let mut builder = Builder::new();
    let x = atom(&mut builder, "x");
    builder.finish().index(vec![x], vec![x]);
}

#[test]
fn comment_positions_are_flattened_in_order() {
    let mut builder = Builder::new();
    let first = builder.atom(vec![span(0, 0, 2), span(1, 0, 2)], "/*\n*/", AtomKind::Comment);
    let x = atom(&mut builder, "x");
    let second = builder.atom(vec![span(2, 4, 8)], "// y", AtomKind::Comment);
    let list = parens(&mut builder, vec![x, second]);
    let third = builder.atom(vec![span(5, 0, 3), span(6, 0, 0)], "# z\n", AtomKind::Comment);

    let nodes = builder.finish();
    let roots = [first, list, third];
    let expected = [span(0, 0, 2), span(1, 0, 2), span(2, 4, 8), span(5, 0, 3)];
    assert_eq!(crate::comment_positions(&nodes, &roots), expected);

    let pair = nodes.index(roots.to_vec(), vec![]);
    assert_eq!(pair.comment_positions(Side::Lhs), expected);
    assert!(pair.comment_positions(Side::Rhs).is_empty());
}

#[test]
fn debug_tree() {
    let mut builder = Builder::new();
    let foo = atom(&mut builder, "foo");
    let note = comment(&mut builder, "// c");
    let lhs = parens(&mut builder, vec![foo, note]);
    let foo = atom(&mut builder, "foo");
    let rhs = parens(&mut builder, vec![foo]);
    let bar = atom(&mut builder, "bar");

    let pair = builder.finish().index(vec![lhs], vec![rhs, bar]);
    expect![[r#"
        lhs
          list@1 #3 "(" ")" descendants=2 unique
            atom@2 #1 normal "foo" shared
            atom@3 #2 comment "// c" unique
        rhs
          list@4 #4 "(" ")" descendants=1 unique
            atom@5 #1 normal "foo" shared
          atom@6 #5 normal "bar" unique
    "#]]
    .assert_eq(&pair.debug_tree());
}
