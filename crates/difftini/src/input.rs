use anyhow::Context;
use camino::Utf8Path;
use difftini_syntax::{Builder, RawTree, SyntaxPair};

pub(crate) fn read_tree(path: &Utf8Path) -> anyhow::Result<RawTree> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    serde_json::from_str(&text).with_context(|| format!("`{path}` is not a raw syntax tree"))
}

pub(crate) fn load_pair(before: &Utf8Path, after: &Utf8Path) -> anyhow::Result<SyntaxPair> {
    let before = read_tree(before)?;
    let after = read_tree(after)?;
    Ok(index_trees(&before, &after))
}

fn index_trees(before: &RawTree, after: &RawTree) -> SyntaxPair {
    let mut builder = Builder::new();
    let lhs = builder.build_roots(&before.roots);
    let rhs = builder.build_roots(&after.roots);
    builder.finish().index(lhs, rhs)
}
