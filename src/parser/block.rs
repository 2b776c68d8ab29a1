//! Parsed blocks and attributes.
//!
//! Blocks live in a flat arena ([`Blocks`]) and refer to their parent and
//! children by [`BlockId`]. Checks navigate through [`BlockRef`], a cheap
//! copyable handle that pairs an id with the arena it belongs to.

use super::value::Value;
use crate::pragma::InlineIgnores;
use crate::types::Range;
use std::collections::BTreeMap;

/// Index of a block inside its [`Blocks`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

/// A `name = value` pair inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
    pub range: Range,
}

impl Attribute {
    /// `name = value`, used as a finding annotation.
    pub fn describe(&self) -> String {
        format!("{} = {}", self.name, self.value)
    }
}

/// A block as stored in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: String,
    pub labels: Vec<String>,
    pub range: Range,
    pub attributes: BTreeMap<String, Attribute>,
    pub children: Vec<BlockId>,
    pub parent: Option<BlockId>,
}

impl Block {
    pub fn new(kind: impl Into<String>, labels: Vec<String>, range: Range) -> Self {
        Self {
            kind: kind.into(),
            labels,
            range,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// Every block parsed from a directory, plus per-file metadata.
#[derive(Debug, Clone, Default)]
pub struct Blocks {
    arena: Vec<Block>,
    roots: Vec<BlockId>,
    files: BTreeMap<String, String>,
    ignores: InlineIgnores,
}

impl Blocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block under `parent` (or as a root) and return its id.
    pub fn push(&mut self, mut block: Block, parent: Option<BlockId>) -> BlockId {
        let id = BlockId(self.arena.len());
        block.parent = parent;
        self.arena.push(block);
        match parent.and_then(|p| self.arena.get_mut(p.0)) {
            Some(parent) => parent.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Record the source text of a parsed file.
    pub fn add_file(&mut self, filename: impl Into<String>, source: impl Into<String>) {
        self.files.insert(filename.into(), source.into());
    }

    pub fn set_ignores(&mut self, ignores: InlineIgnores) {
        self.ignores = ignores;
    }

    /// Move all blocks of `other` after the blocks already held.
    pub fn append(&mut self, other: Blocks) {
        let offset = self.arena.len();
        let shift = |id: BlockId| BlockId(id.0 + offset);

        self.arena.extend(other.arena.into_iter().map(|mut block| {
            block.parent = block.parent.map(shift);
            for child in &mut block.children {
                *child = shift(*child);
            }
            block
        }));
        self.roots.extend(other.roots.into_iter().map(shift));
        self.files.extend(other.files);
        self.ignores.extend(other.ignores);
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<BlockRef<'_>> {
        (id.0 < self.arena.len()).then_some(BlockRef { tree: self, id })
    }

    /// Top-level blocks in file order.
    pub fn roots(&self) -> impl Iterator<Item = BlockRef<'_>> + '_ {
        self.roots.iter().map(move |&id| BlockRef { tree: self, id })
    }

    /// Every block, depth-first: each block is followed by its descendants.
    pub fn walk(&self) -> Vec<BlockRef<'_>> {
        let mut out = Vec::with_capacity(self.arena.len());
        let mut stack: Vec<BlockId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(BlockRef { tree: self, id });
            stack.extend(self.arena[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Source text of a parsed file.
    pub fn source(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(String::as_str)
    }

    /// Parsed files in sorted order.
    pub fn files(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.keys().map(String::as_str)
    }

    pub fn ignores(&self) -> &InlineIgnores {
        &self.ignores
    }

    fn block(&self, id: BlockId) -> &Block {
        &self.arena[id.0]
    }
}

/// A read-only handle to a block and its surroundings.
#[derive(Clone, Copy)]
pub struct BlockRef<'a> {
    tree: &'a Blocks,
    id: BlockId,
}

impl<'a> BlockRef<'a> {
    pub fn id(&self) -> BlockId {
        self.id
    }

    fn data(&self) -> &'a Block {
        self.tree.block(self.id)
    }

    /// Block type keyword (`resource`, `ingress`, ...).
    pub fn kind(&self) -> &'a str {
        &self.data().kind
    }

    pub fn labels(&self) -> &'a [String] {
        &self.data().labels
    }

    pub fn label(&self, index: usize) -> Option<&'a str> {
        self.data().labels.get(index).map(String::as_str)
    }

    /// First label; the resource type for `resource` and `data` blocks.
    pub fn type_label(&self) -> Option<&'a str> {
        self.label(0)
    }

    /// Second label; the local name for `resource` and `data` blocks.
    pub fn name_label(&self) -> Option<&'a str> {
        self.label(1)
    }

    /// The block's address: kind and labels joined with dots,
    /// e.g. `resource.aws_s3_bucket.logs`.
    pub fn full_name(&self) -> String {
        let data = self.data();
        std::iter::once(data.kind.as_str())
            .chain(data.labels.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Name used in finding descriptions: `type.name` for resources and data
    /// sources, the full address otherwise.
    pub fn display_name(&self) -> String {
        match self.kind() {
            "resource" | "data" if !self.labels().is_empty() => self.labels().join("."),
            _ => self.full_name(),
        }
    }

    pub fn range(&self) -> &'a Range {
        &self.data().range
    }

    pub fn attribute(&self, name: &str) -> Option<&'a Attribute> {
        self.data().attributes.get(name)
    }

    /// Attributes in name order.
    pub fn attributes(self) -> impl Iterator<Item = &'a Attribute> {
        self.data().attributes.values()
    }

    pub fn children(self) -> impl Iterator<Item = BlockRef<'a>> {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| BlockRef { tree, id })
    }

    /// First direct child of the given kind.
    pub fn child(self, kind: &str) -> Option<BlockRef<'a>> {
        self.children().find(|c| c.kind() == kind)
    }

    pub fn children_of_kind(self, kind: &str) -> impl Iterator<Item = BlockRef<'a>> {
        self.children().filter(move |c| c.kind() == kind)
    }

    pub fn parent(&self) -> Option<BlockRef<'a>> {
        let tree = self.tree;
        self.data().parent.map(|id| BlockRef { tree, id })
    }

    /// Parent, grandparent and so on up to the top-level block.
    pub fn ancestors(self) -> impl Iterator<Item = BlockRef<'a>> {
        std::iter::successors(self.parent(), |b| b.parent())
    }

    /// The top-level block this block belongs to (itself if top-level).
    pub fn root(self) -> BlockRef<'a> {
        self.ancestors().last().unwrap_or(self)
    }

    /// Whether this is a `resource` block of one of the given types.
    pub fn is_resource(&self, types: &[&str]) -> bool {
        self.kind() == "resource" && self.type_label().is_some_and(|t| types.contains(&t))
    }
}

impl std::fmt::Debug for BlockRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRef")
            .field("name", &self.full_name())
            .field("range", self.range())
            .finish()
    }
}
