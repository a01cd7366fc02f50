use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;
use crate::model::{FileNode, FolderNode, Tree, TreeId, TreeNode};

/// A tree node projected into the pre-order flat list, annotated with its
/// owning folder and depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNode {
    pub id: TreeId,
    pub name: String,
    pub parent_id: Option<TreeId>,
    pub depth: usize,
    pub kind: FlatKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlatKind {
    Folder { collapsed: bool, child_count: usize },
    File,
}

impl FlatNode {
    fn from_node(node: &TreeNode, parent_id: Option<TreeId>, depth: usize) -> Self {
        let kind = match node {
            TreeNode::Folder(folder) => FlatKind::Folder {
                collapsed: folder.collapsed,
                child_count: folder.children.len(),
            },
            TreeNode::File(_) => FlatKind::File,
        };
        Self {
            id: node.id().clone(),
            name: node.name().to_string(),
            parent_id,
            depth,
            kind,
        }
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, FlatKind::Folder { .. })
    }

    #[inline]
    pub fn is_collapsed_folder(&self) -> bool {
        matches!(self.kind, FlatKind::Folder { collapsed: true, .. })
    }

    /// Direct (not recursive) child count recorded at flatten time; zero for
    /// files.
    #[inline]
    pub fn child_count(&self) -> usize {
        match self.kind {
            FlatKind::Folder { child_count, .. } => child_count,
            FlatKind::File => 0,
        }
    }
}

/// Linearize a tree in pre-order: every folder immediately precedes its
/// descendants, which form a contiguous run before the next sibling starts.
///
/// The move engine and the visibility filter both rely on that contiguity.
pub fn flatten(tree: &[TreeNode]) -> Vec<FlatNode> {
    let mut out = Vec::new();
    flatten_into(tree, None, 0, &mut out);
    out
}

fn flatten_into(
    nodes: &[TreeNode],
    parent_id: Option<&TreeId>,
    depth: usize,
    out: &mut Vec<FlatNode>,
) {
    for node in nodes {
        out.push(FlatNode::from_node(node, parent_id.cloned(), depth));
        if let TreeNode::Folder(folder) = node {
            flatten_into(&folder.children, Some(&folder.id), depth + 1, out);
        }
    }
}

/// Reassemble a nested tree from a flat list.
///
/// Nodes are constructed from the flat entry's own fields only; any stale
/// child data is ignored. Duplicate ids (possible after partial subtree
/// splices) are skipped after the first occurrence, and a parent entry that
/// appears after its children is tolerated. A parent id that is absent from
/// the list, or that resolves to a file, is unrecoverable here and reported
/// as a [`StructuralError`].
pub fn rebuild(items: &[FlatNode]) -> Result<Tree, StructuralError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    let mut by_id: HashMap<&str, &FlatNode> = HashMap::with_capacity(items.len());
    let mut child_items: HashMap<&str, Vec<&FlatNode>> = HashMap::new();
    let mut roots: Vec<&FlatNode> = Vec::new();

    for item in items {
        if !seen.insert(item.id.as_str()) {
            continue;
        }
        by_id.insert(item.id.as_str(), item);
        match &item.parent_id {
            None => roots.push(item),
            Some(parent_id) => child_items
                .entry(parent_id.as_str())
                .or_default()
                .push(item),
        }
    }

    for parent_id in child_items.keys() {
        match by_id.get(parent_id) {
            None => {
                return Err(StructuralError::MissingParent {
                    parent_id: (*parent_id).to_string(),
                });
            }
            Some(parent) if !parent.is_folder() => {
                return Err(StructuralError::NotAFolder {
                    parent_id: (*parent_id).to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(roots
        .iter()
        .map(|item| build_node(item, &child_items))
        .collect())
}

fn build_node(item: &FlatNode, child_items: &HashMap<&str, Vec<&FlatNode>>) -> TreeNode {
    match &item.kind {
        FlatKind::Folder { collapsed, .. } => {
            let children = child_items
                .get(item.id.as_str())
                .map(|children| {
                    children
                        .iter()
                        .map(|child| build_node(child, child_items))
                        .collect()
                })
                .unwrap_or_default();
            TreeNode::Folder(FolderNode {
                id: item.id.clone(),
                name: item.name.clone(),
                collapsed: *collapsed,
                children,
            })
        }
        // the flat row's id is authoritative, never re-derived from the name
        FlatKind::File => TreeNode::File(FileNode {
            id: item.id.clone(),
            name: item.name.clone(),
        }),
    }
}

/// The subset of a flat list that should actually be rendered: descendants of
/// collapsed folders and of the item being dragged are hidden. The dragged
/// item's own row stays (the host renders it as the drag placeholder).
///
/// Single forward pass; exclusion propagates through folders as they are
/// excluded, so deeper descendants never need a re-scan.
pub fn visible_nodes<'a>(items: &'a [FlatNode], active_id: Option<&'a str>) -> Vec<FlatNode> {
    let mut excluded: HashSet<&str> = HashSet::new();
    if let Some(id) = active_id {
        excluded.insert(id);
    }

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if item.is_collapsed_folder() && item.child_count() > 0 {
            excluded.insert(item.id.as_str());
        }

        if let Some(parent_id) = &item.parent_id {
            if excluded.contains(parent_id.as_str()) {
                if item.is_folder() && item.child_count() > 0 {
                    excluded.insert(item.id.as_str());
                }
                continue;
            }
        }

        out.push(item.clone());
    }
    out
}
