use serde::{Deserialize, Serialize};

pub type TreeId = String;

/// A forest: the root level of a tree is an ordered sibling sequence.
pub type Tree = Vec<TreeNode>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Folder(FolderNode),
    File(FileNode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    pub id: TreeId,
    pub name: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: TreeId,
    pub name: String,
}

/// Default node id: the name lowercased, whitespace runs joined with `-`.
/// `"Folder 1"` becomes `"folder-1"`, `"notes.md"` stays `"notes.md"`.
fn slug_id(name: &str) -> TreeId {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl FolderNode {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slug_id(&name),
            name,
            collapsed: false,
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<TreeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<TreeNode>>) -> Self {
        self.children.extend(children.into());
        self
    }
}

impl FileNode {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slug_id(&name),
            name,
        }
    }

    pub fn id(mut self, id: impl Into<TreeId>) -> Self {
        self.id = id.into();
        self
    }
}

impl TreeNode {
    pub fn folder(name: impl Into<String>) -> Self {
        TreeNode::Folder(FolderNode::new(name))
    }

    pub fn file(name: impl Into<String>) -> Self {
        TreeNode::File(FileNode::new(name))
    }

    #[inline]
    pub fn id(&self) -> &TreeId {
        match self {
            TreeNode::Folder(folder) => &folder.id,
            TreeNode::File(file) => &file.id,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder(folder) => &folder.name,
            TreeNode::File(file) => &file.name,
        }
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File(_))
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            TreeNode::Folder(folder) => Some(folder),
            TreeNode::File(_) => None,
        }
    }
}

/// Map over the tree, applying `mutator` to the node with a matching id.
///
/// Builds a fresh tree rather than mutating in place, so in-flight flat list
/// snapshots taken from the old tree stay valid.
pub fn update_node<F>(tree: &[TreeNode], id: &str, mutator: &F) -> Tree
where
    F: Fn(TreeNode) -> TreeNode,
{
    tree.iter()
        .cloned()
        .map(|node| {
            let node = if node.id() == id { mutator(node) } else { node };
            match node {
                TreeNode::Folder(mut folder) => {
                    folder.children = update_node(&folder.children, id, mutator);
                    TreeNode::Folder(folder)
                }
                file @ TreeNode::File(_) => file,
            }
        })
        .collect()
}

/// Toggle helper over [`update_node`]; ignores files.
pub fn set_collapsed(tree: &[TreeNode], id: &str, collapsed: bool) -> Tree {
    update_node(tree, id, &|node| match node {
        TreeNode::Folder(folder) => TreeNode::Folder(FolderNode { collapsed, ..folder }),
        file => file,
    })
}
