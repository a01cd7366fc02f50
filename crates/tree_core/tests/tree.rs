use sortree_core::{
    flatten, rebuild, visible_nodes, FlatKind, FlatNode, FolderNode, StructuralError, Tree,
    TreeNode,
};

/// The shared fixture tree:
///
/// - Folder 1 ______ 0
///   - Folder 2 ____ 1  (collapsed)
///     - File 1 ____ 2
///     - File 2 ____ 3
///   - File 3 ______ 4
///   - File 4 ______ 5
/// - Folder 3 ______ 6
///   - File 5 ______ 7
///   - File 6 ______ 8
/// - File 7 ________ 9
/// - File 8 _______ 10
fn fixture_tree() -> Tree {
    vec![
        TreeNode::Folder(
            FolderNode::new("Folder 1")
                .child(TreeNode::Folder(
                    FolderNode::new("Folder 2")
                        .collapsed(true)
                        .child(TreeNode::file("File 1"))
                        .child(TreeNode::file("File 2")),
                ))
                .child(TreeNode::file("File 3"))
                .child(TreeNode::file("File 4")),
        ),
        TreeNode::Folder(
            FolderNode::new("Folder 3")
                .child(TreeNode::file("File 5"))
                .child(TreeNode::file("File 6")),
        ),
        TreeNode::file("File 7"),
        TreeNode::file("File 8"),
    ]
}

fn shape(items: &[FlatNode]) -> Vec<(&str, usize, Option<&str>)> {
    items
        .iter()
        .map(|item| (item.id.as_str(), item.depth, item.parent_id.as_deref()))
        .collect()
}

#[test]
fn flatten_is_pre_order_with_parent_and_depth() {
    let flat = flatten(&fixture_tree());

    assert_eq!(
        shape(&flat),
        vec![
            ("folder-1", 0, None),
            ("folder-2", 1, Some("folder-1")),
            ("file-1", 2, Some("folder-2")),
            ("file-2", 2, Some("folder-2")),
            ("file-3", 1, Some("folder-1")),
            ("file-4", 1, Some("folder-1")),
            ("folder-3", 0, None),
            ("file-5", 1, Some("folder-3")),
            ("file-6", 1, Some("folder-3")),
            ("file-7", 0, None),
            ("file-8", 0, None),
        ]
    );
}

#[test]
fn flatten_depths_are_parent_depth_plus_one() {
    let flat = flatten(&fixture_tree());

    for item in &flat {
        match &item.parent_id {
            None => assert_eq!(item.depth, 0, "root item {}", item.id),
            Some(parent_id) => {
                let parent = flat
                    .iter()
                    .find(|candidate| candidate.id == *parent_id)
                    .expect("parent present");
                assert_eq!(item.depth, parent.depth + 1, "item {}", item.id);
            }
        }
    }
}

#[test]
fn subtrees_are_contiguous_runs() {
    let flat = flatten(&fixture_tree());

    for (ix, item) in flat.iter().enumerate() {
        if !item.is_folder() {
            continue;
        }
        // the run of strictly deeper items right after a folder must contain
        // every node that names it as an ancestor
        let run_len = flat[ix + 1..]
            .iter()
            .take_while(|other| other.depth > item.depth)
            .count();
        let descendant_count = flat
            .iter()
            .filter(|other| {
                let mut cursor = other.parent_id.as_ref();
                while let Some(parent_id) = cursor {
                    if *parent_id == item.id {
                        return true;
                    }
                    cursor = flat
                        .iter()
                        .find(|candidate| candidate.id == *parent_id)
                        .and_then(|parent| parent.parent_id.as_ref());
                }
                false
            })
            .count();
        assert_eq!(run_len, descendant_count, "folder {}", item.id);
    }
}

#[test]
fn rebuild_round_trips_the_tree() {
    let tree = fixture_tree();
    assert_eq!(rebuild(&flatten(&tree)).expect("rebuild"), tree);
}

#[test]
fn rebuild_skips_duplicate_entries() {
    let mut flat = flatten(&fixture_tree());
    let duplicate = flat[4].clone();
    flat.push(duplicate);

    assert_eq!(rebuild(&flat).expect("rebuild"), fixture_tree());
}

#[test]
fn rebuild_tolerates_a_parent_after_its_children() {
    let flat = vec![
        FlatNode {
            id: "file-1".into(),
            name: "File 1".into(),
            parent_id: Some("folder-1".into()),
            depth: 1,
            kind: FlatKind::File,
        },
        FlatNode {
            id: "folder-1".into(),
            name: "Folder 1".into(),
            parent_id: None,
            depth: 0,
            kind: FlatKind::Folder {
                collapsed: false,
                child_count: 1,
            },
        },
    ];

    let tree = rebuild(&flat).expect("rebuild");
    assert_eq!(
        tree,
        vec![TreeNode::Folder(
            FolderNode::new("Folder 1").child(TreeNode::file("File 1"))
        )]
    );
}

#[test]
fn rebuild_rejects_a_missing_parent() {
    let flat = vec![FlatNode {
        id: "file-1".into(),
        name: "File 1".into(),
        parent_id: Some("gone".into()),
        depth: 1,
        kind: FlatKind::File,
    }];

    assert_eq!(
        rebuild(&flat),
        Err(StructuralError::MissingParent {
            parent_id: "gone".into()
        })
    );
}

#[test]
fn rebuild_rejects_a_file_used_as_parent() {
    let mut flat = flatten(&fixture_tree());
    // reparent file-8 under file-7
    let last = flat.last_mut().expect("non-empty");
    last.parent_id = Some("file-7".into());
    last.depth = 1;

    assert_eq!(
        rebuild(&flat),
        Err(StructuralError::NotAFolder {
            parent_id: "file-7".into()
        })
    );
}

#[test]
fn visible_hides_descendants_of_collapsed_folders() {
    let flat = flatten(&fixture_tree());
    let visible = visible_nodes(&flat, None);

    let ids: Vec<&str> = visible.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "folder-1", "folder-2", "file-3", "file-4", "folder-3", "file-5", "file-6", "file-7",
            "file-8",
        ]
    );
}

#[test]
fn visible_hides_nested_collapsed_runs_in_one_pass() {
    // folder-3 collapsed too: its children disappear, siblings stay
    let tree = sortree_core::set_collapsed(&fixture_tree(), "folder-3", true);
    let visible = visible_nodes(&flatten(&tree), None);

    let ids: Vec<&str> = visible.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["folder-1", "folder-2", "file-3", "file-4", "folder-3", "file-7", "file-8"]
    );
}

#[test]
fn visible_keeps_the_dragged_row_but_hides_its_subtree() {
    let flat = flatten(&fixture_tree());
    let visible = visible_nodes(&flat, Some("folder-3"));

    let ids: Vec<&str> = visible.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["folder-1", "folder-2", "file-3", "file-4", "folder-3", "file-7", "file-8"]
    );
}

#[test]
fn visible_is_idempotent() {
    let flat = flatten(&fixture_tree());
    let once = visible_nodes(&flat, Some("folder-1"));
    let twice = visible_nodes(&once, Some("folder-1"));

    assert_eq!(once, twice);
}

#[test]
fn tree_serializes_with_kind_tags() -> anyhow::Result<()> {
    let tree = fixture_tree();
    let json = serde_json::to_string(&tree)?;
    assert!(json.contains(r#""kind":"folder""#));
    assert!(json.contains(r#""kind":"file""#));

    let parsed: Tree = serde_json::from_str(&json)?;
    assert_eq!(parsed, tree);
    Ok(())
}
