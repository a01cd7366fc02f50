use log::warn;
use sortree_core::{FlatNode, TreeId};

/// Derive the parent id for an item sitting at `index` with `depth` in a
/// flat list, from its preceding neighbors.
///
/// The rule: no previous item or depth 0 resolves to root; a previous item at
/// the same depth shares its parent; a shallower previous item becomes the
/// parent; otherwise walk backward to the nearest item at the same depth and
/// inherit its parent.
pub fn new_parent_id(items: &[FlatNode], index: usize, depth: usize) -> Option<TreeId> {
    let previous = index.checked_sub(1).and_then(|ix| items.get(ix))?;

    if depth == previous.depth {
        return previous.parent_id.clone();
    }
    if depth > previous.depth {
        return Some(previous.id.clone());
    }

    items[..index]
        .iter()
        .rev()
        .find(|item| item.depth == depth)
        .and_then(|item| item.parent_id.clone())
}

/// Length of the subtree run starting at `start`: the item itself plus the
/// maximal following run at strictly greater depth. Files always move alone.
pub fn subtree_len(items: &[FlatNode], start: usize) -> usize {
    let Some(root) = items.get(start) else {
        return 0;
    };
    if !root.is_folder() {
        return 1;
    }
    1 + items[start + 1..]
        .iter()
        .take_while(|item| item.depth > root.depth)
        .count()
}

/// Relocate the item at `from` together with its entire subtree so that its
/// root lands at pre-removal index `to` with depth `target_depth`.
///
/// Relative order and relative depths inside the run are preserved; the moved
/// root's parent id is re-derived from its new neighbors. Pure: the input
/// list is left untouched.
pub fn move_subtree(
    items: &[FlatNode],
    from: usize,
    to: usize,
    target_depth: usize,
) -> Vec<FlatNode> {
    let Some(active) = items.get(from) else {
        warn!("move_subtree: from index {from} out of bounds (len {})", items.len());
        return items.to_vec();
    };

    let depth_delta = target_depth as isize - active.depth as isize;
    let count = subtree_len(items, from);

    let mut moved: Vec<FlatNode> = items.to_vec();
    let mut run: Vec<FlatNode> = moved.drain(from..from + count).collect();
    for item in &mut run {
        item.depth = item.depth.saturating_add_signed(depth_delta);
    }

    // `to` was measured before removal; positions past the removed run shift
    // left by the run's length.
    let insert_at = if to > from + 1 {
        to.saturating_sub(count)
    } else {
        to
    }
    .min(moved.len());

    moved.splice(insert_at..insert_at, run);
    moved[insert_at].parent_id = new_parent_id(&moved, insert_at, target_depth);
    moved
}
