use log::trace;
use serde::{Deserialize, Serialize};
use sortree_core::{FlatNode, TreeId};

use crate::movement::new_parent_id;

/// Candidate placement for the dragged item at this moment of the drag.
/// Recomputed on every drag-move event and thrown away unless the drop
/// commits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub depth: usize,
    pub parent_id: Option<TreeId>,
}

pub(crate) fn drag_depth(offset: f32, indentation_width: f32) -> isize {
    (offset / indentation_width).round() as isize
}

/// Compute the legal depth and parent for the dragged item, given the item
/// currently under the pointer and the horizontal drag offset.
///
/// Returns `None` when either id is missing from the list: a routine state
/// while the pointer is over empty space, not an error.
pub fn project(
    items: &[FlatNode],
    active_id: &str,
    over_id: &str,
    drag_offset: f32,
    indentation_width: f32,
) -> Option<Projection> {
    let active_ix = items.iter().position(|item| item.id == active_id)?;
    let over_ix = items.iter().position(|item| item.id == over_id)?;
    let active = &items[active_ix];

    // Preview the list as if the active item already sat at the over index,
    // so the neighbors around the would-be insertion point are the real ones.
    let sorted = array_move(items, active_ix, over_ix);
    let previous = over_ix.checked_sub(1).and_then(|ix| sorted.get(ix));
    let next = sorted.get(over_ix + 1);

    let depth = projected_depth(active, previous, next, drag_offset, indentation_width);
    let parent_id = new_parent_id(&sorted, over_ix, depth);
    trace!("projected active={active_id} over={over_id} depth={depth} parent={parent_id:?}");

    Some(Projection { depth, parent_id })
}

fn projected_depth(
    active: &FlatNode,
    previous: Option<&FlatNode>,
    next: Option<&FlatNode>,
    drag_offset: f32,
    indentation_width: f32,
) -> usize {
    let max_depth = match previous {
        None => 0,
        Some(prev) if prev.is_folder() => prev.depth + 1,
        Some(prev) => prev.depth,
    };
    let min_depth = next.map_or(0, |next| next.depth);
    let raw_depth = active.depth as isize + drag_depth(drag_offset, indentation_width);

    // At or above max snaps to max before the min bound is considered.
    if raw_depth >= max_depth as isize {
        max_depth
    } else if raw_depth < min_depth as isize {
        min_depth
    } else {
        raw_depth as usize
    }
}

fn array_move(items: &[FlatNode], from: usize, to: usize) -> Vec<FlatNode> {
    let mut out = items.to_vec();
    let item = out.remove(from);
    out.insert(to.min(out.len()), item);
    out
}
