use log::debug;
use serde::{Deserialize, Serialize};
use sortree_core::{FlatKind, FlatNode, TreeId};

use crate::movement::{move_subtree, new_parent_id, subtree_len};
use crate::projection::drag_depth;

/// Vertical gap, in pixels, reserved at a collapsed folder's edges so that
/// inserting immediately before/after it stays reachable instead of being
/// swallowed by the "drop inside" middle zone.
pub const BETWEEN_FOLDERS_GAP: f32 = 10.0;

/// Vertical bounds of one rendered row, in the same coordinate space as the
/// pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Which vertical zone of the over row the pointer is in. `Middle` only
/// exists over collapsed folders; everywhere else top and bottom split the
/// row at its midline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverZone {
    Top,
    Middle,
    Bottom,
}

/// The placement a drop would commit right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub depth: usize,
    pub parent_id: Option<TreeId>,
    /// Insertion index among the visible rows: the over row for a top-zone
    /// hit, one past it otherwise.
    pub index: usize,
}

/// Render-only highlight region covering the sibling block of the target
/// parent. Not needed for move correctness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupBounds {
    pub top: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub active_id: TreeId,
    pub over_id: TreeId,
    pub zone: OverZone,
    pub target: DropTarget,
    pub group_bounds: Option<GroupBounds>,
}

/// Refine "which row is the pointer over" into a zone plus a concrete drop
/// target.
///
/// `items` and `rects` are the visible rows in render order with their
/// bounds; `over_ix` is the row the host's hit-testing picked. Returns
/// `None` when the hit is stale (index out of range, active item not in the
/// list) or the row set and bounds disagree.
pub fn detect_intersection(
    items: &[FlatNode],
    rects: &[Rect],
    active_id: &str,
    over_ix: usize,
    pointer_y: f32,
    drag_offset: f32,
    indentation_width: f32,
) -> Option<Intersection> {
    if items.len() != rects.len() || over_ix >= items.len() {
        return None;
    }
    let active = items.iter().find(|item| item.id == active_id)?;

    let over = &items[over_ix];
    let over_rect = rects[over_ix];
    let previous = over_ix.checked_sub(1).and_then(|ix| items.get(ix));
    let next = items.get(over_ix + 1);

    let is_itself = over.id == active_id;
    let zone = classify_zone(over, over_rect, pointer_y, is_itself);

    let (depth, parent_id, index) = if zone == OverZone::Middle {
        // A middle-zone hit on a collapsed folder drops inside it; edge
        // zones fall through to the usual sibling math below.
        (over.depth + 1, Some(over.id.clone()), over_ix + 1)
    } else {
        let min_depth = min_depth(over, next, zone, is_itself);
        let max_depth = max_depth(over, previous, zone, is_itself);
        let raw_depth = active.depth as isize + drag_depth(drag_offset, indentation_width);
        let depth = (raw_depth.max(min_depth as isize) as usize).min(max_depth);
        let index = if zone == OverZone::Top { over_ix } else { over_ix + 1 };
        (depth, new_parent_id(items, index, depth), index)
    };

    let target = DropTarget { depth, parent_id, index };
    let group_bounds = group_bounds(items, rects, over_ix, zone, &target);
    debug!(
        "intersection: over={} zone={zone:?} depth={depth} parent={:?}",
        over.id, target.parent_id
    );

    Some(Intersection {
        active_id: active_id.to_string(),
        over_id: over.id.clone(),
        zone,
        target,
        group_bounds,
    })
}

fn classify_zone(over: &FlatNode, rect: Rect, pointer_y: f32, is_itself: bool) -> OverZone {
    // Collapsed folders shrink the edge zones to a small gap so the middle
    // "drop inside" zone dominates the row.
    let (top_limit, bottom_limit) = if over.is_collapsed_folder() && !is_itself {
        (
            rect.top + BETWEEN_FOLDERS_GAP / 2.0,
            rect.bottom - BETWEEN_FOLDERS_GAP / 2.0,
        )
    } else {
        let mid = rect.top + rect.height() / 2.0;
        (mid, mid)
    };

    if pointer_y <= top_limit {
        OverZone::Top
    } else if pointer_y >= bottom_limit {
        OverZone::Bottom
    } else {
        OverZone::Middle
    }
}

fn min_depth(over: &FlatNode, next: Option<&FlatNode>, zone: OverZone, is_itself: bool) -> usize {
    if zone == OverZone::Bottom {
        if let Some(next) = next {
            if over.depth > next.depth {
                return next.depth;
            }
        }
        if !is_itself {
            return over.depth + 1;
        }
    }
    over.depth
}

fn max_depth(
    over: &FlatNode,
    previous: Option<&FlatNode>,
    zone: OverZone,
    is_itself: bool,
) -> usize {
    if zone == OverZone::Top {
        if let Some(previous) = previous {
            if over.depth < previous.depth {
                return previous.depth;
            }
        }
    }
    if zone == OverZone::Bottom && over.is_folder() && !is_itself {
        return over.depth + 1;
    }
    over.depth
}

fn group_bounds(
    items: &[FlatNode],
    rects: &[Rect],
    over_ix: usize,
    zone: OverZone,
    target: &DropTarget,
) -> Option<GroupBounds> {
    let over = &items[over_ix];
    let start_id = if over.is_folder() && zone != OverZone::Top && !over.is_collapsed_folder() {
        &over.id
    } else {
        target.parent_id.as_ref()?
    };

    let start_ix = items.iter().position(|item| item.id == *start_id)?;
    let top = rects[start_ix].top;
    let bottom = if items[start_ix].is_collapsed_folder() {
        rects[start_ix].bottom
    } else {
        // The group ends where a shallower row starts, or at the last row.
        items[start_ix + 1..]
            .iter()
            .position(|item| item.depth < target.depth)
            .map(|offset| rects[start_ix + 1 + offset].top)
            .unwrap_or_else(|| rects.last().map_or(top, |rect| rect.bottom))
    };

    Some(GroupBounds {
        top,
        height: bottom - top,
    })
}

/// Commit an intersection against the full (unfiltered) flat list.
///
/// A middle-zone drop on a collapsed folder un-collapses it and lands the
/// dragged subtree after the folder's hidden descendants, as its last child.
pub fn apply_intersection(items: &[FlatNode], intersection: &Intersection) -> Vec<FlatNode> {
    let Some(from) = items
        .iter()
        .position(|item| item.id == intersection.active_id)
    else {
        return items.to_vec();
    };
    let Some(over_ix) = items.iter().position(|item| item.id == intersection.over_id) else {
        return items.to_vec();
    };

    let mut to = if intersection.zone == OverZone::Top || from == over_ix {
        over_ix
    } else {
        over_ix + 1
    };

    let mut items = items.to_vec();
    if intersection.zone == OverZone::Middle && items[over_ix].is_collapsed_folder() {
        if let FlatKind::Folder { collapsed, .. } = &mut items[over_ix].kind {
            *collapsed = false;
        }
        to += subtree_len(&items, over_ix) - 1;
    }

    move_subtree(&items, from, to, intersection.target.depth)
}
