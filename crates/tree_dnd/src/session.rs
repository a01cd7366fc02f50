use serde::{Deserialize, Serialize};
use sortree_core::{FlatNode, TreeId};

use crate::projection::{project, Projection};

/// Pixels of horizontal indentation per depth level. Matches what the row
/// renderer should use, or the depth inferred from a drag won't line up.
pub const LEVEL_INDENTATION: f32 = 12.0;

/// Per-drag session state, owned by the host and threaded through each call.
///
/// Created on drag start, updated on every move/over event, cleared on end
/// or cancel. Clearing never touches the tree, so cancellation is always
/// safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub active_id: Option<TreeId>,
    pub over_id: Option<TreeId>,
    pub horizontal_offset: f32,
    pub indentation_width: f32,
}

impl Default for DragState {
    fn default() -> Self {
        Self {
            active_id: None,
            over_id: None,
            horizontal_offset: 0.0,
            indentation_width: LEVEL_INDENTATION,
        }
    }
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indentation(indentation_width: f32) -> Self {
        Self {
            indentation_width,
            ..Self::default()
        }
    }

    pub fn begin(&mut self, active_id: impl Into<TreeId>) {
        self.active_id = Some(active_id.into());
        self.over_id = None;
        self.horizontal_offset = 0.0;
    }

    pub fn set_over(&mut self, over_id: Option<TreeId>) {
        self.over_id = over_id;
    }

    pub fn set_offset(&mut self, horizontal_offset: f32) {
        self.horizontal_offset = horizontal_offset;
    }

    pub fn is_dragging(&self) -> bool {
        self.active_id.is_some()
    }

    /// Drop the session on drag end or cancel.
    pub fn clear(&mut self) {
        self.active_id = None;
        self.over_id = None;
        self.horizontal_offset = 0.0;
    }

    /// Current candidate placement, or `None` while there is no valid target.
    pub fn projection(&self, items: &[FlatNode]) -> Option<Projection> {
        let active_id = self.active_id.as_deref()?;
        let over_id = self.over_id.as_deref()?;
        project(
            items,
            active_id,
            over_id,
            self.horizontal_offset,
            self.indentation_width,
        )
    }
}
