mod expand;
mod intersect;
mod movement;
mod projection;
mod session;

pub use crate::expand::*;
pub use crate::intersect::*;
pub use crate::movement::*;
pub use crate::projection::*;
pub use crate::session::*;

use sortree_core::{rebuild, FlatNode, StructuralError, Tree};

/// Apply an accepted drop to the full flat list and rebuild the tree.
///
/// The returned tree is a complete replacement; the caller swaps it in
/// wholesale. A structural error here means the flat list was corrupted by
/// the caller, and the recommended recovery is to abort the drag and keep
/// the pre-drag tree.
pub fn complete_drag(
    flat_items: &[FlatNode],
    intersection: &Intersection,
) -> Result<Tree, StructuralError> {
    rebuild(&apply_intersection(flat_items, intersection))
}
