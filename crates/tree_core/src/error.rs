use thiserror::Error;

use crate::model::TreeId;

/// A flat list handed to [`crate::rebuild`] violated a structural invariant.
///
/// These indicate caller-supplied data corruption: the list can no longer be
/// turned back into a tree without losing nodes, so the error propagates
/// instead of being patched over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("flat list references parent `{parent_id}` which is not in the list")]
    MissingParent { parent_id: TreeId },
    #[error("node `{parent_id}` is a file and cannot own children")]
    NotAFolder { parent_id: TreeId },
}
