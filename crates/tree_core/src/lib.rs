mod error;
mod flat;
mod model;

pub use crate::error::*;
pub use crate::flat::*;
pub use crate::model::*;
