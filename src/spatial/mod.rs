//! Where components live: the kind catalog, the cell grid and the
//! coordinate checks guarding every write

/// Component kinds and display names
pub mod catalog;
/// Square cell matrix with checked placement
pub mod grid;
/// Coordinate validation and neighbourhood helpers
pub mod validator;

pub use catalog::{Catalog, ComponentType};
pub use grid::GridStore;
pub use validator::Position;
