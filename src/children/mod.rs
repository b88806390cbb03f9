//! Children flattening - expand fragments and nested sequences into keyed leaves
//!
//! A children value is normalized by a traversal primitive into keyed slots,
//! then every fragment is expanded in place while its key is pushed onto the
//! key path inherited by its descendants.
//!
//! ## Custom hosts
//!
//! Implement [`ChildrenModel`] for a foreign node type to reuse the
//! flattener; override `traverse` if the host already assigns slot keys.

pub mod types;
pub mod error;
pub mod key;
pub mod traverse;
pub mod model;
pub mod flattener;
pub mod json;
pub mod writer;

pub use types::{Child, Element, FlattenConfig, Fragment};
pub use error::FlattenError;
pub use key::KeyPath;
pub use traverse::Traversed;
pub use model::{ChildrenModel, StandardModel};
pub use flattener::{flatten_children, Flattener};
pub use writer::{LeafWriter, OutputMode};
