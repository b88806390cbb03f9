//! The capabilities the flattener needs from a host's node model

use crate::children::error::FlattenError;
use crate::children::traverse::{self, Traversed};
use crate::children::types::Child;

/// A host's view of its children values.
///
/// Hosts that already ship a canonical traversal should override
/// [`ChildrenModel::traverse`]; the default applies [`traverse::to_array`].
pub trait ChildrenModel {
    type Node: Clone;

    /// Items of a raw sequence, or `None` if `node` is not one
    fn list_items<'a>(&self, node: &'a Self::Node) -> Option<&'a [Self::Node]>;

    /// Slots that render nothing (null, undefined, booleans)
    fn is_discarded(&self, node: &Self::Node) -> bool;

    /// Wrapped children of a grouping container, or `None` if `node` is not one
    fn fragment_children<'a>(&self, node: &'a Self::Node) -> Option<&'a Self::Node>;

    fn is_element(&self, node: &Self::Node) -> bool;

    /// Text, numbers and bigints
    fn is_primitive(&self, node: &Self::Node) -> bool;

    fn explicit_key<'a>(&self, node: &'a Self::Node) -> Option<&'a str>;

    /// Shallow copy of an element carrying `key`, all other attributes preserved
    fn clone_with_key(&self, node: &Self::Node, key: String) -> Result<Self::Node, FlattenError>;

    fn traverse<'a>(&self, children: &'a Self::Node) -> Vec<Traversed<'a, Self::Node>> {
        traverse::to_array(self, children)
    }
}

/// The model for this crate's own [`Child`] tree
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardModel;

impl ChildrenModel for StandardModel {
    type Node = Child;

    fn list_items<'a>(&self, node: &'a Child) -> Option<&'a [Child]> {
        match node {
            Child::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    fn is_discarded(&self, node: &Child) -> bool {
        matches!(node, Child::Empty | Child::Bool(_))
    }

    fn fragment_children<'a>(&self, node: &'a Child) -> Option<&'a Child> {
        match node {
            Child::Fragment(fragment) => Some(fragment.children.as_ref()),
            _ => None,
        }
    }

    fn is_element(&self, node: &Child) -> bool {
        matches!(node, Child::Element(_))
    }

    fn is_primitive(&self, node: &Child) -> bool {
        matches!(node, Child::Text(_) | Child::Number(_) | Child::BigInt(_))
    }

    fn explicit_key<'a>(&self, node: &'a Child) -> Option<&'a str> {
        node.key()
    }

    fn clone_with_key(&self, node: &Child, key: String) -> Result<Child, FlattenError> {
        match node {
            Child::Element(element) => {
                let mut element = element.clone();
                element.key = Some(key);
                Ok(Child::Element(element))
            }
            other => Err(FlattenError::Clone {
                key,
                reason: format!("not an element: {:?}", other),
            }),
        }
    }
}
