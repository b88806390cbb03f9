//! Normalization of a raw children value into keyed slots

use crate::children::key::{element_key, ROOT_PREFIX, SUBTREE_SEPARATOR};
use crate::children::model::ChildrenModel;

/// One surviving node of a traversal together with its synthesized key
#[derive(Debug, Clone, PartialEq)]
pub struct Traversed<'a, N> {
    pub node: &'a N,
    pub key: String,
}

/// Flatten raw sequences and drop empty slots, keying every survivor.
///
/// Discarded slots still consume their position, so `[a, false, b]` keys
/// `b` as `.2`. Nested sequences compose their positions with `:`.
pub fn to_array<'a, M>(model: &M, children: &'a M::Node) -> Vec<Traversed<'a, M::Node>>
where
    M: ChildrenModel + ?Sized,
{
    let mut out = Vec::new();
    map_into(model, children, "", &mut out);
    out
}

fn map_into<'a, M>(
    model: &M,
    child: &'a M::Node,
    name_so_far: &str,
    out: &mut Vec<Traversed<'a, M::Node>>,
) where
    M: ChildrenModel + ?Sized,
{
    if model.is_discarded(child) {
        return;
    }

    if let Some(items) = model.list_items(child) {
        let prefix = if name_so_far.is_empty() {
            ROOT_PREFIX.to_string()
        } else {
            format!("{}{}", name_so_far, SUBTREE_SEPARATOR)
        };

        for (index, item) in items.iter().enumerate() {
            let name = format!("{}{}", prefix, element_key(model.explicit_key(item), index));
            map_into(model, item, &name, out);
        }
        return;
    }

    let key = if name_so_far.is_empty() {
        format!("{}{}", ROOT_PREFIX, element_key(model.explicit_key(child), 0))
    } else {
        name_so_far.to_string()
    };

    out.push(Traversed { node: child, key });
}
