use crate::children::error::FlattenError;
use crate::children::key::KeyPath;
use crate::children::model::{ChildrenModel, StandardModel};
use crate::children::types::{Child, FlattenConfig};
use tracing::{debug, trace};

/// Flattens a children value into its renderable leaves, expanding fragments
/// and re-keying every element with the keys of the fragments around it
pub struct Flattener<M: ChildrenModel = StandardModel> {
    model: M,
    config: FlattenConfig,
}

impl Flattener<StandardModel> {
    pub fn new(config: FlattenConfig) -> Self {
        Flattener::with_model(StandardModel, config)
    }
}

impl Default for Flattener<StandardModel> {
    fn default() -> Self {
        Flattener::new(FlattenConfig::default())
    }
}

impl<M: ChildrenModel> Flattener<M> {
    pub fn with_model(model: M, config: FlattenConfig) -> Self {
        Flattener { model, config }
    }

    /// Flatten `children` into an ordered list of leaves.
    ///
    /// Elements come back as copies carrying their composed key; text,
    /// numbers and bigints are returned unchanged. Either every leaf is
    /// produced or the first re-keying failure is returned.
    pub fn flatten(&self, children: &M::Node) -> Result<Vec<M::Node>, FlattenError> {
        let mut leaves = Vec::new();
        self.flatten_into(children, 0, KeyPath::new(), &mut leaves)?;
        debug!(leaves = leaves.len(), "flattened children");
        Ok(leaves)
    }

    fn flatten_into(
        &self,
        children: &M::Node,
        depth: usize,
        key_path: KeyPath,
        leaves: &mut Vec<M::Node>,
    ) -> Result<(), FlattenError> {
        for (index, traversed) in self.model.traverse(children).into_iter().enumerate() {
            let node = traversed.node;

            if let Some(inner) = self.model.fragment_children(node) {
                let segment = if traversed.key.is_empty() {
                    index.to_string()
                } else {
                    traversed.key
                };
                let nested = key_path.push(segment);
                trace!(depth, path = %nested, "expanding fragment");
                self.flatten_into(inner, depth + 1, nested, leaves)?;
            } else if self.model.is_element(node) {
                let key = key_path.join(&traversed.key, &self.config.separator);
                leaves.push(self.model.clone_with_key(node, key)?);
            } else if self.model.is_primitive(node) {
                leaves.push(node.clone());
            }
        }

        Ok(())
    }
}

/// Flatten a [`Child`] tree with the default configuration
pub fn flatten_children(children: &Child) -> Result<Vec<Child>, FlattenError> {
    Flattener::default().flatten(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::children::traverse::Traversed;
    use crate::children::types::{Element, Fragment};
    use serde_json::json;

    fn keys(leaves: &[Child]) -> Vec<Option<&str>> {
        leaves.iter().map(Child::key).collect()
    }

    fn span(key: Option<&str>, text: &str) -> Child {
        let element = Element::new("span").with_children(text);
        match key {
            Some(key) => element.with_key(key).into(),
            None => element.into(),
        }
    }

    #[test]
    fn test_top_level_keys() {
        let children = Child::List(vec![
            span(None, "one"),
            "two".into(),
            span(None, "three"),
            "10".into(),
        ]);

        let leaves = flatten_children(&children).unwrap();

        assert_eq!(leaves.len(), 4);
        assert_eq!(leaves[0].key(), Some(".0"));
        assert_eq!(leaves[1], Child::text("two"));
        assert_eq!(leaves[2].key(), Some(".2"));
        assert_eq!(leaves[3], Child::text("10"));
    }

    #[test]
    fn test_unkeyed_fragments() {
        let children = Child::List(vec![
            Fragment::new(Child::List(vec![span(Some("one"), "one"), span(Some("two"), "two")]))
                .into(),
            Fragment::new(Child::List(vec![span(Some("three"), "three")])).into(),
        ]);

        let leaves = flatten_children(&children).unwrap();

        assert_eq!(
            keys(&leaves),
            vec![Some(".0..$one"), Some(".0..$two"), Some(".1..$three")]
        );
    }

    #[test]
    fn test_nested_fragments_accumulate_segments() {
        let inner = Fragment::new(span(None, "deep")).with_key("inner");
        let outer = Fragment::new(Child::List(vec![span(None, "shallow"), inner.into()]))
            .with_key("outer");

        let leaves = flatten_children(&outer.into()).unwrap();

        assert_eq!(
            keys(&leaves),
            vec![Some(".$outer..0"), Some(".$outer..$inner..0")]
        );
    }

    #[test]
    fn test_empty_fragment_keeps_sibling_positions() {
        let children = Child::List(vec![
            span(None, "one"),
            Fragment::new(Child::List(vec![Child::Empty, Child::Bool(true)])).into(),
            span(None, "three"),
        ]);

        let leaves = flatten_children(&children).unwrap();

        assert_eq!(keys(&leaves), vec![Some(".0"), Some(".2")]);
    }

    #[test]
    fn test_attributes_survive_rekeying() {
        let element = Element::new("a")
            .with_key("home")
            .with_prop("href", json!("/"))
            .with_children("Home");
        let leaves = flatten_children(&Fragment::new(element).into()).unwrap();
        let rekeyed = leaves[0].as_element().unwrap();

        assert_eq!(rekeyed.key.as_deref(), Some(".0..$home"));
        assert_eq!(rekeyed.props.get("href").unwrap(), "/");
        assert_eq!(*rekeyed.children, Child::text("Home"));
    }

    #[test]
    fn test_custom_separator() {
        let children = Fragment::new(span(Some("one"), "one")).with_key("apple");
        let flattener = Flattener::new(FlattenConfig {
            separator: "/".to_string(),
        });

        let leaves = flattener.flatten(&children.into()).unwrap();

        assert_eq!(keys(&leaves), vec![Some(".$apple/.$one")]);
    }

    #[test]
    fn test_primitives_and_discarded_values() {
        let children = Child::List(vec![
            Child::Number(10.into()),
            Child::BigInt("9007199254740993".into()),
            Child::Empty,
            Child::Bool(false),
            "text".into(),
        ]);

        let leaves = flatten_children(&children).unwrap();

        assert_eq!(
            leaves,
            vec![
                Child::Number(10.into()),
                Child::BigInt("9007199254740993".into()),
                Child::text("text"),
            ]
        );
    }

    /// A model whose traversal hands back keyless fragments, like a host
    /// primitive that only numbers its slots
    struct KeylessModel;

    impl ChildrenModel for KeylessModel {
        type Node = Child;

        fn list_items<'a>(&self, node: &'a Child) -> Option<&'a [Child]> {
            StandardModel.list_items(node)
        }

        fn is_discarded(&self, node: &Child) -> bool {
            StandardModel.is_discarded(node)
        }

        fn fragment_children<'a>(&self, node: &'a Child) -> Option<&'a Child> {
            StandardModel.fragment_children(node)
        }

        fn is_element(&self, node: &Child) -> bool {
            StandardModel.is_element(node)
        }

        fn is_primitive(&self, node: &Child) -> bool {
            StandardModel.is_primitive(node)
        }

        fn explicit_key<'a>(&self, node: &'a Child) -> Option<&'a str> {
            StandardModel.explicit_key(node)
        }

        fn clone_with_key(&self, node: &Child, key: String) -> Result<Child, FlattenError> {
            StandardModel.clone_with_key(node, key)
        }

        fn traverse<'a>(&self, children: &'a Child) -> Vec<Traversed<'a, Child>> {
            StandardModel
                .traverse(children)
                .into_iter()
                .map(|t| match t.node {
                    Child::Fragment(_) => Traversed {
                        node: t.node,
                        key: String::new(),
                    },
                    _ => t,
                })
                .collect()
        }
    }

    #[test]
    fn test_keyless_fragment_falls_back_to_index() {
        let children = Child::List(vec![
            span(None, "one"),
            Fragment::new(span(None, "two")).into(),
        ]);
        let flattener = Flattener::with_model(KeylessModel, FlattenConfig::default());

        let leaves = flattener.flatten(&children).unwrap();

        assert_eq!(keys(&leaves), vec![Some(".0"), Some("1..0")]);
    }

    /// A model that refuses to copy any element
    struct FrozenModel;

    impl ChildrenModel for FrozenModel {
        type Node = Child;

        fn list_items<'a>(&self, node: &'a Child) -> Option<&'a [Child]> {
            StandardModel.list_items(node)
        }

        fn is_discarded(&self, node: &Child) -> bool {
            StandardModel.is_discarded(node)
        }

        fn fragment_children<'a>(&self, node: &'a Child) -> Option<&'a Child> {
            StandardModel.fragment_children(node)
        }

        fn is_element(&self, node: &Child) -> bool {
            StandardModel.is_element(node)
        }

        fn is_primitive(&self, node: &Child) -> bool {
            StandardModel.is_primitive(node)
        }

        fn explicit_key<'a>(&self, node: &'a Child) -> Option<&'a str> {
            StandardModel.explicit_key(node)
        }

        fn clone_with_key(&self, _node: &Child, key: String) -> Result<Child, FlattenError> {
            Err(FlattenError::Clone {
                key,
                reason: "frozen".to_string(),
            })
        }
    }

    #[test]
    fn test_clone_failure_aborts_whole_call() {
        let children = Child::List(vec!["before".into(), span(None, "one")]);
        let flattener = Flattener::with_model(FrozenModel, FlattenConfig::default());

        let err = flattener.flatten(&children).unwrap_err();

        match err {
            FlattenError::Clone { key, .. } => assert_eq!(key, ".1"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
