use crate::children::error::FlattenError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

static BIGINT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// A children value: anything that can be passed where a UI tree accepts children.
///
/// Values are (de)serialized through [`serde_json::Value`]; see [`crate::children::json`]
/// for the interchange format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Child {
    /// `null` or `undefined`, e.g. a conditional that rendered nothing
    Empty,
    /// `true` / `false` from a short-circuited condition
    Bool(bool),
    Text(String),
    Number(Number),
    /// Arbitrary-precision integer, kept as its decimal literal
    BigInt(String),
    /// A raw, possibly nested, sequence of children
    List(Vec<Child>),
    Fragment(Fragment),
    Element(Element),
}

/// A renderable node with a type tag, an optional explicit key and attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// The element type, e.g. "span" or a component name
    pub element_type: String,

    /// Caller-supplied identity key
    pub key: Option<String>,

    /// Every other attribute of the element
    pub props: Map<String, Value>,

    /// The element's own children; never flattened by this crate
    pub children: Box<Child>,
}

/// A transparent grouping container around a children value
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub key: Option<String>,
    pub children: Box<Child>,
}

impl Element {
    pub fn new(element_type: impl Into<String>) -> Self {
        Element {
            element_type: element_type.into(),
            key: None,
            props: Map::new(),
            children: Box::new(Child::Empty),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: impl Into<Child>) -> Self {
        self.children = Box::new(children.into());
        self
    }
}

impl Fragment {
    pub fn new(children: impl Into<Child>) -> Self {
        Fragment {
            key: None,
            children: Box::new(children.into()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Child {
    pub fn text(text: impl Into<String>) -> Self {
        Child::Text(text.into())
    }

    pub fn list(children: impl IntoIterator<Item = Child>) -> Self {
        Child::List(children.into_iter().collect())
    }

    /// Build a bigint leaf, rejecting anything that is not a decimal integer literal
    pub fn bigint(literal: impl Into<String>) -> Result<Self, FlattenError> {
        let literal = literal.into();
        if BIGINT_REGEX.is_match(&literal) {
            Ok(Child::BigInt(literal))
        } else {
            Err(FlattenError::InvalidBigInt(literal))
        }
    }

    /// Build a number leaf from a float; NaN and infinities are rejected
    pub fn number(n: f64) -> Result<Self, FlattenError> {
        Number::from_f64(n)
            .map(Child::Number)
            .ok_or(FlattenError::NonFiniteNumber(n))
    }

    /// The explicit key of an element or fragment
    pub fn key(&self) -> Option<&str> {
        match self {
            Child::Element(element) => element.key.as_deref(),
            Child::Fragment(fragment) => fragment.key.as_deref(),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Child::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<i64> for Child {
    fn from(n: i64) -> Self {
        Child::Number(n.into())
    }
}

impl From<u64> for Child {
    fn from(n: u64) -> Self {
        Child::Number(n.into())
    }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self {
        Child::Bool(b)
    }
}

impl From<Vec<Child>> for Child {
    fn from(children: Vec<Child>) -> Self {
        Child::List(children)
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(element)
    }
}

impl From<Fragment> for Child {
    fn from(fragment: Fragment) -> Self {
        Child::Fragment(fragment)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map(Into::into).unwrap_or(Child::Empty)
    }
}

/// Configuration for the flattening process
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Separator placed between inherited key-path segments and the leaf key
    pub separator: String,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            separator: String::from("."),
        }
    }
}
