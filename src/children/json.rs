//! JSON interchange for children values
//!
//! | JSON                                              | Child             |
//! |---------------------------------------------------|-------------------|
//! | `null`                                            | `Empty`           |
//! | `true` / `false`                                  | `Bool`            |
//! | number                                            | `Number`          |
//! | string                                            | `Text`            |
//! | array                                             | `List`            |
//! | `{"$bigint": "123"}`                              | `BigInt`          |
//! | `{"type": "#fragment", "key"?, "children"?}`      | `Fragment`        |
//! | `{"type": "span", "key"?, "props"?, "children"?}` | `Element`         |
//!
//! Keys may be strings or numbers; numbers are stringified the way JavaScript
//! does (`1.0` becomes `"1"`). Any field not listed above is a decode error.

use crate::children::error::FlattenError;
use crate::children::types::{Child, Element, Fragment};
use serde_json::{Map, Number, Value};

/// Type tag that marks a fragment object
pub const FRAGMENT_TYPE: &str = "#fragment";

const BIGINT_FIELD: &str = "$bigint";

impl TryFrom<Value> for Child {
    type Error = FlattenError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Child::Empty),
            Value::Bool(b) => Ok(Child::Bool(b)),
            Value::Number(n) => Ok(Child::Number(n)),
            Value::String(s) => Ok(Child::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Child::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Child::List),
            Value::Object(obj) => from_object(obj),
        }
    }
}

fn from_object(mut obj: Map<String, Value>) -> Result<Child, FlattenError> {
    if let Some(literal) = obj.remove(BIGINT_FIELD) {
        reject_leftovers(&obj, BIGINT_FIELD)?;
        return match literal {
            Value::String(s) => Child::bigint(s),
            other => Err(FlattenError::InvalidBigInt(other.to_string())),
        };
    }

    let element_type = match obj.remove("type") {
        Some(Value::String(t)) => t,
        Some(other) => {
            return Err(FlattenError::Decode(format!(
                "\"type\" must be a string, got {}",
                other
            )))
        }
        None => {
            return Err(FlattenError::Decode(
                "object children need a \"type\" or \"$bigint\" field".to_string(),
            ))
        }
    };

    let key = match obj.remove("key") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(number_key(&n)),
        Some(other) => {
            return Err(FlattenError::Decode(format!(
                "\"key\" must be a string or number, got {}",
                other
            )))
        }
    };

    let children = match obj.remove("children") {
        Some(value) => Child::try_from(value)?,
        None => Child::Empty,
    };

    if element_type == FRAGMENT_TYPE {
        reject_leftovers(&obj, FRAGMENT_TYPE)?;
        return Ok(Child::Fragment(Fragment {
            key,
            children: Box::new(children),
        }));
    }

    let props = match obj.remove("props") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(props)) => props,
        Some(other) => {
            return Err(FlattenError::Decode(format!(
                "\"props\" must be an object, got {}",
                other
            )))
        }
    };

    reject_leftovers(&obj, &element_type)?;

    Ok(Child::Element(Element {
        element_type,
        key,
        props,
        children: Box::new(children),
    }))
}

/// Fail on any field the object form of `what` does not define
fn reject_leftovers(obj: &Map<String, Value>, what: &str) -> Result<(), FlattenError> {
    if obj.is_empty() {
        return Ok(());
    }
    let fields: Vec<&str> = obj.keys().map(String::as_str).collect();
    Err(FlattenError::Decode(format!(
        "unexpected field(s) {} on {:?}",
        fields.join(", "),
        what
    )))
}

/// String form of a numeric key, matching how JavaScript stringifies numbers:
/// integral floats lose their fraction and negative zero becomes `0`
fn number_key(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{:.0}", f);
            }
        }
    }
    n.to_string()
}

impl From<Child> for Value {
    fn from(child: Child) -> Self {
        match child {
            Child::Empty => Value::Null,
            Child::Bool(b) => Value::Bool(b),
            Child::Text(s) => Value::String(s),
            Child::Number(n) => Value::Number(n),
            Child::BigInt(literal) => {
                let mut obj = Map::new();
                obj.insert(BIGINT_FIELD.to_string(), Value::String(literal));
                Value::Object(obj)
            }
            Child::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Child::Fragment(fragment) => {
                let mut obj = Map::new();
                obj.insert("type".to_string(), Value::String(FRAGMENT_TYPE.to_string()));
                insert_key_and_children(&mut obj, fragment.key, *fragment.children);
                Value::Object(obj)
            }
            Child::Element(element) => {
                let mut obj = Map::new();
                obj.insert("type".to_string(), Value::String(element.element_type));
                if !element.props.is_empty() {
                    obj.insert("props".to_string(), Value::Object(element.props));
                }
                insert_key_and_children(&mut obj, element.key, *element.children);
                Value::Object(obj)
            }
        }
    }
}

fn insert_key_and_children(obj: &mut Map<String, Value>, key: Option<String>, children: Child) {
    if let Some(key) = key {
        obj.insert("key".to_string(), Value::String(key));
    }
    if children != Child::Empty {
        obj.insert("children".to_string(), Value::from(children));
    }
}
