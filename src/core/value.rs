//! Persistent prop values
//!
//! `PropValue` is the JSON-shaped payload stored in a block's `props` and
//! `style`. Objects and lists live behind `Arc`, so cloning a value is cheap and
//! an edit that rebuilds one branch of the tree shares every other branch with
//! the previous value. Reference equality of a subtree (`same_ref`) is therefore
//! a reliable "unchanged" signal for re-render decisions.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key/value record inside a `PropValue::Object`.
pub type PropMap = BTreeMap<String, PropValue>;

/// Name of the identity field carried by every list item.
pub const ITEM_ID_KEY: &str = "id";

/// A node in a props tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    /// Absent / null value
    #[default]
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer number within `i64`; larger integers are read as `Number`
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// String value
    String(String),
    /// Ordered list of values
    List(Arc<Vec<PropValue>>),
    /// Record with string keys
    Object(Arc<PropMap>),
}

impl PropValue {
    /// An empty object
    pub fn empty_object() -> Self {
        PropValue::Object(Arc::new(PropMap::new()))
    }

    /// An empty list
    pub fn empty_list() -> Self {
        PropValue::List(Arc::new(Vec::new()))
    }

    /// Build an object from key/value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropValue)>,
    {
        PropValue::Object(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build a list from values
    pub fn list<I: IntoIterator<Item = PropValue>>(items: I) -> Self {
        PropValue::List(Arc::new(items.into_iter().collect()))
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// Try to view as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to convert to integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropValue::Integer(i) => Some(*i),
            PropValue::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to view as list
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to view as object
    pub fn as_object(&self) -> Option<&PropMap> {
        match self {
            PropValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key on an object value
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Identity of a list item (its `id` string field)
    pub fn item_id(&self) -> Option<&str> {
        self.get(ITEM_ID_KEY).and_then(PropValue::as_str)
    }

    /// Whether two values are the same shared subtree.
    ///
    /// Containers compare by pointer; scalars have no identity of their own and
    /// compare by value.
    pub fn same_ref(&self, other: &PropValue) -> bool {
        match (self, other) {
            (PropValue::Object(a), PropValue::Object(b)) => Arc::ptr_eq(a, b),
            (PropValue::List(a), PropValue::List(b)) => Arc::ptr_eq(a, b),
            (PropValue::Object(_), _) | (PropValue::List(_), _) => false,
            (a, b) => a == b,
        }
    }

    /// Return a copy of an object value with one key replaced.
    ///
    /// Non-object values are replaced by a fresh object holding only `key`.
    pub fn with_key(&self, key: impl Into<String>, value: PropValue) -> PropValue {
        let mut map = self.as_object().cloned().unwrap_or_default();
        map.insert(key.into(), value);
        PropValue::Object(Arc::new(map))
    }

    /// Encode any serializable value as a prop tree
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(PropValue::from)
    }

    /// Decode the prop tree into a typed value
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.to_json())
    }

    /// Convert into a `serde_json::Value`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropValue::Null => serde_json::Value::Null,
            PropValue::Boolean(b) => serde_json::Value::Bool(*b),
            PropValue::Integer(i) => serde_json::Value::from(*i),
            PropValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            PropValue::String(s) => serde_json::Value::String(s.clone()),
            PropValue::List(items) => {
                serde_json::Value::Array(items.iter().map(PropValue::to_json).collect())
            }
            PropValue::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Integers that fit `i64` stay [`PropValue::Integer`]; larger unsigned ones
/// become [`PropValue::Number`] and may lose precision. Deserializing a
/// `PropValue` directly behaves the same way.
impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PropValue::Null,
            serde_json::Value::Bool(b) => PropValue::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => PropValue::Integer(i),
                None => n.as_f64().map(PropValue::Number).unwrap_or(PropValue::Null),
            },
            serde_json::Value::String(s) => PropValue::String(s),
            serde_json::Value::Array(items) => {
                PropValue::List(Arc::new(items.into_iter().map(PropValue::from).collect()))
            }
            serde_json::Value::Object(map) => PropValue::Object(Arc::new(
                map.into_iter().map(|(k, v)| (k, PropValue::from(v))).collect(),
            )),
        }
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::String(s)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::String(s.to_string())
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i64> for PropValue {
    fn from(i: i64) -> Self {
        PropValue::Integer(i)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Boolean(b)
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(items: Vec<PropValue>) -> Self {
        PropValue::List(Arc::new(items))
    }
}

impl From<PropMap> for PropValue {
    fn from(map: PropMap) -> Self {
        PropValue::Object(Arc::new(map))
    }
}
