//! Prop path updater
//!
//! Immutable deep updates over a `PropValue` tree. Every object on the
//! addressed path is shallow-cloned; everything off the path is shared with the
//! input by reference.
//!
//! Addressing rules:
//! - a segment applied to an object selects that key;
//! - a segment applied to a list selects the item whose `id` equals the segment;
//! - an absent or non-object intermediate is replaced by a fresh object
//!   (repair-on-write), except that a missing list item makes the whole update a
//!   no-op;
//! - a list item's `id` is write-once: writing it through a path is a no-op, and
//!   an item replaced as a whole keeps its id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::value::{PropMap, PropValue, ITEM_ID_KEY};

/// Non-empty sequence of keys addressing a field inside a props tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PropPath(Vec<String>);

impl PropPath {
    /// Path with a single key
    pub fn key(key: impl Into<String>) -> Self {
        PropPath(vec![key.into()])
    }

    /// Build a path from segments; fails when there are none
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(PropPath(segments))
    }

    /// Parse a dotted path such as `logo.src`
    pub fn parse(dotted: &str) -> Result<Self, PathError> {
        Self::new(dotted.split('.').filter(|s| !s.is_empty()))
    }

    /// Extend the path by one key
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.into());
        PropPath(segments)
    }

    /// Segments of the path
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment of the path
    pub fn last(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }
}

impl TryFrom<Vec<String>> for PropPath {
    type Error = PathError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        PropPath::new(segments)
    }
}

impl From<PropPath> for Vec<String> {
    fn from(path: PropPath) -> Self {
        path.0
    }
}

impl fmt::Display for PropPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Path construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// A path must address at least one field
    #[error("Prop path must contain at least one segment")]
    Empty,
}

/// Read the value at `path`, resolving list segments by item id
pub fn get_path<'a>(props: &'a PropValue, path: &PropPath) -> Option<&'a PropValue> {
    path.segments()
        .iter()
        .try_fold(props, |node, segment| step(node, segment))
}

fn step<'a>(node: &'a PropValue, segment: &str) -> Option<&'a PropValue> {
    match node {
        PropValue::Object(map) => map.get(segment),
        PropValue::List(items) => items.iter().find(|item| item.item_id() == Some(segment)),
        _ => None,
    }
}

/// Set the value at `path`, returning the new root.
///
/// If a list segment names an item that does not exist the input is returned
/// unchanged.
pub fn set_path(props: &PropValue, path: &PropPath, value: PropValue) -> PropValue {
    modify_path(props, path, |_| Some(value))
}

/// Replace the value at `path` with the result of `f`.
///
/// `f` receives the current value (if any) and returns the replacement, or
/// `None` to leave the tree untouched. Whenever nothing is written the returned
/// root is the input itself.
pub fn modify_path<F>(props: &PropValue, path: &PropPath, f: F) -> PropValue
where
    F: FnOnce(Option<&PropValue>) -> Option<PropValue>,
{
    match modify_at(Some(props), path.segments(), f) {
        Some(next) => next,
        None => {
            tracing::debug!(path = %path, "prop path update left props unchanged");
            props.clone()
        }
    }
}

fn modify_at<F>(node: Option<&PropValue>, segments: &[String], f: F) -> Option<PropValue>
where
    F: FnOnce(Option<&PropValue>) -> Option<PropValue>,
{
    let Some((head, rest)) = segments.split_first() else {
        return f(node);
    };

    match node {
        Some(PropValue::List(items)) => {
            let index = items.iter().position(|item| item.item_id() == Some(head.as_str()));
            let Some(index) = index else {
                tracing::warn!(item = %head, "prop path addresses a list item that does not exist");
                return None;
            };
            if matches!(rest, [key] if key == ITEM_ID_KEY) {
                tracing::warn!(item = %head, "list item ids are write-once, ignoring write");
                return None;
            }
            let mut updated = modify_at(Some(&items[index]), rest, f)?;
            if rest.is_empty() && updated.item_id() != Some(head.as_str()) {
                tracing::debug!(item = %head, "replacement item keeps the original id");
                updated = updated.with_key(ITEM_ID_KEY, PropValue::from(head.as_str()));
            }
            let mut next = Vec::clone(items);
            next[index] = updated;
            Some(PropValue::List(Arc::new(next)))
        }
        Some(PropValue::Object(map)) => {
            let updated = modify_at(map.get(head), rest, f)?;
            let mut next = PropMap::clone(map);
            next.insert(head.clone(), updated);
            Some(PropValue::Object(Arc::new(next)))
        }
        other => {
            if other.is_some_and(|value| !value.is_null()) {
                tracing::debug!(key = %head, "overwriting non-object value on prop path");
            }
            let updated = modify_at(None, rest, f)?;
            let mut next = PropMap::new();
            next.insert(head.clone(), updated);
            Some(PropValue::Object(Arc::new(next)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(dotted: &str) -> PropPath {
        PropPath::parse(dotted).unwrap()
    }

    #[test]
    fn test_empty_path_rejected() {
        assert_eq!(PropPath::new(Vec::<String>::new()), Err(PathError::Empty));
        assert_eq!(PropPath::parse(""), Err(PathError::Empty));
        assert!(serde_json::from_str::<PropPath>("[]").is_err());
    }

    #[test]
    fn test_path_display_and_serde() {
        let p = path("logo.src");
        assert_eq!(p.to_string(), "logo.src");
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"["logo","src"]"#);
        assert_eq!(p.last(), "src");
        assert_eq!(PropPath::key("logo").child("src"), p);
    }

    #[test]
    fn test_set_shares_siblings() {
        let props = PropValue::from(json!({
            "logo": { "src": "", "alt": "Logo" },
            "text": { "content": "Hi" }
        }));

        let next = set_path(&props, &path("logo.src"), "https://x/y.png".into());

        assert_eq!(
            get_path(&next, &path("logo.src")).and_then(PropValue::as_str),
            Some("https://x/y.png")
        );
        assert!(next.get("text").unwrap().same_ref(props.get("text").unwrap()));
        assert!(!next.get("logo").unwrap().same_ref(props.get("logo").unwrap()));
        assert_eq!(next.get("logo").unwrap().get("alt"), props.get("logo").unwrap().get("alt"));
        // the input is untouched
        assert_eq!(get_path(&props, &path("logo.src")).and_then(PropValue::as_str), Some(""));
    }

    #[test]
    fn test_set_creates_missing_intermediates() {
        let props = PropValue::from(json!({ "title": "x" }));
        let next = set_path(&props, &path("image.position"), "left".into());
        assert_eq!(next, PropValue::from(json!({ "title": "x", "image": { "position": "left" } })));
    }

    #[test]
    fn test_set_repairs_scalar_intermediate() {
        let props = PropValue::from(json!({ "logo": "broken" }));
        let next = set_path(&props, &path("logo.src"), "a.png".into());
        assert_eq!(next, PropValue::from(json!({ "logo": { "src": "a.png" } })));
    }

    #[test]
    fn test_set_through_list_item() {
        let props = PropValue::from(json!({
            "products": [
                { "id": "p1", "name": "Tea" },
                { "id": "p2", "name": "Coffee" }
            ]
        }));

        let next = set_path(&props, &path("products.p2.name"), "Espresso".into());

        let items = next.get("products").unwrap().as_list().unwrap();
        let before = props.get("products").unwrap().as_list().unwrap();
        assert!(items[0].same_ref(&before[0]));
        assert_eq!(items[1].get("name").and_then(PropValue::as_str), Some("Espresso"));
    }

    #[test]
    fn test_set_missing_list_item_is_noop() {
        let props = PropValue::from(json!({ "products": [{ "id": "p1", "name": "Tea" }] }));
        let next = set_path(&props, &path("products.gone.name"), "X".into());
        assert!(next.same_ref(&props));
    }

    #[test]
    fn test_item_id_is_write_once() {
        let props = PropValue::from(json!({
            "buttons": [{ "id": "b1", "text": "A" }, { "id": "b2", "text": "B" }]
        }));

        let next = set_path(&props, &path("buttons.b2.id"), "b1".into());
        assert!(next.same_ref(&props));

        let replaced = set_path(&props, &path("buttons.b2"), PropValue::from(json!({ "id": "b1", "text": "C" })));
        let items = replaced.get("buttons").unwrap().as_list().unwrap();
        assert_eq!(items[1], PropValue::from(json!({ "id": "b2", "text": "C" })));

        // an `id` key on a plain object is an ordinary field
        let plain = set_path(&PropValue::from(json!({ "video": {} })), &path("video.id"), "yt".into());
        assert_eq!(plain, PropValue::from(json!({ "video": { "id": "yt" } })));
    }

    #[test]
    fn test_get_path_misses() {
        let props = PropValue::from(json!({ "a": { "b": 1 } }));
        assert!(get_path(&props, &path("a.c")).is_none());
        assert!(get_path(&props, &path("a.b.c")).is_none());
        assert_eq!(get_path(&props, &path("a.b")), Some(&PropValue::Integer(1)));
    }
}
