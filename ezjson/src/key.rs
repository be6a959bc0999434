//! Dotted-key addressing into JSON documents.
//!
//! A key such as `"server.port"` addresses `root["server"]["port"]`. There is
//! no escape syntax, so object keys containing `.` cannot be reached.
//!
//! Reads never fail: a key that does not resolve yields the key itself, which
//! callers use as a display fallback. Writes create missing objects along the
//! way and replace any non-object value standing in the path.

use serde_json::{Map, Value};

/// Segment separator for dotted keys.
pub const SEPARATOR: char = '.';

/// Resolves `key` against `root`.
///
/// Returns `None` as soon as a step meets a non-object value or an object
/// without the next segment.
pub fn resolve<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split(SEPARATOR).try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        _ => None,
    })
}

/// Resolves `key` against `root`, returning the literal key on a miss.
pub fn lookup(root: &Value, key: &str) -> Value {
    resolve(root, key)
        .cloned()
        .unwrap_or_else(|| Value::String(key.to_string()))
}

/// Walks to the object that owns the last segment of `key`.
///
/// Every segment but the last is descended into, inserting an empty object
/// when it is missing and overwriting it with one when it holds anything else.
/// The root is treated the same way. Returns the owning object together with
/// the last segment.
pub fn parent_mut<'v, 'k>(
    root: &'v mut Value,
    key: &'k str,
) -> (&'v mut Map<String, Value>, &'k str) {
    let (parents, leaf) = match key.rsplit_once(SEPARATOR) {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut node = force_object(root);
    for segment in parents.into_iter().flat_map(|p| p.split(SEPARATOR)) {
        node = force_object(
            node.entry(segment)
                .or_insert_with(|| Value::Object(Map::new())),
        );
    }
    (node, leaf)
}

/// Assigns `value` at `key`, creating intermediate objects as needed.
///
/// Returns the value previously stored at `key`, if any.
pub fn insert(root: &mut Value, key: &str, value: Value) -> Option<Value> {
    let (parent, leaf) = parent_mut(root, key);
    parent.insert(leaf.to_string(), value)
}

/// Deletes the value at `key`, keeping the order of its siblings.
///
/// The walk to the owning object has the same side effects as [`insert`], so
/// intermediate objects may be created even when nothing is removed. A root
/// that is not an object is left alone and nothing is removed.
pub fn remove(root: &mut Value, key: &str) -> Option<Value> {
    if !root.is_object() {
        return None;
    }
    let (parent, leaf) = parent_mut(root, key);
    parent.shift_remove(leaf)
}

fn force_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_hit() {
        let doc = json!({"server": {"port": 8080, "tls": {"enabled": true}}});
        assert_eq!(lookup(&doc, "server.port"), json!(8080));
        assert_eq!(lookup(&doc, "server.tls.enabled"), json!(true));
        assert_eq!(lookup(&doc, "server.tls"), json!({"enabled": true}));
    }

    #[test]
    fn test_lookup_miss_returns_key() {
        let doc = json!({"server": {"port": 8080}, "list": [1, 2]});
        assert_eq!(lookup(&doc, "server.host"), json!("server.host"));
        // Stepping through a scalar is a miss.
        assert_eq!(lookup(&doc, "server.port.value"), json!("server.port.value"));
        // Arrays are not indexed.
        assert_eq!(lookup(&doc, "list.0"), json!("list.0"));
        assert_eq!(lookup(&doc, ""), json!(""));
        assert_eq!(lookup(&json!(42), "a"), json!("a"));
    }

    #[test]
    fn test_lookup_returns_stored_null() {
        let doc = json!({"a": null});
        assert_eq!(lookup(&doc, "a"), Value::Null);
        assert!(resolve(&doc, "a").is_some());
    }

    #[test]
    fn test_insert_creates_intermediates() {
        let mut doc = json!({"server": {"port": 8080}});
        assert_eq!(insert(&mut doc, "server.host", json!("localhost")), None);
        assert_eq!(insert(&mut doc, "a.b.c", json!(1)), None);
        assert_eq!(
            doc,
            json!({"server": {"port": 8080, "host": "localhost"}, "a": {"b": {"c": 1}}})
        );
        assert_eq!(insert(&mut doc, "a.b.c", json!(2)), Some(json!(1)));
    }

    #[test]
    fn test_insert_overwrites_scalar_intermediate() {
        let mut doc = json!({"a": 5, "keep": true});
        insert(&mut doc, "a.b", json!("x"));
        assert_eq!(doc, json!({"a": {"b": "x"}, "keep": true}));

        let mut doc = json!([1, 2, 3]);
        insert(&mut doc, "k", json!(0));
        assert_eq!(doc, json!({"k": 0}));
    }

    #[test]
    fn test_remove_keeps_siblings_in_order() {
        let mut doc = json!({"a": {"x": 1, "b": 5, "y": 2}});
        assert_eq!(remove(&mut doc, "a.b"), Some(json!(5)));
        let keys: Vec<_> = doc["a"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_remove_missing_still_autocreates() {
        let mut doc = json!({"a": 1});
        assert_eq!(remove(&mut doc, "a.b"), None);
        assert_eq!(doc, json!({"a": {}}));
    }

    #[test]
    fn test_remove_leaves_non_object_root() {
        let mut root = json!([1, 2, 3]);
        assert_eq!(remove(&mut root, "a.b"), None);
        assert_eq!(root, json!([1, 2, 3]));

        let mut root = json!("text");
        assert_eq!(remove(&mut root, "text"), None);
        assert_eq!(root, json!("text"));
    }
}
