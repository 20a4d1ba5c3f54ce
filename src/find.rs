//! Recursive key search over JSON trees.
//!
//! Feed payloads nest their item collections at arbitrary depth, and
//! vendor media extensions can sit anywhere inside an item. The
//! searches here walk objects and arrays in document order and stop at
//! a fixed depth so pathological payloads cannot blow the stack.

use serde_json::{Map, Value};

/// Maximum recursion depth for a search.
pub const MAX_DEPTH: usize = 64;

/// Collects every value stored under `key` anywhere in `root`, in
/// document order.
pub fn find_all<'a>(root: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut out = Vec::new();
    walk(root, key, 0, &mut out);
    out
}

/// Returns the first value stored under `key` anywhere in `root`.
pub fn find_first<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    walk_first(root, &[key], 0)
}

/// Returns the first value stored under any of `keys` anywhere in the
/// entries of `map`. Keys are matched per node in document order, so a
/// shallower match beats an earlier-listed key deeper down.
pub fn find_first_of<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    for (k, v) in map {
        if keys.contains(&k.as_str()) {
            return Some(v);
        }
        if let Some(found) = walk_first(v, keys, 1) {
            return Some(found);
        }
    }
    None
}

fn walk<'a>(node: &'a Value, key: &str, depth: usize, out: &mut Vec<&'a Value>) {
    if depth >= MAX_DEPTH {
        return;
    }
    match node {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    out.push(v);
                }
                walk(v, key, depth + 1, out);
            }
        }
        Value::Array(items) => {
            for v in items {
                walk(v, key, depth + 1, out);
            }
        }
        _ => {}
    }
}

fn walk_first<'a>(node: &'a Value, keys: &[&str], depth: usize) -> Option<&'a Value> {
    if depth >= MAX_DEPTH {
        return None;
    }
    match node {
        Value::Object(map) => {
            for (k, v) in map {
                if keys.contains(&k.as_str()) {
                    return Some(v);
                }
                if let Some(found) = walk_first(v, keys, depth + 1) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => items.iter().find_map(|v| walk_first(v, keys, depth + 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_all_at_top_level() {
        let tree = json!({"item": [1, 2]});
        let found = find_all(&tree, "item");
        assert_eq!(found, vec![&json!([1, 2])]);
    }

    #[test]
    fn test_find_all_nested() {
        let tree = json!({"feed": {"channel": {"item": "deep"}}});
        let found = find_all(&tree, "item");
        assert_eq!(found, vec![&json!("deep")]);
    }

    #[test]
    fn test_find_all_collects_every_match() {
        let tree = json!({"a": {"entry": 1}, "b": [{"entry": 2}], "entry": 3});
        let found = find_all(&tree, "entry");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_find_all_inside_arrays() {
        let tree = json!([{"x": {"target": true}}, {"target": false}]);
        let found = find_all(&tree, "target");
        assert_eq!(found, vec![&json!(true), &json!(false)]);
    }

    #[test]
    fn test_find_first_returns_document_order_match() {
        let tree = json!({"a": {"key": "first"}, "key": "second"});
        assert_eq!(find_first(&tree, "key"), Some(&json!("first")));
    }

    #[test]
    fn test_find_first_none_when_absent() {
        let tree = json!({"a": 1});
        assert_eq!(find_first(&tree, "missing"), None);
    }

    #[test]
    fn test_find_first_of_matches_any_key() {
        let map = json!({"wrapper": {"media_thumbnail": {"url": "a.jpg"}}});
        let Value::Object(map) = map else { unreachable!() };
        let found = find_first_of(&map, &["media:thumbnail", "media_thumbnail"]);
        assert_eq!(found, Some(&json!({"url": "a.jpg"})));
    }

    #[test]
    fn test_depth_bound_stops_recursion() {
        let mut tree = json!({"key": "buried"});
        for _ in 0..(MAX_DEPTH + 8) {
            tree = json!({"wrap": tree});
        }
        assert!(find_all(&tree, "key").is_empty());
        assert_eq!(find_first(&tree, "key"), None);
    }
}
