//! JSON Merge Patch (RFC 7386) applied to books

use crate::entities::Book;
use serde_json::{Map, Value};

/// Overlays `patch` onto `target` following RFC 7386: object members are
/// merged recursively, a `null` member removes the key, anything else
/// replaces the target wholesale.
pub fn merge(target: &mut Value, patch: &Value) {
    let Value::Object(members) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(fields) = target {
        for (key, value) in members {
            if value.is_null() {
                fields.remove(key);
            } else {
                merge(fields.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

/// Applies a raw merge-patch document to `book` and returns the patched copy.
///
/// The identifier of the result is always the one of `book`; an `id` member in
/// the patch has no effect. Fails if the document is not JSON or if the merged
/// document no longer has the shape of a book.
pub fn apply_merge_patch(book: &Book, patch: &[u8]) -> Result<Book, serde_json::Error> {
    let patch: Value = serde_json::from_slice(patch)?;
    let mut document = serde_json::to_value(book)?;

    merge(&mut document, &patch);

    if let Value::Object(fields) = &mut document {
        fields.insert("id".to_string(), Value::from(book.id));
    }

    serde_json::from_value(document)
}
