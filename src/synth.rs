//! Class Synthesizer: recursive decomposition of a JSON object into
//! `ClassSpec`s, registered in a run-scoped `ClassTable`.
//!
//! Termination is structural: recursion only descends into object values and
//! single array elements, and parsed JSON is finite and acyclic, so there is
//! no cycle detection.

use serde_json::{Map, Value};

use crate::ir::{ClassSpec, FieldSpec};
use crate::naming::ClassTable;
use crate::resolve::resolve;

/// Decompose `obj` into a `ClassSpec` registered under `class_name`,
/// recursing into nested objects and arrays of objects.
///
/// Registration is preorder: a class lands in the table before any class it
/// references, so emission order matches depth-first discovery order.
pub fn synthesize(obj: &Map<String, Value>, class_name: &str, table: &mut ClassTable) {
    let mut fields = Vec::with_capacity(obj.len());
    let mut nested: Vec<(String, &Map<String, Value>)> = Vec::new();

    for (key, value) in obj {
        let descriptor = resolve(value, key, class_name);
        if let Some(name) = descriptor.ty.referenced_class() {
            if let Some(child) = nested_object(value) {
                nested.push((name.to_string(), child));
            }
        }
        fields.push(FieldSpec {
            json_key: key.clone(),
            ty: descriptor,
        });
    }

    table.insert(ClassSpec {
        name: class_name.to_string(),
        fields,
    });

    for (name, child) in nested {
        synthesize(child, &name, table);
    }
}

/// The object a class-ref descriptor was derived from: the value itself, or
/// the sampled first element of an array of objects.
fn nested_object(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }
}
