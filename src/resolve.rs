//! TypeDescriptor Resolver: one JSON value in, one semantic type out.
//!
//! Total by construction. Every value shape maps to *some* descriptor, with
//! `Dynamic` as the universal fallback, so this stage has no error path.

use serde_json::Value;

use crate::ir::{Ty, TypeDescriptor};
use crate::naming::{derive_class_name, singular_item_key};

/// Key substrings that mark a field as a date/time candidate.
const DATE_KEY_HINTS: [&str; 4] = ["date", "time", "created", "updated"];

/// Resolve `value` (found under `field_key` inside `owning_class`) to a
/// type descriptor. All field-level results are nullable: any other sample
/// may omit or null the field.
pub fn resolve(value: &Value, field_key: &str, owning_class: &str) -> TypeDescriptor {
    let ty = match value {
        // null carries no type information
        Value::Null => Ty::Dynamic,
        Value::Bool(_) => Ty::Bool,
        Value::Number(n) => {
            if n.is_f64() {
                Ty::Double
            } else {
                Ty::Int
            }
        }
        Value::String(s) => {
            if is_date_field(field_key, s) {
                Ty::DateTime
            } else {
                Ty::String
            }
        }
        Value::Object(_) => Ty::Class(derive_class_name(owning_class, field_key)),
        Value::Array(items) => Ty::List(Box::new(element_type(items, field_key, owning_class))),
    };
    TypeDescriptor::nullable(ty)
}

/// Element type of an array field.
///
/// Inference samples the first element only: an array whose first element is
/// an object names an item class after the singularized key, and later
/// elements never reshape it. Kept as-is for output compatibility; primitive
/// arrays are the one place the whole sequence is checked, and only to decide
/// homogeneous-vs-dynamic.
fn element_type(items: &[Value], field_key: &str, owning_class: &str) -> Ty {
    let Some(first) = items.first() else {
        return Ty::Dynamic;
    };
    if first.is_object() {
        let item_key = singular_item_key(field_key);
        return Ty::Class(derive_class_name(owning_class, item_key));
    }
    let Some(kind) = primitive_ty(first) else {
        // null or nested array in first position: nothing to commit to
        return Ty::Dynamic;
    };
    if items.iter().all(|v| primitive_ty(v) == Some(kind)) {
        kind.into_ty()
    } else {
        Ty::Dynamic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrimKind {
    Bool,
    Int,
    Double,
    Str,
}

impl PrimKind {
    fn into_ty(self) -> Ty {
        match self {
            PrimKind::Bool => Ty::Bool,
            PrimKind::Int => Ty::Int,
            PrimKind::Double => Ty::Double,
            PrimKind::Str => Ty::String,
        }
    }
}

fn primitive_ty(value: &Value) -> Option<PrimKind> {
    match value {
        Value::Bool(_) => Some(PrimKind::Bool),
        Value::Number(n) => {
            if n.is_f64() {
                Some(PrimKind::Double)
            } else {
                Some(PrimKind::Int)
            }
        }
        Value::String(_) => Some(PrimKind::Str),
        _ => None,
    }
}

/// Date heuristic: the key must contain a hint substring AND the value must
/// have an ISO-8601-like shape. Either test alone is not enough; `"hello"`
/// under `createdAt` stays a plain string.
fn is_date_field(key: &str, value: &str) -> bool {
    let key = key.to_ascii_lowercase();
    DATE_KEY_HINTS.iter().any(|hint| key.contains(hint)) && looks_like_iso_datetime(value)
}

/// Shape test only: a date separator and a time separator must both appear,
/// as in `2023-10-15T08:30:00Z`. Not a parse.
fn looks_like_iso_datetime(s: &str) -> bool {
    let has_date_sep = s.contains('-');
    let has_time_sep = s.contains('T') || s.contains('Z') || s.contains(':');
    has_date_sep && has_time_sep
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ty_of(value: serde_json::Value, key: &str) -> Ty {
        resolve(&value, key, "Root").ty
    }

    #[test]
    fn scalars_map_to_primitives() {
        assert_eq!(ty_of(json!(true), "flag"), Ty::Bool);
        assert_eq!(ty_of(json!(42), "count"), Ty::Int);
        assert_eq!(ty_of(json!(4.5), "score"), Ty::Double);
        assert_eq!(ty_of(json!("x"), "name"), Ty::String);
        assert_eq!(ty_of(json!(null), "gap"), Ty::Dynamic);
    }

    #[test]
    fn everything_is_nullable() {
        let d = resolve(&json!(1), "n", "Root");
        assert!(d.nullable);
        let d = resolve(&json!({"a": 1}), "obj", "Root");
        assert!(d.nullable);
    }

    #[test]
    fn objects_become_class_refs() {
        assert_eq!(
            ty_of(json!({"city": "SF"}), "shipping_address"),
            Ty::Class("RootShippingAddress".into())
        );
    }

    #[test]
    fn date_heuristic_needs_key_and_shape() {
        assert_eq!(ty_of(json!("2023-10-15T08:30:00Z"), "createdAt"), Ty::DateTime);
        assert_eq!(ty_of(json!("2023-10-15 08:30:00"), "updated_at"), Ty::DateTime);
        // shape check fails even though the key hints at a date
        assert_eq!(ty_of(json!("hello"), "createdAt"), Ty::String);
        // no key hint: shape alone is not enough
        assert_eq!(ty_of(json!("2023-10-15T08:30:00Z"), "note"), Ty::String);
    }

    #[test]
    fn empty_array_is_dynamic_list() {
        assert_eq!(ty_of(json!([]), "items"), Ty::List(Box::new(Ty::Dynamic)));
    }

    #[test]
    fn homogeneous_primitive_arrays_keep_their_kind() {
        assert_eq!(ty_of(json!(["a", "b"]), "tags"), Ty::List(Box::new(Ty::String)));
        assert_eq!(ty_of(json!([1, 2, 3]), "ids"), Ty::List(Box::new(Ty::Int)));
        assert_eq!(ty_of(json!([true]), "flags"), Ty::List(Box::new(Ty::Bool)));
    }

    #[test]
    fn mixed_primitive_arrays_collapse_to_dynamic() {
        assert_eq!(ty_of(json!([1, "x"]), "items"), Ty::List(Box::new(Ty::Dynamic)));
        assert_eq!(ty_of(json!([1, 2.5]), "nums"), Ty::List(Box::new(Ty::Dynamic)));
    }

    #[test]
    fn null_or_nested_first_element_is_dynamic() {
        assert_eq!(ty_of(json!([null, 1]), "xs"), Ty::List(Box::new(Ty::Dynamic)));
        assert_eq!(ty_of(json!([[1], [2]]), "grid"), Ty::List(Box::new(Ty::Dynamic)));
    }

    #[test]
    fn object_arrays_name_the_item_class_from_the_singular_key() {
        assert_eq!(
            ty_of(json!([{"sku": "a"}]), "items"),
            Ty::List(Box::new(Ty::Class("RootItem".into())))
        );
        // only the first element is sampled
        assert_eq!(
            ty_of(json!([{"sku": "a"}, 7]), "items"),
            Ty::List(Box::new(Ty::Class("RootItem".into())))
        );
    }
}
