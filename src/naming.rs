//! Class naming and the run-scoped class table.
//!
//! Names are ancestor-qualified (`OrderAddress`, `OrderAddressCoordinates`),
//! which avoids most collisions but does not guarantee global uniqueness
//! across sibling subtrees. A later registration under an already-taken name
//! overwrites the earlier entry and is recorded so callers can surface it.

use indexmap::IndexMap;

use crate::ir::ClassSpec;

/// Derive the class name for an object found under `key` inside `parent`.
///
/// Title-cases the key (uppercase the first letter of each alphanumeric run,
/// lowercase the rest), drops underscores, and prefixes a non-empty parent:
/// `derive_class_name("Order", "shipping_address") == "OrderShippingAddress"`.
/// The root class bypasses derivation and keeps its caller-supplied name.
///
/// Total over any key; an empty key yields an empty suffix, which is accepted
/// rather than rejected (the table records the resulting collision, if any).
pub fn derive_class_name(parent: &str, key: &str) -> String {
    let mut titled = String::with_capacity(parent.len() + key.len());
    titled.push_str(parent);
    let mut in_run = false;
    for ch in key.chars() {
        if ch == '_' {
            in_run = false;
            continue;
        }
        if ch.is_alphabetic() {
            if in_run {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            in_run = true;
        } else {
            titled.push(ch);
            in_run = false;
        }
    }
    titled
}

/// Strip one trailing pluralizing `s` from an array field key before name
/// derivation, so `{"items": [{..}]}` under `Order` yields `OrderItem`.
pub fn singular_item_key(key: &str) -> &str {
    key.strip_suffix('s').unwrap_or(key)
}

/// Accumulates every class discovered during one generation run.
///
/// Insertion-ordered: emission walks this table front to back, so the order
/// classes are registered in is the order they appear in the output.
#[derive(Debug, Default)]
pub struct ClassTable {
    classes: IndexMap<String, ClassSpec>,
    collisions: Vec<String>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a synthesized class.
    ///
    /// Overwrite-last semantics: a structurally different spec under an
    /// existing name replaces it (keeping the original table position) and
    /// the name is recorded as a collision. Re-registering an identical
    /// structure is plain deduplication and records nothing.
    pub fn insert(&mut self, spec: ClassSpec) {
        if let Some(prev) = self.classes.get(&spec.name) {
            if prev.fields != spec.fields {
                self.collisions.push(spec.name.clone());
            }
        }
        self.classes.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&ClassSpec> {
        self.classes.get(name)
    }

    /// Classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassSpec> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Derived names that overwrote a structurally different class.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn into_collisions(self) -> Vec<String> {
        self.collisions
    }
}
