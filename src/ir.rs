// Strongly-typed IR for codegen. No serde_json::Value past this point.

/// Semantic type assigned to one position in the sampled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Bool,
    Int,
    Double,
    String,
    /// String whose key and shape both passed the date heuristic; decoded
    /// with `DateTime.parse`, encoded with `toIso8601String`.
    DateTime,
    /// Reference to another synthesized class, by name.
    Class(String),
    List(Box<Ty>),
    /// Universal fallback (`dynamic` in the emitted code).
    Dynamic,
}

impl Ty {
    /// Name of the class this type points at, directly or through one list
    /// level. Drives the synthesizer's recursion.
    pub fn referenced_class(&self) -> Option<&str> {
        match self {
            Ty::Class(name) => Some(name),
            Ty::List(item) => match item.as_ref() {
                Ty::Class(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A `Ty` plus the field-level nullability flag. Every model field is
/// nullable; the flag is carried separately so list elements stay bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub ty: Ty,
    pub nullable: bool,
}

impl TypeDescriptor {
    pub fn nullable(ty: Ty) -> Self {
        Self { ty, nullable: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Original JSON key, kept verbatim: it is both the field identifier and
    /// the serialization key in the emitted code.
    pub json_key: String,
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    pub name: String,
    /// First-seen order from the source object.
    pub fields: Vec<FieldSpec>,
}
