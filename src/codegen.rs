//! Dart emitter: renders `ClassSpec`s into a single model document.
//!
//! Output layout is fixed: comment banner, `dart:convert` import, the
//! module-level decode/encode helpers, the root class, then every nested
//! class in registration order, blank-line separated. For identical input
//! the output is byte-identical; the class table preserves insertion order
//! and nothing here consults anything but it.

use crate::ir::{ClassSpec, FieldSpec, Ty, TypeDescriptor};
use crate::naming::ClassTable;

/// Shape of the document root, which decides the helper signatures.
#[derive(Debug, Clone)]
pub enum RootShape {
    /// Root is an object: helpers decode/encode the root class itself.
    Object,
    /// Root is an array whose first element is an object: helpers decode and
    /// encode `List<Root>`.
    ObjectList,
    /// Any other root (scalar, null, array of primitives): no class body is
    /// emitted and the helpers are typed by the resolved descriptor.
    Value(TypeDescriptor),
}

pub struct Codegen {
    blocks: Vec<String>,
}

impl Codegen {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Render the whole document for `root_class`. The root class is emitted
    /// first when present; the remaining classes follow in table order.
    pub fn emit(&mut self, root_class: &str, shape: &RootShape, table: &ClassTable) {
        let prefix = root_class.to_lowercase();

        self.blocks.push(format!(
            "// To parse this JSON data, do\n//\n//     final {prefix} = {prefix}FromJson(jsonString);"
        ));
        self.blocks.push("import 'dart:convert';".to_string());
        self.push_helpers(root_class, &prefix, shape);

        if let Some(root) = table.get(root_class) {
            self.blocks.push(class_source(root));
        }
        for spec in table.iter().filter(|s| s.name != root_class) {
            self.blocks.push(class_source(spec));
        }
    }

    pub fn into_string(self) -> String {
        let mut out = self.blocks.join("\n\n");
        out.push('\n');
        out
    }

    fn push_helpers(&mut self, root_class: &str, prefix: &str, shape: &RootShape) {
        match shape {
            RootShape::Object => {
                self.blocks.push(format!(
                    "{root_class} {prefix}FromJson(String str) => {root_class}.fromJson(json.decode(str));"
                ));
                self.blocks.push(format!(
                    "String {prefix}ToJson({root_class} data) => json.encode(data.toJson());"
                ));
            }
            RootShape::ObjectList => {
                self.blocks.push(format!(
                    "List<{root_class}> {prefix}FromJson(String str) => List<{root_class}>.from(json.decode(str).map((x) => {root_class}.fromJson(x)));"
                ));
                self.blocks.push(format!(
                    "String {prefix}ToJson(List<{root_class}> data) => json.encode(List<dynamic>.from(data.map((x) => x.toJson())));"
                ));
            }
            RootShape::Value(descriptor) => {
                let decl = declared_type(descriptor);
                match &descriptor.ty {
                    Ty::List(item) => {
                        // json.decode hands back List<dynamic>; rebuild the
                        // typed list instead of relying on a runtime downcast
                        self.blocks.push(format!(
                            "{decl} {prefix}FromJson(String str) {{\n  final data = json.decode(str);\n  return data == null ? null : List<{}>.from(data.map((x) => x));\n}}",
                            dart_type(item)
                        ));
                    }
                    _ => {
                        self.blocks.push(format!(
                            "{decl} {prefix}FromJson(String str) => json.decode(str);"
                        ));
                    }
                }
                self.blocks.push(format!(
                    "String {prefix}ToJson({decl} data) => json.encode(data);"
                ));
            }
        }
    }
}

/// One class, four sections in fixed order: field declarations, constructor,
/// decode factory, encode method.
fn class_source(spec: &ClassSpec) -> String {
    let name = &spec.name;
    let mut lines: Vec<String> = Vec::with_capacity(spec.fields.len() * 4 + 16);

    lines.push(format!("class {name} {{"));
    for field in &spec.fields {
        lines.push(format!("  {} {};", declared_type(&field.ty), field.json_key));
    }

    lines.push(String::new());
    lines.push(format!("  {name}({{"));
    for field in &spec.fields {
        lines.push(format!("    this.{},", field.json_key));
    }
    lines.push("  });".to_string());

    lines.push(String::new());
    lines.push(format!(
        "  factory {name}.fromJson(Map<String, dynamic> json) => {name}("
    ));
    for field in &spec.fields {
        lines.push(format!("    {}: {},", field.json_key, decode_expr(field)));
    }
    lines.push("  );".to_string());

    lines.push(String::new());
    lines.push("  Map<String, dynamic> toJson() => {".to_string());
    for field in &spec.fields {
        lines.push(format!("    '{}': {},", field.json_key, encode_expr(field)));
    }
    lines.push("  };".to_string());

    lines.push("}".to_string());
    lines.join("\n")
}

/// Dart spelling of a semantic type.
fn dart_type(ty: &Ty) -> String {
    match ty {
        Ty::Bool => "bool".to_string(),
        Ty::Int => "int".to_string(),
        Ty::Double => "double".to_string(),
        Ty::String => "String".to_string(),
        Ty::DateTime => "DateTime".to_string(),
        Ty::Class(name) => name.clone(),
        Ty::List(item) => format!("List<{}>", dart_type(item)),
        Ty::Dynamic => "dynamic".to_string(),
    }
}

/// Declared (field-level) type. Every field is optional; `dynamic` already
/// admits null and takes no marker.
fn declared_type(descriptor: &TypeDescriptor) -> String {
    let base = dart_type(&descriptor.ty);
    if descriptor.nullable && !matches!(descriptor.ty, Ty::Dynamic) {
        format!("{base}?")
    } else {
        base
    }
}

/// Right-hand side of one `fromJson` field initializer.
fn decode_expr(field: &FieldSpec) -> String {
    let access = format!("json['{}']", field.json_key);
    match &field.ty.ty {
        Ty::Class(name) => {
            format!("{access} == null ? null : {name}.fromJson({access})")
        }
        Ty::List(item) => {
            let map_body = match item.as_ref() {
                Ty::Class(name) => format!("{name}.fromJson(x)"),
                _ => "x".to_string(),
            };
            format!(
                "{access} == null ? null : List<{}>.from({access}.map((x) => {map_body}))",
                dart_type(item)
            )
        }
        Ty::DateTime => format!("{access} == null ? null : DateTime.parse({access})"),
        _ => access,
    }
}

/// One `toJson` map entry: the structural inverse of `decode_expr`.
fn encode_expr(field: &FieldSpec) -> String {
    let ident = &field.json_key;
    match &field.ty.ty {
        Ty::Class(_) => format!("{ident}?.toJson()"),
        Ty::List(item) => {
            let map_body = match item.as_ref() {
                Ty::Class(_) => "x.toJson()",
                _ => "x",
            };
            format!("{ident} == null ? null : List<dynamic>.from({ident}!.map((x) => {map_body}))")
        }
        Ty::DateTime => format!("{ident}?.toIso8601String()"),
        _ => ident.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::ClassTable;
    use crate::synth::synthesize;
    use serde_json::json;

    fn render(value: serde_json::Value, root: &str) -> String {
        let mut table = ClassTable::new();
        synthesize(value.as_object().expect("object input"), root, &mut table);
        let mut cg = Codegen::new();
        cg.emit(root, &RootShape::Object, &table);
        cg.into_string()
    }

    #[test]
    fn document_layout_and_helpers() {
        let code = render(json!({"id": 1}), "Model");
        assert!(code.starts_with("// To parse this JSON data, do\n"));
        assert!(code.contains("import 'dart:convert';"));
        assert!(code.contains("Model modelFromJson(String str) => Model.fromJson(json.decode(str));"));
        assert!(code.contains("String modelToJson(Model data) => json.encode(data.toJson());"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn fields_declare_nullable_types() {
        let code = render(
            json!({"id": 1, "score": 1.5, "ok": true, "name": "x", "gap": null}),
            "Model",
        );
        assert!(code.contains("  int? id;"));
        assert!(code.contains("  double? score;"));
        assert!(code.contains("  bool? ok;"));
        assert!(code.contains("  String? name;"));
        // dynamic admits null on its own
        assert!(code.contains("  dynamic gap;"));
    }

    #[test]
    fn json_keys_are_used_verbatim() {
        let code = render(json!({"shipping_address": {"city": "SF"}}), "Order");
        assert!(code.contains("  OrderShippingAddress? shipping_address;"));
        assert!(code.contains(
            "    shipping_address: json['shipping_address'] == null ? null : OrderShippingAddress.fromJson(json['shipping_address']),"
        ));
        assert!(code.contains("    'shipping_address': shipping_address?.toJson(),"));
    }

    #[test]
    fn datetime_fields_parse_and_format_iso8601() {
        let code = render(json!({"createdAt": "2023-10-15T08:30:00Z"}), "Event");
        assert!(code.contains("  DateTime? createdAt;"));
        assert!(code.contains(
            "    createdAt: json['createdAt'] == null ? null : DateTime.parse(json['createdAt']),"
        ));
        assert!(code.contains("    'createdAt': createdAt?.toIso8601String(),"));
    }

    #[test]
    fn object_lists_decode_element_wise() {
        let code = render(json!({"orders": [{"id": 1}]}), "User");
        assert!(code.contains("  List<UserOrder>? orders;"));
        assert!(code.contains(
            "    orders: json['orders'] == null ? null : List<UserOrder>.from(json['orders'].map((x) => UserOrder.fromJson(x))),"
        ));
        assert!(code.contains(
            "    'orders': orders == null ? null : List<dynamic>.from(orders!.map((x) => x.toJson())),"
        ));
    }

    #[test]
    fn empty_and_mixed_arrays_stay_dynamic_lists() {
        let code = render(json!({"a": [], "b": [1, "x"]}), "Model");
        assert!(code.contains("  List<dynamic>? a;"));
        assert!(code.contains("  List<dynamic>? b;"));
    }

    #[test]
    fn object_list_root_helpers() {
        let mut table = ClassTable::new();
        synthesize(
            json!({"id": 1}).as_object().unwrap(),
            "Entry",
            &mut table,
        );
        let mut cg = Codegen::new();
        cg.emit("Entry", &RootShape::ObjectList, &table);
        let code = cg.into_string();
        assert!(code.contains(
            "List<Entry> entryFromJson(String str) => List<Entry>.from(json.decode(str).map((x) => Entry.fromJson(x)));"
        ));
        assert!(code.contains(
            "String entryToJson(List<Entry> data) => json.encode(List<dynamic>.from(data.map((x) => x.toJson())));"
        ));
    }

    #[test]
    fn scalar_root_emits_typed_helpers_and_no_class() {
        let table = ClassTable::new();
        let mut cg = Codegen::new();
        cg.emit(
            "Model",
            &RootShape::Value(TypeDescriptor::nullable(Ty::Int)),
            &table,
        );
        let code = cg.into_string();
        assert!(code.contains("int? modelFromJson(String str) => json.decode(str);"));
        assert!(code.contains("String modelToJson(int? data) => json.encode(data);"));
        assert!(!code.contains("class "));
    }

    #[test]
    fn primitive_list_root_rebuilds_the_typed_list() {
        let table = ClassTable::new();
        let mut cg = Codegen::new();
        cg.emit(
            "Model",
            &RootShape::Value(TypeDescriptor::nullable(Ty::List(Box::new(Ty::Int)))),
            &table,
        );
        let code = cg.into_string();
        assert!(code.contains("List<int>? modelFromJson(String str) {"));
        assert!(code.contains("  return data == null ? null : List<int>.from(data.map((x) => x));"));
    }
}
