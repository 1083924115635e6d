//! JSON Schema emission for props types and construct resources.
use serde_json::{json, Map, Value};

use crate::catalog::TypeCatalog;
use crate::constructs::ConstructCandidate;
use crate::jsii::{CollectionKind, InterfaceDescriptor, PrimitiveType, TypeDescriptor, TypeRefKind, TypeReference};
use crate::serializable::all_properties;

/// One `anyOf` alternative for the template's `Resources` section:
/// `{ Type: "<construct fqn>", Properties: <props schema> }`.
pub fn resource_schema<C: TypeCatalog>(catalog: &C, candidate: &ConstructCandidate<'_>) -> Value {
    let class = candidate.construct_class;

    let mut properties = Map::new();
    properties.insert("Type".into(), json!({ "type": "string", "enum": [class.fqn] }));
    properties.insert("Properties".into(), schema_for_type_reference(catalog, candidate.props_type_ref));

    let mut required = vec![Value::from("Type")];
    if !candidate.props_optional {
        required.push(Value::from("Properties"));
    }

    let mut o = Map::new();
    o.insert("type".into(), Value::from("object"));
    if let Some(summary) = class.docs.summary() {
        o.insert("description".into(), Value::from(summary));
    }
    o.insert("additionalProperties".into(), Value::from(false));
    o.insert("properties".into(), Value::Object(properties));
    o.insert("required".into(), Value::Array(required));
    Value::Object(o)
}

pub fn schema_for_type_reference<C: TypeCatalog>(catalog: &C, type_ref: &TypeReference) -> Value {
    Emitter { catalog, open: Vec::new() }.type_reference(type_ref)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

struct Emitter<'a, C: TypeCatalog> {
    catalog: &'a C,
    /// named types currently being expanded
    open: Vec<String>,
}

impl<C: TypeCatalog> Emitter<'_, C> {
    fn type_reference(&mut self, type_ref: &TypeReference) -> Value {
        match &type_ref.kind {
            TypeRefKind::Primitive(p) => primitive(*p),
            TypeRefKind::Collection { kind: CollectionKind::Array, element } => json!({
                "type": "array",
                "items": self.type_reference(element),
            }),
            TypeRefKind::Collection { kind: CollectionKind::Map, element } => json!({
                "type": "object",
                "additionalProperties": self.type_reference(element),
            }),
            TypeRefKind::Union(members) => json!({
                "anyOf": members.iter().map(|m| self.type_reference(m)).collect::<Vec<_>>(),
            }),
            TypeRefKind::Named(fqn) => self.named(fqn),
        }
    }

    fn named(&mut self, fqn: &str) -> Value {
        // only reachable for types the serializability check let through;
        // degrade to "anything" instead of recursing forever
        if self.open.iter().any(|f| f == fqn) {
            return json!({});
        }
        let catalog = self.catalog;
        match catalog.find_type(fqn) {
            Some(TypeDescriptor::Enum(e)) => {
                let mut o = json!({
                    "type": "string",
                    "enum": e.members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
                });
                describe(&mut o, e.docs.summary());
                o
            }
            Some(TypeDescriptor::Interface(iface)) => {
                self.open.push(fqn.to_string());
                let o = self.interface(iface);
                self.open.pop();
                o
            }
            Some(TypeDescriptor::Class(_)) | None => json!({}),
        }
    }

    fn interface(&mut self, iface: &InterfaceDescriptor) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for p in all_properties(self.catalog, iface).unwrap_or_default() {
            let mut schema = self.type_reference(&p.type_ref);
            describe(&mut schema, p.docs.summary());
            properties.insert(p.name.clone(), schema);
            if !p.is_optional() {
                required.push(Value::from(p.name.as_str()));
            }
        }

        let mut o = Map::new();
        o.insert("type".into(), Value::from("object"));
        if let Some(summary) = iface.docs.summary() {
            o.insert("description".into(), Value::from(summary));
        }
        o.insert("additionalProperties".into(), Value::from(false));
        o.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            o.insert("required".into(), Value::Array(required));
        }
        Value::Object(o)
    }
}

fn primitive(p: PrimitiveType) -> Value {
    match p {
        PrimitiveType::String => json!({ "type": "string" }),
        PrimitiveType::Number => json!({ "type": "number" }),
        PrimitiveType::Boolean => json!({ "type": "boolean" }),
        PrimitiveType::Date => json!({ "type": "string", "format": "date-time" }),
        PrimitiveType::Json => json!({ "type": "object" }),
        PrimitiveType::Any => json!({}),
    }
}

fn describe(schema: &mut Value, summary: Option<&str>) {
    if let (Some(obj), Some(summary)) = (schema.as_object_mut(), summary) {
        if !obj.contains_key("description") {
            obj.insert("description".into(), Value::from(summary));
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TypeSystem;
    use crate::constructs::unpack_construct;
    use crate::testing::{assembly, class, construct, datatype};

    fn catalog() -> TypeSystem {
        let mut ts = TypeSystem::new();
        let mut bucket = construct("lib.Bucket", "lib.Construct", json!({ "fqn": "lib.BucketProps" }));
        bucket["docs"] = json!({ "summary": "An S3 bucket." });
        ts.add_assembly(assembly("lib", json!([
            class("lib.Construct", None),
            bucket,
            datatype("lib.BucketProps", json!([
                { "name": "versioned", "type": { "primitive": "boolean" }, "optional": true,
                  "docs": { "summary": "Keep every version." } },
                { "name": "bucketName", "type": { "primitive": "string" } },
                { "name": "encryption", "type": { "fqn": "lib.Encryption", "optional": true } },
                { "name": "expires", "type": { "primitive": "date" }, "optional": true },
                { "name": "lifecycle", "type": { "collection": { "kind": "array", "elementtype": { "fqn": "lib.Rule" } } }, "optional": true },
                { "name": "size", "type": { "union": { "types": [{ "primitive": "string" }, { "primitive": "number" }] } }, "optional": true }
            ])),
            { "kind": "enum", "fqn": "lib.Encryption", "name": "Encryption", "members": [{ "name": "KMS" }, { "name": "S3_MANAGED" }] },
            datatype("lib.Rule", json!([
                { "name": "days", "type": { "primitive": "number" } },
                { "name": "tags", "type": { "collection": { "kind": "map", "elementtype": { "primitive": "string" } } }, "optional": true }
            ])),
        ])));
        ts
    }

    #[test]
    fn bucket_resource_fragment() {
        let ts = catalog();
        let bucket = ts.find_class("lib.Bucket").unwrap();
        let candidate = unpack_construct(&ts, bucket).unwrap();
        let schema = resource_schema(&ts, &candidate);

        assert_eq!(schema["properties"]["Type"], json!({ "type": "string", "enum": ["lib.Bucket"] }));
        assert_eq!(schema["description"], "An S3 bucket.");
        assert_eq!(schema["required"], json!(["Type", "Properties"]));
        assert_eq!(schema["additionalProperties"], json!(false));

        let props = &schema["properties"]["Properties"];
        assert_eq!(props["properties"]["versioned"], json!({ "type": "boolean", "description": "Keep every version." }));
        assert_eq!(props["required"], json!(["bucketName"]), "only non-optional properties are required");
    }

    #[test]
    fn nested_types_render_inline() {
        let ts = catalog();
        let props = schema_for_type_reference(&ts, &TypeReference::named("lib.BucketProps"));
        let p = &props["properties"];
        assert_eq!(p["encryption"], json!({ "type": "string", "enum": ["KMS", "S3_MANAGED"] }));
        assert_eq!(p["expires"], json!({ "type": "string", "format": "date-time" }));
        assert_eq!(p["lifecycle"]["items"]["required"], json!(["days"]));
        assert_eq!(p["lifecycle"]["items"]["properties"]["tags"], json!({
            "type": "object", "additionalProperties": { "type": "string" }
        }));
        assert_eq!(p["size"], json!({ "anyOf": [{ "type": "string" }, { "type": "number" }] }));
    }

    #[test]
    fn optional_props_parameter_is_not_required() {
        let ts = catalog();
        let bucket = ts.find_class("lib.Bucket").unwrap();
        let mut candidate = unpack_construct(&ts, bucket).unwrap();
        candidate.props_optional = true;
        assert_eq!(resource_schema(&ts, &candidate)["required"], json!(["Type"]));
    }

    #[test]
    fn recursion_degrades_instead_of_looping() {
        let mut ts = TypeSystem::new();
        ts.add_assembly(assembly("lib", json!([
            datatype("lib.Node", json!([
                { "name": "next", "type": { "fqn": "lib.Node" }, "optional": true }
            ])),
        ])));
        let schema = schema_for_type_reference(&ts, &TypeReference::named("lib.Node"));
        assert_eq!(schema["properties"]["next"], json!({}));
    }
}
