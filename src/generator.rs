//! The whole pass: catalog in, merged template schema out.
use std::path::{Path, PathBuf};
use serde_json::{json, Value};

use crate::catalog::{TypeCatalog, TypeSystem};
use crate::constructs::{is_cfn_resource, unpack_construct};
use crate::error::{GenerateError, Result};
use crate::manifest::{resolve_package_dir, Manifest};
use crate::schema::resource_schema;
use crate::serializable::SerializabilityCheck;

/// Pointer to the list of allowed resource shapes in the base schema.
pub const RESOURCE_ALTERNATIVES: &str = "/properties/Resources/patternProperties/^[a-zA-Z0-9]+$/anyOf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Classes must (transitively) extend this one to be considered.
    pub construct_base: String,
    /// Subclasses of this one are excluded.
    pub resource_base: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            construct_base: "@aws-cdk/cdk.Construct".to_string(),
            resource_base: "@aws-cdk/cdk.Resource".to_string(),
        }
    }
}

/// Load the type system for every dependency declared in `manifest_path`.
pub fn load_type_system(manifest_path: &Path) -> Result<TypeSystem> {
    let manifest = Manifest::load(manifest_path)?;
    let package_dir = package_dir(manifest_path)?;
    let dirs = manifest
        .dependency_names()
        .map(|name| resolve_package_dir(&package_dir, name))
        .collect::<Result<Vec<_>>>()?;
    TypeSystem::load_all(dirs)
}

/// Absolute directory of the package descriptor, so resolution can walk
/// up past the working directory.
pub fn package_dir(manifest_path: &Path) -> Result<PathBuf> {
    let parent = match manifest_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::path::absolute(parent).map_err(|source| GenerateError::Io {
        path: parent.to_path_buf(),
        source,
    })
}

/// Schema fragments for every construct that can be written in a template,
/// in class enumeration order.
pub fn construct_fragments<C: TypeCatalog>(catalog: &C, config: &GeneratorConfig) -> Result<Vec<Value>> {
    let construct = catalog.find_class(&config.construct_base)?;
    let resource = catalog.find_class(&config.resource_base)?;
    let mut serializable = SerializabilityCheck::new(catalog);

    let mut fragments = Vec::new();
    for class in catalog.classes_extending(construct) {
        let Some(candidate) = unpack_construct(catalog, class) else {
            tracing::debug!(class = %class.fqn, "skipped: not a (scope, id, props) construct");
            continue;
        };
        if is_cfn_resource(catalog, class, resource) {
            tracing::debug!(class = %class.fqn, "skipped: low-level resource");
            continue;
        }
        if !serializable.is_serializable_type_reference(candidate.props_type_ref) {
            tracing::debug!(class = %class.fqn, "skipped: props not representable in JSON");
            continue;
        }
        fragments.push(resource_schema(catalog, &candidate));
    }
    tracing::info!(constructs = fragments.len(), "construct schemas generated");
    Ok(fragments)
}

/// Append `fragments` to the base schema's resource alternatives and
/// declare the `$schema` property.
pub fn merge_into_base_schema(base_schema: &mut Value, fragments: Vec<Value>) -> Result<()> {
    let alternatives = base_schema
        .pointer_mut(RESOURCE_ALTERNATIVES)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| GenerateError::BaseSchema {
            reason: format!("expected an array at {RESOURCE_ALTERNATIVES}"),
        })?;
    alternatives.extend(fragments);

    let properties = base_schema
        .get_mut("properties")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| GenerateError::BaseSchema {
            reason: "expected an object at /properties".to_string(),
        })?;
    properties.insert("$schema".into(), json!({ "type": "string" }));
    Ok(())
}

pub fn generate<C: TypeCatalog>(catalog: &C, mut base_schema: Value, config: &GeneratorConfig) -> Result<Value> {
    let fragments = construct_fragments(catalog, config)?;
    merge_into_base_schema(&mut base_schema, fragments)?;
    Ok(base_schema)
}

/// Two-space pretty print, no trailing newline.
pub fn render(schema: &Value) -> String {
    // serializing a `Value` cannot fail
    serde_json::to_string_pretty(schema).unwrap_or_default()
}

// ------------------------------- Tests ------------------------------------ //
