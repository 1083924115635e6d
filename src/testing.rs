//! Fixture builders shared by the unit tests.
use std::path::{Path, PathBuf};
use serde_json::{json, Value};

use crate::jsii::Assembly;

/// An in-memory assembly from a JSON array of type descriptors.
pub fn assembly(name: &str, types: Value) -> Assembly {
    serde_json::from_value(assembly_json(name, types)).unwrap()
}

pub fn assembly_json(name: &str, types: Value) -> Value {
    let types = types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["fqn"].as_str().unwrap().to_string(), t.clone()))
        .collect::<serde_json::Map<_, _>>();
    json!({ "schema": "jsii/0.20.0", "name": name, "version": "0.0.0", "types": types })
}

pub fn class(fqn: &str, base: Option<&str>) -> Value {
    let mut c = json!({ "kind": "class", "fqn": fqn, "name": short_name(fqn) });
    if let Some(base) = base {
        c["base"] = json!(base);
    }
    c
}

/// A concrete construct class taking `(scope, id, props: <props>)`.
pub fn construct(fqn: &str, base: &str, props: Value) -> Value {
    let mut c = class(fqn, Some(base));
    c["initializer"] = json!({
        "parameters": [
            { "name": "scope", "type": { "fqn": "lib.Construct" } },
            { "name": "id", "type": { "primitive": "string" } },
            { "name": "props", "type": props }
        ]
    });
    c
}

pub fn datatype(fqn: &str, properties: Value) -> Value {
    json!({
        "kind": "interface",
        "fqn": fqn,
        "name": short_name(fqn),
        "datatype": true,
        "properties": properties
    })
}

/// Create `<root>/node_modules/<name>` with a `package.json` and, when
/// given, a `.jsii` assembly.
pub fn install_package(root: &Path, name: &str, jsii: Option<Value>) -> PathBuf {
    let dir = root.join("node_modules").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("package.json"), json!({ "name": name }).to_string()).unwrap();
    if let Some(jsii) = jsii {
        std::fs::write(dir.join(crate::jsii::ASSEMBLY_FILE), jsii.to_string()).unwrap();
    }
    dir
}

fn short_name(fqn: &str) -> &str {
    fqn.rsplit('.').next().unwrap_or(fqn)
}
