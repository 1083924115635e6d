//! Package descriptor (`package.json`) and Node-style package resolution.
use std::path::{Path, PathBuf};
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::{GenerateError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: IndexMap<String, IgnoredAny>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        crate::path_de::read_json_file(path)
    }

    /// Declared dependency names, in file order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }
}

/// Locate the installed directory of package `name` the way Node does:
/// `<dir>/node_modules/<name>` for `from_dir` and each of its ancestors,
/// first one holding a `package.json` wins.
pub fn resolve_package_dir(from_dir: &Path, name: &str) -> Result<PathBuf> {
    for dir in from_dir.ancestors() {
        // a package nested in node_modules never looks inside `node_modules/node_modules`
        if dir.file_name().is_some_and(|n| n == "node_modules") {
            continue;
        }
        let candidate = dir.join("node_modules").join(name);
        if candidate.join("package.json").is_file() {
            return Ok(candidate);
        }
    }
    Err(GenerateError::MissingDependency {
        name: name.to_string(),
        from: from_dir.to_path_buf(),
    })
}
