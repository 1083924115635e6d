//! The loaded universe of types, and the query surface the filters use.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use indexmap::IndexMap;

use crate::error::{GenerateError, Result};
use crate::jsii::{Assembly, ClassDescriptor, ParameterDescriptor, TypeDescriptor, ASSEMBLY_FILE};
use crate::manifest::resolve_package_dir;

// ————————————————————————————————————————————————————————————————————————————
// QUERY INTERFACE
// ————————————————————————————————————————————————————————————————————————————

/// Read-only view over a set of loaded types.
pub trait TypeCatalog {
    fn find_type(&self, fqn: &str) -> Option<&TypeDescriptor>;

    /// Every class, in load order.
    fn classes(&self) -> impl Iterator<Item = &ClassDescriptor>;

    fn find_class(&self, fqn: &str) -> Result<&ClassDescriptor> {
        match self.find_type(fqn) {
            Some(TypeDescriptor::Class(c)) => Ok(c),
            _ => Err(GenerateError::TypeNotFound { fqn: fqn.to_string() }),
        }
    }

    /// Transitive base classes of `class`, nearest first, excluding `class`.
    ///
    /// Stops at a base missing from the catalog, and at the first repeat if
    /// the metadata describes a cycle.
    fn ancestors<'a>(&'a self, class: &'a ClassDescriptor) -> Vec<&'a ClassDescriptor> {
        let mut out = Vec::new();
        let mut seen = HashSet::from([class.fqn.as_str()]);
        let mut next = class.base.as_deref();
        while let Some(fqn) = next {
            if !seen.insert(fqn) {
                break;
            }
            let Some(TypeDescriptor::Class(base)) = self.find_type(fqn) else {
                break;
            };
            out.push(base);
            next = base.base.as_deref();
        }
        out
    }

    fn classes_extending(&self, base: &ClassDescriptor) -> Vec<&ClassDescriptor> {
        self.classes()
            .filter(|c| is_subclass(self, c, base))
            .collect()
    }

    fn initializer_parameters<'a>(&'a self, class: &'a ClassDescriptor) -> Option<&'a [ParameterDescriptor]> {
        class.initializer.as_ref().map(|i| i.parameters.as_slice())
    }
}

/// `base` is a strict ancestor of `class`.
pub fn is_subclass<C: TypeCatalog + ?Sized>(catalog: &C, class: &ClassDescriptor, base: &ClassDescriptor) -> bool {
    catalog.ancestors(class).iter().any(|a| a.fqn == base.fqn)
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE SYSTEM
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Default)]
pub struct TypeSystem {
    /// assembly name → directory it was loaded from
    assemblies: IndexMap<String, PathBuf>,
    types: IndexMap<String, TypeDescriptor>,
}

impl TypeSystem {
    pub fn new() -> Self { Self::default() }

    /// Load the type metadata of every directory that carries an assembly;
    /// directories without one are skipped.
    pub fn load_all<I, P>(dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut ts = Self::new();
        for dir in dirs {
            let dir = dir.as_ref();
            if !dir.join(ASSEMBLY_FILE).is_file() {
                tracing::debug!(dir = %dir.display(), "no type metadata, skipping");
                continue;
            }
            ts.load(dir)?;
        }
        tracing::info!(
            assemblies = ts.assemblies.len(),
            types = ts.types.len(),
            "type system loaded"
        );
        Ok(ts)
    }

    /// Load the assembly in `dir`, then the assemblies it depends on,
    /// resolved from `dir`. Already-loaded assembly names are skipped.
    pub fn load(&mut self, dir: &Path) -> Result<()> {
        let path = dir.join(ASSEMBLY_FILE);
        let assembly: Assembly = crate::path_de::read_json_file(&path)?;
        if !assembly.is_supported_schema() {
            return Err(GenerateError::UnsupportedSchema { path, schema: assembly.schema });
        }
        if self.assemblies.contains_key(&assembly.name) {
            tracing::debug!(assembly = %assembly.name, "already loaded");
            return Ok(());
        }
        tracing::debug!(assembly = %assembly.name, version = %assembly.version, "loading assembly");
        self.assemblies.insert(assembly.name.clone(), dir.to_path_buf());

        for dep in assembly.dependencies.keys() {
            if self.assemblies.contains_key(dep) {
                continue;
            }
            let dep_dir = resolve_package_dir(dir, dep)?;
            self.load(&dep_dir)?;
        }

        self.add_assembly(assembly);
        Ok(())
    }

    /// Register the types of an already-parsed assembly.
    pub fn add_assembly(&mut self, assembly: Assembly) {
        self.assemblies.entry(assembly.name).or_default();
        for ty in assembly.types.into_values() {
            self.types.insert(ty.fqn().to_string(), ty);
        }
    }

    pub fn assembly_names(&self) -> impl Iterator<Item = &str> {
        self.assemblies.keys().map(String::as_str)
    }
}

impl TypeCatalog for TypeSystem {
    fn find_type(&self, fqn: &str) -> Option<&TypeDescriptor> {
        self.types.get(fqn)
    }

    fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        self.types.values().filter_map(|t| match t {
            TypeDescriptor::Class(c) => Some(c),
            _ => None,
        })
    }
}

// ------------------------------- Tests ------------------------------------ //
