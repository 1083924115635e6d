//! "Can this type be written down in a JSON/YAML template?"
//!
//! A type reference is representable when, recursively, it only reaches
//! primitives, enums, collections of representable elements, unions of
//! primitives, and data-only interfaces whose properties are representable.
//! Classes, behavioral interfaces, types missing from the catalog and any
//! reference cycle are not.
use std::collections::{HashMap, HashSet};

use crate::catalog::TypeCatalog;
use crate::jsii::{InterfaceDescriptor, PropertyDescriptor, TypeDescriptor, TypeRefKind, TypeReference};

/// Memoized representability check over one catalog.
pub struct SerializabilityCheck<'a, C: TypeCatalog> {
    catalog: &'a C,
    /// settled verdicts per fqn
    memo: HashMap<String, bool>,
    /// fqns whose verdict is being computed
    in_progress: HashSet<String>,
}

impl<'a, C: TypeCatalog> SerializabilityCheck<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog, memo: HashMap::new(), in_progress: HashSet::new() }
    }

    pub fn is_serializable_type_reference(&mut self, type_ref: &TypeReference) -> bool {
        match &type_ref.kind {
            TypeRefKind::Primitive(_) => true,
            TypeRefKind::Collection { element, .. } => self.is_serializable_type_reference(element),
            TypeRefKind::Union(members) => members
                .iter()
                .all(|m| matches!(m.kind, TypeRefKind::Primitive(_))),
            TypeRefKind::Named(fqn) => self.is_serializable_fqn(fqn),
        }
    }

    fn is_serializable_fqn(&mut self, fqn: &str) -> bool {
        if let Some(&verdict) = self.memo.get(fqn) {
            return verdict;
        }
        // reached again while still open: cycle
        if !self.in_progress.insert(fqn.to_string()) {
            tracing::debug!(fqn, "recursive type is not representable");
            return false;
        }

        let catalog = self.catalog;
        let verdict = match catalog.find_type(fqn) {
            None => {
                tracing::debug!(fqn, "type not in catalog");
                false
            }
            Some(TypeDescriptor::Enum(_)) => true,
            Some(TypeDescriptor::Class(_)) => false,
            Some(TypeDescriptor::Interface(iface)) => self.is_serializable_interface(iface),
        };

        self.in_progress.remove(fqn);
        self.memo.insert(fqn.to_string(), verdict);
        verdict
    }

    fn is_serializable_interface(&mut self, iface: &InterfaceDescriptor) -> bool {
        if !iface.datatype {
            return false;
        }
        let Some(props) = all_properties(self.catalog, iface) else {
            return false;
        };
        props.iter().all(|p| self.is_serializable_type_reference(&p.type_ref))
    }
}

/// One-shot convenience over a fresh check.
pub fn is_serializable_type_reference<C: TypeCatalog>(catalog: &C, type_ref: &TypeReference) -> bool {
    SerializabilityCheck::new(catalog).is_serializable_type_reference(type_ref)
}

/// Instance properties of a data interface, inherited ones first, a
/// redeclared name keeping its first position and its latest declaration.
///
/// `None` when a base interface is missing, not an interface, or the
/// inheritance graph loops.
pub fn all_properties<'a, C: TypeCatalog>(
    catalog: &'a C,
    iface: &'a InterfaceDescriptor,
) -> Option<Vec<&'a PropertyDescriptor>> {
    fn collect<'a, C: TypeCatalog>(
        catalog: &'a C,
        iface: &'a InterfaceDescriptor,
        stack: &mut Vec<&'a str>,
        out: &mut Vec<&'a PropertyDescriptor>,
    ) -> Option<()> {
        if stack.contains(&iface.fqn.as_str()) {
            return None;
        }
        stack.push(&iface.fqn);
        for base in &iface.interfaces {
            match catalog.find_type(base)? {
                TypeDescriptor::Interface(b) => collect(catalog, b, stack, out)?,
                _ => return None,
            }
        }
        stack.pop();
        for p in iface.properties.iter().filter(|p| !p.is_static) {
            match out.iter_mut().find(|q| q.name == p.name) {
                Some(slot) => *slot = p,
                None => out.push(p),
            }
        }
        Some(())
    }

    let mut out = Vec::new();
    collect(catalog, iface, &mut Vec::new(), &mut out)?;
    Some(out)
}

// ------------------------------- Tests ------------------------------------ //
