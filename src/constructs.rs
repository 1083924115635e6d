//! Picking construct classes by inheritance and constructor shape.
use crate::catalog::{is_subclass, TypeCatalog};
use crate::jsii::{ClassDescriptor, TypeReference};

/// A construct class together with the type of its `props` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructCandidate<'a> {
    pub construct_class: &'a ClassDescriptor,
    pub props_type_ref: &'a TypeReference,
    pub props_optional: bool,
}

/// Index of `props` in the `(scope, id, props)` construct signature.
const PROPS_PARAMETER: usize = 2;

/// Shape check: concrete, with an initializer of at least three parameters
/// whose third one has a named type.
pub fn unpack_construct<'a, C: TypeCatalog>(
    catalog: &'a C,
    class: &'a ClassDescriptor,
) -> Option<ConstructCandidate<'a>> {
    if class.is_abstract {
        return None;
    }
    let params = catalog.initializer_parameters(class)?;
    let props = params.get(PROPS_PARAMETER)?;
    props.type_ref.fqn()?;
    Some(ConstructCandidate {
        construct_class: class,
        props_type_ref: &props.type_ref,
        props_optional: props.is_optional(),
    })
}

/// Low-level resource classes map one-to-one onto template resources and
/// are left to the base schema.
pub fn is_cfn_resource<C: TypeCatalog>(catalog: &C, class: &ClassDescriptor, resource: &ClassDescriptor) -> bool {
    is_subclass(catalog, class, resource)
}
