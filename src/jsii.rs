//! Typed model of a jsii assembly (`.jsii` file).
//!
//! Only the parts the generator reads are modeled; unknown keys are ignored.
//! Both the early `jsii/0.x` encodings (`base: {"fqn": ..}`, `optional` on
//! the type reference) and the current ones are accepted.
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

// ————————————————————————————————————————————————————————————————————————————
// ASSEMBLY
// ————————————————————————————————————————————————————————————————————————————

/// Name of the per-package marker file holding the assembly.
pub const ASSEMBLY_FILE: &str = ".jsii";

#[derive(Debug, Clone, Deserialize)]
pub struct Assembly {
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Only the names matter; values changed shape across schema versions.
    #[serde(default)]
    pub dependencies: IndexMap<String, IgnoredAny>,
    #[serde(default)]
    pub types: IndexMap<String, TypeDescriptor>,
}

impl Assembly {
    pub fn is_supported_schema(&self) -> bool {
        self.schema.starts_with("jsii/")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Class(ClassDescriptor),
    Interface(InterfaceDescriptor),
    Enum(EnumDescriptor),
}

impl TypeDescriptor {
    pub fn fqn(&self) -> &str {
        match self {
            Self::Class(c) => &c.fqn,
            Self::Interface(i) => &i.fqn,
            Self::Enum(e) => &e.fqn,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassDescriptor {
    pub fqn: String,
    #[serde(default, deserialize_with = "de_opt_fqn")]
    pub base: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub initializer: Option<Initializer>,
    #[serde(default)]
    pub docs: Docs,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Initializer {
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeReference,
    #[serde(default)]
    pub optional: bool,
}

impl ParameterDescriptor {
    pub fn is_optional(&self) -> bool {
        self.optional || self.type_ref.optional
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterfaceDescriptor {
    pub fqn: String,
    /// Pure-data interface ("struct"); behavioral interfaces are not.
    #[serde(default)]
    pub datatype: bool,
    #[serde(default, deserialize_with = "de_fqn_list")]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub docs: Docs,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeReference,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub docs: Docs,
}

impl PropertyDescriptor {
    pub fn is_optional(&self) -> bool {
        self.optional || self.type_ref.optional
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumDescriptor {
    pub fqn: String,
    #[serde(default)]
    pub members: Vec<EnumMember>,
    #[serde(default)]
    pub docs: Docs,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumMember {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Docs {
    #[serde(default)]
    pub summary: Option<String>,
    /// `jsii/0.x` put the whole doc comment here.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Docs {
    pub fn summary(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .or(self.comment.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE REFERENCES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    Date,
    Json,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Array,
    Map,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRefKind {
    Primitive(PrimitiveType),
    Named(String),
    Collection {
        kind: CollectionKind,
        element: Box<TypeReference>,
    },
    Union(Vec<TypeReference>),
}

/// A reference to a type: exactly one of `primitive`, `fqn`, `collection`
/// or `union`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawTypeReference")]
pub struct TypeReference {
    pub kind: TypeRefKind,
    /// `jsii/0.x` marked optionality on the reference itself.
    pub optional: bool,
}

impl TypeReference {
    pub fn primitive(p: PrimitiveType) -> Self {
        Self { kind: TypeRefKind::Primitive(p), optional: false }
    }

    pub fn named(fqn: impl Into<String>) -> Self {
        Self { kind: TypeRefKind::Named(fqn.into()), optional: false }
    }

    /// The fully-qualified name, for named references only.
    pub fn fqn(&self) -> Option<&str> {
        match &self.kind {
            TypeRefKind::Named(fqn) => Some(fqn),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawTypeReference {
    #[serde(default)]
    primitive: Option<PrimitiveType>,
    #[serde(default)]
    fqn: Option<String>,
    #[serde(default)]
    collection: Option<RawCollection>,
    #[serde(default)]
    union: Option<RawUnion>,
    #[serde(default)]
    optional: bool,
}

#[derive(Deserialize)]
struct RawCollection {
    kind: CollectionKind,
    elementtype: Box<TypeReference>,
}

#[derive(Deserialize)]
struct RawUnion {
    types: Vec<TypeReference>,
}

impl TryFrom<RawTypeReference> for TypeReference {
    type Error = String;

    fn try_from(raw: RawTypeReference) -> Result<Self, Self::Error> {
        let mut kinds = Vec::with_capacity(1);
        if let Some(p) = raw.primitive {
            kinds.push(TypeRefKind::Primitive(p));
        }
        if let Some(fqn) = raw.fqn {
            kinds.push(TypeRefKind::Named(fqn));
        }
        if let Some(c) = raw.collection {
            kinds.push(TypeRefKind::Collection { kind: c.kind, element: c.elementtype });
        }
        if let Some(u) = raw.union {
            kinds.push(TypeRefKind::Union(u.types));
        }
        match kinds.len() {
            1 => Ok(TypeReference { kind: kinds.remove(0), optional: raw.optional }),
            0 => Err("type reference has none of primitive/fqn/collection/union".to_string()),
            _ => Err("type reference has more than one of primitive/fqn/collection/union".to_string()),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `"a.B"` or the legacy `{"fqn": "a.B"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FqnRef {
    Bare(String),
    Wrapped { fqn: String },
}

impl From<FqnRef> for String {
    fn from(r: FqnRef) -> Self {
        match r {
            FqnRef::Bare(s) | FqnRef::Wrapped { fqn: s } => s,
        }
    }
}

fn de_opt_fqn<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<FqnRef>::deserialize(d)?.map(String::from))
}

fn de_fqn_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Vec::<FqnRef>::deserialize(d)?.into_iter().map(String::from).collect())
}

// ------------------------------- Tests ------------------------------------ //
