use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// No type annotation was written at the declaration site.
    ///
    /// Distinct from "any type": an unannotated slot is treated as
    /// universally compatible because there is nothing to check against.
    Unannotated,

    /// Primitive or builtin type name (e.g., "int", "string", "callable")
    Raw(String),

    /// Fully qualified class or interface name
    Id(String),
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    pub fn is_unannotated(&self) -> bool {
        matches!(self, TypeRef::Unannotated)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Raw(s) if s == "void")
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TypeRef::Raw(s) if s == "null")
    }

    /// The fully qualified name, when this reference names a class or interface.
    pub fn fqn(&self) -> Option<&str> {
        match self {
            TypeRef::Id(fqn) => Some(fqn),
            _ => None,
        }
    }

    /// The name as written, or the empty string for an unannotated slot.
    pub fn display_name(&self) -> &str {
        match self {
            TypeRef::Unannotated => "",
            TypeRef::Raw(s) | TypeRef::Id(s) => s,
        }
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unannotated
    }
}

/// Kind of type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// A resolved class or interface, as produced by a type index.
///
/// The core never mutates these; they are lent out read-only for the
/// duration of one analysis pass.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct TypeInfo {
    /// Fully qualified name, e.g., "Vendor.Module.Repository"
    pub fqn: String,
    /// Short display name
    #[schemars(with = "String")]
    pub name: SmolStr,
    pub kind: TypeKind,
    pub is_final: bool,
    /// Direct ancestor in the single-inheritance chain
    pub superclass: Option<String>,
    /// Directly implemented (or, for interfaces, directly extended) interfaces
    pub interfaces: Vec<String>,
    /// Declared methods, in declaration order
    pub methods: Vec<MethodInfo>,
}

impl TypeInfo {
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Find a directly declared method by name.
    ///
    /// Does NOT search the inheritance hierarchy.
    pub fn find_method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A method declared by exactly one [`TypeInfo`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodInfo {
    pub name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_constructor: bool,
    /// Parameters in declaration order; diagnostics report 1-based positions.
    pub parameters: Vec<ParameterInfo>,
    pub return_type: TypeRef,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ParameterInfo {
    pub name: String,
    pub type_ref: TypeRef,
}

/// Interception flavor, derived from the method-name prefix.
///
/// Determines how interceptor parameter positions map onto the target
/// method's parameter list.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterceptionKind {
    Before,
    After,
    Around,
}

impl InterceptionKind {
    /// The method-name prefix denoting this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            InterceptionKind::Before => "before",
            InterceptionKind::After => "after",
            InterceptionKind::Around => "around",
        }
    }

    /// Positional shift between an interceptor parameter (1-based) and the
    /// target parameter slot it maps to: interceptor parameter `i` maps to
    /// target parameter index `i - shift` (0-based).
    pub fn shift(&self) -> usize {
        match self {
            InterceptionKind::Before => 2,
            InterceptionKind::After | InterceptionKind::Around => 3,
        }
    }
}
