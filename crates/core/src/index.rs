//! Collaborator seams for the contract checker.
//!
//! These traits abstract away the data source, allowing the checker to work
//! against a real symbol index, stubs, or the in-memory implementations
//! shipped here.

use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use weavecheck_api::models::{
    Diagnostic, DiagnosticKind, MethodInfo, ParameterInfo, TypeInfo, TypeKind, TypeRef, Visibility,
};

/// Resolves fully qualified names to type definitions.
///
/// "Name does not resolve" is a first-class outcome (`Ok(None)`), not an
/// error; `Err` is reserved for hard failures of the index itself, including
/// cancellation of the surrounding pass, and must propagate untouched.
pub trait TypeIndex: Send + Sync {
    fn resolve(&self, fqn: &str) -> Result<Option<Arc<TypeInfo>>>;
}

/// Maps an interceptor type to the target types it is registered against.
///
/// The mapping itself is configuration owned by the host; the checker only
/// consumes it as an ordered lookup.
pub trait TargetRegistry: Send + Sync {
    /// Target type names for the given interceptor, in registration order.
    /// May be empty.
    fn targets_for(&self, interceptor_fqn: &str) -> Result<Vec<String>>;
}

/// Accumulates findings.
///
/// Diagnostics are write-only outputs; the single read-back, `count_of`, is
/// what the checker uses to deduplicate final-target-class reports.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn count_of(&self, kind: DiagnosticKind) -> usize;
}

/// Map-backed [`TypeIndex`].
///
/// Built with a fluent API; used by hosts that already hold resolved type
/// definitions, and by tests.
#[derive(Default)]
pub struct InMemoryTypeIndex {
    types: HashMap<String, Arc<TypeInfo>>,
}

impl InMemoryTypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class to the index.
    pub fn with_class(self, fqn: &str, superclass: Option<&str>) -> Self {
        self.with_type(fqn, TypeKind::Class, false, superclass)
    }

    /// Add a final class to the index.
    pub fn with_final_class(self, fqn: &str, superclass: Option<&str>) -> Self {
        self.with_type(fqn, TypeKind::Class, true, superclass)
    }

    /// Add an interface to the index.
    pub fn with_interface(self, fqn: &str) -> Self {
        self.with_type(fqn, TypeKind::Interface, false, None)
    }

    fn with_type(
        mut self,
        fqn: &str,
        kind: TypeKind,
        is_final: bool,
        superclass: Option<&str>,
    ) -> Self {
        let name = fqn.rsplit('.').next().unwrap_or(fqn);
        self.types.insert(
            fqn.to_string(),
            Arc::new(TypeInfo {
                fqn: fqn.to_string(),
                name: name.into(),
                kind,
                is_final,
                superclass: superclass.map(|s| s.to_string()),
                interfaces: vec![],
                methods: vec![],
            }),
        );
        self
    }

    /// Record an interface implementation (or super-interface) on a type.
    pub fn implements(mut self, fqn: &str, interface_fqn: &str) -> Self {
        if let Some(info) = self.types.get(fqn) {
            let mut info = (**info).clone();
            info.interfaces.push(interface_fqn.to_string());
            self.types.insert(fqn.to_string(), Arc::new(info));
        }
        self
    }

    /// Add a public instance method to a type.
    pub fn with_method(self, fqn: &str, method: &str, params: &[TypeRef]) -> Self {
        self.with_method_info(fqn, public_method(method, params, TypeRef::Unannotated))
    }

    /// Add a fully specified method to a type.
    pub fn with_method_info(mut self, fqn: &str, method: MethodInfo) -> Self {
        if let Some(info) = self.types.get(fqn) {
            let mut info = (**info).clone();
            info.methods.push(method);
            self.types.insert(fqn.to_string(), Arc::new(info));
        }
        self
    }
}

impl TypeIndex for InMemoryTypeIndex {
    fn resolve(&self, fqn: &str) -> Result<Option<Arc<TypeInfo>>> {
        Ok(self.types.get(fqn).cloned())
    }
}

/// Construct a public instance method, the common case when populating an
/// index by hand.
pub fn public_method(name: &str, params: &[TypeRef], return_type: TypeRef) -> MethodInfo {
    MethodInfo {
        name: name.to_string(),
        visibility: Visibility::Public,
        is_static: false,
        is_final: false,
        is_constructor: false,
        parameters: params
            .iter()
            .enumerate()
            .map(|(i, t)| ParameterInfo {
                name: format!("arg{i}"),
                type_ref: t.clone(),
            })
            .collect(),
        return_type,
    }
}

/// Map-backed [`TargetRegistry`].
#[derive(Default)]
pub struct StaticTargetRegistry {
    targets: HashMap<String, Vec<String>>,
}

impl StaticTargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_targets(mut self, interceptor_fqn: &str, targets: &[&str]) -> Self {
        self.targets.insert(
            interceptor_fqn.to_string(),
            targets.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

impl TargetRegistry for StaticTargetRegistry {
    fn targets_for(&self, interceptor_fqn: &str) -> Result<Vec<String>> {
        Ok(self.targets.get(interceptor_fqn).cloned().unwrap_or_default())
    }
}

/// Vec-backed [`DiagnosticSink`].
#[derive(Default, Debug)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
