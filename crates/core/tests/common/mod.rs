//! Shared fixtures for checker behavior tests.

use weavecheck_api::models::{
    MethodInfo, ParameterInfo, TypeInfo, TypeKind, TypeRef, Visibility,
};
use weavecheck_core::index::public_method;
use weavecheck_core::{
    ContractChecker, DiagnosticCollector, InMemoryTypeIndex, StaticTargetRegistry,
};

pub const INTERCEPTOR: &str = "app.plugin.SaveInterceptor";
pub const TARGET: &str = "app.Repository";

/// Build an interceptor type holding the given methods. The interceptor's
/// own flags never matter to the checker, only its name and methods.
#[allow(dead_code)]
pub fn interceptor_type(methods: Vec<MethodInfo>) -> TypeInfo {
    TypeInfo {
        fqn: INTERCEPTOR.to_string(),
        name: "SaveInterceptor".into(),
        kind: TypeKind::Class,
        is_final: false,
        superclass: None,
        interfaces: vec![],
        methods,
    }
}

#[allow(dead_code)]
pub fn method(name: &str, params: &[TypeRef]) -> MethodInfo {
    public_method(name, params, TypeRef::Unannotated)
}

#[allow(dead_code)]
pub fn param(name: &str, type_ref: TypeRef) -> ParameterInfo {
    ParameterInfo {
        name: name.to_string(),
        type_ref,
    }
}

/// A method with full control over flags, for target-side fixtures.
#[allow(dead_code)]
pub fn target_method(
    name: &str,
    visibility: Visibility,
    is_static: bool,
    is_final: bool,
    is_constructor: bool,
    params: &[TypeRef],
    return_type: TypeRef,
) -> MethodInfo {
    MethodInfo {
        name: name.to_string(),
        visibility,
        is_static,
        is_final,
        is_constructor,
        parameters: params
            .iter()
            .enumerate()
            .map(|(i, t)| param(&format!("arg{i}"), t.clone()))
            .collect(),
        return_type,
    }
}

/// Run one full analysis pass of `interceptor` and collect the findings.
#[allow(dead_code)]
pub fn run_checker(
    index: &InMemoryTypeIndex,
    interceptor: &TypeInfo,
) -> DiagnosticCollector {
    let registry = StaticTargetRegistry::new().with_targets(INTERCEPTOR, &[TARGET]);
    run_checker_with_registry(index, &registry, interceptor)
}

#[allow(dead_code)]
pub fn run_checker_with_registry(
    index: &InMemoryTypeIndex,
    registry: &StaticTargetRegistry,
    interceptor: &TypeInfo,
) -> DiagnosticCollector {
    let mut checker = ContractChecker::new(index, registry);
    let mut sink = DiagnosticCollector::new();
    checker
        .check_type(interceptor, &mut sink)
        .expect("analysis should not fail");
    sink
}
