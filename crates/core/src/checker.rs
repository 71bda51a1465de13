//! The interception contract checker.
//!
//! For each interceptor method of a type: classify it by name, look up the
//! configured target types, validate class and method legality, then walk
//! the parameter list applying the per-kind position mapping and the
//! two-tier compatibility rules. Findings go to the [`DiagnosticSink`];
//! anything that fails to resolve ends analysis of that one method without
//! diagnostics, since the coarse checks cannot tell "not actually an
//! interceptor" from "misconfigured interceptor".

use crate::compat::{is_compatible, is_probably_compatible};
use crate::error::Result;
use crate::hierarchy::TypeHierarchy;
use crate::index::{DiagnosticSink, TargetRegistry, TypeIndex};
use crate::interception::{CALLABLE_TYPE, CLOSURE_FQN, InterceptorMethod};
use std::sync::Arc;
use weavecheck_api::models::{
    Diagnostic, DiagnosticKind, InterceptionKind, Location, MethodInfo, TypeInfo, TypeRef,
    Visibility,
};

pub struct ContractChecker<'a> {
    registry: &'a dyn TargetRegistry,
    hierarchy: TypeHierarchy<'a>,
}

impl<'a> ContractChecker<'a> {
    /// Collaborators are injected here; the checker holds no global state
    /// and one checker serves one analysis pass.
    pub fn new(index: &'a dyn TypeIndex, registry: &'a dyn TargetRegistry) -> Self {
        Self {
            registry,
            hierarchy: TypeHierarchy::new(index),
        }
    }

    /// Analyze every method of `interceptor`, reporting findings to `sink`.
    ///
    /// Collaborator failures (index unavailable, host cancellation) abort
    /// the whole invocation; resolution misses only silence the affected
    /// method.
    pub fn check_type(
        &mut self,
        interceptor: &TypeInfo,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        for method in &interceptor.methods {
            self.check_method(interceptor, method, sink)?;
        }
        Ok(())
    }

    fn check_method(
        &mut self,
        interceptor: &TypeInfo,
        method: &MethodInfo,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let Some(classified) = InterceptorMethod::classify(method) else {
            return Ok(());
        };

        for target_fqn in self.registry.targets_for(&interceptor.fqn)? {
            let Some(target_idx) = self.hierarchy.ensure_loaded(&target_fqn)? else {
                tracing::debug!(
                    interceptor = %interceptor.fqn,
                    target = %target_fqn,
                    "target type unresolved, skipping interceptor method"
                );
                return Ok(());
            };
            let target = self.hierarchy.info(target_idx).clone();

            self.check_target_class(interceptor, &target, sink);

            let Some(target_method) = target.find_method(&classified.target_method_name) else {
                tracing::debug!(
                    interceptor = %interceptor.fqn,
                    target = %target_fqn,
                    method = %classified.target_method_name,
                    "target method not found, skipping interceptor method"
                );
                return Ok(());
            };

            check_target_method(interceptor, method, target_method, sink);
            self.check_parameters(interceptor, method, &classified, &target, target_method, sink)?;
        }

        Ok(())
    }

    /// At most one final-target-class report per analyzed interceptor type,
    /// no matter how many candidates or methods trip it.
    fn check_target_class(
        &self,
        interceptor: &TypeInfo,
        target: &TypeInfo,
        sink: &mut dyn DiagnosticSink,
    ) {
        if target.is_final && sink.count_of(DiagnosticKind::FinalTargetClass) == 0 {
            sink.report(
                Diagnostic::new(
                    Location::ClassName {
                        class: interceptor.fqn.clone(),
                    },
                    DiagnosticKind::FinalTargetClass,
                )
                .with_detail(target.fqn.clone()),
            );
        }
    }

    fn check_parameters(
        &mut self,
        interceptor: &TypeInfo,
        method: &MethodInfo,
        classified: &InterceptorMethod,
        target: &Arc<TypeInfo>,
        target_method: &MethodInfo,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        for (slot, param) in method.parameters.iter().enumerate() {
            let position = slot + 1;
            let location = Location::Parameter {
                class: interceptor.fqn.clone(),
                method: method.name.clone(),
                position,
            };
            let declared = &param.type_ref;

            if position == 1 {
                // The subject parameter carries the target type itself.
                let expected = TypeRef::id(target.fqn.clone());
                self.check_both_tiers(&expected, declared, location, sink)?;
                continue;
            }
            if position == 2 && classified.kind == InterceptionKind::Around {
                let callable = TypeRef::raw(CALLABLE_TYPE);
                let closure = TypeRef::id(CLOSURE_FQN);
                if !is_compatible(&mut self.hierarchy, &callable, declared)?
                    && !is_compatible(&mut self.hierarchy, &closure, declared)?
                {
                    sink.report(
                        Diagnostic::new(location, DiagnosticKind::InvalidCallableParameter)
                            .with_detail(mismatch_detail(declared, &callable)),
                    );
                }
                continue;
            }
            if position == 2 && classified.kind == InterceptionKind::After {
                let returned = &target_method.return_type;
                if returned.is_void() {
                    // Result slot of a void method: only "no annotation" or
                    // an explicit null type are acceptable.
                    if !declared.is_unannotated() && !declared.is_null() {
                        sink.report(
                            Diagnostic::new(location, DiagnosticKind::ParameterTypeMismatch)
                                .with_detail(mismatch_detail(declared, &TypeRef::raw("null"))),
                        );
                    }
                } else if !declared.is_unannotated() && !returned.is_unannotated() {
                    self.check_both_tiers(returned, declared, location, sink)?;
                }
                continue;
            }

            let target_index = position - classified.kind.shift();
            let Some(target_param) = target_method.parameters.get(target_index) else {
                sink.report(Diagnostic::new(location, DiagnosticKind::RedundantParameter));
                continue;
            };
            self.check_both_tiers(&target_param.type_ref, declared, location, sink)?;
        }

        Ok(())
    }

    /// Strict tier reports an error; the advisory tier independently
    /// reports a weak warning. Both may fire for one position.
    fn check_both_tiers(
        &mut self,
        expected: &TypeRef,
        declared: &TypeRef,
        location: Location,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        if !is_compatible(&mut self.hierarchy, expected, declared)? {
            sink.report(
                Diagnostic::new(location.clone(), DiagnosticKind::ParameterTypeMismatch)
                    .with_detail(mismatch_detail(declared, expected)),
            );
        }
        if !is_probably_compatible(&mut self.hierarchy, expected, declared)? {
            sink.report(Diagnostic::new(
                location,
                DiagnosticKind::ParameterTypePossibleMismatch,
            ));
        }
        Ok(())
    }
}

/// The four structural method checks are independent; any subset may fire
/// for the same target method.
fn check_target_method(
    interceptor: &TypeInfo,
    method: &MethodInfo,
    target_method: &MethodInfo,
    sink: &mut dyn DiagnosticSink,
) {
    let location = Location::MethodName {
        class: interceptor.fqn.clone(),
        method: method.name.clone(),
    };
    if target_method.is_constructor {
        sink.report(Diagnostic::new(
            location.clone(),
            DiagnosticKind::ConstructorIntercepted,
        ));
    }
    if target_method.is_final {
        sink.report(Diagnostic::new(
            location.clone(),
            DiagnosticKind::FinalTargetMethod,
        ));
    }
    if target_method.is_static {
        sink.report(Diagnostic::new(
            location.clone(),
            DiagnosticKind::StaticTargetMethod,
        ));
    }
    if target_method.visibility != Visibility::Public {
        sink.report(Diagnostic::new(
            location,
            DiagnosticKind::NonPublicTargetMethod,
        ));
    }
}

fn mismatch_detail(declared: &TypeRef, expected: &TypeRef) -> String {
    format!(
        "declared '{}', expected '{}'",
        declared.display_name(),
        expected.display_name()
    )
}
