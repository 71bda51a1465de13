//! Two-tier type compatibility.
//!
//! The strict tier decides whether a declared type is a structurally legal
//! substitute for the expected type (failure is an error). The advisory
//! tier separately flags legal-but-suspicious widenings (failure is a weak
//! warning). The two tiers are intentionally asymmetric: a substitution the
//! strict tier accepts can still be flagged by the advisory tier for the
//! same direction of widening.

use crate::error::Result;
use crate::hierarchy::TypeHierarchy;
use weavecheck_api::models::TypeRef;

/// Strict compatibility: is `actual` a legal substitute for `expected`?
///
/// Rules fire in order; the first match decides. Unannotated slots are an
/// escape hatch, and names the index cannot resolve count as mismatches
/// (false positives over silent gaps).
pub fn is_compatible(
    hierarchy: &mut TypeHierarchy<'_>,
    expected: &TypeRef,
    actual: &TypeRef,
) -> Result<bool> {
    if expected.is_unannotated() || actual.is_unannotated() {
        return Ok(true);
    }
    if expected == actual {
        return Ok(true);
    }
    // A class where a primitive/builtin is expected can never match.
    if matches!(expected, TypeRef::Raw(_)) && matches!(actual, TypeRef::Id(_)) {
        return Ok(false);
    }

    let Some(exp) = hierarchy.ensure_loaded(expected.display_name())? else {
        return Ok(false);
    };
    let Some(act) = hierarchy.ensure_loaded(actual.display_name())? else {
        return Ok(false);
    };

    // Actual is a broader interface the expected type satisfies.
    if hierarchy.is_interface(act) && hierarchy.implements_interface(exp, act) {
        return Ok(true);
    }
    if exp == act || hierarchy.info(exp).fqn == hierarchy.info(act).fqn {
        return Ok(true);
    }
    // Contravariant widening: the interceptor may declare a broader type.
    if hierarchy.is_ancestor(exp, act) {
        return Ok(true);
    }
    if hierarchy.is_interface(exp) && hierarchy.implements_interface(act, exp) {
        return Ok(true);
    }
    // Covariant narrowing is tolerated as well.
    if hierarchy.is_ancestor(act, exp) {
        return Ok(true);
    }

    Ok(false)
}

/// Advisory compatibility: should a structurally legal substitution still be
/// flagged as suspicious?
///
/// Returns `false` (flag) when the declared type is broader than what the
/// target truly requires: the interceptor could receive an argument that
/// does not satisfy the narrower expected type at the call site. With
/// insufficient information (unannotated or unresolvable) nothing is
/// flagged.
pub fn is_probably_compatible(
    hierarchy: &mut TypeHierarchy<'_>,
    expected: &TypeRef,
    actual: &TypeRef,
) -> Result<bool> {
    if expected.is_unannotated() || actual.is_unannotated() {
        return Ok(true);
    }
    let Some(exp) = hierarchy.ensure_loaded(expected.display_name())? else {
        return Ok(true);
    };
    let Some(act) = hierarchy.ensure_loaded(actual.display_name())? else {
        return Ok(true);
    };

    if hierarchy.is_ancestor(act, exp) {
        return Ok(false);
    }
    if hierarchy.is_interface(exp) && hierarchy.implements_interface(act, exp) {
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InMemoryTypeIndex;

    fn index() -> InMemoryTypeIndex {
        InMemoryTypeIndex::new()
            .with_interface("app.RepositoryInterface")
            .with_class("app.AbstractRepository", None)
            .implements("app.AbstractRepository", "app.RepositoryInterface")
            .with_class("app.ProductRepository", Some("app.AbstractRepository"))
            .with_class("app.Unrelated", None)
    }

    #[test]
    fn textual_identity_short_circuits_resolution() {
        let idx = InMemoryTypeIndex::new();
        let mut h = TypeHierarchy::new(&idx);
        // Neither name resolves, yet identity alone is compatible.
        let t = TypeRef::id("app.NotIndexed");
        assert!(is_compatible(&mut h, &t, &t).unwrap());
        assert!(is_compatible(&mut h, &TypeRef::raw("int"), &TypeRef::raw("int")).unwrap());
    }

    #[test]
    fn unannotated_is_an_escape_hatch_in_both_tiers() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let any = TypeRef::Unannotated;
        let concrete = TypeRef::id("app.ProductRepository");
        assert!(is_compatible(&mut h, &any, &concrete).unwrap());
        assert!(is_compatible(&mut h, &concrete, &any).unwrap());
        assert!(is_probably_compatible(&mut h, &any, &concrete).unwrap());
        assert!(is_probably_compatible(&mut h, &concrete, &any).unwrap());
    }

    #[test]
    fn class_against_primitive_expectation_is_rejected() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::raw("string");
        let actual = TypeRef::id("app.ProductRepository");
        assert!(!is_compatible(&mut h, &expected, &actual).unwrap());
    }

    #[test]
    fn unresolvable_names_are_strict_mismatches_but_not_flagged() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::id("app.ProductRepository");
        let actual = TypeRef::id("app.Vanished");
        assert!(!is_compatible(&mut h, &expected, &actual).unwrap());
        assert!(is_probably_compatible(&mut h, &expected, &actual).unwrap());
    }

    #[test]
    fn widening_to_superclass_is_legal_and_flagged() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::id("app.ProductRepository");
        let actual = TypeRef::id("app.AbstractRepository");
        // actual is an ancestor of expected: legal in the strict tier,
        // flagged in the advisory tier. Both assertions matter.
        assert!(is_compatible(&mut h, &expected, &actual).unwrap());
        assert!(!is_probably_compatible(&mut h, &expected, &actual).unwrap());
    }

    #[test]
    fn narrowing_to_subclass_is_legal_and_not_flagged() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::id("app.AbstractRepository");
        let actual = TypeRef::id("app.ProductRepository");
        assert!(is_compatible(&mut h, &expected, &actual).unwrap());
        assert!(is_probably_compatible(&mut h, &expected, &actual).unwrap());
    }

    #[test]
    fn interface_expectation_satisfied_by_implementor_is_flagged_only_by_advisory() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::id("app.RepositoryInterface");
        let actual = TypeRef::id("app.ProductRepository");
        assert!(is_compatible(&mut h, &expected, &actual).unwrap());
        assert!(!is_probably_compatible(&mut h, &expected, &actual).unwrap());
    }

    #[test]
    fn interface_declared_where_implementor_expected_is_legal_unflagged() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::id("app.ProductRepository");
        let actual = TypeRef::id("app.RepositoryInterface");
        assert!(is_compatible(&mut h, &expected, &actual).unwrap());
        assert!(is_probably_compatible(&mut h, &expected, &actual).unwrap());
    }

    #[test]
    fn unrelated_types_fail_the_strict_tier() {
        let idx = index();
        let mut h = TypeHierarchy::new(&idx);
        let expected = TypeRef::id("app.ProductRepository");
        let actual = TypeRef::id("app.Unrelated");
        assert!(!is_compatible(&mut h, &expected, &actual).unwrap());
        assert!(is_probably_compatible(&mut h, &expected, &actual).unwrap());
    }
}
