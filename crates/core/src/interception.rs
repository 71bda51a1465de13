//! Classification of interceptor methods by name.
//!
//! An interceptor method is named `<prefix><CapitalizedTargetName>` where
//! the prefix is one of `before`, `after`, `around`. Anything else in the
//! interceptor type is ordinary code and is skipped silently.

use weavecheck_api::models::{InterceptionKind, MethodInfo};

/// Prefixes in detection order. `around` and `before` are tested before any
/// other matching; first match wins.
const PREFIX_ORDER: [InterceptionKind; 3] = [
    InterceptionKind::Around,
    InterceptionKind::Before,
    InterceptionKind::After,
];

/// The generic callable type an around interceptor's proceed parameter may
/// be declared as.
pub const CALLABLE_TYPE: &str = "callable";
/// The closure/function-reference class accepted in the same position.
pub const CLOSURE_FQN: &str = "Closure";

/// An interceptor method as classified by its name: which kind of
/// interception it performs and which target method it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorMethod {
    pub kind: InterceptionKind,
    pub target_method_name: String,
}

impl InterceptorMethod {
    /// Classify a method by name. `None` means the method is not a valid
    /// interceptor: no prefix matched, or the post-prefix remainder starts
    /// with a lowercase letter.
    pub fn classify(method: &MethodInfo) -> Option<InterceptorMethod> {
        let kind = detect_kind(&method.name)?;
        let target_method_name = target_method_name(&method.name, kind)?;
        Some(InterceptorMethod {
            kind,
            target_method_name,
        })
    }
}

/// Match the method name against the interception prefixes, in order.
pub fn detect_kind(method_name: &str) -> Option<InterceptionKind> {
    PREFIX_ORDER
        .into_iter()
        .find(|kind| method_name.starts_with(kind.prefix()))
}

/// Derive the target method name: strip the prefix and lowercase the first
/// character of the remainder. The convention requires the remainder to
/// start with an uppercase letter; a lowercase start means the name is not
/// an interceptor method at all.
pub fn target_method_name(method_name: &str, kind: InterceptionKind) -> Option<String> {
    let remainder = method_name.strip_prefix(kind.prefix())?;
    let first = remainder.chars().next()?;
    if first.is_lowercase() {
        return None;
    }
    let mut name = String::with_capacity(remainder.len());
    name.extend(first.to_lowercase());
    name.push_str(&remainder[first.len_utf8()..]);
    Some(name)
}
