use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contract violations the checker can report.
///
/// These are analysis findings, never exceptions: each one maps to a broken
/// rule of the interception contract, with a fixed default severity.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub enum DiagnosticKind {
    /// The intercepted class is declared final
    FinalTargetClass,
    /// The interceptor targets the constructor
    ConstructorIntercepted,
    /// The intercepted method is declared final
    FinalTargetMethod,
    /// The intercepted method is static
    StaticTargetMethod,
    /// The intercepted method is not public
    NonPublicTargetMethod,
    /// Declared parameter type fails the strict compatibility check
    ParameterTypeMismatch,
    /// Declared parameter type is legal but suspiciously wide
    ParameterTypePossibleMismatch,
    /// Interceptor parameter with no corresponding target parameter
    RedundantParameter,
    /// Around interceptor whose second parameter is not callable
    InvalidCallableParameter,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::ParameterTypePossibleMismatch => Severity::WeakWarning,
            _ => Severity::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            DiagnosticKind::FinalTargetClass => "cannot intercept a final class",
            DiagnosticKind::ConstructorIntercepted => "cannot intercept a constructor",
            DiagnosticKind::FinalTargetMethod => "cannot intercept a final method",
            DiagnosticKind::StaticTargetMethod => "cannot intercept a static method",
            DiagnosticKind::NonPublicTargetMethod => "cannot intercept a non-public method",
            DiagnosticKind::ParameterTypeMismatch => "wrong parameter type",
            DiagnosticKind::ParameterTypePossibleMismatch => {
                "declared type may not satisfy the intercepted signature"
            }
            DiagnosticKind::RedundantParameter => {
                "parameter has no counterpart in the intercepted method"
            }
            DiagnosticKind::InvalidCallableParameter => {
                "second parameter of an around interceptor must be callable"
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    WeakWarning,
}

/// Source element a finding attaches to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "at", rename_all = "lowercase")]
pub enum Location {
    /// The interceptor class-name token
    ClassName { class: String },
    /// The interceptor method-name token
    MethodName { class: String, method: String },
    /// An interceptor method parameter (1-based position)
    Parameter {
        class: String,
        method: String,
        position: usize,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct Diagnostic {
    pub location: Location,
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Extra context, e.g. the declared vs. expected type on a mismatch
    pub detail: Option<String>,
}

impl Diagnostic {
    /// Build a diagnostic with the kind's default severity.
    pub fn new(location: Location, kind: DiagnosticKind) -> Self {
        Self {
            location,
            kind,
            severity: kind.severity(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
