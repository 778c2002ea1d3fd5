use std::fmt;

/// Problems found while resolving properties, accumulated for later
/// reporting.
///
/// Resolution never aborts: a property with a problem degrades to a
/// placeholder or is skipped, and a diagnostic is recorded against it.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,

    /// `Class::property` or `Class` the diagnostic is recorded against.
    pub subject: String,

    pub message: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// No map entry and the value type is not a class of the model.
    UnmappedValueType,

    /// A map entry applies but has no target type.
    MissingTargetKind,

    /// A class has more than one identifier property.
    MultipleIdentifiers,

    /// The table or identifier a reference needs is not available.
    UnresolvableReference,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    pub fn error(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Error, kind, subject.into(), message.into());
    }

    pub fn warning(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Warning, kind, subject.into(), message.into());
    }

    fn push(&mut self, severity: Severity, kind: DiagnosticKind, subject: String, message: String) {
        match severity {
            Severity::Warning => tracing::warn!(?kind, %subject, "{message}"),
            Severity::Error => tracing::error!(?kind, %subject, "{message}"),
        }

        self.entries.push(Diagnostic {
            severity,
            kind,
            subject,
            message,
        });
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Diagnostic> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    /// Number of diagnostics of `kind`.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    /// Diagnostics recorded against `subject`.
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.subject == subject)
    }

    /// Moves every diagnostic of `other` into `self`, keeping order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        write!(f, "{severity}[{:?}] {}: {}", self.kind, self.subject, self.message)
    }
}
