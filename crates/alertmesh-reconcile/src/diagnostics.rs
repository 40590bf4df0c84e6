//! Operation diagnostics.
//!
//! Reconciliation operations never bail on the first remote failure; they
//! collect problem reports and let the caller decide whether to halt. A
//! single operation may therefore carry several diagnostics (a failed
//! content update followed by a failed toggle, for example).

/// Classification of a reconciliation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// The remote system has no entity for the given key.
    NotFound,
    /// A write-once field differs between state and plan; no remote call
    /// was made.
    ImmutableFieldViolation,
    /// The remote rejected a call; carries the remote error text.
    RemoteRejected,
    /// A replacement's create failed after its delete succeeded; the prior
    /// entity is gone.
    PartialReplacementFailure,
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemKind::NotFound => write!(f, "not found"),
            ProblemKind::ImmutableFieldViolation => write!(f, "immutable field violation"),
            ProblemKind::RemoteRejected => write!(f, "remote rejected"),
            ProblemKind::PartialReplacementFailure => write!(f, "partial replacement failure"),
        }
    }
}

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation did not converge.
    Error,
    /// The operation converged but something deserves attention.
    Warning,
}

/// A single problem report attached to an operation's result.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: ProblemKind,
    pub severity: Severity,
    /// One-line statement of what went wrong.
    pub summary: String,
    /// Underlying detail, typically the remote error text.
    pub detail: String,
}

impl Diagnostic {
    /// Create an error-severity diagnostic.
    pub fn error(kind: ProblemKind, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(
        kind: ProblemKind,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.kind, self.summary, self.detail)
    }
}

/// Ordered collection of diagnostics for one operation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Whether any error-severity diagnostic was collected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Whether any diagnostic of the given kind was collected.
    #[must_use]
    pub fn contains(&self, kind: ProblemKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// Join every diagnostic into one text block, one per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(Diagnostic::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
